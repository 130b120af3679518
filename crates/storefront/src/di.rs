use crate::{
    abstract_trait::{
        DynCartService, DynCartStore, DynOrderService, DynPaymentGateway, DynPaymentService,
        DynProductService,
    },
    service::{
        CartService, OrderService, OrderServiceDeps, PaymentService, PaymentServiceDeps,
        ProductService,
    },
};
use prometheus_client::registry::Registry;
use shared::{
    config::ConnectionPool,
    repository::{OrderRepository, ProductRepository},
    utils::Metrics,
};
use std::sync::Arc;

pub struct PaymentGateways {
    pub mobile_money: DynPaymentGateway,
    pub card: DynPaymentGateway,
    pub aggregator: DynPaymentGateway,
}

pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
    pub cart_store: DynCartStore,
    pub gateways: PaymentGateways,
    pub callback_url: String,
    pub currency: String,
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub cart_service: DynCartService,
    pub product_service: DynProductService,
    pub order_service: DynOrderService,
    pub payment_service: DynPaymentService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("cart_service", &"DynCartService")
            .field("product_service", &"DynProductService")
            .field("order_service", &"DynOrderService")
            .field("payment_service", &"DynPaymentService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps {
            pool,
            cart_store,
            gateways,
            callback_url,
            currency,
        } = deps;

        let product_repo = ProductRepository::new(pool.clone());
        let order_repo = OrderRepository::new(pool);

        let cart_metrics = Metrics::new();
        cart_metrics.register(registry, "cart_service");

        let product_metrics = Metrics::new();
        product_metrics.register(registry, "product_service");

        let order_metrics = Metrics::new();
        order_metrics.register(registry, "order_service");

        let payment_metrics = Metrics::new();
        payment_metrics.register(registry, "payment_service");

        let cart_service = Arc::new(CartService::new(
            product_repo.query.clone(),
            cart_store,
            cart_metrics,
        )) as DynCartService;

        let product_service = Arc::new(ProductService::new(
            product_repo.query.clone(),
            product_repo.command.clone(),
            product_metrics,
        )) as DynProductService;

        let order_service = Arc::new(OrderService::new(OrderServiceDeps {
            product_query: product_repo.query.clone(),
            order_query: order_repo.query.clone(),
            order_command: order_repo.command.clone(),
            metrics: order_metrics,
        })) as DynOrderService;

        let payment_service = Arc::new(PaymentService::new(PaymentServiceDeps {
            order_query: order_repo.query.clone(),
            order_command: order_repo.command.clone(),
            mobile_money: gateways.mobile_money,
            card: gateways.card,
            aggregator: gateways.aggregator,
            callback_url,
            default_currency: currency,
            metrics: payment_metrics,
        })) as DynPaymentService;

        Self {
            cart_service,
            product_service,
            order_service,
            payment_service,
        }
    }
}
