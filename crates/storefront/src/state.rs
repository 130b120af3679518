use crate::{
    abstract_trait::DynCartStore,
    cache::CartStore,
    di::{DependenciesInject, DependenciesInjectDeps, PaymentGateways},
    gateway::{FlutterwaveCardGateway, FlutterwaveMomoGateway, PesapalGateway, build_http_client},
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    cache::CacheStore,
    config::{Config, ConnectionPool},
    utils::{SystemMetrics, run_metrics_collector},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl AppState {
    pub async fn new(db_pool: ConnectionPool, config: &Config) -> Result<Self> {
        let mut registry = Registry::default();
        let system_metrics = Arc::new(SystemMetrics::new());
        system_metrics.register(&mut registry);

        info!("Initializing Redis connection for cart storage");
        let redis_pool = config
            .redis
            .create_pool()
            .context("Failed to create Redis pool")?;

        let mut conn = redis_pool
            .get()
            .await
            .context("Failed to connect to Redis")?;
        redis::cmd("PING")
            .query_async::<()>(&mut conn)
            .await
            .context("Failed to ping Redis server")?;
        drop(conn);

        let cart_store = Arc::new(CartStore::new(CacheStore::new(redis_pool))) as DynCartStore;

        let http = build_http_client(config.payment.request_timeout_secs)?;

        let gateways = PaymentGateways {
            mobile_money: Arc::new(FlutterwaveMomoGateway::new(
                http.clone(),
                config.payment.mobile_money.base_url.clone(),
                config.payment.mobile_money.secret_key.clone(),
            )),
            card: Arc::new(FlutterwaveCardGateway::new(
                http.clone(),
                config.payment.mobile_money.base_url.clone(),
                config.payment.mobile_money.secret_key.clone(),
            )),
            aggregator: Arc::new(PesapalGateway::new(
                http,
                config.payment.aggregator.base_url.clone(),
                config.payment.aggregator.consumer_key.clone(),
                config.payment.aggregator.consumer_secret.clone(),
            )),
        };

        let di_container = DependenciesInject::new(
            DependenciesInjectDeps {
                pool: db_pool,
                cart_store,
                gateways,
                callback_url: config.payment.callback_url.clone(),
                currency: config.currency.clone(),
            },
            &mut registry,
        );

        tokio::spawn(run_metrics_collector(system_metrics.clone()));

        Ok(Self {
            di_container,
            registry: Arc::new(Mutex::new(registry)),
            system_metrics,
        })
    }
}
