use crate::abstract_trait::OrderServiceTrait;
use async_trait::async_trait;
use opentelemetry::KeyValue;
use shared::{
    abstract_trait::{DynOrderCommandRepository, DynOrderQueryRepository, DynProductQueryRepository},
    domain::{
        requests::{CreateOrderRequest, FindAllOrders, NewOrder, NewOrderItem},
        responses::{
            ApiResponse, ApiResponsePagination, OrderDetailResponse, OrderItemResponse,
            OrderResponse, Pagination,
        },
    },
    errors::ServiceError,
    utils::{Method, Metrics, RequestTracer},
};
use std::collections::HashMap;

/// Checkout and order tracking. Catalog prices are frozen into the order
/// items at creation time, and the order total is the fold over those
/// frozen prices, never a client-supplied figure.
pub struct OrderService {
    product_query: DynProductQueryRepository,
    order_query: DynOrderQueryRepository,
    order_command: DynOrderCommandRepository,
    metrics: Metrics,
}

pub struct OrderServiceDeps {
    pub product_query: DynProductQueryRepository,
    pub order_query: DynOrderQueryRepository,
    pub order_command: DynOrderCommandRepository,
    pub metrics: Metrics,
}

impl OrderService {
    pub fn new(deps: OrderServiceDeps) -> Self {
        let OrderServiceDeps {
            product_query,
            order_query,
            order_command,
            metrics,
        } = deps;

        Self {
            product_query,
            order_query,
            order_command,
            metrics,
        }
    }
}

impl RequestTracer for OrderService {
    fn tracer_name(&self) -> &'static str {
        "order-service"
    }

    fn request_metrics(&self) -> &Metrics {
        &self.metrics
    }
}

#[async_trait]
impl OrderServiceTrait for OrderService {
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError> {
        let (orders, total_items) = self.order_query.find_all(req).await?;

        Ok(ApiResponsePagination {
            status: "success".into(),
            message: "Orders retrieved successfully".into(),
            data: orders.into_iter().map(Into::into).collect(),
            pagination: Pagination::new(req.page, req.page_size, total_items),
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<OrderDetailResponse>, ServiceError> {
        let order = self.order_query.find_by_id(id).await?;
        let items = self.order_query.find_items(id).await?;

        Ok(ApiResponse::success(
            "Order retrieved successfully",
            OrderDetailResponse {
                order: order.into(),
                items: items.into_iter().map(Into::into).collect(),
            },
        ))
    }

    async fn create_order(
        &self,
        visitor_id: Option<&str>,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError> {
        let tracing_ctx = self.start_tracing(
            "CreateOrder",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("item_count", req.items.len().to_string()),
            ],
        );

        let ids: Vec<i32> = req.items.iter().map(|item| item.product_id).collect();
        let products = match self.product_query.find_by_ids(&ids).await {
            Ok(products) => products,
            Err(err) => {
                self.complete_tracing_error(&tracing_ctx, Method::Post, "Catalog lookup failed");
                return Err(err.into());
            }
        };

        let by_id: HashMap<i32, _> = products
            .into_iter()
            .map(|product| (product.product_id, product))
            .collect();

        let missing: Vec<String> = ids
            .iter()
            .filter(|&&id| !by_id.contains_key(&id))
            .map(|id| format!("Unknown product: {id}"))
            .collect();

        if !missing.is_empty() {
            self.complete_tracing_error(
                &tracing_ctx,
                Method::Post,
                &format!("Rejected order with {} unknown products", missing.len()),
            );
            return Err(ServiceError::Validation(missing));
        }

        let items: Vec<NewOrderItem> = req
            .items
            .iter()
            .map(|item| {
                let product = &by_id[&item.product_id];
                NewOrderItem {
                    product_id: product.product_id,
                    name: product.name.clone(),
                    price: product.price,
                    quantity: item.quantity,
                }
            })
            .collect();

        let total = items
            .iter()
            .map(|item| item.price * item.quantity as i64)
            .sum();

        let new_order = NewOrder {
            email: req.email.clone(),
            customer_name: req.customer_name.clone(),
            visitor_id: visitor_id.map(str::to_string),
            total,
            items,
        };

        let created = match self.order_command.create_order(&new_order).await {
            Ok(order) => order,
            Err(err) => {
                self.complete_tracing_error(&tracing_ctx, Method::Post, "Order insert failed");
                return Err(err.into());
            }
        };

        let items = self.order_query.find_items(created.order_id).await?;

        self.complete_tracing_success(
            &tracing_ctx,
            Method::Post,
            &format!("Created order {}", created.order_id),
        );

        Ok(ApiResponse::success(
            "Order created successfully",
            OrderDetailResponse {
                order: created.into(),
                items: items.into_iter().map(Into::into).collect(),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{
        abstract_trait::{
            OrderCommandRepositoryTrait, OrderQueryRepositoryTrait, ProductQueryRepositoryTrait,
        },
        domain::requests::{CreateOrderItemRequest, FindAllProducts},
        errors::RepositoryError,
        model::{Order, OrderItem, Product},
        payment::PaymentStatus,
    };
    use std::sync::{Arc, Mutex};

    fn product(product_id: i32, price: i64) -> Product {
        Product {
            product_id,
            name: format!("product-{product_id}"),
            description: String::new(),
            category: "consumables".into(),
            price,
            image_url: None,
            inventory: 10,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    struct StubProductQuery {
        products: Vec<Product>,
    }

    #[async_trait]
    impl ProductQueryRepositoryTrait for StubProductQuery {
        async fn find_all(
            &self,
            _req: &FindAllProducts,
        ) -> Result<(Vec<Product>, i64), RepositoryError> {
            Ok((self.products.clone(), self.products.len() as i64))
        }

        async fn find_by_id(&self, id: i32) -> Result<Product, RepositoryError> {
            self.products
                .iter()
                .find(|p| p.product_id == id)
                .cloned()
                .ok_or(RepositoryError::NotFound)
        }

        async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Product>, RepositoryError> {
            Ok(self
                .products
                .iter()
                .filter(|p| ids.contains(&p.product_id))
                .cloned()
                .collect())
        }
    }

    #[derive(Default)]
    struct RecordingRepo {
        created: Mutex<Vec<NewOrder>>,
    }

    #[async_trait]
    impl OrderCommandRepositoryTrait for RecordingRepo {
        async fn create_order(&self, order: &NewOrder) -> Result<Order, RepositoryError> {
            self.created.lock().unwrap().push(order.clone());

            Ok(Order {
                order_id: 1,
                email: order.email.clone(),
                customer_name: order.customer_name.clone(),
                visitor_id: order.visitor_id.clone(),
                total: order.total,
                payment_method: None,
                payment_reference: None,
                payment_status: PaymentStatus::Pending.as_str().into(),
                created_at: None,
                updated_at: None,
            })
        }

        async fn record_payment_attempt(
            &self,
            _order_id: i32,
            _payment_method: &str,
            _reference: &str,
        ) -> Result<Order, RepositoryError> {
            unreachable!("not exercised by checkout")
        }
    }

    #[async_trait]
    impl OrderQueryRepositoryTrait for RecordingRepo {
        async fn find_all(
            &self,
            _req: &FindAllOrders,
        ) -> Result<(Vec<Order>, i64), RepositoryError> {
            Ok((vec![], 0))
        }

        async fn find_by_id(&self, _id: i32) -> Result<Order, RepositoryError> {
            Err(RepositoryError::NotFound)
        }

        async fn find_items(&self, order_id: i32) -> Result<Vec<OrderItem>, RepositoryError> {
            Ok(self
                .created
                .lock()
                .unwrap()
                .iter()
                .flat_map(|order| order.items.clone())
                .enumerate()
                .map(|(i, item)| OrderItem {
                    order_item_id: i as i32 + 1,
                    order_id,
                    product_id: item.product_id,
                    name: item.name,
                    price: item.price,
                    quantity: item.quantity,
                    created_at: None,
                })
                .collect())
        }
    }

    fn checkout_request(items: Vec<CreateOrderItemRequest>) -> CreateOrderRequest {
        CreateOrderRequest {
            email: "jane@example.com".into(),
            customer_name: "Jane Doe".into(),
            items,
        }
    }

    #[tokio::test]
    async fn checkout_freezes_catalog_prices_and_computes_the_total() {
        let repo = Arc::new(RecordingRepo::default());
        let svc = OrderService::new(OrderServiceDeps {
            product_query: Arc::new(StubProductQuery {
                products: vec![product(1, 2_500), product(2, 800)],
            }),
            order_query: repo.clone(),
            order_command: repo.clone(),
            metrics: Metrics::new(),
        });

        let response = svc
            .create_order(
                Some("v-1"),
                &checkout_request(vec![
                    CreateOrderItemRequest {
                        product_id: 1,
                        quantity: 3,
                    },
                    CreateOrderItemRequest {
                        product_id: 2,
                        quantity: 2,
                    },
                ]),
            )
            .await
            .unwrap();

        assert_eq!(response.data.order.total, 3 * 2_500 + 2 * 800);
        assert_eq!(response.data.items.len(), 2);
        assert_eq!(response.data.order.payment_status, "PENDING");

        let created = repo.created.lock().unwrap();
        assert_eq!(created[0].items[0].name, "product-1");
        assert_eq!(created[0].items[0].price, 2_500);
        assert_eq!(created[0].visitor_id.as_deref(), Some("v-1"));
    }

    #[tokio::test]
    async fn checkout_rejects_unknown_products_without_creating_anything() {
        let repo = Arc::new(RecordingRepo::default());
        let svc = OrderService::new(OrderServiceDeps {
            product_query: Arc::new(StubProductQuery {
                products: vec![product(1, 2_500)],
            }),
            order_query: repo.clone(),
            order_command: repo.clone(),
            metrics: Metrics::new(),
        });

        let result = svc
            .create_order(
                None,
                &checkout_request(vec![CreateOrderItemRequest {
                    product_id: 99,
                    quantity: 1,
                }]),
            )
            .await;

        assert!(matches!(result, Err(ServiceError::Validation(_))));
        assert!(repo.created.lock().unwrap().is_empty());
    }
}
