use crate::abstract_trait::{CartServiceTrait, DynCartStore};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use shared::{
    abstract_trait::DynProductQueryRepository,
    cart::{Cart, CartLine},
    domain::{
        requests::{AddCartItemRequest, UpdateCartQuantityRequest},
        responses::ApiResponse,
    },
    errors::ServiceError,
    utils::{Method, Metrics, RequestTracer},
};

/// Load, mutate, persist: every cart operation rehydrates the visitor's
/// cart from its slot, applies the change and writes the whole state
/// back, so the stored cart is always the fold of its operations.
pub struct CartService {
    product_query: DynProductQueryRepository,
    store: DynCartStore,
    metrics: Metrics,
}

impl CartService {
    pub fn new(product_query: DynProductQueryRepository, store: DynCartStore, metrics: Metrics) -> Self {
        Self {
            product_query,
            store,
            metrics,
        }
    }
}

impl RequestTracer for CartService {
    fn tracer_name(&self) -> &'static str {
        "cart-service"
    }

    fn request_metrics(&self) -> &Metrics {
        &self.metrics
    }
}

#[async_trait]
impl CartServiceTrait for CartService {
    async fn get_cart(&self, visitor_id: &str) -> Result<ApiResponse<Cart>, ServiceError> {
        let cart = self.store.load(visitor_id).await;
        Ok(ApiResponse::success("Cart retrieved successfully", cart))
    }

    async fn add_item(
        &self,
        visitor_id: &str,
        req: &AddCartItemRequest,
    ) -> Result<ApiResponse<Cart>, ServiceError> {
        let tracing_ctx = self.start_tracing(
            "AddCartItem",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("product_id", req.product_id.to_string()),
            ],
        );

        // The cart line is built server-side from the catalog row; the
        // client only ever names a product and a quantity.
        let product = match self.product_query.find_by_id(req.product_id).await {
            Ok(product) => product,
            Err(err) => {
                self.complete_tracing_error(
                    &tracing_ctx,
                    Method::Post,
                    &format!("Product {} not found", req.product_id),
                );
                return Err(err.into());
            }
        };

        let mut cart = self.store.load(visitor_id).await;
        cart.add_line(CartLine {
            product_id: product.product_id,
            name: product.name,
            image_url: product.image_url,
            price: product.price,
            quantity: req.quantity,
            inventory: Some(product.inventory),
        });
        self.store.save(visitor_id, &cart).await;

        self.complete_tracing_success(
            &tracing_ctx,
            Method::Post,
            &format!("Added product {} to cart", req.product_id),
        );

        Ok(ApiResponse::success("Item added to cart", cart))
    }

    async fn update_quantity(
        &self,
        visitor_id: &str,
        product_id: i32,
        req: &UpdateCartQuantityRequest,
    ) -> Result<ApiResponse<Cart>, ServiceError> {
        // Explicit precondition: quantity replacement never goes below 1.
        // Removal is its own operation.
        if req.quantity < 1 {
            return Err(ServiceError::Validation(vec![
                "Quantity must be at least 1".into(),
            ]));
        }

        let mut cart = self.store.load(visitor_id).await;
        cart.set_quantity(product_id, req.quantity);
        self.store.save(visitor_id, &cart).await;

        Ok(ApiResponse::success("Cart quantity updated", cart))
    }

    async fn remove_item(
        &self,
        visitor_id: &str,
        product_id: i32,
    ) -> Result<ApiResponse<Cart>, ServiceError> {
        let mut cart = self.store.load(visitor_id).await;
        cart.remove_line(product_id);
        self.store.save(visitor_id, &cart).await;

        Ok(ApiResponse::success("Item removed from cart", cart))
    }

    async fn clear_cart(&self, visitor_id: &str) -> Result<ApiResponse<Cart>, ServiceError> {
        self.store.clear(visitor_id).await;

        Ok(ApiResponse::success("Cart cleared", Cart::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::CartStoreTrait;
    use shared::{
        abstract_trait::ProductQueryRepositoryTrait,
        domain::requests::FindAllProducts,
        errors::RepositoryError,
        model::Product,
    };
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    struct StubProductQuery {
        products: Vec<Product>,
    }

    fn product(product_id: i32, price: i64) -> Product {
        Product {
            product_id,
            name: format!("product-{product_id}"),
            description: String::new(),
            category: "diagnostics".into(),
            price,
            image_url: None,
            inventory: 50,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
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

    /// In-memory stand-in for the redis slot, with an optional poisoned
    /// read to exercise the fails-open contract.
    #[derive(Default)]
    struct MemoryCartStore {
        slots: Mutex<HashMap<String, Cart>>,
        fail_reads: bool,
    }

    #[async_trait]
    impl CartStoreTrait for MemoryCartStore {
        async fn load(&self, visitor_id: &str) -> Cart {
            if self.fail_reads {
                // A broken backend reads as an empty cart, never an error.
                return Cart::new();
            }
            self.slots
                .lock()
                .unwrap()
                .get(visitor_id)
                .cloned()
                .unwrap_or_default()
        }

        async fn save(&self, visitor_id: &str, cart: &Cart) {
            self.slots
                .lock()
                .unwrap()
                .insert(visitor_id.to_string(), cart.clone());
        }

        async fn clear(&self, visitor_id: &str) {
            self.slots.lock().unwrap().remove(visitor_id);
        }
    }

    fn service(products: Vec<Product>, store: Arc<MemoryCartStore>) -> CartService {
        CartService::new(
            Arc::new(StubProductQuery { products }),
            store,
            Metrics::new(),
        )
    }

    #[tokio::test]
    async fn every_mutation_persists_the_full_cart_state() {
        let store = Arc::new(MemoryCartStore::default());
        let svc = service(vec![product(1, 2_500), product(2, 800)], store.clone());

        svc.add_item(
            "v-1",
            &AddCartItemRequest {
                product_id: 1,
                quantity: 2,
            },
        )
        .await
        .unwrap();

        svc.add_item(
            "v-1",
            &AddCartItemRequest {
                product_id: 2,
                quantity: 1,
            },
        )
        .await
        .unwrap();

        let stored = store.load("v-1").await;
        assert_eq!(stored.items.len(), 2);
        assert_eq!(stored.total_items, 3);
        assert_eq!(stored.subtotal, 2 * 2_500 + 800);
    }

    #[tokio::test]
    async fn adding_an_unknown_product_is_rejected_and_leaves_the_slot_alone() {
        let store = Arc::new(MemoryCartStore::default());
        let svc = service(vec![product(1, 2_500)], store.clone());

        let result = svc
            .add_item(
                "v-1",
                &AddCartItemRequest {
                    product_id: 99,
                    quantity: 1,
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(ServiceError::Repo(RepositoryError::NotFound))
        ));
        assert!(store.load("v-1").await.is_empty());
    }

    #[tokio::test]
    async fn update_quantity_rejects_non_positive_values() {
        let store = Arc::new(MemoryCartStore::default());
        let svc = service(vec![product(1, 2_500)], store.clone());

        svc.add_item(
            "v-1",
            &AddCartItemRequest {
                product_id: 1,
                quantity: 2,
            },
        )
        .await
        .unwrap();

        for bad in [0, -3] {
            let result = svc
                .update_quantity("v-1", 1, &UpdateCartQuantityRequest { quantity: bad })
                .await;
            assert!(matches!(result, Err(ServiceError::Validation(_))));
        }

        // The stored cart still has the original quantity.
        assert_eq!(store.load("v-1").await.items[0].quantity, 2);
    }

    #[tokio::test]
    async fn removing_an_absent_item_still_persists_an_unchanged_cart() {
        let store = Arc::new(MemoryCartStore::default());
        let svc = service(vec![product(1, 2_500)], store.clone());

        svc.add_item(
            "v-1",
            &AddCartItemRequest {
                product_id: 1,
                quantity: 2,
            },
        )
        .await
        .unwrap();

        let before = store.load("v-1").await;
        let response = svc.remove_item("v-1", 42).await.unwrap();

        assert_eq!(response.data, before);
        assert_eq!(store.load("v-1").await, before);
    }

    #[tokio::test]
    async fn clearing_empties_the_visitor_slot() {
        let store = Arc::new(MemoryCartStore::default());
        let svc = service(vec![product(1, 2_500)], store.clone());

        svc.add_item(
            "v-1",
            &AddCartItemRequest {
                product_id: 1,
                quantity: 2,
            },
        )
        .await
        .unwrap();

        let response = svc.clear_cart("v-1").await.unwrap();

        assert!(response.data.is_empty());
        assert_eq!(response.data.total_items, 0);
        assert_eq!(response.data.subtotal, 0);
        assert!(store.load("v-1").await.is_empty());
    }

    #[tokio::test]
    async fn carts_are_isolated_per_visitor() {
        let store = Arc::new(MemoryCartStore::default());
        let svc = service(vec![product(1, 2_500)], store.clone());

        svc.add_item(
            "v-1",
            &AddCartItemRequest {
                product_id: 1,
                quantity: 2,
            },
        )
        .await
        .unwrap();

        let other = svc.get_cart("v-2").await.unwrap();
        assert!(other.data.is_empty());
    }

    #[tokio::test]
    async fn unreadable_slots_fall_back_to_the_empty_cart() {
        let store = Arc::new(MemoryCartStore {
            slots: Mutex::new(HashMap::new()),
            fail_reads: true,
        });
        let svc = service(vec![product(1, 2_500)], store);

        let response = svc.get_cart("v-1").await.unwrap();
        assert!(response.data.is_empty());
    }
}
