use async_trait::async_trait;
use shared::{
    cart::Cart,
    domain::{
        requests::{AddCartItemRequest, UpdateCartQuantityRequest},
        responses::ApiResponse,
    },
    errors::ServiceError,
};
use std::sync::Arc;

pub type DynCartStore = Arc<dyn CartStoreTrait + Send + Sync>;
pub type DynCartService = Arc<dyn CartServiceTrait + Send + Sync>;

/// Durable slot holding one cart per visitor. Every operation fails open:
/// a missing or unreadable slot is an empty cart, writes that fail are
/// logged and dropped, nothing here returns an error.
#[async_trait]
pub trait CartStoreTrait {
    async fn load(&self, visitor_id: &str) -> Cart;
    async fn save(&self, visitor_id: &str, cart: &Cart);
    async fn clear(&self, visitor_id: &str);
}

#[async_trait]
pub trait CartServiceTrait {
    async fn get_cart(&self, visitor_id: &str) -> Result<ApiResponse<Cart>, ServiceError>;
    async fn add_item(
        &self,
        visitor_id: &str,
        req: &AddCartItemRequest,
    ) -> Result<ApiResponse<Cart>, ServiceError>;
    async fn update_quantity(
        &self,
        visitor_id: &str,
        product_id: i32,
        req: &UpdateCartQuantityRequest,
    ) -> Result<ApiResponse<Cart>, ServiceError>;
    async fn remove_item(
        &self,
        visitor_id: &str,
        product_id: i32,
    ) -> Result<ApiResponse<Cart>, ServiceError>;
    async fn clear_cart(&self, visitor_id: &str) -> Result<ApiResponse<Cart>, ServiceError>;
}
