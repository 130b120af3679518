use async_trait::async_trait;
use shared::{
    domain::{
        requests::{CreateOrderRequest, FindAllOrders},
        responses::{ApiResponse, ApiResponsePagination, OrderDetailResponse, OrderResponse},
    },
    errors::ServiceError,
};
use std::sync::Arc;

pub type DynOrderService = Arc<dyn OrderServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<OrderDetailResponse>, ServiceError>;
    async fn create_order(
        &self,
        visitor_id: Option<&str>,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError>;
}
