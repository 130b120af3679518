use crate::{
    domain::requests::{FindAllOrders, NewOrder},
    errors::RepositoryError,
    model::{Order, OrderItem},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;
pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryRepositoryTrait {
    async fn find_all(&self, req: &FindAllOrders) -> Result<(Vec<Order>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Order, RepositoryError>;
    async fn find_items(&self, order_id: i32) -> Result<Vec<OrderItem>, RepositoryError>;
}

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    async fn create_order(&self, order: &NewOrder) -> Result<Order, RepositoryError>;

    /// Records a pending payment attempt. The update is conditional on the
    /// order not already being settled, so a confirmed payment can never
    /// be overwritten by a late attempt.
    async fn record_payment_attempt(
        &self,
        order_id: i32,
        payment_method: &str,
        reference: &str,
    ) -> Result<Order, RepositoryError>;
}
