use crate::{
    domain::requests::{CreateProductRequest, FindAllProducts, UpdateProductRequest},
    errors::RepositoryError,
    model::Product,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;
pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<Product>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Product, RepositoryError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Product>, RepositoryError>;
}

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create_product(&self, product: &CreateProductRequest)
    -> Result<Product, RepositoryError>;
    async fn update_product(&self, product: &UpdateProductRequest)
    -> Result<Product, RepositoryError>;
    async fn trash_product(&self, id: i32) -> Result<Product, RepositoryError>;
}
