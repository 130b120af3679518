use crate::{
    abstract_trait::ProductCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateProductRequest, UpdateProductRequest},
    errors::RepositoryError,
    model::Product,
};
use async_trait::async_trait;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        product: &CreateProductRequest,
    ) -> Result<Product, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (name, description, category, price, image_url, inventory, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, current_timestamp, current_timestamp)
            RETURNING product_id, name, description, category, price, image_url,
                      inventory, created_at, updated_at, deleted_at
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.category)
        .bind(product.price)
        .bind(&product.image_url)
        .bind(product.inventory)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create product '{}': {:?}", product.name, err);
            RepositoryError::from(err)
        })?;

        info!("✅ Created product ID {}", result.product_id);
        Ok(result)
    }

    async fn update_product(
        &self,
        product: &UpdateProductRequest,
    ) -> Result<Product, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name        = $2,
                description = $3,
                category    = $4,
                price       = $5,
                image_url   = $6,
                inventory   = $7,
                updated_at  = current_timestamp
            WHERE product_id = $1 AND deleted_at IS NULL
            RETURNING product_id, name, description, category, price, image_url,
                      inventory, created_at, updated_at, deleted_at
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.category)
        .bind(product.price)
        .bind(&product.image_url)
        .bind(product.inventory)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update product ID {}: {:?}", product.id, err);
            RepositoryError::from(err)
        })?;

        match result {
            Some(updated) => {
                info!("🔄 Updated product ID {}", updated.product_id);
                Ok(updated)
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn trash_product(&self, id: i32) -> Result<Product, RepositoryError> {
        info!("🗑️ Trashing product: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET deleted_at = current_timestamp
            WHERE product_id = $1 AND deleted_at IS NULL
            RETURNING product_id, name, description, category, price, image_url,
                      inventory, created_at, updated_at, deleted_at
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to trash product {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        product.ok_or(RepositoryError::NotFound)
    }
}
