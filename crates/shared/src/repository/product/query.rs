use crate::{
    abstract_trait::ProductQueryRepositoryTrait, config::ConnectionPool,
    domain::requests::FindAllProducts, errors::RepositoryError, model::Product,
};
use async_trait::async_trait;
use sqlx::FromRow;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[derive(FromRow)]
struct ProductWithCount {
    #[sqlx(flatten)]
    product: Product,
    total_count: i64,
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<Product>, i64), RepositoryError> {
        info!("🔍 Fetching products with search: {:?}", req.search);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let limit = req.page_size as i64;
        let offset = ((req.page - 1).max(0) * req.page_size) as i64;

        let search_pattern = if req.search.trim().is_empty() {
            None
        } else {
            Some(req.search.as_str())
        };

        let rows = sqlx::query_as::<_, ProductWithCount>(
            r#"
            SELECT
                p.product_id,
                p.name,
                p.description,
                p.category,
                p.price,
                p.image_url,
                p.inventory,
                p.created_at,
                p.updated_at,
                p.deleted_at,
                COUNT(*) OVER() AS total_count
            FROM products p
            WHERE p.deleted_at IS NULL
              AND ($1::TEXT IS NULL
                   OR p.name ILIKE '%' || $1 || '%'
                   OR p.category ILIKE '%' || $1 || '%')
            ORDER BY p.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(search_pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products: {:?}", e);
            RepositoryError::from(e)
        })?;

        let total = rows.first().map(|r| r.total_count).unwrap_or(0);
        let products = rows.into_iter().map(|r| r.product).collect();

        Ok((products, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Product, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT product_id, name, description, category, price, image_url,
                   inventory, created_at, updated_at, deleted_at
            FROM products
            WHERE product_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch product {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        product.ok_or(RepositoryError::NotFound)
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Product>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT product_id, name, description, category, price, image_url,
                   inventory, created_at, updated_at, deleted_at
            FROM products
            WHERE product_id = ANY($1) AND deleted_at IS NULL
            "#,
        )
        .bind(ids.to_vec())
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products {:?}: {:?}", ids, e);
            RepositoryError::from(e)
        })?;

        Ok(products)
    }
}
