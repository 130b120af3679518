use crate::{
    abstract_trait::OrderQueryRepositoryTrait,
    config::ConnectionPool,
    domain::requests::FindAllOrders,
    errors::RepositoryError,
    model::{Order, OrderItem},
};
use async_trait::async_trait;
use sqlx::FromRow;
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderQueryRepository {
    db: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[derive(FromRow)]
struct OrderWithCount {
    #[sqlx(flatten)]
    order: Order,
    total_count: i64,
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_all(&self, req: &FindAllOrders) -> Result<(Vec<Order>, i64), RepositoryError> {
        info!("🔍 Fetching all orders with search: {:?}", req.search);

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

        let rows = sqlx::query_as::<_, OrderWithCount>(
            r#"
            SELECT
                o.order_id,
                o.email,
                o.customer_name,
                o.visitor_id,
                o.total,
                o.payment_method,
                o.payment_reference,
                o.payment_status,
                o.created_at,
                o.updated_at,
                COUNT(*) OVER() AS total_count
            FROM orders o
            WHERE ($1::TEXT IS NULL OR o.email ILIKE '%' || $1 || '%')
            ORDER BY o.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(search_pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch orders: {:?}", e);
            RepositoryError::from(e)
        })?;

        let total = rows.first().map(|r| r.total_count).unwrap_or(0);
        let orders = rows.into_iter().map(|r| r.order).collect();

        Ok((orders, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Order, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT order_id, email, customer_name, visitor_id, total,
                   payment_method, payment_reference, payment_status,
                   created_at, updated_at
            FROM orders
            WHERE order_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch order {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        order.ok_or(RepositoryError::NotFound)
    }

    async fn find_items(&self, order_id: i32) -> Result<Vec<OrderItem>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT order_item_id, order_id, product_id, name, price, quantity, created_at
            FROM order_items
            WHERE order_id = $1
            ORDER BY order_item_id
            "#,
        )
        .bind(order_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch items for order {}: {:?}", order_id, e);
            RepositoryError::from(e)
        })?;

        Ok(items)
    }
}
