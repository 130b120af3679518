use crate::{
    abstract_trait::OrderCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::NewOrder,
    errors::RepositoryError,
    model::Order,
    payment::PaymentStatus,
};
use async_trait::async_trait;
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(&self, order: &NewOrder) -> Result<Order, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let created = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders
                (email, customer_name, visitor_id, total, payment_status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, current_timestamp, current_timestamp)
            RETURNING order_id, email, customer_name, visitor_id, total,
                      payment_method, payment_reference, payment_status,
                      created_at, updated_at
            "#,
        )
        .bind(&order.email)
        .bind(&order.customer_name)
        .bind(&order.visitor_id)
        .bind(order.total)
        .bind(PaymentStatus::Pending.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            error!("❌ Failed to create order for {}: {:?}", order.email, err);
            RepositoryError::from(err)
        })?;

        for item in &order.items {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, name, price, quantity, created_at)
                VALUES ($1, $2, $3, $4, $5, current_timestamp)
                "#,
            )
            .bind(created.order_id)
            .bind(item.product_id)
            .bind(&item.name)
            .bind(item.price)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to create order item for product {}: {:?}",
                    item.product_id, err
                );
                RepositoryError::from(err)
            })?;
        }

        tx.commit().await.map_err(RepositoryError::from)?;

        info!(
            "✅ Created order ID {} ({} items)",
            created.order_id,
            order.items.len()
        );
        Ok(created)
    }

    async fn record_payment_attempt(
        &self,
        order_id: i32,
        payment_method: &str,
        reference: &str,
    ) -> Result<Order, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        // Conditional on the order not being settled yet: a confirmed
        // payment must never be downgraded back to pending.
        let result = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET payment_method    = $2,
                payment_reference = $3,
                payment_status    = $4,
                updated_at        = current_timestamp
            WHERE order_id = $1 AND payment_status <> 'PAID'
            RETURNING order_id, email, customer_name, visitor_id, total,
                      payment_method, payment_reference, payment_status,
                      created_at, updated_at
            "#,
        )
        .bind(order_id)
        .bind(payment_method)
        .bind(reference)
        .bind(PaymentStatus::Pending.as_str())
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to record payment attempt for order {}: {:?}",
                order_id, err
            );
            RepositoryError::from(err)
        })?;

        match result {
            Some(order) => {
                info!(
                    "✅ Recorded payment attempt for order {} via {}",
                    order_id, payment_method
                );
                Ok(order)
            }
            None => Err(RepositoryError::Conflict(format!(
                "order {order_id} is already settled"
            ))),
        }
    }
}
