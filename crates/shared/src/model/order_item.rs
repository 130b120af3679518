use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// name and price are frozen copies of the product at checkout time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    pub order_item_id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub name: String,
    pub price: i64,
    pub quantity: i32,
    pub created_at: Option<NaiveDateTime>,
}
