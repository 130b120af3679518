use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub order_id: i32,
    pub email: String,
    pub customer_name: String,
    pub visitor_id: Option<String>,
    pub total: i64,
    pub payment_method: Option<String>,
    pub payment_reference: Option<String>,
    pub payment_status: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}
