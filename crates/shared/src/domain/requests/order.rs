use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllOrders {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,

    #[serde(default)]
    pub search: String,
}

fn default_page() -> i32 {
    1
}

fn default_page_size() -> i32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderItemRequest {
    #[validate(range(min = 1, message = "Product ID is required"))]
    #[schema(example = 1)]
    pub product_id: i32,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    #[schema(example = 3)]
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(email(message = "A valid email is required"))]
    #[schema(example = "jane@example.com")]
    pub email: String,

    #[validate(length(min = 1, message = "Customer name is required"))]
    #[schema(example = "Jane Doe")]
    pub customer_name: String,

    #[validate(length(min = 1, message = "An order needs at least one item"), nested)]
    pub items: Vec<CreateOrderItemRequest>,
}

/// Fully resolved order data handed to the repository: prices and names
/// are frozen copies of the catalog rows at checkout time.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub email: String,
    pub customer_name: String,
    pub visitor_id: Option<String>,
    pub total: i64,
    pub items: Vec<NewOrderItem>,
}

#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: i32,
    pub name: String,
    pub price: i64,
    pub quantity: i32,
}
