use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllProducts {
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
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Product name is required"))]
    #[schema(example = "Digital Thermometer")]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[validate(length(min = 1, message = "Category is required"))]
    #[schema(example = "diagnostics")]
    pub category: String,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    #[schema(example = 25000)]
    pub price: i64,

    pub image_url: Option<String>,

    #[validate(range(min = 0, message = "Inventory cannot be negative"))]
    #[schema(example = 120)]
    pub inventory: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    pub id: i32,

    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: i64,

    pub image_url: Option<String>,

    #[validate(range(min = 0, message = "Inventory cannot be negative"))]
    pub inventory: i64,
}
