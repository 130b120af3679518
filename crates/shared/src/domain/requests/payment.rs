use crate::payment::MobileNetwork;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct InitiatePaymentRequest {
    #[validate(range(min = 1, message = "Order ID is required"))]
    #[schema(example = 1)]
    pub order_id: i32,

    #[validate(length(min = 1, message = "Payment method is required"))]
    #[schema(example = "mtn-momo")]
    pub payment_method_id: String,

    /// Required for mobile-money methods, ignored otherwise.
    #[schema(example = "0700123456")]
    pub phone_number: Option<String>,

    /// Carrier hint from the client. The method registry is authoritative;
    /// this field is accepted for wire compatibility only.
    #[schema(example = "mtn")]
    pub network: Option<String>,

    #[schema(example = "UGX")]
    pub currency: Option<String>,
}

/// Everything a provider gateway needs to open a payment attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeRequest {
    /// Merchant-side transaction reference, unique per attempt.
    pub tx_ref: String,
    pub amount: i64,
    pub currency: String,
    pub email: String,
    pub customer_name: String,
    /// Normalized international msisdn, mobile-money attempts only.
    pub phone_number: Option<String>,
    pub network: Option<MobileNetwork>,
    pub redirect_url: String,
    pub narration: String,
}
