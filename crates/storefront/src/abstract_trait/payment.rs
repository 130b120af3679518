use async_trait::async_trait;
use shared::{
    domain::{
        requests::{ChargeRequest, InitiatePaymentRequest},
        responses::{ApiResponse, ChargeOutcome, PaymentInitiatedResponse, PaymentMethodResponse},
    },
    errors::ServiceError,
};
use std::sync::Arc;

pub type DynPaymentGateway = Arc<dyn PaymentGatewayTrait + Send + Sync>;
pub type DynPaymentService = Arc<dyn PaymentServiceTrait + Send + Sync>;

/// One external payment processor. Implementations translate the charge
/// into the provider's wire format and classify every failure (transport,
/// timeout, non-success status) as `ServiceError::Provider`.
#[async_trait]
pub trait PaymentGatewayTrait {
    async fn initiate(&self, charge: &ChargeRequest) -> Result<ChargeOutcome, ServiceError>;
}

#[async_trait]
pub trait PaymentServiceTrait {
    fn list_methods(&self) -> ApiResponse<Vec<PaymentMethodResponse>>;
    async fn initiate_payment(
        &self,
        req: &InitiatePaymentRequest,
    ) -> Result<ApiResponse<PaymentInitiatedResponse>, ServiceError>;
}
