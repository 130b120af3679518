use crate::abstract_trait::PaymentGatewayTrait;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::{
    domain::{requests::ChargeRequest, responses::ChargeOutcome},
    errors::ServiceError,
};
use tracing::{error, info};

fn provider_error(context: &str, err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        ServiceError::Provider(format!("{context}: request timed out"))
    } else {
        ServiceError::Provider(format!("{context}: {err}"))
    }
}

/// Licensed aggregator. Every attempt authenticates first, then submits
/// the order; the shopper completes payment on the aggregator's page.
#[derive(Clone)]
pub struct PesapalGateway {
    http: reqwest::Client,
    base_url: String,
    consumer_key: String,
    consumer_secret: String,
}

#[derive(Serialize)]
struct AuthPayload<'a> {
    consumer_key: &'a str,
    consumer_secret: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: Option<String>,
    message: Option<String>,
}

#[derive(Serialize)]
struct SubmitOrderPayload<'a> {
    id: &'a str,
    currency: &'a str,
    amount: i64,
    description: &'a str,
    callback_url: &'a str,
    billing_address: BillingAddress<'a>,
}

#[derive(Serialize)]
struct BillingAddress<'a> {
    email_address: &'a str,
    first_name: &'a str,
    phone_number: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct SubmitOrderResponse {
    order_tracking_id: Option<String>,
    redirect_url: Option<String>,
    error: Option<serde_json::Value>,
}

impl PesapalGateway {
    pub fn new(
        http: reqwest::Client,
        base_url: String,
        consumer_key: String,
        consumer_secret: String,
    ) -> Self {
        Self {
            http,
            base_url,
            consumer_key,
            consumer_secret,
        }
    }

    async fn request_token(&self) -> Result<String, ServiceError> {
        let response = self
            .http
            .post(format!("{}/api/Auth/RequestToken", self.base_url))
            .json(&AuthPayload {
                consumer_key: &self.consumer_key,
                consumer_secret: &self.consumer_secret,
            })
            .send()
            .await
            .map_err(|e| provider_error("aggregator auth", e))?;

        let body: AuthResponse = response
            .json()
            .await
            .map_err(|e| provider_error("aggregator auth", e))?;

        body.token.ok_or_else(|| {
            let message = body
                .message
                .unwrap_or_else(|| "aggregator did not issue a token".into());
            error!("❌ Aggregator auth failed: {message}");
            ServiceError::Provider(message)
        })
    }
}

#[async_trait]
impl PaymentGatewayTrait for PesapalGateway {
    async fn initiate(&self, charge: &ChargeRequest) -> Result<ChargeOutcome, ServiceError> {
        let token = self.request_token().await?;

        let payload = SubmitOrderPayload {
            id: &charge.tx_ref,
            currency: &charge.currency,
            amount: charge.amount,
            description: &charge.narration,
            callback_url: &charge.redirect_url,
            billing_address: BillingAddress {
                email_address: &charge.email,
                first_name: &charge.customer_name,
                phone_number: charge.phone_number.as_deref(),
            },
        };

        info!("🧾 Submitting aggregator order {}", charge.tx_ref);

        let response = self
            .http
            .post(format!(
                "{}/api/Transactions/SubmitOrderRequest",
                self.base_url
            ))
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("❌ Aggregator order {} failed: {e}", charge.tx_ref);
                provider_error("aggregator order", e)
            })?;

        let http_status = response.status();
        let body: SubmitOrderResponse = response.json().await.map_err(|e| {
            error!("❌ Unreadable aggregator response for {}: {e}", charge.tx_ref);
            provider_error("aggregator order", e)
        })?;

        if !http_status.is_success() || body.error.is_some() {
            let message = body
                .error
                .map(|e| e.to_string())
                .unwrap_or_else(|| format!("aggregator returned HTTP {http_status}"));
            error!("❌ Aggregator order {} rejected: {message}", charge.tx_ref);
            return Err(ServiceError::Provider(message));
        }

        let tracking_id = body.order_tracking_id.ok_or_else(|| {
            ServiceError::Provider("aggregator response is missing a tracking id".into())
        })?;

        info!(
            "✅ Aggregator order {} accepted as {tracking_id}",
            charge.tx_ref
        );

        Ok(ChargeOutcome {
            reference: tracking_id.clone(),
            payment_url: body.redirect_url,
            tracking_id: Some(tracking_id),
        })
    }
}
