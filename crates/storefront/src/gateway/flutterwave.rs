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

#[derive(Debug, Deserialize)]
struct FlwEnvelope {
    status: String,
    message: Option<String>,
    data: Option<FlwData>,
    meta: Option<FlwMeta>,
}

#[derive(Debug, Deserialize)]
struct FlwData {
    id: Option<i64>,
    flw_ref: Option<String>,
    link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FlwMeta {
    authorization: Option<FlwAuthorization>,
}

#[derive(Debug, Deserialize)]
struct FlwAuthorization {
    redirect: Option<String>,
}

/// Mobile-money charges. The shopper approves the charge on their handset;
/// the provider reports the final state through the payment webhook.
#[derive(Clone)]
pub struct FlutterwaveMomoGateway {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
}

#[derive(Serialize)]
struct MomoChargePayload<'a> {
    tx_ref: &'a str,
    amount: i64,
    currency: &'a str,
    email: &'a str,
    phone_number: &'a str,
    fullname: &'a str,
    network: String,
    redirect_url: &'a str,
    narration: &'a str,
}

impl FlutterwaveMomoGateway {
    pub fn new(http: reqwest::Client, base_url: String, secret_key: String) -> Self {
        Self {
            http,
            base_url,
            secret_key,
        }
    }
}

#[async_trait]
impl PaymentGatewayTrait for FlutterwaveMomoGateway {
    async fn initiate(&self, charge: &ChargeRequest) -> Result<ChargeOutcome, ServiceError> {
        let phone_number = charge.phone_number.as_deref().ok_or_else(|| {
            ServiceError::Internal("mobile money charge without a phone number".into())
        })?;

        let network = charge
            .network
            .map(|n| n.to_string())
            .ok_or_else(|| ServiceError::Internal("mobile money charge without a network".into()))?;

        let payload = MomoChargePayload {
            tx_ref: &charge.tx_ref,
            amount: charge.amount,
            currency: &charge.currency,
            email: &charge.email,
            phone_number,
            fullname: &charge.customer_name,
            network,
            redirect_url: &charge.redirect_url,
            narration: &charge.narration,
        };

        info!("📲 Initiating mobile money charge {}", charge.tx_ref);

        let response = self
            .http
            .post(format!(
                "{}/charges?type=mobile_money_uganda",
                self.base_url
            ))
            .bearer_auth(&self.secret_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("❌ Mobile money charge {} failed: {e}", charge.tx_ref);
                provider_error("mobile money charge", e)
            })?;

        let http_status = response.status();
        let body: FlwEnvelope = response.json().await.map_err(|e| {
            error!("❌ Unreadable provider response for {}: {e}", charge.tx_ref);
            provider_error("mobile money charge", e)
        })?;

        if !http_status.is_success() || body.status != "success" {
            let message = body
                .message
                .unwrap_or_else(|| format!("provider returned HTTP {http_status}"));
            error!("❌ Mobile money charge {} rejected: {message}", charge.tx_ref);
            return Err(ServiceError::Provider(message));
        }

        let data = body.data.unwrap_or(FlwData {
            id: None,
            flw_ref: None,
            link: None,
        });

        let reference = data
            .flw_ref
            .unwrap_or_else(|| charge.tx_ref.clone());

        let payment_url = body
            .meta
            .and_then(|meta| meta.authorization)
            .and_then(|auth| auth.redirect);

        info!("✅ Mobile money charge {} accepted as {reference}", charge.tx_ref);

        Ok(ChargeOutcome {
            reference,
            payment_url,
            tracking_id: data.id.map(|id| id.to_string()),
        })
    }
}

/// Card checkout via a hosted payment link.
#[derive(Clone)]
pub struct FlutterwaveCardGateway {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
}

#[derive(Serialize)]
struct HostedPaymentPayload<'a> {
    tx_ref: &'a str,
    amount: i64,
    currency: &'a str,
    redirect_url: &'a str,
    customer: HostedPaymentCustomer<'a>,
    customizations: HostedPaymentCustomizations<'a>,
}

#[derive(Serialize)]
struct HostedPaymentCustomer<'a> {
    email: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct HostedPaymentCustomizations<'a> {
    title: &'a str,
    description: &'a str,
}

impl FlutterwaveCardGateway {
    pub fn new(http: reqwest::Client, base_url: String, secret_key: String) -> Self {
        Self {
            http,
            base_url,
            secret_key,
        }
    }
}

#[async_trait]
impl PaymentGatewayTrait for FlutterwaveCardGateway {
    async fn initiate(&self, charge: &ChargeRequest) -> Result<ChargeOutcome, ServiceError> {
        let payload = HostedPaymentPayload {
            tx_ref: &charge.tx_ref,
            amount: charge.amount,
            currency: &charge.currency,
            redirect_url: &charge.redirect_url,
            customer: HostedPaymentCustomer {
                email: &charge.email,
                name: &charge.customer_name,
            },
            customizations: HostedPaymentCustomizations {
                title: "Medisupply Checkout",
                description: &charge.narration,
            },
        };

        info!("💳 Creating hosted card payment {}", charge.tx_ref);

        let response = self
            .http
            .post(format!("{}/payments", self.base_url))
            .bearer_auth(&self.secret_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("❌ Card payment {} failed: {e}", charge.tx_ref);
                provider_error("card payment", e)
            })?;

        let http_status = response.status();
        let body: FlwEnvelope = response.json().await.map_err(|e| {
            error!("❌ Unreadable provider response for {}: {e}", charge.tx_ref);
            provider_error("card payment", e)
        })?;

        if !http_status.is_success() || body.status != "success" {
            let message = body
                .message
                .unwrap_or_else(|| format!("provider returned HTTP {http_status}"));
            error!("❌ Card payment {} rejected: {message}", charge.tx_ref);
            return Err(ServiceError::Provider(message));
        }

        let payment_url = body.data.and_then(|data| data.link);

        info!("✅ Card payment {} link created", charge.tx_ref);

        Ok(ChargeOutcome {
            reference: charge.tx_ref.clone(),
            payment_url,
            tracking_id: None,
        })
    }
}
