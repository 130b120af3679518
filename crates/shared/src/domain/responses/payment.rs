use crate::payment::{PaymentMethodDef, PaymentMethodKind};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What a provider gateway reports back for an accepted payment attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeOutcome {
    /// Provider-issued reference for the attempt.
    pub reference: String,
    /// Hosted page the shopper is redirected to, when the provider uses one.
    pub payment_url: Option<String>,
    /// Polling id for providers that confirm out-of-band instead.
    pub tracking_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct PaymentMethodResponse {
    pub id: String,
    pub label: String,
    pub kind: String,
    pub network: Option<String>,
}

impl From<&PaymentMethodDef> for PaymentMethodResponse {
    fn from(value: &PaymentMethodDef) -> Self {
        let (kind, network) = match value.kind {
            PaymentMethodKind::MobileMoney { network } => {
                ("mobile_money", Some(network.to_string()))
            }
            PaymentMethodKind::Card => ("card", None),
            PaymentMethodKind::Aggregator => ("aggregator", None),
        };

        PaymentMethodResponse {
            id: value.id.to_string(),
            label: value.label.to_string(),
            kind: kind.to_string(),
            network,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct PaymentInitiatedResponse {
    pub order_id: i32,
    pub payment_method: String,
    pub reference: String,
    pub payment_url: Option<String>,
    pub tracking_id: Option<String>,
    pub payment_status: String,
}
