use serde::{Deserialize, Serialize};
use std::fmt;

/// Carrier network backing a mobile-money wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MobileNetwork {
    Mtn,
    Airtel,
}

impl fmt::Display for MobileNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MobileNetwork::Mtn => write!(f, "MTN"),
            MobileNetwork::Airtel => write!(f, "AIRTEL"),
        }
    }
}

/// The dispatchable shape of a payment method. Dispatch is a match over
/// this enum so an unhandled method is a compile error, not a fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethodKind {
    MobileMoney { network: MobileNetwork },
    Card,
    Aggregator,
}

#[derive(Debug, Clone, Copy)]
pub struct PaymentMethodDef {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: PaymentMethodKind,
}

/// The fixed set of payment methods the storefront recognizes. Ids are
/// the stable keys the client submits at checkout.
pub const PAYMENT_METHODS: &[PaymentMethodDef] = &[
    PaymentMethodDef {
        id: "mtn-momo",
        label: "MTN Mobile Money",
        kind: PaymentMethodKind::MobileMoney {
            network: MobileNetwork::Mtn,
        },
    },
    PaymentMethodDef {
        id: "airtel-money",
        label: "Airtel Money",
        kind: PaymentMethodKind::MobileMoney {
            network: MobileNetwork::Airtel,
        },
    },
    PaymentMethodDef {
        id: "card",
        label: "Credit / Debit Card",
        kind: PaymentMethodKind::Card,
    },
    PaymentMethodDef {
        id: "pesapal",
        label: "Pesapal",
        kind: PaymentMethodKind::Aggregator,
    },
];

pub fn find_method(id: &str) -> Option<&'static PaymentMethodDef> {
    PAYMENT_METHODS.iter().find(|method| method.id == id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ids_resolve() {
        assert!(matches!(
            find_method("mtn-momo").map(|m| m.kind),
            Some(PaymentMethodKind::MobileMoney {
                network: MobileNetwork::Mtn
            })
        ));
        assert!(matches!(
            find_method("card").map(|m| m.kind),
            Some(PaymentMethodKind::Card)
        ));
        assert!(matches!(
            find_method("pesapal").map(|m| m.kind),
            Some(PaymentMethodKind::Aggregator)
        ));
    }

    #[test]
    fn unknown_id_is_rejected() {
        assert!(find_method("bogus-method").is_none());
        assert!(find_method("").is_none());
        // ids are exact keys, not case-insensitive
        assert!(find_method("MTN-MOMO").is_none());
    }
}
