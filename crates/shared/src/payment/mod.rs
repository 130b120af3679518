mod method;
mod phone;

pub use self::method::{
    MobileNetwork, PAYMENT_METHODS, PaymentMethodDef, PaymentMethodKind, PaymentStatus,
    find_method,
};
pub use self::phone::normalize_msisdn;
