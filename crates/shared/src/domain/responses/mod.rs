mod api;
mod order;
mod payment;
mod product;

pub use self::api::{ApiResponse, ApiResponsePagination, Pagination};
pub use self::order::{OrderDetailResponse, OrderItemResponse, OrderResponse};
pub use self::payment::{ChargeOutcome, PaymentInitiatedResponse, PaymentMethodResponse};
pub use self::product::ProductResponse;
