pub mod cart;
pub mod order;
pub mod payment;
pub mod product;

pub use self::cart::{CartServiceTrait, CartStoreTrait, DynCartService, DynCartStore};
pub use self::order::{DynOrderService, OrderServiceTrait};
pub use self::payment::{DynPaymentGateway, DynPaymentService, PaymentGatewayTrait, PaymentServiceTrait};
pub use self::product::{DynProductService, ProductServiceTrait};
