mod cart;
mod order;
mod payment;
mod product;

pub use self::cart::CartService;
pub use self::order::{OrderService, OrderServiceDeps};
pub use self::payment::{PaymentService, PaymentServiceDeps};
pub use self::product::ProductService;
