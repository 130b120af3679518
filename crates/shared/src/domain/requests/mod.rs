mod cart;
mod order;
mod payment;
mod product;

pub use self::cart::{AddCartItemRequest, UpdateCartQuantityRequest};
pub use self::order::{
    CreateOrderItemRequest, CreateOrderRequest, FindAllOrders, NewOrder, NewOrderItem,
};
pub use self::payment::{ChargeRequest, InitiatePaymentRequest};
pub use self::product::{CreateProductRequest, FindAllProducts, UpdateProductRequest};
