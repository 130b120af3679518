mod order;
mod product;

pub use self::order::{
    DynOrderCommandRepository, DynOrderQueryRepository, OrderCommandRepositoryTrait,
    OrderQueryRepositoryTrait,
};
pub use self::product::{
    DynProductCommandRepository, DynProductQueryRepository, ProductCommandRepositoryTrait,
    ProductQueryRepositoryTrait,
};
