mod cart;

pub use self::cart::CartStore;
