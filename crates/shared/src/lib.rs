pub mod abstract_trait;
pub mod cache;
pub mod cart;
pub mod config;
pub mod domain;
pub mod errors;
pub mod model;
pub mod payment;
pub mod repository;
pub mod utils;
