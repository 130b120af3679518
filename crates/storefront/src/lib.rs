pub mod abstract_trait;
pub mod cache;
pub mod di;
pub mod gateway;
pub mod handler;
pub mod middleware;
pub mod service;
pub mod state;
