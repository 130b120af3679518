mod database;
mod myconfig;
mod redis;

pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::myconfig::{AggregatorConfig, Config, MobileMoneyConfig, PaymentConfig};
pub use self::redis::RedisConfig;
