use anyhow::{Context, Result, anyhow};

use crate::config::redis::RedisConfig;

#[derive(Debug, Clone)]
pub struct MobileMoneyConfig {
    pub base_url: String,
    pub secret_key: String,
}

#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub base_url: String,
    pub consumer_key: String,
    pub consumer_secret: String,
}

#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub mobile_money: MobileMoneyConfig,
    pub aggregator: AggregatorConfig,
    pub callback_url: String,
    pub request_timeout_secs: u64,
}

impl PaymentConfig {
    pub fn init() -> Result<Self> {
        let gateway_base_url = std::env::var("PAYMENT_GATEWAY_URL")
            .context("Missing environment variable: PAYMENT_GATEWAY_URL")?;

        let gateway_secret = std::env::var("PAYMENT_GATEWAY_SECRET")
            .context("Missing environment variable: PAYMENT_GATEWAY_SECRET")?;

        let aggregator_base_url = std::env::var("AGGREGATOR_URL")
            .context("Missing environment variable: AGGREGATOR_URL")?;

        let aggregator_key = std::env::var("AGGREGATOR_CONSUMER_KEY")
            .context("Missing environment variable: AGGREGATOR_CONSUMER_KEY")?;

        let aggregator_secret = std::env::var("AGGREGATOR_CONSUMER_SECRET")
            .context("Missing environment variable: AGGREGATOR_CONSUMER_SECRET")?;

        let callback_url = std::env::var("PAYMENT_CALLBACK_URL")
            .context("Missing environment variable: PAYMENT_CALLBACK_URL")?;

        let request_timeout_secs = std::env::var("PAYMENT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .context("PAYMENT_TIMEOUT_SECS must be a valid integer")?;

        Ok(Self {
            mobile_money: MobileMoneyConfig {
                base_url: gateway_base_url,
                secret_key: gateway_secret,
            },
            aggregator: AggregatorConfig {
                base_url: aggregator_base_url,
                consumer_key: aggregator_key,
                consumer_secret: aggregator_secret,
            },
            callback_url,
            request_timeout_secs,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_min_conn: u32,
    pub db_max_conn: u32,
    pub run_migrations: bool,
    pub port: u16,
    pub redis: RedisConfig,
    pub payment: PaymentConfig,
    pub currency: String,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;

        let db_min_conn = std::env::var("DB_MIN_CONN")
            .unwrap_or_else(|_| "1".to_string())
            .parse::<u32>()
            .context("DB_MIN_CONN must be a valid u32 integer")?;

        let db_max_conn = std::env::var("DB_MAX_CONN")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONN must be a valid u32 integer")?;

        let run_migrations_str = std::env::var("RUN_MIGRATIONS")
            .context("Missing environment variable: RUN_MIGRATIONS")?;

        let run_migrations = match run_migrations_str.as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let port = std::env::var("PORT")
            .context("Missing environment variable: PORT")?
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let redis_host =
            std::env::var("REDIS_HOST").context("Missing environment variable: REDIS_HOST")?;

        let redis_port = std::env::var("REDIS_PORT")
            .unwrap_or_else(|_| "6379".to_string())
            .parse::<u16>()
            .context("REDIS_PORT must be a valid u16 integer")?;

        let redis_db = std::env::var("REDIS_DB")
            .unwrap_or_else(|_| "0".to_string())
            .parse::<u8>()
            .context("REDIS_DB must be a valid u8 integer")?;

        let redis_password = std::env::var("REDIS_PASSWORD").ok();

        let currency = std::env::var("CURRENCY").unwrap_or_else(|_| "UGX".to_string());

        let payment = PaymentConfig::init().context("failed payment config")?;

        Ok(Self {
            database_url,
            db_min_conn,
            db_max_conn,
            run_migrations,
            port,
            redis: RedisConfig::new(redis_host, redis_port, redis_db, redis_password),
            payment,
            currency,
        })
    }
}
