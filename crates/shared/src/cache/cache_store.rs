use chrono::Duration;
use deadpool_redis::{Connection, Pool, redis::AsyncCommands};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::{debug, error};

/// JSON key-value slot on top of the redis pool. Every operation fails
/// open: a backend or (de)serialization error is logged and reported as
/// a miss, never surfaced to the caller.
#[derive(Clone)]
pub struct CacheStore {
    redis_pool: Arc<Pool>,
}

impl CacheStore {
    pub fn new(redis_pool: Pool) -> Self {
        Self {
            redis_pool: Arc::new(redis_pool),
        }
    }

    async fn get_conn(&self) -> Option<Connection> {
        match self.redis_pool.get().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                error!("Failed to get Redis pooled connection: {:?}", e);
                None
            }
        }
    }

    pub async fn get<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let mut conn = self.get_conn().await?;
        let result: Result<Option<String>, _> = conn.get(key).await;

        match result {
            Ok(Some(data)) => match serde_json::from_str::<T>(&data) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    error!(
                        "Failed to deserialize cached value for key '{}': {:?}",
                        key, e
                    );
                    None
                }
            },
            Ok(None) => {
                debug!("Cache miss for key: {key}");
                None
            }
            Err(e) => {
                error!("Redis get error for key '{}': {:?}", key, e);
                None
            }
        }
    }

    /// Stores the value with no expiry. The slot lives until deleted.
    pub async fn set<T>(&self, key: &str, data: &T)
    where
        T: Serialize,
    {
        self.write(key, data, None).await;
    }

    pub async fn set_with_ttl<T>(&self, key: &str, data: &T, expiration: Duration)
    where
        T: Serialize,
    {
        self.write(key, data, Some(expiration)).await;
    }

    async fn write<T>(&self, key: &str, data: &T, expiration: Option<Duration>)
    where
        T: Serialize,
    {
        let json_data = match serde_json::to_string(data) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize data for key '{}': {:?}", key, e);
                return;
            }
        };

        let Some(mut conn) = self.get_conn().await else {
            return;
        };

        let result: Result<(), _> = match expiration {
            Some(ttl) => {
                conn.set_ex(key, &json_data, ttl.num_seconds() as u64)
                    .await
            }
            None => conn.set(key, &json_data).await,
        };

        match result {
            Ok(()) => debug!("Cached key '{}' (ttl: {:?})", key, expiration),
            Err(e) => error!("Failed to set cache key '{}': {:?}", key, e),
        }
    }

    pub async fn delete(&self, key: &str) {
        if let Some(mut conn) = self.get_conn().await {
            let result: Result<(), _> = conn.del(key).await;
            if let Err(e) = result {
                error!("Failed to delete key '{}': {:?}", key, e);
            }
        }
    }
}
