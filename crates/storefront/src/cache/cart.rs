use crate::abstract_trait::CartStoreTrait;
use async_trait::async_trait;
use shared::{cache::CacheStore, cart::Cart};
use tracing::debug;

/// Redis-backed cart slot, one fixed key per visitor, no TTL: a cart
/// survives across sessions until the visitor clears it. Concurrent tabs
/// writing the same slot are last-write-wins, there is no cross-tab
/// coordination.
#[derive(Clone)]
pub struct CartStore {
    cache: CacheStore,
}

impl CartStore {
    pub fn new(cache: CacheStore) -> Self {
        Self { cache }
    }

    fn cart_key(visitor_id: &str) -> String {
        format!("cart:{visitor_id}")
    }
}

#[async_trait]
impl CartStoreTrait for CartStore {
    async fn load(&self, visitor_id: &str) -> Cart {
        match self.cache.get::<Cart>(&Self::cart_key(visitor_id)).await {
            Some(cart) => cart,
            None => {
                debug!("No stored cart for visitor {visitor_id}, starting empty");
                Cart::new()
            }
        }
    }

    async fn save(&self, visitor_id: &str, cart: &Cart) {
        self.cache.set(&Self::cart_key(visitor_id), cart).await;
    }

    async fn clear(&self, visitor_id: &str) {
        self.cache.delete(&Self::cart_key(visitor_id)).await;
    }
}
