//! Short-TTL single-value cache, used to avoid hammering the spot-price
//! endpoint on busy API traffic.

use std::time::{Duration, Instant};
use tokio::sync::RwLock;

pub struct TtlCache<T> {
    slot: RwLock<Option<(T, Instant)>>,
    ttl: Duration,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
        }
    }

    pub async fn get(&self) -> Option<T> {
        let slot = self.slot.read().await;
        match slot.as_ref() {
            Some((value, stored_at)) if stored_at.elapsed() < self.ttl => Some(value.clone()),
            _ => None,
        }
    }

    pub async fn set(&self, value: T) {
        let mut slot = self.slot.write().await;
        *slot = Some((value, Instant::now()));
    }

    pub async fn clear(&self) {
        let mut slot = self.slot.write().await;
        *slot = None;
    }
}
