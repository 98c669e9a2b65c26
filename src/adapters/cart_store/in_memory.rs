//! In-memory cart store for testing and single-process development.
//!
//! Mirrors the Redis store's observable behavior: records are kept as JSON
//! strings with a deadline, and leases expire on their own.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::domain::cart::Cart;
use crate::domain::foundation::OwnerId;
use crate::ports::{cart_key, lock_key, store_ttl_for, CartStore, StoreError};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    deadline: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.deadline
    }
}

/// Process-local cart store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCartStore {
    records: Arc<RwLock<HashMap<String, Entry>>>,
    leases: Arc<RwLock<HashMap<String, Instant>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with `StoreError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of live cart records.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.records
            .read()
            .await
            .values()
            .filter(|entry| entry.is_live(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store disabled".into()));
        }
        Ok(())
    }

    async fn live_value(&self, key: &str) -> Option<Entry> {
        let now = Instant::now();
        let mut records = self.records.write().await;
        match records.get(key) {
            Some(entry) if entry.is_live(now) => Some(entry.clone()),
            Some(_) => {
                records.remove(key);
                None
            }
            None => None,
        }
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn get(&self, owner_id: &OwnerId) -> Result<Option<Cart>, StoreError> {
        self.check_available()?;
        match self.live_value(&cart_key(owner_id)).await {
            Some(entry) => Ok(Some(serde_json::from_str(&entry.value)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        self.check_available()?;
        let value = serde_json::to_string(cart)?;
        let deadline = Instant::now() + store_ttl_for(cart);
        self.records
            .write()
            .await
            .insert(cart_key(cart.owner_id()), Entry { value, deadline });
        Ok(())
    }

    async fn delete(&self, owner_id: &OwnerId) -> Result<(), StoreError> {
        self.check_available()?;
        self.records.write().await.remove(&cart_key(owner_id));
        Ok(())
    }

    async fn exists(&self, owner_id: &OwnerId) -> Result<bool, StoreError> {
        self.check_available()?;
        Ok(self.live_value(&cart_key(owner_id)).await.is_some())
    }

    async fn ttl(&self, owner_id: &OwnerId) -> Result<Option<Duration>, StoreError> {
        self.check_available()?;
        let now = Instant::now();
        Ok(self
            .live_value(&cart_key(owner_id))
            .await
            .map(|entry| entry.deadline.saturating_duration_since(now)))
    }

    async fn acquire_lock(&self, owner_id: &OwnerId, lease: Duration) -> Result<bool, StoreError> {
        self.check_available()?;
        let key = lock_key(owner_id);
        let now = Instant::now();
        let mut leases = self.leases.write().await;

        match leases.get(&key) {
            Some(deadline) if now < *deadline => Ok(false),
            _ => {
                leases.insert(key, now + lease);
                Ok(true)
            }
        }
    }

    async fn release_lock(&self, owner_id: &OwnerId) -> Result<(), StoreError> {
        self.check_available()?;
        self.leases.write().await.remove(&lock_key(owner_id));
        Ok(())
    }
}
