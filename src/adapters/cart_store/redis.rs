//! Redis-backed cart store for production deployments.
//!
//! Carts are stored as JSON strings under `cart:{owner}` with a
//! millisecond TTL. The lease is a `SET NX PX` on `cart_lock:{owner}`, so it
//! expires on its own if the holder dies.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::cart::Cart;
use crate::domain::foundation::OwnerId;
use crate::ports::{cart_key, lock_key, store_ttl_for, CartStore, StoreError};

const LOCK_VALUE: &str = "locked";

/// Redis cart store shared by every service replica.
#[derive(Clone)]
pub struct RedisCartStore {
    conn: MultiplexedConnection,
    timeout: Duration,
}

impl RedisCartStore {
    /// Wraps a multiplexed connection. Every command is bounded by `timeout`.
    pub fn new(conn: MultiplexedConnection, timeout: Duration) -> Self {
        Self { conn, timeout }
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(|e: redis::RedisError| StoreError::Unavailable(e.to_string())),
            Err(_) => Err(StoreError::Unavailable(format!(
                "redis command timed out after {:?}",
                self.timeout
            ))),
        }
    }
}

/// Converts a `PTTL` reply into a remaining lifetime.
///
/// Redis answers -2 for a missing key and -1 for a key without expiry.
fn pttl_to_duration(millis: i64) -> Option<Duration> {
    u64::try_from(millis).ok().map(Duration::from_millis)
}

/// Milliseconds for a `PX` argument. Redis rejects 0, so round up to 1.
fn px_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

#[async_trait]
impl CartStore for RedisCartStore {
    async fn get(&self, owner_id: &OwnerId) -> Result<Option<Cart>, StoreError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = self.bounded(conn.get(cart_key(owner_id))).await?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        let json = serde_json::to_string(cart)?;
        let ttl = store_ttl_for(cart);
        let mut conn = self.conn.clone();

        self.bounded(
            redis::cmd("SET")
                .arg(cart_key(cart.owner_id()))
                .arg(json)
                .arg("PX")
                .arg(px_millis(ttl))
                .query_async::<_, ()>(&mut conn),
        )
        .await?;

        tracing::debug!(owner_id = %cart.owner_id(), ttl_secs = ttl.as_secs(), "cart saved");
        Ok(())
    }

    async fn delete(&self, owner_id: &OwnerId) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        self.bounded(conn.del::<_, ()>(cart_key(owner_id))).await
    }

    async fn exists(&self, owner_id: &OwnerId) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        self.bounded(conn.exists(cart_key(owner_id))).await
    }

    async fn ttl(&self, owner_id: &OwnerId) -> Result<Option<Duration>, StoreError> {
        let mut conn = self.conn.clone();
        let millis: i64 = self
            .bounded(
                redis::cmd("PTTL")
                    .arg(cart_key(owner_id))
                    .query_async(&mut conn),
            )
            .await?;
        Ok(pttl_to_duration(millis))
    }

    async fn acquire_lock(&self, owner_id: &OwnerId, lease: Duration) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let reply: Option<String> = self
            .bounded(
                redis::cmd("SET")
                    .arg(lock_key(owner_id))
                    .arg(LOCK_VALUE)
                    .arg("NX")
                    .arg("PX")
                    .arg(px_millis(lease))
                    .query_async(&mut conn),
            )
            .await?;
        Ok(reply.is_some())
    }

    async fn release_lock(&self, owner_id: &OwnerId) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        self.bounded(conn.del::<_, ()>(lock_key(owner_id))).await
    }
}

impl std::fmt::Debug for RedisCartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCartStore")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
