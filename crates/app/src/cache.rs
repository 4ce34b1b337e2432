//! Single-slot cache with a wall-clock TTL and a get-or-refresh contract.
//!
//! `get_or_refresh` returns the cached value while it is younger than the TTL,
//! otherwise runs the supplied refresh future, stores and returns the fresh
//! value. A failed refresh falls back to the stale value when one exists; only
//! a cold cache surfaces the refresh error.

use std::{future::Future, time::Duration};

use tokio::{sync::RwLock, time::Instant};

#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    slot: RwLock<Option<Entry<T>>>,
}

#[derive(Debug)]
struct Entry<T> {
    value: T,
    cached_at: Instant,
}

impl<T: Clone> TtlCache<T> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Return the cached value, refreshing it first when it has expired.
    ///
    /// # Errors
    ///
    /// Returns the refresh error only when no previous value is available to
    /// fall back on.
    pub async fn get_or_refresh<F, Fut, E>(&self, refresh: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        {
            let slot = self.slot.read().await;

            if let Some(entry) = slot.as_ref() {
                if entry.cached_at.elapsed() < self.ttl {
                    return Ok(entry.value.clone());
                }
            }
        }

        match refresh().await {
            Ok(value) => {
                let mut slot = self.slot.write().await;

                *slot = Some(Entry {
                    value: value.clone(),
                    cached_at: Instant::now(),
                });

                Ok(value)
            }
            Err(error) => {
                let slot = self.slot.read().await;

                match slot.as_ref() {
                    Some(entry) => Ok(entry.value.clone()),
                    None => Err(error),
                }
            }
        }
    }

    /// Drop the cached value so the next read refreshes unconditionally.
    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
    }
}
