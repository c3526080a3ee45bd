//! In-memory snapshot store with atomic reference swap.
//!
//! The latest [`SnapshotSet`] lives behind an `RwLock<Option<Arc<_>>>`.
//! Readers clone the `Arc` and see either the old or the new set, never a
//! partially updated one; a refresh builds a complete new set and swaps the
//! reference. A live deployment could back this with shared storage as long
//! as it keeps the same read/swap/freshness surface.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use pilgrim_nav_crowd_models::SnapshotSet;
use thiserror::Error;

/// Errors from the snapshot store. Callers treat any of these as "store
/// unavailable" and fall back to direct computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store lock was poisoned by a panicking writer.
    #[error("snapshot store lock poisoned")]
    Poisoned,
}

/// Holds the most recent snapshot set, if any.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    latest: RwLock<Option<Arc<SnapshotSet>>>,
}

impl SnapshotStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored set regardless of age.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the lock is poisoned.
    pub fn latest(&self) -> Result<Option<Arc<SnapshotSet>>, StoreError> {
        Ok(self
            .latest
            .read()
            .map_err(|_| StoreError::Poisoned)?
            .clone())
    }

    /// Returns the stored set only if it is younger than `max_age` at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the lock is poisoned.
    pub fn fresh(
        &self,
        now: DateTime<Utc>,
        max_age: Duration,
    ) -> Result<Option<Arc<SnapshotSet>>, StoreError> {
        Ok(self.latest()?.filter(|set| set.is_fresh(now, max_age)))
    }

    /// Replaces the stored set with a new one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the lock is poisoned.
    pub fn swap(&self, set: Arc<SnapshotSet>) -> Result<(), StoreError> {
        *self.latest.write().map_err(|_| StoreError::Poisoned)? = Some(set);
        Ok(())
    }
}
