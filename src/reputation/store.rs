//! Reputation store contract and in-memory implementation

use std::collections::HashMap;
use std::sync::RwLock;

use crate::model::ReputationKey;
use crate::store::{StoreError, StoreResult};

/// Keyed integer scores with atomic create-or-update.
pub trait ReputationStore: Send + Sync {
    /// Return the stored score, inserting `default` first if absent.
    /// The flag is true when the record was created by this call.
    fn get_or_insert(&self, key: &ReputationKey, default: i64) -> StoreResult<(i64, bool)>;

    /// Add `delta` to the stored score, or insert `initial` if absent.
    /// Returns the resulting score.
    fn add_or_insert(&self, key: &ReputationKey, delta: i64, initial: i64) -> StoreResult<i64>;
}

/// In-memory reputation store
#[derive(Debug, Default)]
pub struct InMemoryReputationStore {
    scores: RwLock<HashMap<ReputationKey, i64>>,
}

impl InMemoryReputationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a score without creating it
    pub fn peek(&self, key: &ReputationKey) -> StoreResult<Option<i64>> {
        let scores = self.scores.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(scores.get(key).copied())
    }

    /// Overwrite a score (seeding)
    pub fn set(&self, key: ReputationKey, score: i64) -> StoreResult<()> {
        let mut scores = self.scores.write().map_err(|_| StoreError::LockPoisoned)?;
        scores.insert(key, score);
        Ok(())
    }
}

impl ReputationStore for InMemoryReputationStore {
    fn get_or_insert(&self, key: &ReputationKey, default: i64) -> StoreResult<(i64, bool)> {
        if let Some(score) = self.peek(key)? {
            return Ok((score, false));
        }

        let mut scores = self.scores.write().map_err(|_| StoreError::LockPoisoned)?;
        // Another writer may have inserted between the read and write locks.
        let mut created = false;
        let score = *scores.entry(key.clone()).or_insert_with(|| {
            created = true;
            default
        });
        Ok((score, created))
    }

    fn add_or_insert(&self, key: &ReputationKey, delta: i64, initial: i64) -> StoreResult<i64> {
        let mut scores = self.scores.write().map_err(|_| StoreError::LockPoisoned)?;
        let score = scores
            .entry(key.clone())
            .and_modify(|s| *s += delta)
            .or_insert(initial);
        Ok(*score)
    }
}
