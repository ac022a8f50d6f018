//! Reputation ledger
//!
//! Default-on-first-read and delta-based updates over a [`ReputationStore`].
//! Negative scores are allowed.

use std::sync::Arc;

use uuid::Uuid;

use super::store::ReputationStore;
use crate::errors::QaResult;
use crate::model::{Category, ReputationKey, DEFAULT_REPUTATION};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};

/// Per (category, user) reputation scores
#[derive(Clone)]
pub struct ReputationLedger {
    store: Arc<dyn ReputationStore>,
    metrics: Arc<MetricsRegistry>,
}

impl ReputationLedger {
    pub fn new(store: Arc<dyn ReputationStore>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { store, metrics }
    }

    /// Current score, creating the record at the default if absent.
    pub fn get(&self, category: &Category, user_id: Uuid) -> QaResult<i64> {
        let key = ReputationKey::new(category.clone(), user_id);
        let (score, created) = self.store.get_or_insert(&key, DEFAULT_REPUTATION)?;

        if created {
            log_event_with_fields(
                Event::ReputationInitialized,
                &[
                    ("category", category.as_str()),
                    ("user_id", &user_id.to_string()),
                ],
            );
        }
        Ok(score)
    }

    /// Add `delta` to the score. An absent record is created at
    /// `DEFAULT_REPUTATION + delta`. Returns the new score.
    pub fn adjust(&self, category: &Category, user_id: Uuid, delta: i64) -> QaResult<i64> {
        let key = ReputationKey::new(category.clone(), user_id);
        let score = self
            .store
            .add_or_insert(&key, delta, DEFAULT_REPUTATION + delta)?;

        self.metrics.increment_reputation_adjustments();
        log_event_with_fields(
            Event::ReputationAdjusted,
            &[
                ("category", category.as_str()),
                ("delta", &delta.to_string()),
                ("score", &score.to_string()),
                ("user_id", &user_id.to_string()),
            ],
        );
        Ok(score)
    }
}
