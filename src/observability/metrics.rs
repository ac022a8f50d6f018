//! Metrics registry for answerdb
//!
//! Counters only, monotonic, reset on process start.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Metrics registry containing all operational counters
///
/// Relaxed ordering throughout; counters are advisory.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    answers_submitted: AtomicU64,
    submissions_rejected: AtomicU64,
    votes_cast: AtomicU64,
    assessments: AtomicU64,
    promotions: AtomicU64,
    demotions: AtomicU64,
    answers_purged: AtomicU64,
    reputation_adjustments: AtomicU64,
    rollbacks: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_answers_submitted(&self) {
        self.answers_submitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_submissions_rejected(&self) {
        self.submissions_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_votes_cast(&self) {
        self.votes_cast.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_assessments(&self) {
        self.assessments.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_promotions(&self) {
        self.promotions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_demotions(&self) {
        self.demotions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_answers_purged(&self, count: u64) {
        self.answers_purged.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_reputation_adjustments(&self) {
        self.reputation_adjustments.fetch_add(1, Ordering::Relaxed);
    }

    /// A write unit of work (post, submit, vote, assess) was rolled back
    pub fn increment_rollbacks(&self) {
        self.rollbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            answers_submitted: self.answers_submitted.load(Ordering::Relaxed),
            submissions_rejected: self.submissions_rejected.load(Ordering::Relaxed),
            votes_cast: self.votes_cast.load(Ordering::Relaxed),
            assessments: self.assessments.load(Ordering::Relaxed),
            promotions: self.promotions.load(Ordering::Relaxed),
            demotions: self.demotions.load(Ordering::Relaxed),
            answers_purged: self.answers_purged.load(Ordering::Relaxed),
            reputation_adjustments: self.reputation_adjustments.load(Ordering::Relaxed),
            rollbacks: self.rollbacks.load(Ordering::Relaxed),
        }
    }

    /// Current counters as a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.snapshot()).unwrap_or(serde_json::Value::Null)
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub answers_submitted: u64,
    pub submissions_rejected: u64,
    pub votes_cast: u64,
    pub assessments: u64,
    pub promotions: u64,
    pub demotions: u64,
    pub answers_purged: u64,
    pub reputation_adjustments: u64,
    pub rollbacks: u64,
}
