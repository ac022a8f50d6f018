//! Named fault points for the in-memory store
//!
//! A test arms a point; the next store operation reaching that point fails
//! with [`StoreError::Injected`] and the point disarms itself. Nothing is
//! armed in normal operation.
//!
//! ```ignore
//! store.faults().arm(points::SET_CURRENT);
//! // the next promotion fails and its unit of work rolls back
//! ```

use std::sync::Mutex;

use super::errors::{StoreError, StoreResult};

/// All defined fault point names
pub mod points {
    pub const INSERT_QUESTION: &str = "insert_question";
    pub const INSERT_ANSWER: &str = "insert_answer";
    pub const ADD_UPVOTES: &str = "add_upvotes";
    pub const SET_CURRENT: &str = "set_current";
    pub const DELETE_UNVOTED: &str = "delete_unvoted";
    pub const ADJUST_COUNTERS: &str = "adjust_counters";
    pub const COMMIT: &str = "commit";

    /// Get all fault point names
    pub fn all() -> &'static [&'static str] {
        &[
            INSERT_QUESTION,
            INSERT_ANSWER,
            ADD_UPVOTES,
            SET_CURRENT,
            DELETE_UNVOTED,
            ADJUST_COUNTERS,
            COMMIT,
        ]
    }
}

/// One-shot fault switches keyed by point name
#[derive(Debug, Default)]
pub struct FaultInjector {
    /// (point, hits to let through before failing)
    armed: Mutex<Vec<(&'static str, usize)>>,
}

impl FaultInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a point. Arming the same point twice fails the next two hits.
    pub fn arm(&self, point: &'static str) {
        self.arm_after(point, 0);
    }

    /// Arm a point so that it lets `skip` hits through and fails the next.
    pub fn arm_after(&self, point: &'static str, skip: usize) {
        if let Ok(mut armed) = self.armed.lock() {
            armed.push((point, skip));
        }
    }

    /// Disarm everything
    pub fn clear(&self) {
        if let Ok(mut armed) = self.armed.lock() {
            armed.clear();
        }
    }

    /// Whether a point is currently armed
    pub fn is_armed(&self, point: &str) -> bool {
        self.armed
            .lock()
            .map(|armed| armed.iter().any(|(p, _)| *p == point))
            .unwrap_or(false)
    }

    /// Fail if `point` is armed, consuming one arming.
    pub fn check(&self, point: &'static str) -> StoreResult<()> {
        let mut armed = self.armed.lock().map_err(|_| StoreError::LockPoisoned)?;
        let index = match armed.iter().position(|(p, _)| *p == point) {
            Some(index) => index,
            None => return Ok(()),
        };
        if armed[index].1 > 0 {
            armed[index].1 -= 1;
            return Ok(());
        }
        armed.remove(index);
        Err(StoreError::Injected(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unarmed_point_passes() {
        let faults = FaultInjector::new();
        for point in points::all() {
            assert!(faults.check(*point).is_ok());
        }
    }

    #[test]
    fn test_armed_point_fires_once() {
        let faults = FaultInjector::new();
        faults.arm(points::COMMIT);
        assert!(faults.is_armed(points::COMMIT));

        assert_eq!(
            faults.check(points::COMMIT),
            Err(StoreError::Injected(points::COMMIT))
        );
        assert!(faults.check(points::COMMIT).is_ok());
    }

    #[test]
    fn test_points_are_independent() {
        let faults = FaultInjector::new();
        faults.arm(points::SET_CURRENT);
        assert!(faults.check(points::INSERT_ANSWER).is_ok());
        assert!(faults.check(points::SET_CURRENT).is_err());
    }

    #[test]
    fn test_arm_after_skips_hits() {
        let faults = FaultInjector::new();
        faults.arm_after(points::SET_CURRENT, 2);
        assert!(faults.check(points::SET_CURRENT).is_ok());
        assert!(faults.check(points::SET_CURRENT).is_ok());
        assert!(faults.check(points::SET_CURRENT).is_err());
        assert!(!faults.is_armed(points::SET_CURRENT));
    }

    #[test]
    fn test_clear_disarms() {
        let faults = FaultInjector::new();
        faults.arm(points::ADD_UPVOTES);
        faults.clear();
        assert!(faults.check(points::ADD_UPVOTES).is_ok());
    }
}
