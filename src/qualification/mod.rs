//! Qualification & promotion
//!
//! After every vote the question's answer set is re-assessed:
//!
//! 1. answers of the question with exactly zero upvotes are purged
//! 2. the remaining answers are scanned in ranking order, collecting the
//!    qualified ones and stopping right after the current answer
//! 3. if nothing qualified, or the best qualified answer already is
//!    current, nothing changes
//! 4. otherwise the best qualified answer is promoted and the previous
//!    current answer (tracked by id) is demoted
//! 5. the question's edit and pending counters follow the change
//!
//! All of it happens in one unit of work.

mod engine;
mod outcome;
mod ranking;

pub use engine::QualificationEngine;
pub use outcome::{Assessment, AssessmentOutcome};
pub use ranking::{Decision, RankingScan};
