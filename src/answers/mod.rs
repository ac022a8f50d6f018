//! Candidate answer intake
//!
//! Admission decides whether a question has room for another candidate;
//! the submission pipeline deduplicates and stores it together with the
//! question's pending-count increment.

mod admission;
mod submission;

pub use admission::AdmissionController;
pub use submission::SubmissionPipeline;
