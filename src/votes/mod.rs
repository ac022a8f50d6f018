//! Vote application
//!
//! A vote changes exactly one answer's score by +1 or -1 and reports the
//! answer's author so the caller can apply reputation side effects.

mod processor;

pub use processor::{VoteProcessor, VoteReceipt};
