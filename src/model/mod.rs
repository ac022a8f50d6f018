//! Domain model for answerdb
//!
//! Questions, candidate answers, votes and the reputation keyspace.
//! The constants below are fixed by contract and are not configurable.

mod answer;
mod category;
mod question;
mod vote;

pub use answer::{Answer, AnswerKey};
pub use category::{Category, ReputationKey};
pub use question::Question;
pub use vote::{Vote, VoteTarget};

/// Maximum number of pending candidate answers a question may hold.
pub const MAX_PENDING_ANSWERS: i64 = 5;

/// Reputation ceiling. Used both to derive required upvotes and to gate
/// vote rewards.
pub const REPUTATION_CEILING: i64 = 25;

/// Score assigned to a (category, user) pair on first sight.
pub const DEFAULT_REPUTATION: i64 = 5;

/// Upvotes an answer must collect before it can become current, given the
/// author's reputation in the question's category.
///
/// Low-reputation authors must clear a higher bar.
pub fn required_upvotes(reputation: i64) -> i64 {
    REPUTATION_CEILING - reputation
}
