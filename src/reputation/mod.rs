//! Reputation subsystem
//!
//! Scores are kept per (category, user). Unseen pairs start at
//! [`DEFAULT_REPUTATION`](crate::model::DEFAULT_REPUTATION). Scores have no
//! floor or ceiling in the ledger; the ceiling only gates vote rewards.

mod ledger;
mod policy;
mod store;

pub use ledger::ReputationLedger;
pub use policy::{RewardAmount, RewardDecision, RewardPolicy, RewardRecipient, RewardRule};
pub use store::{InMemoryReputationStore, ReputationStore};
