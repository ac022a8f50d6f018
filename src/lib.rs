//! answerdb - answer qualification and reputation engine for a Q&A platform
//!
//! Candidate answers compete to become a question's single current answer.
//! Each answer must collect enough upvotes, where the threshold depends on
//! its author's reputation in the question's category.

pub mod answers;
pub mod cli;
pub mod config;
pub mod errors;
pub mod model;
pub mod observability;
pub mod qualification;
pub mod questions;
pub mod reputation;
pub mod service;
pub mod store;
pub mod votes;

pub use errors::{QaError, QaResult};
pub use service::{QaService, VoteReport};
