//! Unit-of-work traits and the `transact` helper

use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use crate::model::{Answer, AnswerKey, Question};
use crate::observability::{log_event_with_fields, Event, Logger};

/// A transactional relational store.
///
/// Units opened on the same store are isolated from each other; conflicting
/// units serialize.
pub trait RelationalStore: Send + Sync {
    /// Open a unit of work
    fn begin(&self) -> StoreResult<Box<dyn UnitOfWork + '_>>;
}

/// Typed operations available inside one atomic unit of work.
pub trait UnitOfWork {
    /// Fetch a question by id
    fn question(&mut self, id: Uuid) -> StoreResult<Option<Question>>;

    /// All questions, oldest first
    fn questions(&mut self) -> StoreResult<Vec<Question>>;

    /// Fetch an answer by id
    fn answer(&mut self, id: Uuid) -> StoreResult<Option<Answer>>;

    /// A question's answers in ranking order: upvotes descending, current
    /// first, then least recently edited first.
    fn answers_for(&mut self, question_id: Uuid) -> StoreResult<Vec<Answer>>;

    /// Id of an answer with exactly this duplicate key, if any
    fn find_answer(&mut self, key: &AnswerKey) -> StoreResult<Option<Uuid>>;

    /// Insert a question. Titles are unique.
    fn insert_question(&mut self, question: &Question) -> StoreResult<u64>;

    /// Insert an answer. Its question must exist.
    fn insert_answer(&mut self, answer: &Answer) -> StoreResult<u64>;

    /// `upvotes = upvotes + delta` on one answer
    fn add_answer_upvotes(&mut self, answer_id: Uuid, delta: i64) -> StoreResult<u64>;

    /// Set or clear the current-answer flag on one answer
    fn set_current_answer(&mut self, answer_id: Uuid, current: bool) -> StoreResult<u64>;

    /// Delete the question's answers that have exactly zero upvotes,
    /// returning the deleted rows
    fn delete_unvoted_answers(&mut self, question_id: Uuid) -> StoreResult<Vec<Answer>>;

    /// Add to one question's edit and pending counters. Pending never drops
    /// below zero.
    fn adjust_question_counters(
        &mut self,
        question_id: Uuid,
        edits: i64,
        pending: i64,
    ) -> StoreResult<u64>;

    /// Publish every change made in this unit
    fn commit(self: Box<Self>) -> StoreResult<()>;

    /// Discard every change made in this unit
    fn rollback(self: Box<Self>) -> StoreResult<()>;

    /// The question's current answer, if one is flagged
    fn current_answer(&mut self, question_id: Uuid) -> StoreResult<Option<Answer>> {
        Ok(self
            .answers_for(question_id)?
            .into_iter()
            .find(|a| a.is_current))
    }
}

/// Run `work` inside a unit of work.
///
/// Commits when `work` returns `Ok`; rolls back and returns the original
/// error otherwise. A failed commit is reported as a store error.
pub fn transact<T, E, F>(store: &dyn RelationalStore, work: F) -> Result<T, E>
where
    E: From<StoreError> + std::fmt::Display,
    F: FnOnce(&mut dyn UnitOfWork) -> Result<T, E>,
{
    let mut unit = store.begin()?;

    match work(unit.as_mut()) {
        Ok(value) => {
            unit.commit()?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = unit.rollback() {
                Logger::error(
                    "UNIT_ROLLBACK_FAILED",
                    &[("reason", &rollback_err.to_string())],
                );
            }
            log_event_with_fields(Event::UnitRolledBack, &[("reason", &err.to_string())]);
            Err(err)
        }
    }
}
