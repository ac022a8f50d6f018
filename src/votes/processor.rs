//! Vote processor

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::errors::{QaError, QaResult};
use crate::model::{Answer, Vote};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::store::{transact, RelationalStore, UnitOfWork};

/// What a successful vote touched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteReceipt {
    pub answer_id: Uuid,
    pub question_id: Uuid,
    /// Author of the voted answer
    pub author_id: Uuid,
    /// Score after the vote
    pub upvotes: i64,
}

/// Applies votes to answers
#[derive(Clone)]
pub struct VoteProcessor {
    store: Arc<dyn RelationalStore>,
    metrics: Arc<MetricsRegistry>,
}

impl VoteProcessor {
    pub fn new(store: Arc<dyn RelationalStore>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { store, metrics }
    }

    /// Add the vote's delta to one answer.
    pub fn cast_vote(&self, answer_id: Uuid, vote: Vote) -> QaResult<VoteReceipt> {
        let receipt: QaResult<VoteReceipt> = transact(self.store.as_ref(), |unit| {
            let answer = unit
                .answer(answer_id)?
                .ok_or_else(|| QaError::NotFound(format!("answer {}", answer_id)))?;
            apply(unit, answer, vote)
        });
        self.record(receipt, vote)
    }

    /// Apply a vote cast on a question to that question's current answer.
    pub fn cast_question_vote(&self, question_id: Uuid, vote: Vote) -> QaResult<VoteReceipt> {
        let receipt: QaResult<VoteReceipt> = transact(self.store.as_ref(), |unit| {
            if unit.question(question_id)?.is_none() {
                return Err(QaError::NotFound(format!("question {}", question_id)));
            }
            let current = unit.current_answer(question_id)?.ok_or_else(|| {
                QaError::NotFound(format!("question {} has no current answer", question_id))
            })?;
            apply(unit, current, vote)
        });
        self.record(receipt, vote)
    }

    fn record(&self, receipt: QaResult<VoteReceipt>, vote: Vote) -> QaResult<VoteReceipt> {
        let receipt = receipt.map_err(|err| {
            self.metrics.increment_rollbacks();
            err
        })?;
        self.metrics.increment_votes_cast();
        log_event_with_fields(
            Event::VoteCast,
            &[
                ("answer_id", &receipt.answer_id.to_string()),
                ("delta", &vote.delta().to_string()),
                ("upvotes", &receipt.upvotes.to_string()),
            ],
        );
        Ok(receipt)
    }
}

fn apply(unit: &mut dyn UnitOfWork, answer: Answer, vote: Vote) -> QaResult<VoteReceipt> {
    let affected = unit.add_answer_upvotes(answer.id, vote.delta())?;
    if affected == 0 {
        return Err(QaError::NotFound(format!("answer {}", answer.id)));
    }
    Ok(VoteReceipt {
        answer_id: answer.id,
        question_id: answer.question_id,
        author_id: answer.author_id,
        upvotes: answer.upvotes + vote.delta(),
    })
}
