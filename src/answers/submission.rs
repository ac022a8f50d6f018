//! Answer submission pipeline
//!
//! 1. required upvotes = 25 - author reputation
//! 2. an answer with the same (question, author, content, required upvotes)
//!    is a duplicate and changes nothing
//! 3. insert + pending-count increment commit together

use std::sync::Arc;

use uuid::Uuid;

use super::admission::slot_available_in;
use crate::errors::{QaError, QaResult};
use crate::model::{required_upvotes, Answer, AnswerKey};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::store::{transact, RelationalStore};

/// Validates, deduplicates and persists candidate answers
#[derive(Clone)]
pub struct SubmissionPipeline {
    store: Arc<dyn RelationalStore>,
    metrics: Arc<MetricsRegistry>,
}

impl SubmissionPipeline {
    pub fn new(store: Arc<dyn RelationalStore>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { store, metrics }
    }

    /// Store a new candidate answer.
    ///
    /// `reputation` is the author's score in the question's category,
    /// supplied by the caller. The slot limit is re-checked inside the unit
    /// of work so that racing submissions cannot overfill a question.
    pub fn submit(
        &self,
        question_id: Uuid,
        author_id: Uuid,
        content: &str,
        reputation: i64,
    ) -> QaResult<Answer> {
        if content.trim().is_empty() {
            let err = QaError::Validation("answer content is empty".into());
            return Err(self.rejected(question_id, err));
        }

        let answer = Answer::new(
            question_id,
            author_id,
            content.to_string(),
            required_upvotes(reputation),
        );
        let key: AnswerKey = answer.key();

        let result: QaResult<()> = transact(self.store.as_ref(), |unit| {
            if let Some(existing) = unit.find_answer(&key)? {
                return Err(QaError::Duplicate(format!(
                    "answer {} already holds this content",
                    existing
                )));
            }
            if !slot_available_in(unit, question_id)? {
                return Err(QaError::Validation(
                    "maximum capacity for answers has been reached".into(),
                ));
            }

            unit.insert_answer(&answer)?;
            unit.adjust_question_counters(question_id, 0, 1)?;
            Ok(())
        });

        match result {
            Ok(()) => {
                self.metrics.increment_answers_submitted();
                log_event_with_fields(
                    Event::AnswerSubmitted,
                    &[
                        ("answer_id", &answer.id.to_string()),
                        ("question_id", &question_id.to_string()),
                        ("required_upvotes", &answer.required_upvotes.to_string()),
                    ],
                );
                Ok(answer)
            }
            Err(err) => {
                self.metrics.increment_rollbacks();
                Err(self.rejected(question_id, err))
            }
        }
    }

    fn rejected(&self, question_id: Uuid, err: QaError) -> QaError {
        self.metrics.increment_submissions_rejected();
        log_event_with_fields(
            Event::AnswerRejected,
            &[
                ("question_id", &question_id.to_string()),
                ("reason", &err.to_string()),
            ],
        );
        err
    }
}
