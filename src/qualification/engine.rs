//! Qualification & promotion engine

use std::sync::Arc;

use uuid::Uuid;

use super::outcome::{Assessment, AssessmentOutcome};
use super::ranking::{Decision, RankingScan};
use crate::errors::QaResult;
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::store::{transact, RelationalStore};

/// Decides and applies changes of a question's current answer
#[derive(Clone)]
pub struct QualificationEngine {
    store: Arc<dyn RelationalStore>,
    metrics: Arc<MetricsRegistry>,
}

impl QualificationEngine {
    pub fn new(store: Arc<dyn RelationalStore>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { store, metrics }
    }

    /// Run one assessment pass for `question_id`.
    ///
    /// Every mutation happens in one unit of work; on error the question's
    /// answers and counters are exactly as they were before the pass.
    pub fn assess(&self, question_id: Uuid) -> QaResult<Assessment> {
        let assessment: QaResult<Assessment> = transact(self.store.as_ref(), |unit| {
            let purged = unit.delete_unvoted_answers(question_id)?;
            let purged_pending = purged.iter().filter(|a| !a.is_current).count() as i64;

            let scan = RankingScan::walk(unit.answers_for(question_id)?);
            let outcome = match scan.decide() {
                Decision::Keep => AssessmentOutcome::NoChange,
                Decision::Promote { promote, demote } => {
                    unit.set_current_answer(promote, true)?;
                    match demote {
                        Some(demoted) => {
                            unit.set_current_answer(demoted, false)?;
                            AssessmentOutcome::PromotedAndDemoted {
                                promoted: promote,
                                demoted,
                            }
                        }
                        None => AssessmentOutcome::Promoted { promoted: promote },
                    }
                }
            };

            let (edits, pending) = outcome.counter_deltas();
            let pending = pending - purged_pending;
            if edits != 0 || pending != 0 {
                unit.adjust_question_counters(question_id, edits, pending)?;
            }

            Ok(Assessment {
                question_id,
                outcome,
                purged: purged.into_iter().map(|a| a.id).collect(),
            })
        });

        match assessment {
            Ok(assessment) => {
                self.observe(&assessment);
                Ok(assessment)
            }
            Err(err) => {
                self.metrics.increment_rollbacks();
                Err(err)
            }
        }
    }

    fn observe(&self, assessment: &Assessment) {
        let question_id = assessment.question_id.to_string();
        self.metrics.increment_assessments();

        if !assessment.purged.is_empty() {
            self.metrics.add_answers_purged(assessment.purged.len() as u64);
            log_event_with_fields(
                Event::AnswersPurged,
                &[
                    ("count", &assessment.purged.len().to_string()),
                    ("question_id", &question_id),
                ],
            );
        }

        if let Some(promoted) = assessment.outcome.promoted() {
            self.metrics.increment_promotions();
            log_event_with_fields(
                Event::AnswerPromoted,
                &[
                    ("answer_id", &promoted.to_string()),
                    ("question_id", &question_id),
                ],
            );
        }
        if let Some(demoted) = assessment.outcome.demoted() {
            self.metrics.increment_demotions();
            log_event_with_fields(
                Event::AnswerDemoted,
                &[
                    ("answer_id", &demoted.to_string()),
                    ("question_id", &question_id),
                ],
            );
        }
        if !assessment.changed() {
            log_event_with_fields(Event::AssessmentNoChange, &[("question_id", &question_id)]);
        }
    }
}
