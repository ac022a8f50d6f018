//! Admission controller

use std::sync::Arc;

use uuid::Uuid;

use crate::errors::{QaError, QaResult};
use crate::model::MAX_PENDING_ANSWERS;
use crate::store::{transact, RelationalStore, UnitOfWork};

/// Gatekeeper for the per-question candidate limit
#[derive(Clone)]
pub struct AdmissionController {
    store: Arc<dyn RelationalStore>,
}

impl AdmissionController {
    pub fn new(store: Arc<dyn RelationalStore>) -> Self {
        Self { store }
    }

    /// True iff the question holds fewer than five pending candidates.
    pub fn is_slot_available(&self, question_id: Uuid) -> QaResult<bool> {
        transact(self.store.as_ref(), |unit| slot_available_in(unit, question_id))
    }
}

/// Slot check against an open unit of work.
pub(crate) fn slot_available_in(unit: &mut dyn UnitOfWork, question_id: Uuid) -> QaResult<bool> {
    let question = unit
        .question(question_id)?
        .ok_or_else(|| QaError::NotFound(format!("question {}", question_id)))?;
    Ok(question.pending_count < MAX_PENDING_ANSWERS)
}
