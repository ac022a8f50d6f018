//! In-memory relational store
//!
//! Units hold the table mutex for their whole lifetime and stage writes on
//! a private copy of the tables; commit swaps the copy in. Concurrent units
//! therefore serialize, and a rolled-back unit leaves no trace.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::fault::{points, FaultInjector};
use super::unit::{RelationalStore, UnitOfWork};
use crate::model::{Answer, AnswerKey, Question};

#[derive(Debug, Clone, Default)]
struct Tables {
    questions: HashMap<Uuid, Question>,
    answers: HashMap<Uuid, Answer>,
}

/// In-memory relational store for tests and the local driver
#[derive(Debug, Default)]
pub struct InMemoryRelationalStore {
    tables: Mutex<Tables>,
    faults: FaultInjector,
}

impl InMemoryRelationalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fault points for this store
    pub fn faults(&self) -> &FaultInjector {
        &self.faults
    }
}

impl RelationalStore for InMemoryRelationalStore {
    fn begin(&self) -> StoreResult<Box<dyn UnitOfWork + '_>> {
        let guard = self.tables.lock().map_err(|_| StoreError::LockPoisoned)?;
        let staged = guard.clone();
        Ok(Box::new(MemoryUnit {
            guard,
            staged,
            faults: &self.faults,
        }))
    }
}

struct MemoryUnit<'a> {
    guard: MutexGuard<'a, Tables>,
    staged: Tables,
    faults: &'a FaultInjector,
}

impl UnitOfWork for MemoryUnit<'_> {
    fn question(&mut self, id: Uuid) -> StoreResult<Option<Question>> {
        Ok(self.staged.questions.get(&id).cloned())
    }

    fn questions(&mut self) -> StoreResult<Vec<Question>> {
        let mut questions: Vec<Question> = self.staged.questions.values().cloned().collect();
        questions.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at).then(a.id.cmp(&b.id)));
        Ok(questions)
    }

    fn answer(&mut self, id: Uuid) -> StoreResult<Option<Answer>> {
        Ok(self.staged.answers.get(&id).cloned())
    }

    fn answers_for(&mut self, question_id: Uuid) -> StoreResult<Vec<Answer>> {
        let mut answers: Vec<Answer> = self
            .staged
            .answers
            .values()
            .filter(|a| a.question_id == question_id)
            .cloned()
            .collect();
        // id breaks exact ties so scans are repeatable
        answers.sort_by(|a, b| Answer::rank_cmp(a, b).then(a.id.cmp(&b.id)));
        Ok(answers)
    }

    fn find_answer(&mut self, key: &AnswerKey) -> StoreResult<Option<Uuid>> {
        Ok(self
            .staged
            .answers
            .values()
            .find(|a| a.question_id == key.question_id
                && a.author_id == key.author_id
                && a.content == key.content
                && a.required_upvotes == key.required_upvotes)
            .map(|a| a.id))
    }

    fn insert_question(&mut self, question: &Question) -> StoreResult<u64> {
        self.faults.check(points::INSERT_QUESTION)?;

        if self.staged.questions.contains_key(&question.id) {
            return Err(StoreError::Conflict(format!("question id {}", question.id)));
        }
        if self.staged.questions.values().any(|q| q.title == question.title) {
            return Err(StoreError::Conflict(format!("title '{}'", question.title)));
        }

        self.staged.questions.insert(question.id, question.clone());
        Ok(1)
    }

    fn insert_answer(&mut self, answer: &Answer) -> StoreResult<u64> {
        self.faults.check(points::INSERT_ANSWER)?;

        if !self.staged.questions.contains_key(&answer.question_id) {
            return Err(StoreError::MissingReference(format!(
                "question {}",
                answer.question_id
            )));
        }
        if self.staged.answers.contains_key(&answer.id) {
            return Err(StoreError::Conflict(format!("answer id {}", answer.id)));
        }

        self.staged.answers.insert(answer.id, answer.clone());
        Ok(1)
    }

    fn add_answer_upvotes(&mut self, answer_id: Uuid, delta: i64) -> StoreResult<u64> {
        self.faults.check(points::ADD_UPVOTES)?;

        match self.staged.answers.get_mut(&answer_id) {
            Some(answer) => {
                answer.upvotes += delta;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn set_current_answer(&mut self, answer_id: Uuid, current: bool) -> StoreResult<u64> {
        self.faults.check(points::SET_CURRENT)?;

        match self.staged.answers.get_mut(&answer_id) {
            Some(answer) => {
                answer.is_current = current;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_unvoted_answers(&mut self, question_id: Uuid) -> StoreResult<Vec<Answer>> {
        self.faults.check(points::DELETE_UNVOTED)?;

        let doomed: Vec<Uuid> = self
            .staged
            .answers
            .values()
            .filter(|a| a.question_id == question_id && a.upvotes == 0)
            .map(|a| a.id)
            .collect();

        Ok(doomed
            .iter()
            .filter_map(|id| self.staged.answers.remove(id))
            .collect())
    }

    fn adjust_question_counters(
        &mut self,
        question_id: Uuid,
        edits: i64,
        pending: i64,
    ) -> StoreResult<u64> {
        self.faults.check(points::ADJUST_COUNTERS)?;

        match self.staged.questions.get_mut(&question_id) {
            Some(question) => {
                question.edit_count += edits;
                question.pending_count = (question.pending_count + pending).max(0);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn commit(self: Box<Self>) -> StoreResult<()> {
        let MemoryUnit {
            mut guard,
            staged,
            faults,
        } = *self;
        faults.check(points::COMMIT)?;
        *guard = staged;
        Ok(())
    }

    fn rollback(self: Box<Self>) -> StoreResult<()> {
        Ok(())
    }
}
