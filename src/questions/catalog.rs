//! Question catalog

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use super::listing::{QuestionFilter, SortOrder, SortSpec, PAGE_SIZE};
use crate::errors::{QaError, QaResult};
use crate::model::{Answer, Question};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::store::{transact, RelationalStore, UnitOfWork};

/// A question together with its current answer, if it has one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub question: Question,
    pub current_answer: Option<Answer>,
}

/// Read and write access to questions
#[derive(Clone)]
pub struct QuestionCatalog {
    store: Arc<dyn RelationalStore>,
    metrics: Arc<MetricsRegistry>,
}

impl QuestionCatalog {
    pub fn new(store: Arc<dyn RelationalStore>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { store, metrics }
    }

    /// Store a new question. Titles must be unique.
    pub fn post(&self, question: Question) -> QaResult<Question> {
        if question.title.trim().is_empty() {
            return Err(QaError::Validation("question title is empty".into()));
        }
        if question.content.trim().is_empty() {
            return Err(QaError::Validation("question content is empty".into()));
        }

        let stored: QaResult<Question> = transact(self.store.as_ref(), |unit| {
            unit.insert_question(&question)?;
            Ok(question.clone())
        });
        let stored = stored.map_err(|err| {
            self.metrics.increment_rollbacks();
            err
        })?;

        log_event_with_fields(
            Event::QuestionPosted,
            &[
                ("category", stored.category.as_str()),
                ("question_id", &stored.id.to_string()),
            ],
        );
        Ok(stored)
    }

    /// Fetch a question
    pub fn question(&self, question_id: Uuid) -> QaResult<Question> {
        transact(self.store.as_ref(), |unit| require_question(unit, question_id))
    }

    /// Fetch a question and its current answer
    pub fn find_post(&self, question_id: Uuid) -> QaResult<Post> {
        transact(self.store.as_ref(), |unit| {
            let question = require_question(unit, question_id)?;
            let current_answer = unit.current_answer(question_id)?;
            Ok(Post {
                question,
                current_answer,
            })
        })
    }

    /// Questions matching `filter`, most upvoted first.
    pub fn questions_by(&self, filter: &QuestionFilter) -> QaResult<Vec<Question>> {
        let posts = transact(self.store.as_ref(), load_posts)?;

        let mut matching: Vec<Question> = posts
            .into_iter()
            .filter(|(q, current)| filter.matches(q, current.as_ref()))
            .map(|(q, _)| q)
            .collect();
        matching.sort_by(|a, b| b.upvotes.cmp(&a.upvotes));

        if matching.is_empty() {
            return Err(QaError::NotFound("no questions found".into()));
        }
        Ok(matching)
    }

    /// One page of questions in the requested order.
    pub fn sorted(&self, spec: &SortSpec) -> QaResult<Vec<Question>> {
        let mut posts = transact(self.store.as_ref(), load_posts)?;

        if spec.column.needs_current_answer() {
            posts.retain(|(_, current)| current.is_some());
        }
        posts.sort_by(|a, b| {
            let ordering = spec.column.compare(a, b);
            match spec.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let page: Vec<Question> = posts
            .into_iter()
            .skip(spec.offset)
            .take(PAGE_SIZE)
            .map(|(q, _)| q)
            .collect();

        if page.is_empty() {
            return Err(QaError::NotFound("no questions found".into()));
        }
        Ok(page)
    }
}

fn require_question(unit: &mut dyn UnitOfWork, question_id: Uuid) -> QaResult<Question> {
    unit.question(question_id)?
        .ok_or_else(|| QaError::NotFound(format!("question {}", question_id)))
}

fn load_posts(unit: &mut dyn UnitOfWork) -> QaResult<Vec<(Question, Option<Answer>)>> {
    let questions = unit.questions()?;
    let mut posts = Vec::with_capacity(questions.len());
    for question in questions {
        let current = unit.current_answer(question.id)?;
        posts.push((question, current));
    }
    Ok(posts)
}
