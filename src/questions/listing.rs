//! Filter and sort criteria

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{QaError, QaResult};
use crate::model::{Answer, Category, Question};

/// Questions per sorted page
pub const PAGE_SIZE: usize = 10;

/// Which questions to list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "kebab-case")]
pub enum QuestionFilter {
    /// Questions written by this user
    PostedBy(Uuid),
    /// Questions whose current answer was written by this user
    AnsweredBy(Uuid),
    /// Questions filed under this category
    Category(Category),
}

impl QuestionFilter {
    /// Parse a `(filter, value)` pair such as `("posted-by", "<uuid>")`.
    pub fn parse(filter: &str, value: &str) -> QaResult<Self> {
        match filter {
            "posted-by" => Ok(QuestionFilter::PostedBy(parse_user(value)?)),
            "answered-by" => Ok(QuestionFilter::AnsweredBy(parse_user(value)?)),
            "category" => Ok(QuestionFilter::Category(Category::parse(value)?)),
            other => Err(QaError::Validation(format!("unknown filter '{}'", other))),
        }
    }

    pub(crate) fn matches(&self, question: &Question, current: Option<&Answer>) -> bool {
        match self {
            QuestionFilter::PostedBy(user) => question.author_id == *user,
            QuestionFilter::AnsweredBy(user) => current.map_or(false, |a| a.author_id == *user),
            QuestionFilter::Category(category) => question.category == *category,
        }
    }
}

fn parse_user(value: &str) -> QaResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| QaError::Validation(format!("'{}' is not a user id", value)))
}

/// Sortable columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    QuestionUpvotes,
    QuestionDate,
    QuestionEdits,
    AnswerUpvotes,
    AnswerDate,
}

/// The only (component, column) pairs a sort request may name.
const SORT_COLUMNS: &[(&str, &str, SortColumn)] = &[
    ("question", "upvotes", SortColumn::QuestionUpvotes),
    ("question", "date", SortColumn::QuestionDate),
    ("question", "edits", SortColumn::QuestionEdits),
    ("answer", "upvotes", SortColumn::AnswerUpvotes),
    ("answer", "date", SortColumn::AnswerDate),
];

impl SortColumn {
    pub fn lookup(component: &str, column: &str) -> QaResult<Self> {
        SORT_COLUMNS
            .iter()
            .find(|(c, col, _)| *c == component && *col == column)
            .map(|(_, _, sort)| *sort)
            .ok_or_else(|| {
                QaError::Validation(format!(
                    "could not recognize the sorting criteria '{}/{}'",
                    component, column
                ))
            })
    }

    /// Sorting by an answer column only considers questions that have a
    /// current answer.
    pub fn needs_current_answer(self) -> bool {
        matches!(self, SortColumn::AnswerUpvotes | SortColumn::AnswerDate)
    }

    pub(crate) fn compare(
        self,
        a: &(Question, Option<Answer>),
        b: &(Question, Option<Answer>),
    ) -> Ordering {
        match self {
            SortColumn::QuestionUpvotes => a.0.upvotes.cmp(&b.0.upvotes),
            SortColumn::QuestionDate => a.0.submitted_at.cmp(&b.0.submitted_at),
            SortColumn::QuestionEdits => a.0.edit_count.cmp(&b.0.edit_count),
            SortColumn::AnswerUpvotes => a
                .1
                .as_ref()
                .map(|x| x.upvotes)
                .cmp(&b.1.as_ref().map(|x| x.upvotes)),
            SortColumn::AnswerDate => a
                .1
                .as_ref()
                .map(|x| x.last_edited_at)
                .cmp(&b.1.as_ref().map(|x| x.last_edited_at)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(order: &str) -> QaResult<Self> {
        match order.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(QaError::Validation(format!("unknown sort order '{}'", other))),
        }
    }
}

/// A page request over sorted questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: SortColumn,
    pub order: SortOrder,
    #[serde(default)]
    pub offset: usize,
}

impl SortSpec {
    /// Resolve a `(component, column)` pair and order name into a page request.
    pub fn new(component: &str, column: &str, order: &str, offset: usize) -> QaResult<Self> {
        Ok(Self {
            column: SortColumn::lookup(component, column)?,
            order: SortOrder::parse(order)?,
            offset,
        })
    }

    /// Parse request strings, e.g. `("answer", "upvotes", "desc", "10")`.
    pub fn parse(component: &str, column: &str, order: &str, offset: &str) -> QaResult<Self> {
        let offset = offset
            .parse::<usize>()
            .map_err(|_| QaError::Validation(format!("invalid offset '{}'", offset)))?;
        Self::new(component, column, order, offset)
    }
}
