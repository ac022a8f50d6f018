use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A candidate answer to a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Unique answer identifier
    pub id: Uuid,

    /// Question this answer belongs to
    pub question_id: Uuid,

    /// Author of the answer
    pub author_id: Uuid,

    /// Body text
    pub content: String,

    /// Net votes received
    #[serde(default)]
    pub upvotes: i64,

    /// Threshold fixed at submission time from the author's reputation
    pub required_upvotes: i64,

    /// Whether this is the authoritative answer for its question
    #[serde(default)]
    pub is_current: bool,

    /// Last time the answer content changed
    #[serde(default = "Utc::now")]
    pub last_edited_at: DateTime<Utc>,
}

impl Answer {
    /// Create a new candidate answer (no votes, not current)
    pub fn new(question_id: Uuid, author_id: Uuid, content: String, required_upvotes: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            question_id,
            author_id,
            content,
            upvotes: 0,
            required_upvotes,
            is_current: false,
            last_edited_at: Utc::now(),
        }
    }

    /// An answer is qualified once its upvotes reach its own threshold.
    pub fn is_qualified(&self) -> bool {
        self.upvotes >= self.required_upvotes
    }

    /// Content-level identity used for duplicate detection.
    pub fn key(&self) -> AnswerKey {
        AnswerKey {
            question_id: self.question_id,
            author_id: self.author_id,
            content: self.content.clone(),
            required_upvotes: self.required_upvotes,
        }
    }

    /// Ranking order for the qualification scan:
    /// upvotes descending, current first, then oldest edit first.
    pub fn rank_cmp(a: &Answer, b: &Answer) -> Ordering {
        b.upvotes
            .cmp(&a.upvotes)
            .then_with(|| b.is_current.cmp(&a.is_current))
            .then_with(|| a.last_edited_at.cmp(&b.last_edited_at))
    }
}

/// The (question, author, content, required upvotes) tuple that makes two
/// answers duplicates of each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnswerKey {
    pub question_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub required_upvotes: i64,
}
