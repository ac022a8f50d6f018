use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::Category;

/// A posted question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique question identifier
    pub id: Uuid,

    /// Author of the question
    pub author_id: Uuid,

    /// Category the question is filed under
    pub category: Category,

    /// Title (unique across questions)
    pub title: String,

    /// Body text
    pub content: String,

    #[serde(default)]
    pub upvotes: i64,

    /// Number of times the current answer changed
    #[serde(default)]
    pub edit_count: i64,

    /// Candidate answers not yet purged or promoted
    #[serde(default)]
    pub pending_count: i64,

    /// When the question was submitted
    #[serde(default = "Utc::now")]
    pub submitted_at: DateTime<Utc>,
}

impl Question {
    /// Create a new question with zeroed counters
    pub fn new(author_id: Uuid, category: Category, title: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            category,
            title,
            content,
            upvotes: 0,
            edit_count: 0,
            pending_count: 0,
            submitted_at: Utc::now(),
        }
    }
}
