use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{QaError, QaResult};

/// Longest category name accepted.
const MAX_CATEGORY_LEN: usize = 15;

/// A category token: short, lowercase, `[a-z0-9_-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category(String);

impl Category {
    /// Validate and wrap a category token.
    pub fn parse(raw: &str) -> QaResult<Self> {
        if raw.is_empty() || raw.len() > MAX_CATEGORY_LEN {
            return Err(QaError::Validation(format!(
                "category must be 1-{} characters",
                MAX_CATEGORY_LEN
            )));
        }
        let valid = raw
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
        if !valid {
            return Err(QaError::Validation(format!(
                "category '{}' must be a lowercase token",
                raw
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Category {
    type Error = QaError;

    fn try_from(value: String) -> QaResult<Self> {
        Self::parse(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.0
    }
}

/// Key of a reputation record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReputationKey {
    pub category: Category,
    pub user_id: Uuid,
}

impl ReputationKey {
    pub fn new(category: Category, user_id: Uuid) -> Self {
        Self { category, user_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_lowercase_tokens() {
        assert!(Category::parse("rust").is_ok());
        assert!(Category::parse("city-dining").is_ok());
        assert!(Category::parse("web_3").is_ok());
    }

    #[test]
    fn test_rejects_malformed_tokens() {
        assert!(matches!(Category::parse(""), Err(QaError::Validation(_))));
        assert!(matches!(Category::parse("Gains"), Err(QaError::Validation(_))));
        assert!(matches!(Category::parse("city dining"), Err(QaError::Validation(_))));
        assert!(matches!(
            Category::parse("a-very-long-category-name"),
            Err(QaError::Validation(_))
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Category = serde_json::from_str("\"gains\"").unwrap();
        assert_eq!(ok.as_str(), "gains");
        assert!(serde_json::from_str::<Category>("\"Gains\"").is_err());
    }
}
