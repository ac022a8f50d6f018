//! Seed fixtures for the in-memory stores

use std::fs;
use std::path::Path;

use serde::Deserialize;
use uuid::Uuid;

use super::errors::{CliError, CliResult};
use crate::model::{Answer, Category, Question, ReputationKey, MAX_PENDING_ANSWERS};
use crate::reputation::InMemoryReputationStore;
use crate::store::{InMemoryRelationalStore, RelationalStore, StoreError, UnitOfWork};

/// Rows loaded verbatim into the stores
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Seed {
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub reputation: Vec<SeedScore>,
}

#[derive(Debug, Deserialize)]
pub struct SeedScore {
    pub category: Category,
    pub user_id: Uuid,
    pub score: i64,
}

impl Seed {
    pub fn read(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::seed_failed(format!("Failed to read seed {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| CliError::seed_failed(format!("Invalid seed JSON: {}", e)))
    }

    /// Load every row in one unit of work. Answers must reference seeded or
    /// existing questions.
    pub fn apply(
        self,
        relational: &InMemoryRelationalStore,
        reputation: &InMemoryReputationStore,
    ) -> CliResult<()> {
        let seed_err = |e: StoreError| CliError::seed_failed(e.to_string());

        let mut unit = relational.begin().map_err(seed_err)?;
        for question in &self.questions {
            unit.insert_question(question).map_err(seed_err)?;
        }
        for answer in &self.answers {
            unit.insert_answer(answer).map_err(seed_err)?;
        }

        let mut touched: Vec<Uuid> = self.questions.iter().map(|q| q.id).collect();
        touched.extend(self.answers.iter().map(|a| a.question_id));
        touched.sort();
        touched.dedup();
        for question_id in touched {
            check_question(unit.as_mut(), question_id)?;
        }
        unit.commit().map_err(seed_err)?;

        for row in self.reputation {
            reputation
                .set(ReputationKey::new(row.category, row.user_id), row.score)
                .map_err(seed_err)?;
        }
        Ok(())
    }
}

/// A seeded question must be in a state the engine can continue from: at
/// most one current answer and no more than the pending limit.
fn check_question(unit: &mut dyn UnitOfWork, question_id: Uuid) -> CliResult<()> {
    let seed_err = |e: StoreError| CliError::seed_failed(e.to_string());

    if let Some(question) = unit.question(question_id).map_err(seed_err)? {
        if !(0..=MAX_PENDING_ANSWERS).contains(&question.pending_count) {
            return Err(CliError::seed_failed(format!(
                "question {} has pending_count {}, allowed 0-{}",
                question_id, question.pending_count, MAX_PENDING_ANSWERS
            )));
        }
    }

    let current = unit
        .answers_for(question_id)
        .map_err(seed_err)?
        .iter()
        .filter(|a| a.is_current)
        .count();
    if current > 1 {
        return Err(CliError::seed_failed(format!(
            "question {} has {} current answers",
            question_id, current
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_loads_rows() {
        let question_id = Uuid::new_v4();
        let user = Uuid::new_v4();
        let raw = serde_json::json!({
            "questions": [{
                "id": question_id,
                "author_id": user,
                "category": "gains",
                "title": "how",
                "content": "?",
                "pending_count": 1
            }],
            "answers": [{
                "id": Uuid::new_v4(),
                "question_id": question_id,
                "author_id": user,
                "content": "like this",
                "required_upvotes": 20
            }],
            "reputation": [{"category": "gains", "user_id": user, "score": 30}]
        });
        let seed: Seed = serde_json::from_value(raw).unwrap();

        let relational = InMemoryRelationalStore::new();
        let reputation = InMemoryReputationStore::new();
        seed.apply(&relational, &reputation).unwrap();

        let mut unit = relational.begin().unwrap();
        assert_eq!(unit.answers_for(question_id).unwrap().len(), 1);
        let key = ReputationKey::new(Category::parse("gains").unwrap(), user);
        assert_eq!(reputation.peek(&key).unwrap(), Some(30));
    }

    #[test]
    fn test_orphan_answer_rejected() {
        let raw = serde_json::json!({
            "answers": [{
                "id": Uuid::new_v4(),
                "question_id": Uuid::new_v4(),
                "author_id": Uuid::new_v4(),
                "content": "x",
                "required_upvotes": 20
            }]
        });
        let seed: Seed = serde_json::from_value(raw).unwrap();
        let err = seed
            .apply(&InMemoryRelationalStore::new(), &InMemoryReputationStore::new())
            .unwrap_err();
        assert_eq!(err.code_str(), "ANSWERDB_CLI_SEED_FAILED");
    }

    fn question_json(id: Uuid, pending: i64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "author_id": Uuid::new_v4(),
            "category": "gains",
            "title": format!("title {}", id),
            "content": "?",
            "pending_count": pending
        })
    }

    fn answer_json(question_id: Uuid, current: bool) -> serde_json::Value {
        serde_json::json!({
            "id": Uuid::new_v4(),
            "question_id": question_id,
            "author_id": Uuid::new_v4(),
            "content": "x",
            "upvotes": 3,
            "required_upvotes": 20,
            "is_current": current
        })
    }

    #[test]
    fn test_two_current_answers_rejected() {
        let question_id = Uuid::new_v4();
        let raw = serde_json::json!({
            "questions": [question_json(question_id, 0)],
            "answers": [answer_json(question_id, true), answer_json(question_id, true)]
        });
        let seed: Seed = serde_json::from_value(raw).unwrap();
        let relational = InMemoryRelationalStore::new();

        let err = seed
            .apply(&relational, &InMemoryReputationStore::new())
            .unwrap_err();

        assert_eq!(err.code_str(), "ANSWERDB_CLI_SEED_FAILED");
        assert!(err.message().contains("current answers"));
        let mut unit = relational.begin().unwrap();
        assert_eq!(unit.question(question_id).unwrap(), None);
    }

    #[test]
    fn test_pending_over_limit_rejected() {
        let question_id = Uuid::new_v4();
        let raw = serde_json::json!({
            "questions": [question_json(question_id, MAX_PENDING_ANSWERS + 1)]
        });
        let seed: Seed = serde_json::from_value(raw).unwrap();
        let err = seed
            .apply(&InMemoryRelationalStore::new(), &InMemoryReputationStore::new())
            .unwrap_err();
        assert!(err.message().contains("pending_count"));
    }

    #[test]
    fn test_one_current_answer_at_limit_accepted() {
        let question_id = Uuid::new_v4();
        let raw = serde_json::json!({
            "questions": [question_json(question_id, MAX_PENDING_ANSWERS)],
            "answers": [answer_json(question_id, true), answer_json(question_id, false)]
        });
        let seed: Seed = serde_json::from_value(raw).unwrap();
        seed.apply(&InMemoryRelationalStore::new(), &InMemoryReputationStore::new())
            .unwrap();
    }
}
