//! # Configuration
//!
//! JSON configuration file. Every field has a default, so `{}` is a valid
//! configuration. `Config::load` always validates.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::Severity;
use crate::reputation::{RewardAmount, RewardPolicy};
use crate::service::DEFAULT_QUESTION_ASKING_FEE;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// answerdb configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Minimum log severity (trace, info, warn, error, fatal)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Fixture loaded into the in-memory stores at start
    #[serde(default)]
    pub seed_file: Option<PathBuf>,

    /// Reward rules per vote target
    #[serde(default)]
    pub rewards: RewardPolicy,

    /// Reputation change charged per posted question
    #[serde(default = "default_question_asking_fee")]
    pub question_asking_fee: i64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_question_asking_fee() -> i64 {
    DEFAULT_QUESTION_ASKING_FEE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            seed_file: None,
            rewards: RewardPolicy::default(),
            question_asking_fee: default_question_asking_fee(),
        }
    }
}

impl Config {
    /// Load and validate configuration from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut config: Config =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        // Relative seed paths are relative to the config file
        if let (Some(seed), Some(dir)) = (config.seed_file.as_ref(), path.parent()) {
            if seed.is_relative() {
                config.seed_file = Some(dir.join(seed));
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if Severity::parse(&self.log_level).is_none() {
            return Err(ConfigError::Invalid(format!(
                "unknown log_level '{}'",
                self.log_level
            )));
        }

        if self.question_asking_fee > 0 {
            return Err(ConfigError::Invalid(
                "question_asking_fee must be <= 0".into(),
            ));
        }

        for (name, rule) in [
            ("answer_votes", &self.rewards.answer_votes),
            ("question_votes", &self.rewards.question_votes),
        ] {
            if rule.amount == RewardAmount::Fixed(0) {
                return Err(ConfigError::Invalid(format!(
                    "rewards.{} awards nothing; use a non-zero amount",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Parsed log level
    pub fn severity(&self) -> Severity {
        Severity::parse(&self.log_level).unwrap_or(Severity::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reputation::RewardRecipient;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let file = write_config("{}");
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.question_asking_fee, -2);
    }

    #[test]
    fn test_reward_rules_parse() {
        let file = write_config(
            r#"{"rewards": {"question_votes": {"recipient": "voter", "amount": "vote_delta"}}}"#,
        );
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.rewards.question_votes.recipient, RewardRecipient::Voter);
        assert_eq!(config.rewards.question_votes.amount, RewardAmount::VoteDelta);
        assert_eq!(
            config.rewards.answer_votes,
            RewardPolicy::default().answer_votes
        );
    }

    #[test]
    fn test_positive_fee_rejected() {
        let file = write_config(r#"{"question_asking_fee": 3}"#);
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let file = write_config(r#"{"log_level": "chatty"}"#);
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        let file = write_config("{ not json");
        assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Config::load(Path::new("/definitely/not/here.json")),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_relative_seed_path_resolved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answerdb.json");
        fs::write(&path, r#"{"seed_file": "seed.json"}"#).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.seed_file, Some(dir.path().join("seed.json")));
    }
}
