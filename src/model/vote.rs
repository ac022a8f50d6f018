use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::QaError;

/// Direction of a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Up,
    Down,
}

impl Vote {
    /// Score change applied to the answer: +1 or -1.
    pub fn delta(self) -> i64 {
        match self {
            Vote::Up => 1,
            Vote::Down => -1,
        }
    }
}

impl FromStr for Vote {
    type Err = QaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" | "upvote" => Ok(Vote::Up),
            "down" | "downvote" => Ok(Vote::Down),
            other => Err(QaError::Validation(format!("unknown vote '{}'", other))),
        }
    }
}

/// What the voter pointed at.
///
/// A question vote lands on the question's current answer; the two targets
/// differ only in who is rewarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteTarget {
    Answer,
    Question,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_delta() {
        assert_eq!(Vote::Up.delta(), 1);
        assert_eq!(Vote::Down.delta(), -1);
    }

    #[test]
    fn test_parse_vote() {
        assert_eq!("upvote".parse::<Vote>().unwrap(), Vote::Up);
        assert_eq!("downvote".parse::<Vote>().unwrap(), Vote::Down);
        assert!("sideways".parse::<Vote>().is_err());
    }
}
