//! Vote reward policy
//!
//! Answer votes and question votes have historically rewarded different
//! parties: an answer vote moves the *voter's* score by the vote delta, a
//! question vote gives the *answer author* +1. Both rules are explicit here
//! and configurable per target. In both cases the reward is withheld once
//! the answer author's reputation exceeds the ceiling.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Vote, VoteTarget, REPUTATION_CEILING};

/// Who receives the reputation change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardRecipient {
    Voter,
    AnswerAuthor,
}

/// How large the change is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardAmount {
    /// +1 for an upvote, -1 for a downvote
    VoteDelta,
    /// A fixed amount regardless of direction
    Fixed(i64),
}

/// Reward rule for one vote target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardRule {
    pub recipient: RewardRecipient,
    pub amount: RewardAmount,
}

/// Outcome of applying a rule to one vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RewardDecision {
    Award { recipient: Uuid, delta: i64 },
    Skipped { author_reputation: i64 },
    /// The reputation store failed; the vote itself still stands
    Failed,
}

/// Reward rules for both vote targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardPolicy {
    #[serde(default = "RewardPolicy::default_answer_votes")]
    pub answer_votes: RewardRule,
    #[serde(default = "RewardPolicy::default_question_votes")]
    pub question_votes: RewardRule,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            answer_votes: Self::default_answer_votes(),
            question_votes: Self::default_question_votes(),
        }
    }
}

impl RewardPolicy {
    fn default_answer_votes() -> RewardRule {
        RewardRule {
            recipient: RewardRecipient::Voter,
            amount: RewardAmount::VoteDelta,
        }
    }

    fn default_question_votes() -> RewardRule {
        RewardRule {
            recipient: RewardRecipient::AnswerAuthor,
            amount: RewardAmount::Fixed(1),
        }
    }

    pub fn rule(&self, target: VoteTarget) -> &RewardRule {
        match target {
            VoteTarget::Answer => &self.answer_votes,
            VoteTarget::Question => &self.question_votes,
        }
    }

    /// Decide the reward for one vote.
    ///
    /// `author_reputation` is the answer author's score in the question's
    /// category; above the ceiling nothing is awarded.
    pub fn decide(
        &self,
        target: VoteTarget,
        vote: Vote,
        voter_id: Uuid,
        author_id: Uuid,
        author_reputation: i64,
    ) -> RewardDecision {
        if author_reputation > REPUTATION_CEILING {
            return RewardDecision::Skipped { author_reputation };
        }

        let rule = self.rule(target);
        let recipient = match rule.recipient {
            RewardRecipient::Voter => voter_id,
            RewardRecipient::AnswerAuthor => author_id,
        };
        let delta = match rule.amount {
            RewardAmount::VoteDelta => vote.delta(),
            RewardAmount::Fixed(amount) => amount,
        };
        RewardDecision::Award { recipient, delta }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_vote_rewards_voter_by_delta() {
        let (voter, author) = (Uuid::new_v4(), Uuid::new_v4());
        let policy = RewardPolicy::default();
        assert_eq!(
            policy.decide(VoteTarget::Answer, Vote::Down, voter, author, 10),
            RewardDecision::Award { recipient: voter, delta: -1 }
        );
    }

    #[test]
    fn test_question_vote_rewards_author_by_one() {
        let (voter, author) = (Uuid::new_v4(), Uuid::new_v4());
        let policy = RewardPolicy::default();
        assert_eq!(
            policy.decide(VoteTarget::Question, Vote::Down, voter, author, 10),
            RewardDecision::Award { recipient: author, delta: 1 }
        );
    }

    #[test]
    fn test_ceiling_is_inclusive() {
        let (voter, author) = (Uuid::new_v4(), Uuid::new_v4());
        let policy = RewardPolicy::default();
        assert!(matches!(
            policy.decide(VoteTarget::Answer, Vote::Up, voter, author, 25),
            RewardDecision::Award { .. }
        ));
        assert_eq!(
            policy.decide(VoteTarget::Answer, Vote::Up, voter, author, 26),
            RewardDecision::Skipped { author_reputation: 26 }
        );
    }

    #[test]
    fn test_policy_deserializes_from_config_shape() {
        let json = r#"{
            "answer_votes": { "recipient": "answer_author", "amount": "vote_delta" },
            "question_votes": { "recipient": "voter", "amount": { "fixed": 2 } }
        }"#;
        let policy: RewardPolicy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.answer_votes.recipient, RewardRecipient::AnswerAuthor);
        assert_eq!(policy.question_votes.amount, RewardAmount::Fixed(2));
    }

    #[test]
    fn test_missing_rules_use_defaults() {
        let policy: RewardPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy, RewardPolicy::default());
    }
}
