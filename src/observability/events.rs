//! Observable events
//!
//! Events are explicit and typed. The string form is what appears in the
//! `event` field of each log line.

use std::fmt;

/// Observable events in answerdb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Request loop started
    ServeStart,
    /// Request loop finished (stdin closed)
    ServeComplete,
    /// A request failed
    RequestFailed,

    // Questions
    /// Question stored
    QuestionPosted,

    // Answers
    /// Candidate answer accepted
    AnswerSubmitted,
    /// Candidate answer refused (no slot, duplicate)
    AnswerRejected,

    // Votes
    /// Vote applied to an answer
    VoteCast,

    // Qualification
    /// Assessment pass left the current answer as it was
    AssessmentNoChange,
    /// An answer became current
    AnswerPromoted,
    /// The previous current answer lost its flag
    AnswerDemoted,
    /// Unvoted answers removed
    AnswersPurged,

    // Reputation
    /// First read created a default record
    ReputationInitialized,
    /// Score adjusted
    ReputationAdjusted,
    /// Reward withheld because the answer author is above the ceiling
    ReputationRewardSkipped,
    /// Reward could not be applied after a committed vote
    ReputationAdjustFailed,

    // Storage
    /// A unit of work was rolled back
    UnitRolledBack,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ServeStart => "SERVE_START",
            Event::ServeComplete => "SERVE_COMPLETE",
            Event::RequestFailed => "REQUEST_FAILED",
            Event::QuestionPosted => "QUESTION_POSTED",
            Event::AnswerSubmitted => "ANSWER_SUBMITTED",
            Event::AnswerRejected => "ANSWER_REJECTED",
            Event::VoteCast => "VOTE_CAST",
            Event::AssessmentNoChange => "ASSESSMENT_NO_CHANGE",
            Event::AnswerPromoted => "ANSWER_PROMOTED",
            Event::AnswerDemoted => "ANSWER_DEMOTED",
            Event::AnswersPurged => "ANSWERS_PURGED",
            Event::ReputationInitialized => "REPUTATION_INITIALIZED",
            Event::ReputationAdjusted => "REPUTATION_ADJUSTED",
            Event::ReputationRewardSkipped => "REPUTATION_REWARD_SKIPPED",
            Event::ReputationAdjustFailed => "REPUTATION_ADJUST_FAILED",
            Event::UnitRolledBack => "UNIT_ROLLED_BACK",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> super::Severity {
        use super::Severity;
        match self {
            Event::RequestFailed | Event::UnitRolledBack | Event::ReputationAdjustFailed => {
                Severity::Warn
            }
            Event::ReputationInitialized
            | Event::ReputationRewardSkipped
            | Event::AssessmentNoChange => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
