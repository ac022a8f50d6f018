use serde::Serialize;
use uuid::Uuid;

/// Terminal state of one assessment pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssessmentOutcome {
    /// Current answer (or lack of one) stays as it was
    NoChange,
    /// An answer became current where none was before
    Promoted { promoted: Uuid },
    /// An answer became current and replaced the previous one
    PromotedAndDemoted { promoted: Uuid, demoted: Uuid },
}

impl AssessmentOutcome {
    /// The answer that became current, if any
    pub fn promoted(&self) -> Option<Uuid> {
        match self {
            AssessmentOutcome::NoChange => None,
            AssessmentOutcome::Promoted { promoted }
            | AssessmentOutcome::PromotedAndDemoted { promoted, .. } => Some(*promoted),
        }
    }

    /// The answer that lost the current flag, if any
    pub fn demoted(&self) -> Option<Uuid> {
        match self {
            AssessmentOutcome::PromotedAndDemoted { demoted, .. } => Some(*demoted),
            _ => None,
        }
    }

    /// (edit count, pending count) deltas caused by the flag changes.
    ///
    /// A promoted answer leaves the pending pool; a demoted one returns.
    pub fn counter_deltas(&self) -> (i64, i64) {
        match self {
            AssessmentOutcome::NoChange => (0, 0),
            AssessmentOutcome::Promoted { .. } => (1, -1),
            AssessmentOutcome::PromotedAndDemoted { .. } => (1, 0),
        }
    }
}

/// Result of one assessment pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub question_id: Uuid,
    pub outcome: AssessmentOutcome,
    /// Answers removed by the zero-vote purge
    pub purged: Vec<Uuid>,
}

impl Assessment {
    pub fn changed(&self) -> bool {
        self.outcome != AssessmentOutcome::NoChange
    }
}
