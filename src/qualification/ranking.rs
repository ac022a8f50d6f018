//! Ranking scan over a question's answers

use uuid::Uuid;

use crate::model::Answer;

/// What the scan saw
#[derive(Debug, Clone, Default)]
pub struct RankingScan {
    /// Qualified answers in ranking order
    pub qualified: Vec<Answer>,
    /// The answer holding the current flag when the scan reached it
    pub previous_current: Option<Answer>,
}

/// What the pass should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Keep,
    Promote { promote: Uuid, demote: Option<Uuid> },
}

impl RankingScan {
    /// Walk `ranked` (already in ranking order), stopping right after the
    /// current answer. Answers ranked below the current one are never
    /// considered.
    pub fn walk(ranked: impl IntoIterator<Item = Answer>) -> Self {
        let mut scan = RankingScan::default();

        for answer in ranked {
            let is_current = answer.is_current;
            if answer.is_qualified() {
                scan.qualified.push(answer.clone());
            }
            if is_current {
                scan.previous_current = Some(answer);
                break;
            }
        }
        scan
    }

    pub fn decide(&self) -> Decision {
        let best = match self.qualified.first() {
            Some(best) => best,
            None => return Decision::Keep,
        };

        match &self.previous_current {
            Some(current) if current.id == best.id => Decision::Keep,
            Some(current) => Decision::Promote {
                promote: best.id,
                demote: Some(current.id),
            },
            None => Decision::Promote {
                promote: best.id,
                demote: None,
            },
        }
    }
}
