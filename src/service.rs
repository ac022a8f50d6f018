//! # Q&A service
//!
//! Wires the reputation ledger, admission control, the submission pipeline,
//! vote processing, qualification and the question catalog into the
//! caller-level operations.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::answers::{AdmissionController, SubmissionPipeline};
use crate::errors::{QaError, QaResult};
use crate::model::{Answer, Category, Question, Vote, VoteTarget};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry, MetricsSnapshot};
use crate::qualification::{Assessment, QualificationEngine};
use crate::questions::{Post, QuestionCatalog, QuestionFilter, SortSpec};
use crate::reputation::{RewardDecision, RewardPolicy, ReputationLedger, ReputationStore};
use crate::store::RelationalStore;
use crate::votes::{VoteProcessor, VoteReceipt};

/// Reputation change charged for asking a question
pub const DEFAULT_QUESTION_ASKING_FEE: i64 = -2;

/// Everything a vote caused
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteReport {
    pub receipt: VoteReceipt,
    pub reward: RewardDecision,
    pub assessment: Assessment,
}

/// Caller-facing Q&A operations
#[derive(Clone)]
pub struct QaService {
    ledger: ReputationLedger,
    admission: AdmissionController,
    submissions: SubmissionPipeline,
    votes: VoteProcessor,
    engine: QualificationEngine,
    catalog: QuestionCatalog,
    rewards: RewardPolicy,
    question_asking_fee: i64,
    metrics: Arc<MetricsRegistry>,
}

impl QaService {
    pub fn new(
        relational: Arc<dyn RelationalStore>,
        reputation: Arc<dyn ReputationStore>,
        rewards: RewardPolicy,
        question_asking_fee: i64,
    ) -> Self {
        let metrics = Arc::new(MetricsRegistry::new());
        Self {
            ledger: ReputationLedger::new(reputation, metrics.clone()),
            admission: AdmissionController::new(relational.clone()),
            submissions: SubmissionPipeline::new(relational.clone(), metrics.clone()),
            votes: VoteProcessor::new(relational.clone(), metrics.clone()),
            engine: QualificationEngine::new(relational.clone(), metrics.clone()),
            catalog: QuestionCatalog::new(relational, metrics.clone()),
            rewards,
            question_asking_fee,
            metrics,
        }
    }

    /// Service with the default reward policy and asking fee
    pub fn with_defaults(
        relational: Arc<dyn RelationalStore>,
        reputation: Arc<dyn ReputationStore>,
    ) -> Self {
        Self::new(
            relational,
            reputation,
            RewardPolicy::default(),
            DEFAULT_QUESTION_ASKING_FEE,
        )
    }

    /// Post a question and charge the author the asking fee.
    pub fn post_question(
        &self,
        author_id: Uuid,
        category: &str,
        title: &str,
        content: &str,
    ) -> QaResult<Question> {
        let category = Category::parse(category)?;
        let question = Question::new(author_id, category, title.to_string(), content.to_string());
        let stored = self.catalog.post(question)?;

        if self.question_asking_fee != 0 {
            self.ledger
                .adjust(&stored.category, author_id, self.question_asking_fee)?;
        }
        Ok(stored)
    }

    /// Submit a candidate answer to a question.
    pub fn submit_answer(
        &self,
        question_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> QaResult<Answer> {
        if content.trim().is_empty() {
            return Err(QaError::Validation("answer content is empty".into()));
        }
        let question = self.catalog.question(question_id)?;

        if !self.admission.is_slot_available(question_id)? {
            return Err(QaError::Validation(
                "maximum capacity for answers has been reached".into(),
            ));
        }

        let reputation = self.ledger.get(&question.category, author_id)?;
        self.submissions
            .submit(question_id, author_id, content, reputation)
    }

    /// Vote on an answer, reward per policy, then re-assess its question.
    pub fn vote_on_answer(&self, voter_id: Uuid, answer_id: Uuid, vote: Vote) -> QaResult<VoteReport> {
        let receipt = self.votes.cast_vote(answer_id, vote)?;
        self.finish_vote(VoteTarget::Answer, voter_id, vote, receipt)
    }

    /// Vote on a question's current answer, reward per policy, then
    /// re-assess the question.
    pub fn vote_on_question(
        &self,
        voter_id: Uuid,
        question_id: Uuid,
        vote: Vote,
    ) -> QaResult<VoteReport> {
        let receipt = self.votes.cast_question_vote(question_id, vote)?;
        self.finish_vote(VoteTarget::Question, voter_id, vote, receipt)
    }

    /// Reward and assess after a committed vote.
    ///
    /// The vote is already durable here, so a reputation store failure is
    /// reported as `RewardDecision::Failed` and never skips the assessment.
    fn finish_vote(
        &self,
        target: VoteTarget,
        voter_id: Uuid,
        vote: Vote,
        receipt: VoteReceipt,
    ) -> QaResult<VoteReport> {
        let question = self.catalog.question(receipt.question_id)?;

        let reward = match self.reward(target, voter_id, vote, &question.category, &receipt) {
            Ok(reward) => reward,
            Err(err) => {
                log_event_with_fields(
                    Event::ReputationAdjustFailed,
                    &[
                        ("answer_id", &receipt.answer_id.to_string()),
                        ("reason", &err.to_string()),
                    ],
                );
                RewardDecision::Failed
            }
        };

        let assessment = self.engine.assess(receipt.question_id)?;
        Ok(VoteReport {
            receipt,
            reward,
            assessment,
        })
    }

    fn reward(
        &self,
        target: VoteTarget,
        voter_id: Uuid,
        vote: Vote,
        category: &Category,
        receipt: &VoteReceipt,
    ) -> QaResult<RewardDecision> {
        let author_reputation = self.ledger.get(category, receipt.author_id)?;

        let reward = self.rewards.decide(
            target,
            vote,
            voter_id,
            receipt.author_id,
            author_reputation,
        );
        match reward {
            RewardDecision::Award { recipient, delta } => {
                self.ledger.adjust(category, recipient, delta)?;
            }
            RewardDecision::Skipped { author_reputation } => {
                log_event_with_fields(
                    Event::ReputationRewardSkipped,
                    &[
                        ("author_id", &receipt.author_id.to_string()),
                        ("author_reputation", &author_reputation.to_string()),
                    ],
                );
            }
            RewardDecision::Failed => {}
        }
        Ok(reward)
    }

    pub fn find_post(&self, question_id: Uuid) -> QaResult<Post> {
        self.catalog.find_post(question_id)
    }

    pub fn questions_by(&self, filter: &QuestionFilter) -> QaResult<Vec<Question>> {
        self.catalog.questions_by(filter)
    }

    pub fn sorted_questions(&self, spec: &SortSpec) -> QaResult<Vec<Question>> {
        self.catalog.sorted(spec)
    }

    /// A user's score in a category
    pub fn reputation(&self, category: &str, user_id: Uuid) -> QaResult<i64> {
        self.ledger.get(&Category::parse(category)?, user_id)
    }

    /// Run a qualification pass without a vote
    pub fn assess(&self, question_id: Uuid) -> QaResult<Assessment> {
        self.engine.assess(question_id)
    }

    pub fn is_slot_available(&self, question_id: Uuid) -> QaResult<bool> {
        self.admission.is_slot_available(question_id)
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
