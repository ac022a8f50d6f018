//! Vote Processing Tests
//!
//! A vote moves exactly one answer's score by exactly its delta.

use std::sync::Arc;

use answerdb::model::{Answer, Category, Question, Vote};
use answerdb::observability::MetricsRegistry;
use answerdb::store::fault::points;
use answerdb::store::{InMemoryRelationalStore, RelationalStore};
use answerdb::votes::VoteProcessor;
use answerdb::QaError;
use uuid::Uuid;

fn setup() -> (Arc<InMemoryRelationalStore>, VoteProcessor) {
    let store = Arc::new(InMemoryRelationalStore::new());
    let votes = VoteProcessor::new(store.clone(), Arc::new(MetricsRegistry::new()));
    (store, votes)
}

fn seed(store: &InMemoryRelationalStore, answers: &[(i64, bool)]) -> (Uuid, Vec<Answer>) {
    let question = Question::new(
        Uuid::new_v4(),
        Category::parse("gains").unwrap(),
        "title".to_string(),
        "body".to_string(),
    );
    let rows: Vec<Answer> = answers
        .iter()
        .enumerate()
        .map(|(i, (upvotes, current))| {
            let mut a = Answer::new(question.id, Uuid::new_v4(), format!("a{}", i), 20);
            a.upvotes = *upvotes;
            a.is_current = *current;
            a
        })
        .collect();

    let mut unit = store.begin().unwrap();
    unit.insert_question(&question).unwrap();
    for row in &rows {
        unit.insert_answer(row).unwrap();
    }
    unit.commit().unwrap();
    (question.id, rows)
}

fn upvotes(store: &InMemoryRelationalStore, id: Uuid) -> i64 {
    store.begin().unwrap().answer(id).unwrap().unwrap().upvotes
}

// =============================================================================
// Answer votes
// =============================================================================

/// Up and down votes change only the target answer.
#[test]
fn test_vote_changes_only_target() {
    let (store, votes) = setup();
    let (_, rows) = seed(&store, &[(3, false), (7, false), (1, true)]);

    for (vote, expected) in [(Vote::Up, 4), (Vote::Down, 3), (Vote::Down, 2)] {
        let receipt = votes.cast_vote(rows[0].id, vote).unwrap();
        assert_eq!(receipt.upvotes, expected);
        assert_eq!(upvotes(&store, rows[0].id), expected);
        assert_eq!(upvotes(&store, rows[1].id), 7);
        assert_eq!(upvotes(&store, rows[2].id), 1);
    }
}

/// The receipt names the answer's author and question.
#[test]
fn test_receipt_identifies_author() {
    let (store, votes) = setup();
    let (question_id, rows) = seed(&store, &[(0, false)]);

    let receipt = votes.cast_vote(rows[0].id, Vote::Up).unwrap();
    assert_eq!(receipt.author_id, rows[0].author_id);
    assert_eq!(receipt.question_id, question_id);
}

/// Scores may go negative.
#[test]
fn test_downvote_below_zero() {
    let (store, votes) = setup();
    let (_, rows) = seed(&store, &[(0, false)]);
    assert_eq!(votes.cast_vote(rows[0].id, Vote::Down).unwrap().upvotes, -1);
}

#[test]
fn test_unknown_answer_not_found() {
    let (_, votes) = setup();
    assert!(matches!(
        votes.cast_vote(Uuid::new_v4(), Vote::Up),
        Err(QaError::NotFound(_))
    ));
}

/// A failed write leaves the score unchanged.
#[test]
fn test_failed_vote_not_applied() {
    let (store, votes) = setup();
    let (_, rows) = seed(&store, &[(4, false)]);

    store.faults().arm(points::ADD_UPVOTES);
    assert!(matches!(
        votes.cast_vote(rows[0].id, Vote::Up),
        Err(QaError::Storage(_))
    ));
    assert_eq!(upvotes(&store, rows[0].id), 4);
}

// =============================================================================
// Question votes
// =============================================================================

/// A question vote lands on the current answer.
#[test]
fn test_question_vote_targets_current_answer() {
    let (store, votes) = setup();
    let (question_id, rows) = seed(&store, &[(9, false), (5, true)]);

    let receipt = votes.cast_question_vote(question_id, Vote::Up).unwrap();

    assert_eq!(receipt.answer_id, rows[1].id);
    assert_eq!(upvotes(&store, rows[1].id), 6);
    assert_eq!(upvotes(&store, rows[0].id), 9);
}

/// Without a current answer there is nothing to vote on.
#[test]
fn test_question_vote_without_current_answer() {
    let (store, votes) = setup();
    let (question_id, _) = seed(&store, &[(9, false)]);

    assert!(matches!(
        votes.cast_question_vote(question_id, Vote::Up),
        Err(QaError::NotFound(_))
    ));
    assert!(matches!(
        votes.cast_question_vote(Uuid::new_v4(), Vote::Up),
        Err(QaError::NotFound(_))
    ));
}
