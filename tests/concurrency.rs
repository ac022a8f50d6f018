//! Concurrency Tests
//!
//! Requests run on independent threads and serialize through the store's
//! units of work. No partial state is ever observable.

use std::sync::Arc;
use std::thread;

use answerdb::model::{Category, ReputationKey, Vote, MAX_PENDING_ANSWERS};
use answerdb::reputation::InMemoryReputationStore;
use answerdb::store::InMemoryRelationalStore;
use answerdb::{QaError, QaService};
use uuid::Uuid;

fn service() -> (Arc<InMemoryRelationalStore>, Arc<InMemoryReputationStore>, QaService) {
    let relational = Arc::new(InMemoryRelationalStore::new());
    let reputation = Arc::new(InMemoryReputationStore::new());
    let service = QaService::with_defaults(relational.clone(), reputation.clone());
    (relational, reputation, service)
}

// =============================================================================
// Submissions
// =============================================================================

/// Racing submissions never push a question past the slot limit.
#[test]
fn test_racing_submissions_respect_limit() {
    let (_, _, service) = service();
    let q = service
        .post_question(Uuid::new_v4(), "gains", "race", "body")
        .unwrap()
        .id;

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let service = service.clone();
            thread::spawn(move || service.submit_answer(q, Uuid::new_v4(), &format!("a{}", i)))
        })
        .collect();

    let mut accepted = 0;
    for handle in handles {
        match handle.join().unwrap() {
            Ok(_) => accepted += 1,
            Err(QaError::Validation(_)) => {}
            Err(other) => panic!("unexpected error {:?}", other),
        }
    }

    assert_eq!(accepted, MAX_PENDING_ANSWERS);
    let post = service.find_post(q).unwrap();
    assert_eq!(post.question.pending_count, MAX_PENDING_ANSWERS);
}

// =============================================================================
// Votes
// =============================================================================

/// Every concurrent vote is applied exactly once.
#[test]
fn test_concurrent_votes_all_applied() {
    let (_, reputation, service) = service();
    let q = service
        .post_question(Uuid::new_v4(), "gains", "votes", "body")
        .unwrap()
        .id;
    let author = Uuid::new_v4();
    reputation
        .set(ReputationKey::new(Category::parse("gains").unwrap(), author), 25)
        .unwrap();
    let answer = service.submit_answer(q, author, "x").unwrap().id;

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let service = service.clone();
            thread::spawn(move || {
                for _ in 0..5 {
                    service
                        .vote_on_answer(Uuid::new_v4(), answer, Vote::Up)
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let post = service.find_post(q).unwrap();
    let current = post.current_answer.unwrap();
    assert_eq!(current.id, answer);
    assert_eq!(current.upvotes, 50);
    assert_eq!(post.question.edit_count, 1);
    assert_eq!(service.metrics().votes_cast, 50);
    assert_eq!(service.metrics().promotions, 1);
}

/// Votes and submissions on the same question interleave safely.
#[test]
fn test_votes_and_submissions_interleave() {
    let (_, reputation, service) = service();
    let q = service
        .post_question(Uuid::new_v4(), "gains", "mixed", "body")
        .unwrap()
        .id;
    let author = Uuid::new_v4();
    reputation
        .set(ReputationKey::new(Category::parse("gains").unwrap(), author), 25)
        .unwrap();
    let leader = service.submit_answer(q, author, "leader").unwrap().id;

    let voter = {
        let service = service.clone();
        thread::spawn(move || {
            for _ in 0..20 {
                service
                    .vote_on_answer(Uuid::new_v4(), leader, Vote::Up)
                    .unwrap();
            }
        })
    };
    let submitters: Vec<_> = (0..8)
        .map(|i| {
            let service = service.clone();
            thread::spawn(move || {
                let _ = service.submit_answer(q, Uuid::new_v4(), &format!("late {}", i));
            })
        })
        .collect();

    voter.join().unwrap();
    for handle in submitters {
        handle.join().unwrap();
    }

    let post = service.find_post(q).unwrap();
    assert_eq!(post.current_answer.map(|a| a.id), Some(leader));
    assert!(post.question.pending_count >= 0);
    assert!(post.question.pending_count <= MAX_PENDING_ANSWERS);
}
