//! End-to-end tests of the submission pipeline against a real database.
//!
//! These tests only need `DATABASE_URL` pointing at a migrated database;
//! no servers are involved. Each test cleans up the rows it creates.
//!
//! Run with: cargo test -p folio-integration-tests -- --ignored

#![allow(clippy::expect_used)]

use chrono::Utc;
use folio_core::submissions::{Submissions, TransitionError};
use folio_core::{Provenance, SubmissionInput, SubmissionStatus};
use folio_integration_tests::{db_guard, test_pool};

fn sample_input(tag: &str) -> SubmissionInput {
    SubmissionInput {
        name: format!("Pipeline Test {tag}"),
        email: "pipeline@example.com".to_owned(),
        subject: format!("Integration test {tag}"),
        message: "This message is long enough for the validator.".to_owned(),
    }
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_create_defaults_and_listing() {
    let _guard = db_guard().await;
    let pool = test_pool().await;
    let submissions = Submissions::new(&pool);

    let before = Utc::now();
    let id = submissions
        .submit(&sample_input("defaults"), &Provenance::default())
        .await
        .expect("submit failed");

    let all = submissions.list().await;
    let created = all
        .iter()
        .find(|s| s.id == id)
        .expect("created submission missing from list()");

    assert_eq!(created.status, SubmissionStatus::New);
    assert!(
        created.submitted_at >= before - chrono::Duration::seconds(5),
        "timestamp earlier than invocation"
    );
    assert_eq!(created.ip_address, None);
    assert_eq!(created.user_agent, None);

    // list() is newest-first, so a just-created row leads any older ones.
    if let Some(first) = all.first() {
        assert!(first.submitted_at >= created.submitted_at);
    }

    assert!(submissions.delete(id).await);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_unread_count_matches_list() {
    let _guard = db_guard().await;
    let pool = test_pool().await;
    let submissions = Submissions::new(&pool);

    let id = submissions
        .submit(&sample_input("count"), &Provenance::default())
        .await
        .expect("submit failed");

    let unread = submissions.unread_count();
    let list = submissions.list();
    let (unread, list) = tokio::join!(unread, list);

    let new_in_list = list
        .iter()
        .filter(|s| s.status == SubmissionStatus::New)
        .count();
    assert_eq!(unread, i64::try_from(new_in_list).expect("count overflow"));

    assert!(submissions.delete(id).await);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_forward_transitions_and_terminal_replied() {
    let _guard = db_guard().await;
    let pool = test_pool().await;
    let submissions = Submissions::new(&pool);

    let id = submissions
        .submit(&sample_input("transitions"), &Provenance::default())
        .await
        .expect("submit failed");

    // new -> read
    submissions.mark_read(id).await.expect("new -> read failed");

    // read -> read is not a modeled edge
    assert!(matches!(
        submissions.mark_read(id).await,
        Err(TransitionError::Invalid { .. })
    ));

    // read -> replied
    submissions
        .mark_replied(id)
        .await
        .expect("read -> replied failed");

    // replied is terminal: both actions are refused and the status stays
    assert!(matches!(
        submissions.mark_read(id).await,
        Err(TransitionError::Invalid { .. })
    ));
    assert!(matches!(
        submissions.mark_replied(id).await,
        Err(TransitionError::Invalid { .. })
    ));

    let current = submissions
        .list()
        .await
        .into_iter()
        .find(|s| s.id == id)
        .expect("submission missing");
    assert_eq!(current.status, SubmissionStatus::Replied);

    assert!(submissions.delete(id).await);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_new_to_replied_shortcut() {
    let _guard = db_guard().await;
    let pool = test_pool().await;
    let submissions = Submissions::new(&pool);

    let id = submissions
        .submit(&sample_input("shortcut"), &Provenance::default())
        .await
        .expect("submit failed");

    submissions
        .mark_replied(id)
        .await
        .expect("new -> replied failed");

    let current = submissions
        .list_by_status(SubmissionStatus::Replied)
        .await
        .into_iter()
        .find(|s| s.id == id);
    assert!(current.is_some(), "replied filter misses the submission");

    assert!(submissions.delete(id).await);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_delete_is_terminal() {
    let _guard = db_guard().await;
    let pool = test_pool().await;
    let submissions = Submissions::new(&pool);

    let id = submissions
        .submit(&sample_input("delete"), &Provenance::default())
        .await
        .expect("submit failed");

    assert!(submissions.delete(id).await);

    // Gone from the list
    assert!(!submissions.list().await.iter().any(|s| s.id == id));

    // A transition on the deleted id reports failure, not success
    assert!(matches!(
        submissions.mark_read(id).await,
        Err(TransitionError::NotFound)
    ));

    // A second delete degrades to false
    assert!(!submissions.delete(id).await);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_sanitization_applies_before_persistence() {
    let _guard = db_guard().await;
    let pool = test_pool().await;
    let submissions = Submissions::new(&pool);

    let input = SubmissionInput {
        name: "  <b>Jo</b>  ".to_owned(),
        email: "jo@x.com".to_owned(),
        subject: "Hi <there>".to_owned(),
        message: "This message is long enough.".to_owned(),
    };
    let id = submissions
        .submit(&input, &Provenance::default())
        .await
        .expect("submit failed");

    let created = submissions
        .list()
        .await
        .into_iter()
        .find(|s| s.id == id)
        .expect("submission missing");
    assert_eq!(created.name, "bJo/b");
    assert_eq!(created.subject, "Hi there");

    assert!(submissions.delete(id).await);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_provenance_stored_when_present() {
    let _guard = db_guard().await;
    let pool = test_pool().await;
    let submissions = Submissions::new(&pool);

    let provenance = Provenance {
        ip_address: Some("203.0.113.7".to_owned()),
        user_agent: Some("integration-test/1.0".to_owned()),
    };
    let id = submissions
        .submit(&sample_input("provenance"), &provenance)
        .await
        .expect("submit failed");

    let created = submissions
        .list()
        .await
        .into_iter()
        .find(|s| s.id == id)
        .expect("submission missing");
    assert_eq!(created.ip_address.as_deref(), Some("203.0.113.7"));
    assert_eq!(created.user_agent.as_deref(), Some("integration-test/1.0"));

    assert!(submissions.delete(id).await);
}
