//! Overlapping request tests
//!
//! Several calls may be in flight at once, of one kind or both. These tests
//! hold tickets open and settle them out of order.

use std::sync::Arc;
use std::time::Duration;

use dreamweaver::remote::{ArtClient, InterpretationClient, MockClient, MockReply, Services};
use dreamweaver::state::{MemoryStore, RequestKind, RequestStatus, SettlePolicy};
use dreamweaver::DreamSession;

fn session(client: &Arc<MockClient>, policy: SettlePolicy) -> DreamSession {
    let mut session = DreamSession::open(
        Box::new(MemoryStore::new()),
        Services::new(client.clone(), client.clone()),
        policy,
    );
    session.set_text("a maze of mirrors");
    session
}

#[tokio::test]
async fn test_both_kinds_in_flight_together() {
    let client = Arc::new(MockClient::new().with_delay(Duration::from_millis(10)));
    client.queue_interpretation(MockReply::Ok("reflection".to_string()));
    client.queue_image(MockReply::Ok("https://img/maze.png".to_string()));
    let mut session = session(&client, SettlePolicy::LastSettled);

    let interp = session.start_interpretation();
    let art = session.start_art().unwrap();
    assert!(session.is_busy());

    let services = session.services().clone();
    let (interp_out, art_out) = tokio::join!(
        services.interpreter.interpret(interp.text()),
        services.artist.generate_art(art.text()),
    );

    session.settle(art, art_out);
    assert!(session.is_busy());
    session.settle(interp, interp_out);
    assert!(!session.is_busy());

    assert_eq!(session.interpretation().status().ready_value(), Some("reflection"));
    assert_eq!(session.art().status().ready_value(), Some("https://img/maze.png"));
}

#[tokio::test]
async fn test_duplicate_requests_are_all_sent() {
    let client = Arc::new(MockClient::new());
    let mut session = session(&client, SettlePolicy::LastSettled);

    let first = session.start_interpretation();
    let second = session.start_interpretation();
    assert_eq!(second.generation(), first.generation() + 1);

    let interpreter = session.services().interpreter.clone();
    let (a, b) = tokio::join!(
        interpreter.interpret(first.text()),
        interpreter.interpret(second.text())
    );
    session.settle(first, a);
    session.settle(second, b);

    assert_eq!(client.call_count(RequestKind::Interpretation), 2);
}

#[test]
fn test_last_settled_lets_earlier_slow_call_overwrite() {
    let client = Arc::new(MockClient::new());
    let mut session = session(&client, SettlePolicy::LastSettled);

    let slow = session.start_interpretation();
    session.set_text("edited while waiting");
    let fast = session.start_interpretation();
    assert_eq!(fast.text(), "edited while waiting");

    assert!(session.settle(fast, Ok("fresh answer".to_string())));
    assert!(session.settle(slow, Ok("old answer".to_string())));

    assert_eq!(
        session.interpretation().status(),
        &RequestStatus::Ready("old answer".to_string())
    );
}

#[test]
fn test_latest_issued_keeps_newest_answer() {
    let client = Arc::new(MockClient::new());
    let mut session = session(&client, SettlePolicy::LatestIssued);

    let slow = session.start_interpretation();
    let fast = session.start_interpretation();

    assert!(session.settle(fast, Ok("fresh answer".to_string())));
    assert!(!session.settle(slow, Ok("old answer".to_string())));

    assert_eq!(
        session.interpretation().status(),
        &RequestStatus::Ready("fresh answer".to_string())
    );
}

#[test]
fn test_latest_issued_waits_for_newest_call() {
    let client = Arc::new(MockClient::new());
    let mut session = session(&client, SettlePolicy::LatestIssued);

    let older = session.start_art().unwrap();
    let newer = session.start_art().unwrap();

    assert!(!session.settle(older, Ok("https://img/old.png".to_string())));
    assert!(session.art().status().is_pending());

    assert!(session.settle(newer, Ok("https://img/new.png".to_string())));
    assert_eq!(session.art().status().ready_value(), Some("https://img/new.png"));
}

#[test]
fn test_missing_input_supersedes_in_flight_art_under_latest_issued() {
    let client = Arc::new(MockClient::new());
    let mut session = session(&client, SettlePolicy::LatestIssued);

    let in_flight = session.start_art().unwrap();
    session.set_text("");
    assert!(session.start_art().is_none());

    assert!(!session.settle(in_flight, Ok("https://img/late.png".to_string())));
    assert_eq!(
        session.art().status(),
        &RequestStatus::Failed("Please enter a dream description first.".to_string())
    );
}
