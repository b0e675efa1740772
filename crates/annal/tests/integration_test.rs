//! Integration tests for the annal ledger

use annal::prelude::*;

/// Helper to create a test database
fn create_test_db() -> AnnalDb {
    AnnalDb::new()
}

#[test]
fn test_basic_create_and_query() {
    let db = create_test_db();

    let event = db
        .store()
        .create("user_created", "User alice created", Some(json!({ "role": "admin" })))
        .unwrap();
    assert_eq!(event.id, 1);

    let events = db.store().query(None).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].metadata_str("role"), Some("admin"));
}

#[test]
fn test_producers_share_one_sequence() {
    let db = create_test_db();

    db.orders().create_order("ORD-1", 49.99).unwrap();
    db.polls()
        .record(
            Engagement::new("poll-1", "alice", EngagementKind::VoteCast).with_new_choice("yes"),
        )
        .unwrap();
    db.auth().login("admin", "admin123").unwrap();

    // Ids are assigned across producers in append order.
    let events = db.store().query(None).unwrap();
    let ids: Vec<EventId> = events.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);

    let types: Vec<&str> = events.iter().map(|e| e.event_type.as_str()).collect();
    assert_eq!(
        types,
        vec![
            "order_created",
            "poll_engagement",
            "audit.login_attempt",
            "audit.login_success",
        ]
    );
}

#[test]
fn test_login_flow_is_fully_audited() {
    let db = create_test_db();

    let identity = db.auth().login("admin", "admin123").unwrap();
    assert_eq!(identity.username, "admin");
    assert_eq!(identity.role, "administrator");

    let trail = db.audit().query(None).unwrap();
    assert_eq!(trail.len(), 2);
    assert_eq!(trail[0].event_type, audit_types::LOGIN_ATTEMPT);
    assert_eq!(trail[1].event_type, audit_types::LOGIN_SUCCESS);

    // Enrichment defaults are present on service-produced events.
    assert_eq!(trail[0].metadata_str("severity"), Some("info"));
    assert_eq!(trail[0].metadata_str("source"), Some("system"));
}

#[test]
fn test_failed_login_keeps_error_vague_but_audit_precise() {
    let db = create_test_db();

    let err = db.auth().login("admin", "not-the-password").unwrap_err();
    assert_eq!(err.to_string(), "Invalid username or password");

    let failures = db.audit().query(Some(audit_types::LOGIN_FAILURE)).unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].metadata_str("reason"), Some("incorrect_password"));
    assert_eq!(failures[0].metadata_str("username"), Some("admin"));
}

#[test]
fn test_unfiltered_audit_query_hides_foreign_events() {
    let db = create_test_db();

    db.store().create("login", "Legacy login marker", None).unwrap();
    db.audit()
        .record(audit_types::SUSPICIOUS_ACTIVITY, "Probe detected", None)
        .unwrap();

    // Unfiltered: audit namespace only.
    let unfiltered = db.audit().query(None).unwrap();
    assert_eq!(unfiltered.len(), 1);
    assert_eq!(unfiltered[0].event_type, audit_types::SUSPICIOUS_ACTIVITY);

    // Filtered: exact match anywhere in the store.
    let filtered = db.audit().query(Some("login")).unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].event_type, "login");
}

#[test]
fn test_time_range_query_includes_boundary_events() {
    let db = create_test_db();

    let first = db
        .audit()
        .record(audit_types::LOGIN_ATTEMPT, "Login attempt", None)
        .unwrap();
    db.audit()
        .record(audit_types::LOGIN_FAILURE, "Login failed: unknown user", None)
        .unwrap();
    let last = db
        .audit()
        .record(audit_types::SUSPICIOUS_ACTIVITY, "Probe detected", None)
        .unwrap();

    let window = db
        .audit()
        .query_time_range(&first.timestamp, &last.timestamp)
        .unwrap();
    assert_eq!(window.events.len(), 3);

    // The echoed range is normalized RFC 3339.
    assert!(chrono::DateTime::parse_from_rfc3339(&window.range.start).is_ok());
    assert!(chrono::DateTime::parse_from_rfc3339(&window.range.end).is_ok());
}

#[test]
fn test_order_lifecycle_with_queries() {
    let db = create_test_db();

    db.orders().create_order("ORD-1", 120.00).unwrap();
    db.orders()
        .update_order_status("ORD-1", OrderStatus::Processing)
        .unwrap();
    db.orders().fulfill_order("ORD-1", Some("TRK-204")).unwrap();
    db.orders().create_order("ORD-2", 15.50).unwrap();
    db.orders().cancel_order("ORD-2", Some("out of stock")).unwrap();

    let history = db.orders().query(&OrderFilter::new().order_id("ORD-1")).unwrap();
    assert_eq!(history.len(), 3);

    let cancelled = db
        .orders()
        .query(&OrderFilter::new().action(OrderAction::Cancelled))
        .unwrap();
    assert_eq!(cancelled.len(), 1);
    assert_eq!(cancelled[0].metadata_str("reason"), Some("out of stock"));

    let processing = db
        .orders()
        .query(&OrderFilter::new().status(OrderStatus::Processing))
        .unwrap();
    assert_eq!(processing.len(), 1);
}

#[test]
fn test_order_updates_need_no_referential_integrity() {
    let db = create_test_db();

    // No create_order happened for this id; the fact is still recorded.
    db.orders()
        .update_order_status("ORD-PHANTOM", OrderStatus::Cancelled)
        .unwrap();

    let events = db
        .orders()
        .query(&OrderFilter::new().order_id("ORD-PHANTOM"))
        .unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, ORDER_UPDATED);
}

#[test]
fn test_poll_engagement_round_trip() {
    let db = create_test_db();

    db.polls()
        .record(
            Engagement::new("poll-9", "alice", EngagementKind::VoteChanged)
                .with_previous_choice("red")
                .with_new_choice("blue")
                .with_session_id("sess-1"),
        )
        .unwrap();

    let events = db
        .polls()
        .query(&EngagementFilter::new().poll_id("poll-9").user_id("alice"))
        .unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].metadata_str("previous_choice"), Some("red"));
    assert_eq!(events[0].metadata_str("new_choice"), Some("blue"));
    assert_eq!(events[0].metadata_str("session_id"), Some("sess-1"));
}

#[test]
fn test_clear_starts_a_new_generation() {
    let db = create_test_db();

    db.orders().create_order("ORD-1", 10.0).unwrap();
    db.auth().login("admin", "admin123").unwrap();
    assert_eq!(db.store().stats().generation, 1);

    let removed = db.store().clear_all().unwrap();
    assert_eq!(removed, 3);

    let stats = db.store().stats();
    assert_eq!(stats.event_count, 0);
    assert_eq!(stats.next_event_id, 1);
    assert_eq!(stats.generation, 2);

    // Ids restart; an old id no longer resolves.
    let event = db.orders().create_order("ORD-2", 20.0).unwrap();
    assert_eq!(event.id, 1);
    assert!(db.store().get_by_id(2).is_err());
}

#[test]
fn test_validation_failures_leave_no_trace() {
    let db = create_test_db();

    assert!(db.store().create("", "message", None).is_err());
    assert!(db
        .store()
        .create("t", "m", Some(json!(["not", "an", "object"])))
        .is_err());
    assert!(db.orders().create_order("ORD-1", f64::NAN).is_err());
    assert!(db
        .polls()
        .record(Engagement::new("poll-1", "alice", EngagementKind::VoteCast))
        .is_err());

    assert_eq!(db.store().count(None).unwrap(), 0);
    assert_eq!(db.store().stats().next_event_id, 1);
}

#[test]
fn test_guest_login_is_audited_as_success() {
    let db = create_test_db();

    let identity = db.auth().guest_login().unwrap();
    assert!(identity.username.starts_with("guest_"));
    assert_eq!(identity.role, GUEST_ROLE);

    let successes = db.audit().query(Some(audit_types::LOGIN_SUCCESS)).unwrap();
    assert_eq!(successes.len(), 1);
    assert_eq!(
        successes[0].metadata_str("username"),
        Some(identity.username.as_str())
    );
}

#[test]
fn test_custom_user_list_via_facade() {
    let db = AnnalDb::with_users(vec![UserRecord::new("ops", "s3cretpw", "operator")]);

    assert_eq!(db.auth().login("ops", "s3cretpw").unwrap().role, "operator");
    assert_eq!(
        db.auth().login("admin", "admin123").unwrap_err(),
        AuthError::InvalidCredentials
    );
}
