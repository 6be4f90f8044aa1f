// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for session and flash persistence.

use super::create_test_persistence;

const CREATED: &str = "2026-03-01T12:00:00Z";
const EXPIRES: &str = "2026-03-31T12:00:00Z";

#[test]
fn test_create_and_get_anonymous_session() {
    let mut persistence = create_test_persistence();

    persistence
        .create_session("anon-token", None, CREATED, EXPIRES)
        .unwrap();
    let session = persistence
        .get_session_by_token("anon-token")
        .unwrap()
        .unwrap();

    assert_eq!(session.token, "anon-token");
    assert!(session.username.is_none());
    assert_eq!(session.created_at, CREATED);
    assert_eq!(session.expires_at, EXPIRES);
}

#[test]
fn test_create_authenticated_session() {
    let mut persistence = create_test_persistence();
    persistence.create_user("alice", "secret").unwrap();

    persistence
        .create_session("auth-token", Some("alice"), CREATED, EXPIRES)
        .unwrap();
    let session = persistence
        .get_session_by_token("auth-token")
        .unwrap()
        .unwrap();

    assert_eq!(session.username.as_deref(), Some("alice"));
}

#[test]
fn test_session_for_unknown_user_is_rejected() {
    let mut persistence = create_test_persistence();

    let result = persistence.create_session("token", Some("ghost"), CREATED, EXPIRES);

    assert!(result.is_err(), "foreign key should reject unknown username");
}

#[test]
fn test_delete_session() {
    let mut persistence = create_test_persistence();
    persistence
        .create_session("token", None, CREATED, EXPIRES)
        .unwrap();

    assert_eq!(persistence.delete_session("token").unwrap(), 1);
    assert!(persistence.get_session_by_token("token").unwrap().is_none());
    assert_eq!(persistence.delete_session("token").unwrap(), 0);
}

#[test]
fn test_delete_expired_sessions_keeps_live_ones() {
    let mut persistence = create_test_persistence();
    persistence
        .create_session("old", None, "2026-01-01T00:00:00Z", "2026-01-31T00:00:00Z")
        .unwrap();
    persistence
        .create_session("live", None, CREATED, EXPIRES)
        .unwrap();

    let removed = persistence
        .delete_expired_sessions("2026-03-02T00:00:00Z")
        .unwrap();

    assert_eq!(removed, 1);
    assert!(persistence.get_session_by_token("old").unwrap().is_none());
    assert!(persistence.get_session_by_token("live").unwrap().is_some());
}

#[test]
fn test_flash_is_consumed_once() {
    let mut persistence = create_test_persistence();
    persistence
        .create_session("token", None, CREATED, EXPIRES)
        .unwrap();

    persistence
        .set_flash("token", "success", "Bike added")
        .unwrap();

    let flash = persistence.take_flash("token").unwrap().unwrap();
    assert_eq!(flash.level, "success");
    assert_eq!(flash.message, "Bike added");

    assert!(persistence.take_flash("token").unwrap().is_none());
}

#[test]
fn test_set_flash_replaces_pending_message() {
    let mut persistence = create_test_persistence();
    persistence
        .create_session("token", None, CREATED, EXPIRES)
        .unwrap();

    persistence.set_flash("token", "success", "first").unwrap();
    persistence.set_flash("token", "error", "second").unwrap();

    let flash = persistence.take_flash("token").unwrap().unwrap();
    assert_eq!(flash.level, "error");
    assert_eq!(flash.message, "second");
}

#[test]
fn test_flash_on_unknown_session() {
    let mut persistence = create_test_persistence();

    assert_eq!(persistence.set_flash("missing", "error", "x").unwrap(), 0);
    assert!(persistence.take_flash("missing").unwrap().is_none());
}
