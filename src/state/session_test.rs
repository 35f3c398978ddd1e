use super::*;

use chrono::{DateTime, FixedOffset};
use futures::executor::block_on;

fn ts() -> DateTime<FixedOffset> {
    "2024-04-01T10:00:00+00:00".parse().expect("timestamp")
}

fn user(verified: bool) -> User {
    User {
        id: Uuid::new_v4(),
        created_at: ts(),
        updated_at: ts(),
        email: "a@b.com".to_owned(),
        verified,
    }
}

fn auth(verified: bool) -> AuthSuccess {
    AuthSuccess {
        token: "tok-1".to_owned(),
        user: user(verified),
    }
}

// =============================================================
// Derived predicates are pure functions of token/user
// =============================================================

#[test]
fn logged_in_tracks_token_across_set_and_clear() {
    let session = Session::new("");
    assert!(!session.is_logged_in());

    session.set_token("tok-1");
    assert!(session.is_logged_in());

    session.set_token("tok-2");
    assert!(session.is_logged_in());

    session.clear_token();
    assert!(!session.is_logged_in());

    session.set_token("");
    assert!(!session.is_logged_in());
}

#[test]
fn verified_is_never_true_without_a_user() {
    let state = SessionState {
        token: "tok-1".to_owned(),
        user: None,
    };
    assert!(!state.verified());

    let session = Session::new("");
    session.set_token("tok-1");
    assert!(!session.is_verified());
}

#[test]
fn verified_follows_the_cached_user_flag() {
    let mut state = SessionState::default();
    state.apply_auth(auth(false));
    assert!(!state.verified());

    state.apply_auth(auth(true));
    assert!(state.verified());
}

// =============================================================
// Atomic token+user replacement
// =============================================================

#[test]
fn apply_auth_sets_token_and_user_together() {
    let mut state = SessionState::default();
    state.apply_auth(auth(true));
    assert!(state.logged_in());
    assert_eq!(state.user.as_ref().map(|u| u.email.as_str()), Some("a@b.com"));
}

#[test]
fn reset_drops_token_and_user_together() {
    let mut state = SessionState::default();
    state.apply_auth(auth(true));
    state.reset();
    assert!(!state.logged_in());
    assert!(state.user.is_none());
    assert!(!state.verified());
}

// =============================================================
// Token persistence and init_auth reconciliation
// =============================================================

#[test]
fn set_token_persists_and_clear_token_removes() {
    let store = TokenStore::default();
    let session = Session::with_store("", store.clone());

    session.set_token("tok-1");
    assert_eq!(store.read().as_deref(), Some("tok-1"));

    session.clear_token();
    assert!(store.read().is_none());
}

#[test]
fn clear_token_leaves_the_cached_user_alone() {
    let session = Session::new("");
    session.state().update(|s| s.apply_auth(auth(true)));

    session.clear_token();
    assert!(!session.is_logged_in());
    assert!(session.current_user_cached().is_some());
}

#[test]
fn init_auth_restores_login_from_a_persisted_token() {
    let store = TokenStore::default();
    store.write("persisted-tok");

    // Fresh session over the same store, as after a page reload.
    let session = Session::with_store("", store);
    assert!(!session.is_logged_in());

    block_on(session.init_auth());
    assert!(session.is_logged_in());
    assert_eq!(session.token(), "persisted-tok");
}

#[test]
fn failed_who_am_i_fetch_does_not_log_the_user_out() {
    let store = TokenStore::default();
    store.write("persisted-tok");
    let session = Session::with_store("", store);

    // The fetch stub fails off-browser; the token must survive.
    block_on(session.init_auth());
    assert!(session.is_logged_in());
    assert!(session.current_user_cached().is_none());
}

#[test]
fn init_auth_without_a_token_stays_logged_out() {
    let session = Session::new("");
    block_on(session.init_auth());
    assert!(!session.is_logged_in());
}

// =============================================================
// current_user
// =============================================================

#[test]
fn current_user_returns_the_cached_snapshot_without_a_fetch() {
    let session = Session::new("");
    session.state().update(|s| s.apply_auth(auth(true)));

    let fetched = block_on(session.current_user());
    assert_eq!(fetched.map(|u| u.email), Some("a@b.com".to_owned()));
}

#[test]
fn current_user_is_none_when_logged_out() {
    let session = Session::new("");
    assert!(block_on(session.current_user()).is_none());
}

// =============================================================
// Auth operation failure semantics (off-browser stubs fail
// with a transport error)
// =============================================================

#[test]
fn failing_login_leaves_prior_session_state_unchanged() {
    let session = Session::new("");
    session.set_token("old-tok");
    session.state().update(|s| s.user = Some(user(true)));

    let err = block_on(session.login("a@b.com", "pw")).expect_err("stub login fails");
    assert!(matches!(err, ApiError::Transport(_)));
    assert!(session.is_logged_in());
    assert_eq!(session.token(), "old-tok");
    assert!(session.is_verified());
}

#[test]
fn failing_signup_leaves_session_logged_out() {
    let session = Session::new("");
    assert!(block_on(session.signup("a@b.com", "pw")).is_err());
    assert!(!session.is_logged_in());
    assert!(session.current_user_cached().is_none());
}

#[test]
fn failing_verify_keeps_the_existing_session() {
    let session = Session::new("");
    session.set_token("old-tok");

    assert!(block_on(session.verify(Uuid::new_v4())).is_err());
    assert_eq!(session.token(), "old-tok");
}

#[test]
fn failing_delete_account_keeps_the_session_intact() {
    let session = Session::new("");
    session.set_token("old-tok");

    assert!(block_on(session.delete_account()).is_err());
    assert!(session.is_logged_in());
}

#[test]
fn send_verification_never_mutates_state() {
    let session = Session::new("");
    session.set_token("tok-1");
    let before = session.state().with_untracked(Clone::clone);

    let _ = block_on(session.send_verification());
    assert_eq!(session.state().with_untracked(Clone::clone), before);
}

// =============================================================
// logout
// =============================================================

#[test]
fn logout_always_succeeds_and_clears_everything() {
    let store = TokenStore::default();
    let session = Session::with_store("", store.clone());
    session.state().update(|s| s.apply_auth(auth(true)));
    store.write("tok-1");

    assert!(session.logout());
    assert!(!session.is_logged_in());
    assert!(session.current_user_cached().is_none());
    assert!(store.read().is_none());
}

#[test]
fn logout_on_a_fresh_session_still_succeeds() {
    let session = Session::new("");
    assert!(session.logout());
    assert!(!session.is_logged_in());
}
