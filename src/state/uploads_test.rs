use super::*;

use chrono::{DateTime, FixedOffset};
use futures::executor::block_on;

fn ts() -> DateTime<FixedOffset> {
    "2024-04-01T10:00:00+00:00".parse().expect("timestamp")
}

fn upload(name: &str) -> Upload {
    Upload {
        id: Uuid::new_v4(),
        user_id: Some(Uuid::new_v4()),
        created_at: ts(),
        updated_at: ts(),
        file_name: name.to_owned(),
        content_type: "image/png".to_owned(),
        presigned_get: format!("https://bucket.example/{name}?sig=abc"),
        expires_at: ts(),
    }
}

fn client() -> UploadClient {
    UploadClient::new(&Session::new(""))
}

#[test]
fn uploads_state_defaults() {
    let state = UploadsState::default();
    assert!(state.items.is_empty());
    assert!(!state.loading);
}

#[test]
fn cache_accessor_round_trips_without_network() {
    let client = client();
    assert!(client.uploads().is_empty());

    client.set_uploads(vec![upload("a.png"), upload("b.png")]);
    let cached = client.uploads();
    assert_eq!(cached.len(), 2);
    assert_eq!(cached[0].file_name, "a.png");
}

#[test]
fn failed_refresh_leaves_the_previous_cache_untouched() {
    let client = client();
    client.set_uploads(vec![upload("keep.png")]);

    // The list stub fails off-browser; the cache must survive.
    block_on(client.refresh());
    assert_eq!(client.uploads().len(), 1);
    assert_eq!(client.uploads()[0].file_name, "keep.png");
}

#[test]
fn failed_refresh_resets_the_loading_flag() {
    let client = client();
    block_on(client.refresh());
    assert!(!client.state().with_untracked(|s| s.loading));
}

#[test]
fn start_new_upload_propagates_allocation_failure() {
    let client = client();
    let err = block_on(client.start_new_upload("a.png", "image/png")).expect_err("stub fails");
    assert!(matches!(err, ApiError::Transport(_)));
}

#[test]
fn get_upload_swallows_failure_into_none() {
    let client = client();
    assert!(block_on(client.get_upload(Uuid::new_v4())).is_none());
}

#[test]
fn clones_share_the_same_cache() {
    let client = client();
    let twin = client.clone();
    client.set_uploads(vec![upload("a.png")]);
    assert_eq!(twin.uploads().len(), 1);
}
