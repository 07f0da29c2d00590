// ElasChat - tests/e2e_session.rs
//
// End-to-end tests for the auth session lifecycle.
//
// These tests use the real key-value store on a temporary directory and
// reopen it between steps, so every assertion about "restored" state goes
// through the file on disk.

use elaschat::app::session::{AuthSession, ProfileUpdate, SignupForm};
use elaschat::core::model::User;
use elaschat::platform::config::load_config;
use elaschat::platform::storage::KeyValueStore;
use elaschat::util::constants::{AUTH_STORAGE_KEY, USER_STORAGE_KEY};
use elaschat::util::error::SessionError;
use std::path::PathBuf;
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

fn store_path(dir: &TempDir) -> PathBuf {
    let (config, _) = load_config(dir.path());
    config.store_path(dir.path())
}

/// Open a fresh session over whatever is on disk right now.
fn reopen(dir: &TempDir) -> AuthSession {
    AuthSession::load(KeyValueStore::open(store_path(dir)))
}

fn signup_form() -> SignupForm {
    SignupForm {
        email: "elastus@example.com".to_string(),
        password: "secret".to_string(),
        username: "Elastus_Dev".to_string(),
        display_name: "Elastus Creator".to_string(),
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

/// Signing up persists the user and the signed-in flag across restarts.
#[test]
fn e2e_signup_survives_restart() {
    let dir = TempDir::new().unwrap();
    let id = {
        let mut session = reopen(&dir);
        session.signup(&signup_form()).unwrap().id.clone()
    };

    let restored = reopen(&dir);
    let user = restored.current_user().expect("session should be restored");
    assert_eq!(user.id, id);
    assert_eq!(user.username, "elastus_dev");
    assert_eq!(user.handle(), "@elastus_dev");
}

/// Logging out clears the flag on disk; the next start is signed out but
/// can log straight back in.
#[test]
fn e2e_logout_then_login_across_restarts() {
    let dir = TempDir::new().unwrap();
    reopen(&dir).signup(&signup_form()).unwrap();

    reopen(&dir).logout().unwrap();

    let mut session = reopen(&dir);
    assert!(!session.is_authenticated());
    assert!(session.has_account());

    session.login("elastus@example.com", "whatever").unwrap();
    assert!(reopen(&dir).is_authenticated());
}

/// Profile edits are written through and visible after restart.
#[test]
fn e2e_profile_update_is_persisted() {
    let dir = TempDir::new().unwrap();
    let mut session = reopen(&dir);
    session.signup(&signup_form()).unwrap();
    session
        .update_user(ProfileUpdate {
            bio: Some("Making videos".to_string()),
            avatar_url: Some("https://example.com/a.png".to_string()),
            ..Default::default()
        })
        .unwrap();

    let restored = reopen(&dir);
    let user = restored.current_user().unwrap();
    assert_eq!(user.bio, "Making videos");
    assert_eq!(user.avatar_url.as_deref(), Some("https://example.com/a.png"));
}

// =============================================================================
// Restore edge cases
// =============================================================================

/// A stored user without the flag is not signed in.
#[test]
fn e2e_record_without_flag_is_signed_out() {
    let dir = TempDir::new().unwrap();
    let mut store = KeyValueStore::open(store_path(&dir));
    let user: User = serde_json::from_str(
        r#"{"id":"9","username":"ghost","displayName":"Ghost","bio":"",
            "followersCount":0,"followingCount":0,"postsCount":0}"#,
    )
    .unwrap();
    store.set_json(USER_STORAGE_KEY, &user).unwrap();

    assert!(!reopen(&dir).is_authenticated());
}

/// A corrupt user record starts signed out instead of failing.
#[test]
fn e2e_corrupt_record_starts_signed_out() {
    let dir = TempDir::new().unwrap();
    let mut store = KeyValueStore::open(store_path(&dir));
    store.set(USER_STORAGE_KEY, "{not json").unwrap();
    store.set(AUTH_STORAGE_KEY, "true").unwrap();

    let mut session = reopen(&dir);
    assert!(!session.is_authenticated());
    assert!(matches!(
        session.login("a@b.c", "pw"),
        Err(SessionError::Storage(_))
    ));
}

/// A store file that is not valid JSON is treated as empty.
#[test]
fn e2e_malformed_store_file_is_ignored() {
    let dir = TempDir::new().unwrap();
    std::fs::write(store_path(&dir), "garbage").unwrap();

    let mut session = reopen(&dir);
    assert!(!session.has_account());
    session.signup(&signup_form()).unwrap();
    assert!(reopen(&dir).is_authenticated());
}

/// The store file name comes from config.toml.
#[test]
fn e2e_store_file_follows_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[session]\nstore_file = \"accounts.json\"\n",
    )
    .unwrap();

    reopen(&dir).signup(&signup_form()).unwrap();
    assert!(dir.path().join("accounts.json").exists());
    assert!(!dir.path().join("storage.json").exists());
}
