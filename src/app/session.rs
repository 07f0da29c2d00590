// ElasChat - app/session.rs
//
// Auth session: the signed-in user and its lifecycle.
//
// Design principles:
// - There is no global "current user". An `AuthSession` is created once with
//   `load` and handed to whatever needs it; its lifecycle is explicit
//   (`load`, `set`, `clear`).
// - Two storage keys: the JSON user record and a "true" signed-in flag.
//   Signing out removes only the flag so the record is still there for the
//   next login on this device.
// - Restoring requires both the flag and a readable record. A corrupt
//   record starts signed out rather than failing startup.
// - Authentication is local only: email and password are required form
//   fields but are never stored or checked.

use crate::core::model::User;
use crate::platform::storage::KeyValueStore;
use crate::util::constants::{AUTH_FLAG_VALUE, AUTH_STORAGE_KEY, MAX_BIO_CHARS, USER_STORAGE_KEY};
use crate::util::error::SessionError;
use chrono::Utc;
use regex::Regex;
use std::sync::OnceLock;

/// Sign-up form input.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub username: String,
    pub display_name: String,
}

/// Partial profile edit. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub username: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

/// The signed-in user plus the store that persists it.
#[derive(Debug)]
pub struct AuthSession {
    store: KeyValueStore,
    user: Option<User>,
}

impl AuthSession {
    /// Restore the session persisted in `store`.
    pub fn load(store: KeyValueStore) -> Self {
        let signed_in = store.get(AUTH_STORAGE_KEY) == Some(AUTH_FLAG_VALUE);
        let user = if signed_in {
            match store.get_json::<User>(USER_STORAGE_KEY) {
                Ok(Some(user)) => Some(user),
                Ok(None) => {
                    tracing::warn!("Signed-in flag set without a stored user; starting signed out");
                    None
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to load stored user; starting signed out");
                    None
                }
            }
        } else {
            None
        };

        tracing::info!(signed_in = user.is_some(), "Auth session loaded");
        Self { store, user }
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Returns true if a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Whether a user record exists on this device (signed in or not).
    pub fn has_account(&self) -> bool {
        self.store.get(USER_STORAGE_KEY).is_some()
    }

    /// Backing store.
    pub fn store(&self) -> &KeyValueStore {
        &self.store
    }

    /// Persist `user` and make it the signed-in user.
    pub fn set(&mut self, user: User) -> Result<&User, SessionError> {
        self.store.set_json(USER_STORAGE_KEY, &user)?;
        self.store.set(AUTH_STORAGE_KEY, AUTH_FLAG_VALUE)?;
        tracing::debug!(user_id = %user.id, "Session user set");
        Ok(self.user.insert(user))
    }

    /// Sign out, keeping the stored user record.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.store.remove(AUTH_STORAGE_KEY)?;
        if let Some(user) = self.user.take() {
            tracing::debug!(user_id = %user.id, "Session cleared");
        }
        Ok(())
    }

    /// Create a fresh account and sign it in.
    ///
    /// Replaces any account already stored on this device.
    pub fn signup(&mut self, form: &SignupForm) -> Result<&User, SessionError> {
        require("email", &form.email)?;
        require("password", &form.password)?;
        require("username", &form.username)?;
        require("display_name", &form.display_name)?;

        let username = normalize_username(&form.username);
        require("username", &username)?;

        let user = User {
            id: Utc::now().timestamp_millis().to_string(),
            username,
            display_name: form.display_name.trim().to_string(),
            bio: String::new(),
            avatar_url: None,
            followers_count: 0,
            following_count: 0,
            posts_count: 0,
            is_following: None,
        };

        tracing::info!(user_id = %user.id, "Account created");
        self.set(user)
    }

    /// Sign in with the account stored on this device.
    pub fn login(&mut self, email: &str, password: &str) -> Result<&User, SessionError> {
        require("email", email)?;
        require("password", password)?;

        let user = self
            .store
            .get_json::<User>(USER_STORAGE_KEY)?
            .ok_or(SessionError::NoAccount)?;

        self.store.set(AUTH_STORAGE_KEY, AUTH_FLAG_VALUE)?;
        tracing::info!(user_id = %user.id, "Signed in");
        Ok(self.user.insert(user))
    }

    /// Sign out.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.clear()?;
        tracing::info!("Signed out");
        Ok(())
    }

    /// Apply a profile edit to the signed-in user and persist it.
    pub fn update_user(&mut self, update: ProfileUpdate) -> Result<&User, SessionError> {
        let mut user = self.user.clone().ok_or(SessionError::NotSignedIn)?;

        if let Some(name) = update.display_name {
            require("display_name", &name)?;
            user.display_name = name.trim().to_string();
        }
        if let Some(raw) = update.username {
            let username = normalize_username(&raw);
            require("username", &username)?;
            user.username = username;
        }
        if let Some(bio) = update.bio {
            let bio = bio.trim();
            let length = bio.chars().count();
            if length > MAX_BIO_CHARS {
                return Err(SessionError::BioTooLong {
                    length,
                    max: MAX_BIO_CHARS,
                });
            }
            user.bio = bio.to_string();
        }
        if let Some(url) = update.avatar_url {
            user.avatar_url = if url.trim().is_empty() {
                None
            } else {
                Some(url)
            };
        }

        self.store.set_json(USER_STORAGE_KEY, &user)?;
        tracing::info!(user_id = %user.id, "Profile updated");
        Ok(self.user.insert(user))
    }
}

/// Reject blank form fields.
fn require(field: &'static str, value: &str) -> Result<(), SessionError> {
    if value.trim().is_empty() {
        return Err(SessionError::MissingField { field });
    }
    Ok(())
}

/// Lower-case `raw` and keep only `[a-z0-9_]`.
pub fn normalize_username(raw: &str) -> String {
    static DISALLOWED: OnceLock<Regex> = OnceLock::new();
    let re = DISALLOWED
        .get_or_init(|| Regex::new(r"[^a-z0-9_]").expect("normalize_username: invalid regex"));
    re.replace_all(&raw.trim().to_lowercase(), "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn form() -> SignupForm {
        SignupForm {
            email: "jane@example.com".to_string(),
            password: "hunter2".to_string(),
            username: "Jane.Doe!".to_string(),
            display_name: "  Jane Doe ".to_string(),
        }
    }

    fn open(dir: &TempDir) -> AuthSession {
        AuthSession::load(KeyValueStore::open(dir.path().join("storage.json")))
    }

    #[test]
    fn test_normalize_username() {
        assert_eq!(normalize_username(" Jane.Doe! "), "janedoe");
        assert_eq!(normalize_username("traveler_dan"), "traveler_dan");
        assert_eq!(normalize_username("ÉLAN 99"), "lan99");
        assert_eq!(normalize_username("!!!"), "");
    }

    #[test]
    fn test_fresh_store_is_signed_out() {
        let dir = TempDir::new().unwrap();
        let session = open(&dir);
        assert!(!session.is_authenticated());
        assert!(!session.has_account());
    }

    #[test]
    fn test_signup_normalises_and_signs_in() {
        let dir = TempDir::new().unwrap();
        let mut session = open(&dir);
        let user = session.signup(&form()).unwrap().clone();

        assert_eq!(user.username, "janedoe");
        assert_eq!(user.display_name, "Jane Doe");
        assert_eq!(user.followers_count, 0);
        assert!(user.id.parse::<i64>().is_ok());
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_signup_requires_every_field() {
        let dir = TempDir::new().unwrap();
        let mut session = open(&dir);

        let mut f = form();
        f.password = "   ".to_string();
        assert!(matches!(
            session.signup(&f),
            Err(SessionError::MissingField { field: "password" })
        ));

        let mut f = form();
        f.username = "***".to_string();
        assert!(matches!(
            session.signup(&f),
            Err(SessionError::MissingField { field: "username" })
        ));
        assert!(!session.has_account());
    }

    #[test]
    fn test_login_without_account_fails() {
        let dir = TempDir::new().unwrap();
        let mut session = open(&dir);
        assert!(matches!(
            session.login("a@b.c", "pw"),
            Err(SessionError::NoAccount)
        ));
    }

    #[test]
    fn test_logout_then_login_restores_record() {
        let dir = TempDir::new().unwrap();
        let mut session = open(&dir);
        let id = session.signup(&form()).unwrap().id.clone();

        session.logout().unwrap();
        assert!(!session.is_authenticated());
        assert!(session.has_account());

        let user = session.login("jane@example.com", "anything").unwrap();
        assert_eq!(user.id, id);
    }

    #[test]
    fn test_update_requires_signed_in_user() {
        let dir = TempDir::new().unwrap();
        let mut session = open(&dir);
        let result = session.update_user(ProfileUpdate::default());
        assert!(matches!(result, Err(SessionError::NotSignedIn)));
    }

    #[test]
    fn test_update_applies_and_validates() {
        let dir = TempDir::new().unwrap();
        let mut session = open(&dir);
        session.signup(&form()).unwrap();

        let user = session
            .update_user(ProfileUpdate {
                display_name: Some(" J. Doe ".to_string()),
                username: Some("JD_99".to_string()),
                bio: Some("  Hello there  ".to_string()),
                avatar_url: None,
            })
            .unwrap();
        assert_eq!(user.display_name, "J. Doe");
        assert_eq!(user.username, "jd_99");
        assert_eq!(user.bio, "Hello there");

        let too_long = "x".repeat(MAX_BIO_CHARS + 1);
        let err = session
            .update_user(ProfileUpdate {
                bio: Some(too_long),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, SessionError::BioTooLong { length: 151, max: 150 }));
        // Rejected edits leave the user untouched.
        assert_eq!(session.current_user().unwrap().bio, "Hello there");

        let err = session
            .update_user(ProfileUpdate {
                display_name: Some(" ".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, SessionError::MissingField { field: "display_name" }));
    }

    #[test]
    fn test_clear_keeps_record_but_drops_flag() {
        let dir = TempDir::new().unwrap();
        let mut session = open(&dir);
        session.signup(&form()).unwrap();
        session.clear().unwrap();

        assert!(session.store().get(AUTH_STORAGE_KEY).is_none());
        assert!(session.store().get(USER_STORAGE_KEY).is_some());
    }
}
