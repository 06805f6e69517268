//! Session store: the single source of truth for "is a user signed in".
//!
//! A session is the bearer token plus the signed-in user, persisted under the
//! `token` and `user` storage keys. The two keys are always written and cleared
//! together. Reads are self-healing: a missing half, unparseable JSON or a user
//! record of the wrong shape count as "signed out" and wipe what is left.
//!
//! ```rust,no_run
//! use lifescope::libs::session::{LoginCredentials, SessionStore};
//! # async fn run(store: &SessionStore, api: &lifescope::api::Api) -> anyhow::Result<()> {
//! let credentials = LoginCredentials::new("jane@example.com", "secret");
//! let session = store.login(api, &credentials).await?;
//! assert_eq!(store.current_user(), Some(session.user));
//! # Ok(())
//! # }
//! ```

use super::error::ApiError;
use super::navigation::Navigator;
use super::storage::{Storage, StorageError, TOKEN_KEY, USER_KEY};
use crate::api::{Api, SessionContext};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterData {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
}

impl RegisterData {
    /// Client-side checks run before the registration request is sent.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.password != self.password2 {
            return Err(ApiError::Validation("Passwords do not match".to_string()));
        }
        Ok(())
    }
}

/// Outcome of checking a persisted user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidation {
    Valid(User),
    Invalid(String),
}

/// Schema check for the persisted `user` value: an object with an integer `id`
/// and a string `username`. `email` is optional and must be a string when present.
pub fn validate_user(raw: &str) -> UserValidation {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => return UserValidation::Invalid(format!("user is not valid JSON: {}", e)),
    };
    let Some(object) = value.as_object() else {
        return UserValidation::Invalid("user is not an object".to_string());
    };
    let Some(id) = object.get("id").and_then(Value::as_i64) else {
        return UserValidation::Invalid("user id is missing or not an integer".to_string());
    };
    let Some(username) = object.get("username").and_then(Value::as_str) else {
        return UserValidation::Invalid("username is missing or not a string".to_string());
    };
    let email = match object.get("email") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(email)) => email.clone(),
        Some(_) => return UserValidation::Invalid("email is not a string".to_string()),
    };

    UserValidation::Valid(User {
        id,
        username: username.to_string(),
        email,
    })
}

pub struct SessionStore {
    storage: Arc<dyn Storage>,
    navigator: Arc<Navigator>,
    // serializes multi-key reads and writes
    lock: Mutex<()>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn Storage>, navigator: Arc<Navigator>) -> Self {
        Self {
            storage,
            navigator,
            lock: Mutex::new(()),
        }
    }

    pub fn navigator(&self) -> &Arc<Navigator> {
        &self.navigator
    }

    /// Exchanges credentials for a session and persists it.
    ///
    /// On failure any previously persisted session is cleared and the backend's
    /// message is returned for display. No redirect happens: the caller is
    /// already on the login view.
    pub async fn login(&self, api: &Api, credentials: &LoginCredentials) -> Result<Session, ApiError> {
        let result = api.obtain_token(credentials).await;
        self.establish(result)
    }

    /// Same contract as [`SessionStore::login`] against the registration endpoint.
    ///
    /// Mismatched password confirmation fails with [`ApiError::Validation`]
    /// before any request is made.
    pub async fn register(&self, api: &Api, data: &RegisterData) -> Result<Session, ApiError> {
        data.validate()?;
        let result = api.register(data).await;
        self.establish(result)
    }

    fn establish(&self, result: Result<crate::api::auth::AuthResponse, ApiError>) -> Result<Session, ApiError> {
        let response = match result {
            Ok(response) if !response.access.is_empty() => response,
            Ok(_) => {
                self.clear();
                return Err(ApiError::Auth {
                    message: "The server did not return an access token".to_string(),
                    payload: None,
                });
            }
            Err(e) => {
                self.clear();
                return Err(e);
            }
        };

        let session = Session {
            token: response.access,
            user: response.user,
        };
        self.persist(&session)?;
        tracing::info!(user_id = session.user.id, "session established");
        Ok(session)
    }

    /// Clears the session and shows the login view. Safe to call when signed out.
    pub fn logout(&self) {
        self.clear();
        self.navigator.redirect_to_login(None);
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_session().is_some()
    }

    pub fn current_user(&self) -> Option<User> {
        self.read_session().map(|session| session.user)
    }

    /// Token of a valid session; a token without a valid user is not handed out.
    pub fn token(&self) -> Option<String> {
        self.read_session().map(|session| session.token)
    }

    pub fn session(&self) -> Option<Session> {
        self.read_session()
    }

    /// Replaces the persisted user after a profile change. Ignored when signed out.
    pub fn update_user(&self, user: &User) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        if self.storage.get(TOKEN_KEY)?.is_none() {
            return Ok(());
        }
        let user = serde_json::to_string(user).map_err(|e| StorageError::Unavailable(e.to_string()))?;
        self.storage.set(USER_KEY, &user)
    }

    fn persist(&self, session: &Session) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        let user = serde_json::to_string(&session.user).map_err(|e| StorageError::Unavailable(e.to_string()))?;

        self.storage.set(USER_KEY, &user)?;
        if let Err(e) = self.storage.set(TOKEN_KEY, &session.token) {
            // never leave a user without its token
            let _ = self.storage.remove(USER_KEY);
            return Err(e);
        }
        Ok(())
    }

    fn clear(&self) {
        let _guard = self.lock.lock();
        self.clear_locked();
    }

    fn clear_locked(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::error!(error = %e, key, "failed to clear session key");
            }
        }
    }

    fn read_session(&self) -> Option<Session> {
        let _guard = self.lock.lock();

        let token = self.storage.get(TOKEN_KEY);
        let user = self.storage.get(USER_KEY);
        let (token, user) = match (token, user) {
            (Ok(Some(token)), Ok(Some(user))) if !token.trim().is_empty() => (token, user),
            (Ok(None), Ok(None)) => return None,
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!(error = %e, "failed to read session");
                return None;
            }
            _ => {
                tracing::warn!("incomplete session found in storage, clearing");
                self.clear_locked();
                return None;
            }
        };

        match validate_user(&user) {
            UserValidation::Valid(user) => Some(Session {
                token: token.trim().to_string(),
                user,
            }),
            UserValidation::Invalid(reason) => {
                tracing::warn!(%reason, "corrupted session found in storage, clearing");
                self.clear_locked();
                None
            }
        }
    }
}

impl SessionContext for SessionStore {
    fn token(&self) -> Option<String> {
        SessionStore::token(self)
    }

    fn expire(&self) {
        tracing::warn!("session rejected by the server, signing out");
        self.clear();
        let current = self.navigator.current();
        self.navigator.redirect_to_login(Some(current));
    }
}
