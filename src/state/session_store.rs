//! Persisted auth token and user profile for the current tab.
//!
//! Layout: `auth-token` holds the raw token, `auth-user` the JSON profile.
//! Both absent means logged out.
//!
//! ERROR HANDLING
//! ==============
//! Reads never fail: a missing or unparsable profile is reported as absent and
//! logged, since a corrupted entry should look like a logged-out tab rather
//! than break page load. Write failures are returned to the caller.

#[cfg(test)]
#[path = "session_store_test.rs"]
mod session_store_test;

use std::rc::Rc;

use super::session::SessionError;
use super::storage::KeyValueStore;
use crate::net::types::UserProfile;

pub const TOKEN_KEY: &str = "auth-token";
pub const USER_KEY: &str = "auth-user";

/// Handle to the tab's session storage. Clones share the same store.
#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn KeyValueStore>,
}

impl SessionStore {
    #[must_use]
    pub fn new(storage: Rc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Replace the stored token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyToken`] for an empty token and
    /// [`SessionError::Storage`] if the write is rejected.
    pub fn save_token(&self, token: &str) -> Result<(), SessionError> {
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }
        self.storage.set(TOKEN_KEY, token)?;
        Ok(())
    }

    /// Replace the stored user profile.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Serialize`] or [`SessionError::Storage`].
    pub fn save_user(&self, user: &UserProfile) -> Result<(), SessionError> {
        let raw = serde_json::to_string(user).map_err(|e| SessionError::Serialize(e.to_string()))?;
        self.storage.set(USER_KEY, &raw)?;
        Ok(())
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    #[must_use]
    pub fn user(&self) -> Option<UserProfile> {
        let raw = self.storage.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("ignoring unreadable stored user profile: {e}");
                None
            }
        }
    }

    /// Erase the token, the profile, and anything else in session storage.
    /// If the store refuses a full clear, the two auth keys are removed one
    /// by one so the credential is still dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if the auth keys could not be removed.
    pub fn clear(&self) -> Result<(), SessionError> {
        if let Err(e) = self.storage.clear() {
            log::warn!("session clear failed, removing auth keys instead: {e}");
            let token = self.storage.remove(TOKEN_KEY);
            let user = self.storage.remove(USER_KEY);
            token.and(user)?;
        }
        Ok(())
    }
}
