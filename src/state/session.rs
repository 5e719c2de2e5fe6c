//! Session facade: the one surface screens call for auth and identity.
//!
//! SYSTEM CONTEXT
//! ==============
//! The login screen hands the OAuth callback query to
//! [`SessionFacade::handle_oauth_redirect`], the navbar subscribes to
//! [`SessionFacade::is_authenticated`], and the profile screen reads
//! [`SessionFacade::current_managed_guilds`]. The request authenticator holds
//! its own [`AuthSession`] clone so a rejected credential signs the tab out.
//!
//! ORDERING
//! ========
//! Every mutation writes the session store first and then publishes the
//! recomputed token presence, so subscribers always observe the post-state.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use super::auth::{AuthBroadcaster, Subscription};
use super::guilds::managed_guilds;
use super::session_store::SessionStore;
use super::storage::StorageError;
use crate::config::ClientConfig;
use crate::net::api::ProfileSource;
use crate::net::http::ApiError;
use crate::net::types::{ManagedGuild, UserProfile};
use crate::util::oauth::{OAuthCallback, authorization_url, parse_callback};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    /// An empty string was offered as a token.
    #[error("refusing to store an empty token")]
    EmptyToken,

    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),

    /// The user profile could not be serialized for storage.
    #[error("failed to serialize user profile: {0}")]
    Serialize(String),

    /// The profile fetch after login failed.
    #[error("failed to load current user: {0}")]
    Api(#[from] ApiError),

    /// The provider redirected back with an error instead of a token.
    #[error("login failed: {0}")]
    OAuthCallback(String),
}

impl SessionError {
    /// Message suitable for showing on the login screen.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::OAuthCallback(message) => message.clone(),
            Self::Api(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

/// Session store plus login-state stream, shared by cheap clone.
#[derive(Clone)]
pub struct AuthSession {
    store: SessionStore,
    auth: AuthBroadcaster,
}

impl AuthSession {
    /// Wrap `store`, seeding the stream from whether a token is already stored.
    #[must_use]
    pub fn new(store: SessionStore) -> Self {
        let auth = AuthBroadcaster::new(store.has_token());
        Self { store, auth }
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    #[must_use]
    pub fn broadcaster(&self) -> &AuthBroadcaster {
        &self.auth
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.store.token()
    }

    /// Store `token` and publish.
    ///
    /// # Errors
    ///
    /// See [`SessionStore::save_token`]. The stream is refreshed either way.
    pub fn save_token(&self, token: &str) -> Result<(), SessionError> {
        let result = self.store.save_token(token);
        self.refresh();
        result
    }

    /// Store `user` and publish.
    ///
    /// # Errors
    ///
    /// See [`SessionStore::save_user`]. The stream is refreshed either way.
    pub fn save_user(&self, user: &UserProfile) -> Result<(), SessionError> {
        let result = self.store.save_user(user);
        self.refresh();
        result
    }

    /// Drop the whole session and publish. Storage failures are logged; the
    /// stream still reflects whatever token is left.
    pub fn sign_out(&self) {
        if let Err(e) = self.store.clear() {
            log::warn!("session clear failed: {e}");
        }
        log::info!("signed out");
        self.refresh();
    }

    /// Publish the current token presence to all subscribers.
    pub fn refresh(&self) {
        let authenticated = self.store.has_token();
        log::debug!("auth state -> {authenticated}");
        self.auth.publish(authenticated);
    }
}

/// Public session API for the dashboard screens.
pub struct SessionFacade<P> {
    session: AuthSession,
    profiles: P,
    config: ClientConfig,
}

impl<P: ProfileSource> SessionFacade<P> {
    #[must_use]
    pub fn new(session: AuthSession, profiles: P, config: ClientConfig) -> Self {
        Self { session, profiles, config }
    }

    #[must_use]
    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The profile source, for screens that need other API calls.
    #[must_use]
    pub fn api(&self) -> &P {
        &self.profiles
    }

    /// Record `user` as the signed-in profile.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the profile cannot be stored.
    pub fn login(&self, user: &UserProfile) -> Result<(), SessionError> {
        self.session.save_user(user)?;
        log::info!("logged in as {}", user.display_name);
        Ok(())
    }

    /// Store the token from a successful OAuth redirect, then fetch and store
    /// the matching profile.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyToken`]/[`SessionError::Storage`] if the
    /// token is not stored, or [`SessionError::Api`] if the profile fetch
    /// fails. A stored token is kept on fetch failure.
    pub async fn complete_oauth_callback(&self, token: &str) -> Result<UserProfile, SessionError> {
        self.session.save_token(token)?;
        let user = self.profiles.fetch_current_user().await.map_err(|e| {
            log::warn!("profile fetch after login failed: {e}");
            SessionError::from(e)
        })?;
        self.login(&user)?;
        Ok(user)
    }

    /// Act on the query string the login page was loaded with.
    ///
    /// Returns `Ok(None)` when the query carries neither `token` nor `error`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::OAuthCallback`] (with no session change) when
    /// the provider reported an error, or any error of
    /// [`SessionFacade::complete_oauth_callback`].
    pub async fn handle_oauth_redirect(&self, query: &str) -> Result<Option<UserProfile>, SessionError> {
        match parse_callback(query) {
            Some(OAuthCallback::Token(token)) => self.complete_oauth_callback(&token).await.map(Some),
            Some(OAuthCallback::Error(message)) => {
                log::warn!("oauth callback returned error: {message}");
                Err(SessionError::OAuthCallback(message))
            }
            None => Ok(None),
        }
    }

    pub fn sign_out(&self) {
        self.session.sign_out();
    }

    /// Subscribe to login state; the listener gets the current value first.
    pub fn is_authenticated<F>(&self, listener: F) -> Subscription
    where
        F: Fn(bool) + 'static,
    {
        self.session.broadcaster().subscribe(listener)
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.session.broadcaster().current()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.session.store().user()
    }

    /// Navbar label: the stored display name, or empty when logged out.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.current_user().map(|u| u.display_name).unwrap_or_default()
    }

    /// Guilds the stored user can manage, icons resolved against the
    /// configured asset base. Empty when no user is stored.
    #[must_use]
    pub fn current_managed_guilds(&self) -> Vec<ManagedGuild> {
        self.current_user()
            .map(|user| managed_guilds(&user, &self.config.asset_base_url))
            .unwrap_or_default()
    }

    /// Where the login button should send the browser.
    #[must_use]
    pub fn login_url(&self) -> String {
        authorization_url(
            &self.config.api_base_url,
            self.config.oauth_provider,
            &self.config.oauth_redirect_uri(),
        )
    }
}
