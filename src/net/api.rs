//! REST API helpers for the dashboard backend.
//!
//! Requests go through whatever [`HttpSend`] stack the caller wires in; in the
//! browser that is the gloo-net sender wrapped by the request authenticator,
//! so every call carries the bearer token.
//!
//! ERROR HANDLING
//! ==============
//! Transport, status, and decode failures all come back as [`ApiError`] so
//! screens can show `user_message()` without matching on causes.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;

use super::http::{ApiError, ApiRequest, HttpSend};
use super::types::{GuildBot, UserProfile};

/// Source of the signed-in user's profile.
#[async_trait(?Send)]
pub trait ProfileSource {
    /// Fetch the profile for the currently stored token.
    async fn fetch_current_user(&self) -> Result<UserProfile, ApiError>;
}

fn current_user_endpoint(base_url: &str) -> String {
    format!("{base_url}/api/user/me")
}

fn guild_bot_endpoint(base_url: &str, guild_bot_id: &str) -> String {
    format!("{base_url}/api/guildBot/{guild_bot_id}")
}

/// Typed client for the dashboard API.
pub struct DashboardApi<S> {
    sender: S,
    base_url: String,
}

impl<S: HttpSend> DashboardApi<S> {
    /// `base_url` is the API origin without a trailing slash.
    #[must_use]
    pub fn new(sender: S, base_url: impl Into<String>) -> Self {
        Self { sender, base_url: base_url.into() }
    }

    #[must_use]
    pub fn sender(&self) -> &S {
        &self.sender
    }

    /// Fetch the signed-in user from `/api/user/me`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or a body
    /// that is not a user profile.
    pub async fn current_user(&self) -> Result<UserProfile, ApiError> {
        let request = ApiRequest::get(current_user_endpoint(&self.base_url));
        self.sender.send(&request).await?.json()
    }

    /// Fetch bot settings for one guild from `/api/guildBot/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or a body
    /// that is not a guild bot.
    pub async fn guild_bot(&self, guild_bot_id: &str) -> Result<GuildBot, ApiError> {
        let request = ApiRequest::get(guild_bot_endpoint(&self.base_url, guild_bot_id));
        self.sender.send(&request).await?.json()
    }
}

#[async_trait(?Send)]
impl<S: HttpSend> ProfileSource for DashboardApi<S> {
    async fn fetch_current_user(&self) -> Result<UserProfile, ApiError> {
        self.current_user().await
    }
}
