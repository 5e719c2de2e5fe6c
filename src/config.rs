//! Client configuration baked in at WASM build time.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser has no process environment, so overrides are read with
//! `option_env!` when the bundle is compiled. Parsing goes through
//! [`ClientConfig::from_lookup`] so defaults and validation stay testable.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::util::oauth::OAuthProvider;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_APP_BASE_URL: &str = "http://localhost:4200";
pub const DEFAULT_ASSET_BASE_URL: &str = "https://cdn.discordapp.com/";
pub const DEFAULT_LOGIN_PATH: &str = "/login";

pub const API_BASE_KEY: &str = "GUILD_CONSOLE_API_BASE";
pub const APP_BASE_KEY: &str = "GUILD_CONSOLE_APP_BASE";
pub const ASSET_BASE_KEY: &str = "GUILD_CONSOLE_ASSET_BASE";
pub const LOGIN_PATH_KEY: &str = "GUILD_CONSOLE_LOGIN_PATH";
pub const OAUTH_PROVIDER_KEY: &str = "GUILD_CONSOLE_OAUTH_PROVIDER";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The login path must be an absolute path on the app origin.
    #[error("login path must start with '/': {0}")]
    InvalidLoginPath(String),

    /// The OAuth provider name is not one the API registers.
    #[error("unknown OAuth provider: {0}")]
    UnknownProvider(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API origin without a trailing slash, e.g. `http://localhost:8080`.
    pub api_base_url: String,
    /// Front-end origin without a trailing slash; the OAuth redirect target.
    pub app_base_url: String,
    /// CDN prefix for guild icons, always ending in `/`.
    pub asset_base_url: String,
    /// Path of the login surface; forced sign-outs redirect here.
    pub login_path: String,
    pub oauth_provider: OAuthProvider,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            app_base_url: DEFAULT_APP_BASE_URL.to_owned(),
            asset_base_url: DEFAULT_ASSET_BASE_URL.to_owned(),
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            oauth_provider: OAuthProvider::Discord,
        }
    }
}

impl ClientConfig {
    /// Build config from a key lookup, falling back to defaults per key.
    ///
    /// Keys:
    /// - `GUILD_CONSOLE_API_BASE`: default `http://localhost:8080`
    /// - `GUILD_CONSOLE_APP_BASE`: default `http://localhost:4200`
    /// - `GUILD_CONSOLE_ASSET_BASE`: default `https://cdn.discordapp.com/`
    /// - `GUILD_CONSOLE_LOGIN_PATH`: default `/login`
    /// - `GUILD_CONSOLE_OAUTH_PROVIDER`: `discord` (default) or `github`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a relative login path or an unknown provider.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = trim_origin(lookup(API_BASE_KEY).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned()));
        let app_base_url = trim_origin(lookup(APP_BASE_KEY).unwrap_or_else(|| DEFAULT_APP_BASE_URL.to_owned()));
        let asset_base_url =
            with_trailing_slash(lookup(ASSET_BASE_KEY).unwrap_or_else(|| DEFAULT_ASSET_BASE_URL.to_owned()));

        let login_path = lookup(LOGIN_PATH_KEY).unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_owned());
        if !login_path.starts_with('/') {
            return Err(ConfigError::InvalidLoginPath(login_path));
        }

        let oauth_provider = match lookup(OAUTH_PROVIDER_KEY) {
            Some(raw) => OAuthProvider::from_name(&raw).ok_or(ConfigError::UnknownProvider(raw))?,
            None => OAuthProvider::Discord,
        };

        Ok(Self { api_base_url, app_base_url, asset_base_url, login_path, oauth_provider })
    }

    /// Build config from values captured by `option_env!` at compile time.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::from_lookup`].
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            let value = match key {
                API_BASE_KEY => option_env!("GUILD_CONSOLE_API_BASE"),
                APP_BASE_KEY => option_env!("GUILD_CONSOLE_APP_BASE"),
                ASSET_BASE_KEY => option_env!("GUILD_CONSOLE_ASSET_BASE"),
                LOGIN_PATH_KEY => option_env!("GUILD_CONSOLE_LOGIN_PATH"),
                OAUTH_PROVIDER_KEY => option_env!("GUILD_CONSOLE_OAUTH_PROVIDER"),
                _ => None,
            };
            value.filter(|v| !v.is_empty()).map(str::to_owned)
        })
    }

    /// Absolute URL the provider sends the browser back to after consent.
    #[must_use]
    pub fn oauth_redirect_uri(&self) -> String {
        format!("{}{}", self.app_base_url, self.login_path)
    }
}

fn trim_origin(raw: String) -> String {
    raw.trim_end_matches('/').to_owned()
}

fn with_trailing_slash(raw: String) -> String {
    if raw.ends_with('/') { raw } else { format!("{raw}/") }
}
