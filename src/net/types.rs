//! Wire DTOs for the dashboard API.
//!
//! DESIGN
//! ======
//! Field names follow the API's camelCase JSON so a profile read back from
//! session storage deserializes with the same types it was fetched with.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The signed-in user as returned by `GET /api/user/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Local account id assigned by the API.
    pub id: String,
    pub display_name: String,
    pub email: Option<String>,
    /// Account id at the OAuth provider (e.g. the Discord snowflake).
    pub provider_user_id: Option<String>,
    /// Avatar image URL, if the provider supplied one.
    pub avatar: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub guilds: Vec<Guild>,
}

/// A guild the user belongs to, as reported by the provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guild {
    pub id: String,
    pub name: String,
    /// Icon asset hash; `None` when the guild uses the default icon.
    pub icon: Option<String>,
    #[serde(default)]
    pub owner: bool,
    #[serde(default)]
    pub permissions: GuildPermission,
    #[serde(default)]
    pub features: Vec<String>,
}

/// The user's effective permission code in a guild.
///
/// Only the two codes that grant bot management are modelled; everything else
/// is carried through as an opaque string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum GuildPermission {
    ManageGuild,
    Administrator,
    Other(String),
}

impl GuildPermission {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ManageGuild => "MANAGE_GUILD",
            Self::Administrator => "ADMINISTRATOR",
            Self::Other(code) => code,
        }
    }
}

impl Default for GuildPermission {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<Option<String>> for GuildPermission {
    fn from(raw: Option<String>) -> Self {
        match raw.as_deref() {
            Some("MANAGE_GUILD") => Self::ManageGuild,
            Some("ADMINISTRATOR") => Self::Administrator,
            _ => Self::Other(raw.unwrap_or_default()),
        }
    }
}

impl From<GuildPermission> for String {
    fn from(permission: GuildPermission) -> Self {
        match permission {
            GuildPermission::Other(code) => code,
            known => known.as_str().to_owned(),
        }
    }
}

/// A guild the current user may administer, with its icon resolved to a URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedGuild {
    pub id: String,
    pub name: String,
    /// Fully qualified icon URL; `None` when the guild has no custom icon.
    pub icon: Option<String>,
    pub owner: bool,
    pub permissions: GuildPermission,
}

/// Bot settings for one guild, as served by `GET /api/guildBot/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildBot {
    pub id: Option<i64>,
    pub name: String,
    /// Whether the bot only answers whitelisted channels.
    #[serde(default)]
    pub whitelist: bool,
    pub prefix: String,
    #[serde(default)]
    pub enable_log: bool,
    pub log_channel: Option<i64>,
    #[serde(default)]
    pub enable_welcome: bool,
    pub welcome_channel: Option<String>,
    pub welcome_text: Option<String>,
}
