//! Which of the user's guilds they may manage the bot in.

#[cfg(test)]
#[path = "guilds_test.rs"]
mod guilds_test;

use crate::net::types::{Guild, GuildPermission, ManagedGuild, UserProfile};

impl GuildPermission {
    /// `MANAGE_GUILD` and `ADMINISTRATOR` both allow configuring the bot.
    #[must_use]
    pub fn grants_management(&self) -> bool {
        matches!(self, Self::ManageGuild | Self::Administrator)
    }
}

impl Guild {
    #[must_use]
    pub fn is_manageable(&self) -> bool {
        self.owner || self.permissions.grants_management()
    }
}

/// CDN URL for a guild icon. `asset_base_url` is expected to end in `/`.
#[must_use]
pub fn guild_icon_url(asset_base_url: &str, guild_id: &str, icon: &str) -> String {
    format!("{asset_base_url}icons/{guild_id}/{icon}.png")
}

/// Guilds of `user` they own or hold a management permission in, in input
/// order, with icon hashes expanded to URLs.
#[must_use]
pub fn managed_guilds(user: &UserProfile, asset_base_url: &str) -> Vec<ManagedGuild> {
    user.guilds
        .iter()
        .filter(|guild| guild.is_manageable())
        .map(|guild| ManagedGuild {
            id: guild.id.clone(),
            name: guild.name.clone(),
            icon: guild
                .icon
                .as_deref()
                .map(|icon| guild_icon_url(asset_base_url, &guild.id, icon)),
            owner: guild.owner,
            permissions: guild.permissions.clone(),
        })
        .collect()
}
