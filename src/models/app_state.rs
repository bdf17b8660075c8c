//! Root aggregate of everything the configurator edits.

#[cfg(test)]
#[path = "app_state_test.rs"]
mod app_state_test;

use super::channel::NamedChannel;
use super::discord_user::{DiscordUser, find_user_groups};
use super::feign_players::FeignPlayers;
use super::table_settings::TableSettings;
use super::view_settings::ViewSettings;

/// Application state. Every field except `is_speaking` is persisted under
/// its own storage key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    pub channel_url: String,
    pub named_channels: Vec<NamedChannel>,
    pub named_channels_table_settings: TableSettings,
    pub discord_users: Vec<DiscordUser>,
    pub discord_users_table_settings: TableSettings,
    pub feign_players: FeignPlayers,
    pub view_settings: ViewSettings,
    /// Preview-only speaking flags, one per active player.
    pub is_speaking: Vec<bool>,
}

impl AppState {
    /// Sorted groups referenced by the current users.
    #[must_use]
    pub fn user_groups(&self) -> Vec<String> {
        find_user_groups(&self.discord_users)
    }

    /// Users selectable for the current group.
    pub fn selectable_users(&self) -> impl Iterator<Item = &DiscordUser> {
        let group = self.feign_players.group.as_str();
        self.discord_users.iter().filter(move |u| u.belongs_to(group))
    }

    /// Users occupying the current group's slots, in slot order.
    #[must_use]
    pub fn active_users(&self) -> Vec<&DiscordUser> {
        let players = self.feign_players.get_players();
        players
            .active_ids()
            .into_iter()
            .filter_map(|id| self.discord_users.iter().find(|u| u.id == id))
            .collect()
    }

    /// Fresh speaking flags sized to the active player count.
    #[must_use]
    pub fn reset_speaking(feign_players: &FeignPlayers) -> Vec<bool> {
        vec![false; feign_players.number_of_active_players()]
    }
}
