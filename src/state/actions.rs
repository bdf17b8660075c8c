//! Pure state transforms, one per user action.
//!
//! Each function maps the previous state to the next one and is meant to be
//! passed to [`Store::dispatch`](super::store::Store::dispatch). Out-of-range
//! indices and view settings outside their accepted ranges leave the state
//! unchanged.

#[cfg(test)]
#[path = "actions_test.rs"]
mod actions_test;

use crate::models::app_state::AppState;
use crate::models::channel::{NamedChannel, can_register};
use crate::models::discord_user::DiscordUser;
use crate::models::table_settings::TableSettings;
use crate::models::view_settings::{AvatarSettings, FeiSettings, StreamerSettings, UsernameSettings, ViewSettings};

/// Move the element at `from` to position `to`, shifting the rest.
fn reorder<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut next = items.to_vec();
    if from < next.len() && to < next.len() {
        let item = next.remove(from);
        next.insert(to, item);
    }
    next
}

// =============================================================================
// CHANNELS
// =============================================================================

/// Set the current voice channel URL, trimmed.
pub fn set_channel_url(prev: &AppState, url: &str) -> AppState {
    AppState {
        channel_url: url.trim().to_owned(),
        ..prev.clone()
    }
}

/// Save the current channel URL under `name` unless it is invalid or
/// already saved.
pub fn register_channel(prev: &AppState, name: &str, created_at: i64) -> AppState {
    if !can_register(&prev.channel_url, &prev.named_channels) {
        return prev.clone();
    }
    let mut next = prev.clone();
    next.named_channels.push(NamedChannel {
        name: name.trim().to_owned(),
        url: prev.channel_url.clone(),
        created_at,
    });
    next
}

pub fn rename_channel(prev: &AppState, index: usize, name: &str) -> AppState {
    let mut next = prev.clone();
    if let Some(channel) = next.named_channels.get_mut(index) {
        name.clone_into(&mut channel.name);
    }
    next
}

pub fn remove_channel(prev: &AppState, index: usize) -> AppState {
    let mut next = prev.clone();
    if index < next.named_channels.len() {
        next.named_channels.remove(index);
    }
    next
}

/// Make a saved channel the current one.
pub fn select_channel(prev: &AppState, index: usize) -> AppState {
    match prev.named_channels.get(index) {
        Some(channel) => set_channel_url(prev, &channel.url),
        None => prev.clone(),
    }
}

pub fn reorder_channels(prev: &AppState, from: usize, to: usize) -> AppState {
    AppState {
        named_channels: reorder(&prev.named_channels, from, to),
        ..prev.clone()
    }
}

pub fn set_named_channels_sort(prev: &AppState, settings: TableSettings) -> AppState {
    AppState {
        named_channels_table_settings: settings,
        ..prev.clone()
    }
}

// =============================================================================
// DISCORD USERS
// =============================================================================

pub fn add_user(prev: &AppState, user: DiscordUser) -> AppState {
    let mut next = prev.clone();
    next.discord_users.push(user);
    next
}

pub fn update_user(prev: &AppState, index: usize, user: DiscordUser) -> AppState {
    let mut next = prev.clone();
    if let Some(slot) = next.discord_users.get_mut(index) {
        *slot = user;
    }
    next
}

/// Drop the user with `id`; their slots are cleared on reconciliation.
pub fn remove_user(prev: &AppState, id: &str) -> AppState {
    let mut next = prev.clone();
    next.discord_users.retain(|u| u.id != id);
    next
}

pub fn reorder_users(prev: &AppState, from: usize, to: usize) -> AppState {
    AppState {
        discord_users: reorder(&prev.discord_users, from, to),
        ..prev.clone()
    }
}

pub fn set_discord_users_sort(prev: &AppState, settings: TableSettings) -> AppState {
    AppState {
        discord_users_table_settings: settings,
        ..prev.clone()
    }
}

// =============================================================================
// PLAYERS
// =============================================================================

/// Assign `id` to `slot` in the current group. An empty `id` clears it.
pub fn assign_player(prev: &AppState, slot: usize, id: &str) -> AppState {
    AppState {
        feign_players: prev.feign_players.assign(slot, id),
        ..prev.clone()
    }
}

/// Switch to `group`; `None` returns to the ungrouped sequence.
pub fn select_group(prev: &AppState, group: Option<&str>) -> AppState {
    AppState {
        feign_players: prev.feign_players.select_group(group.unwrap_or_default()),
        ..prev.clone()
    }
}

/// Flip the preview speaking flag of the active player at `index`.
pub fn toggle_speaking(prev: &AppState, index: usize) -> AppState {
    let mut next = prev.clone();
    if let Some(flag) = next.is_speaking.get_mut(index) {
        *flag = !*flag;
    }
    next
}

// =============================================================================
// VIEW
// =============================================================================

pub fn set_fei_settings(prev: &AppState, fei: FeiSettings) -> AppState {
    if !fei.is_in_range() {
        return prev.clone();
    }
    let mut next = prev.clone();
    next.view_settings.fei = fei;
    next
}

pub fn set_avatar_settings(prev: &AppState, avatar: AvatarSettings) -> AppState {
    if !avatar.is_in_range() {
        return prev.clone();
    }
    let mut next = prev.clone();
    next.view_settings.avatar = avatar;
    next
}

pub fn set_username_settings(prev: &AppState, username: UsernameSettings) -> AppState {
    if !username.is_in_range() {
        return prev.clone();
    }
    let mut next = prev.clone();
    next.view_settings.username = username;
    next
}

pub fn set_streamer_settings(prev: &AppState, streamer: StreamerSettings) -> AppState {
    let mut next = prev.clone();
    next.view_settings.streamer = streamer;
    next
}

pub fn reset_view_settings(prev: &AppState) -> AppState {
    AppState {
        view_settings: ViewSettings::default(),
        ..prev.clone()
    }
}
