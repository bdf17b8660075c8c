//! Typed parsers for each persisted slice.
//!
//! DESIGN
//! ======
//! Stored and imported data may come from any earlier release, or be
//! hand-edited. Every parser takes an untyped JSON value and returns either a
//! fully validated slice or a [`LoadError`]; callers substitute the slice
//! default on error. Older shapes are upgraded here:
//!
//! - users without `groups` (or with a malformed list) get no groups,
//! - a bare 13-element player array becomes the ungrouped sequence,
//! - character settings without `show` are shown.

#[cfg(test)]
#[path = "loaders_test.rs"]
mod loaders_test;

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::channel::NamedChannel;
use crate::models::discord_user::DiscordUser;
use crate::models::feign_players::{FeignPlayers, PlayerSlots, UNGROUPED};
use crate::models::table_settings::{SortOrder, TableSettings};
use crate::models::view_settings::{
    AvatarSettings, FeiSettings, StreamerSettings, UsernameSettings, ViewSettings,
};

/// Why a stored or imported slice was rejected.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Nothing stored under the key.
    #[error("no stored value")]
    Missing,
    /// The raw text is not JSON, or does not fit the typed shape.
    #[error("malformed value: {0}")]
    Json(#[from] serde_json::Error),
    /// Well-formed JSON that breaks a slice invariant.
    #[error("invalid {0}")]
    Invalid(String),
}

fn invalid(what: impl Into<String>) -> LoadError {
    LoadError::Invalid(what.into())
}

fn typed<T: DeserializeOwned>(value: &Value) -> Result<T, LoadError> {
    Ok(T::deserialize(value)?)
}

/// Unwrap a parsed slice, logging and substituting `default` on failure.
pub fn or_default<T>(slice: &str, parsed: Result<T, LoadError>, default: impl FnOnce() -> T) -> T {
    parsed.unwrap_or_else(|e| {
        tracing::debug!(%slice, error = %e, "using default slice");
        default()
    })
}

// =============================================================================
// CHANNELS
// =============================================================================

/// # Errors
///
/// Rejects anything that is not a string.
pub fn parse_voice_channel_url(value: &Value) -> Result<String, LoadError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| invalid("channel URL"))
}

/// # Errors
///
/// Rejects non-arrays and any entry missing a typed field.
pub fn parse_named_channels(value: &Value) -> Result<Vec<NamedChannel>, LoadError> {
    typed(value)
}

// =============================================================================
// TABLE SETTINGS
// =============================================================================

/// Parse table sort state; the key must be one of `columns`.
///
/// # Errors
///
/// An unknown or null key, or a missing order, is rejected so the caller
/// resets both fields together.
pub fn parse_table_settings(value: &Value, columns: &[&str]) -> Result<TableSettings, LoadError> {
    let key = value
        .get("sortKey")
        .and_then(Value::as_str)
        .filter(|k| columns.contains(k))
        .ok_or_else(|| invalid("sort key"))?;
    let order = match value.get("sortOrder").and_then(Value::as_str) {
        Some("ASC") => SortOrder::Asc,
        Some("DESC") => SortOrder::Desc,
        _ => return Err(invalid("sort order")),
    };
    Ok(TableSettings::new(Some(key), Some(order)))
}

// =============================================================================
// DISCORD USERS
// =============================================================================

/// # Errors
///
/// Rejects non-arrays and users without a string `id` and `name`.
pub fn parse_discord_users(value: &Value) -> Result<Vec<DiscordUser>, LoadError> {
    let users = value.as_array().ok_or_else(|| invalid("user list"))?;
    users.iter().map(parse_discord_user).collect()
}

fn parse_discord_user(value: &Value) -> Result<DiscordUser, LoadError> {
    let id = value.get("id").and_then(Value::as_str).ok_or_else(|| invalid("user id"))?;
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("user name"))?;
    Ok(DiscordUser {
        id: id.to_owned(),
        name: name.to_owned(),
        groups: parse_groups(value.get("groups")),
    })
}

/// Groups were added in v1.0.0; anything but a list of strings means none.
fn parse_groups(value: Option<&Value>) -> Vec<String> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .map(|g| g.as_str().map(str::to_owned))
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default()
}

// =============================================================================
// FEIGN PLAYERS
// =============================================================================

/// Parse player slots, upgrading the pre-group bare-array shape.
///
/// # Errors
///
/// Every sequence must hold exactly `NUMBER_OF_FEI_COLORS` strings.
pub fn parse_feign_players(value: &Value) -> Result<FeignPlayers, LoadError> {
    if let Some(group) = value.get("group").and_then(Value::as_str) {
        let entries = value
            .get("players")
            .and_then(Value::as_object)
            .ok_or_else(|| invalid("player map"))?;
        let players = entries
            .iter()
            .map(|(k, v)| parse_slots(v).map(|slots| (k.clone(), slots)))
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        return Ok(FeignPlayers {
            group: group.to_owned(),
            players,
        });
    }

    // Snapshots before v1.0.0 store the ungrouped sequence directly.
    let slots = parse_slots(value)?;
    Ok(FeignPlayers {
        group: UNGROUPED.to_owned(),
        players: BTreeMap::from([(UNGROUPED.to_owned(), slots)]),
    })
}

fn parse_slots(value: &Value) -> Result<PlayerSlots, LoadError> {
    let ids = typed::<Vec<String>>(value)?;
    PlayerSlots::try_from(ids).map_err(|ids| invalid(format!("player sequence of length {}", ids.len())))
}

// =============================================================================
// VIEW SETTINGS
// =============================================================================

/// # Errors
///
/// Rejects missing or mistyped fields and an `interval` outside
/// [`INTERVAL_RANGE`](crate::models::view_settings::INTERVAL_RANGE).
/// `show` may be absent.
pub fn parse_fei_settings(value: &Value) -> Result<FeiSettings, LoadError> {
    let fei: FeiSettings = typed(value)?;
    if !fei.is_in_range() {
        return Err(invalid(format!("interval {}", fei.interval)));
    }
    Ok(fei)
}

/// # Errors
///
/// Rejects missing or mistyped fields, shapes outside `0..=2` and an
/// `offsetY` outside
/// [`OFFSET_Y_RANGE`](crate::models::view_settings::OFFSET_Y_RANGE).
pub fn parse_avatar_settings(value: &Value) -> Result<AvatarSettings, LoadError> {
    let avatar: AvatarSettings = typed(value)?;
    if !avatar.is_in_range() {
        return Err(invalid(format!("avatar offset {}", avatar.offset_y)));
    }
    Ok(avatar)
}

/// # Errors
///
/// Rejects missing or mistyped fields, an `offsetY` outside
/// [`OFFSET_Y_RANGE`](crate::models::view_settings::OFFSET_Y_RANGE) and a
/// `fontSize` outside
/// [`FONT_SIZE_RANGE`](crate::models::view_settings::FONT_SIZE_RANGE).
pub fn parse_username_settings(value: &Value) -> Result<UsernameSettings, LoadError> {
    let username: UsernameSettings = typed(value)?;
    if !username.is_in_range() {
        return Err(invalid(format!(
            "username offset {} or font size {}",
            username.offset_y, username.font_size
        )));
    }
    Ok(username)
}

/// # Errors
///
/// Rejects missing or mistyped fields.
pub fn parse_streamer_settings(value: &Value) -> Result<StreamerSettings, LoadError> {
    typed(value)
}

/// Parse all four view sub-settings, defaulting each one independently.
pub fn parse_view_settings(value: &Value) -> ViewSettings {
    ViewSettings {
        fei: or_default("view.fei", parse_fei_settings(field(value, "fei")), FeiSettings::default),
        avatar: or_default(
            "view.avatar",
            parse_avatar_settings(field(value, "avatar")),
            AvatarSettings::default,
        ),
        username: or_default(
            "view.username",
            parse_username_settings(field(value, "username")),
            UsernameSettings::default,
        ),
        streamer: or_default(
            "view.streamer",
            parse_streamer_settings(field(value, "streamer")),
            StreamerSettings::default,
        ),
    }
}

static NULL: Value = Value::Null;

/// Member `name` of an object, or `null`.
pub(crate) fn field<'a>(value: &'a Value, name: &str) -> &'a Value {
    value.get(name).unwrap_or(&NULL)
}
