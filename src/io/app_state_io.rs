//! Application state persistence, export and import.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every slice of [`AppState`] lives under its own storage key so a corrupt
//! or outdated entry only resets that slice. The channel URL is stored as a
//! raw string; everything else is JSON.
//!
//! Export files use a single JSON document with camelCase keys. Import runs
//! each field back through the storage parsers and applies the merged result
//! as one dispatch.

#[cfg(test)]
#[path = "app_state_io_test.rs"]
mod app_state_io_test;

use serde::Serialize;
use serde_json::Value;

use super::loaders::{
    LoadError, field, or_default, parse_avatar_settings, parse_discord_users, parse_fei_settings,
    parse_feign_players, parse_named_channels, parse_streamer_settings, parse_table_settings,
    parse_username_settings, parse_view_settings, parse_voice_channel_url,
};
use super::storage::{KeyValueStorage, save_json};
use crate::models::app_state::AppState;
use crate::models::channel::NamedChannel;
use crate::models::discord_user::DiscordUser;
use crate::models::feign_players::FeignPlayers;
use crate::models::table_settings::{DISCORD_USER_COLUMNS, NAMED_CHANNEL_COLUMNS, TableSettings};
use crate::models::view_settings::{AvatarSettings, FeiSettings, StreamerSettings, UsernameSettings, ViewSettings};
use crate::state::store::Store;

// ── Storage keys ────────────────────────────────────────────────

pub const KEY_VOICE_CHANNEL: &str = "voice_channel_url";
pub const KEY_NAMED_CHANNELS: &str = "named_channels";
pub const KEY_NAMED_CHANNELS_TABLE: &str = "named_channels_table";
pub const KEY_DISCORD_USERS: &str = "discord_users";
pub const KEY_DISCORD_USERS_TABLE: &str = "discord_users_table";
pub const KEY_FEIGN_PLAYERS: &str = "feign_players";
pub const KEY_VIEW_FEI: &str = "view_fei";
pub const KEY_VIEW_AVATAR: &str = "view_avatar";
pub const KEY_VIEW_USERNAME: &str = "view_username";
pub const KEY_VIEW_STREAMER: &str = "view_streamer";

// =============================================================================
// LOAD
// =============================================================================

fn read_raw(storage: &impl KeyValueStorage, key: &str) -> Result<String, LoadError> {
    storage.get_item(key).ok_or(LoadError::Missing)
}

fn read_json(storage: &impl KeyValueStorage, key: &str) -> Result<Value, LoadError> {
    Ok(serde_json::from_str(&read_raw(storage, key)?)?)
}

/// Read one JSON slice through `parse`, falling back to `default`.
fn load_slice<T>(
    storage: &impl KeyValueStorage,
    key: &str,
    parse: impl FnOnce(&Value) -> Result<T, LoadError>,
    default: impl FnOnce() -> T,
) -> T {
    or_default(key, read_json(storage, key).and_then(|v| parse(&v)), default)
}

/// Load every slice from storage. Never fails; bad slices use their default.
pub fn load_all(storage: &impl KeyValueStorage) -> AppState {
    let feign_players = load_slice(storage, KEY_FEIGN_PLAYERS, parse_feign_players, FeignPlayers::default);
    AppState {
        channel_url: or_default(KEY_VOICE_CHANNEL, read_raw(storage, KEY_VOICE_CHANNEL), String::new),
        named_channels: load_slice(storage, KEY_NAMED_CHANNELS, parse_named_channels, Vec::new),
        named_channels_table_settings: load_slice(
            storage,
            KEY_NAMED_CHANNELS_TABLE,
            |v| parse_table_settings(v, &NAMED_CHANNEL_COLUMNS),
            TableSettings::default,
        ),
        discord_users: load_slice(storage, KEY_DISCORD_USERS, parse_discord_users, Vec::new),
        discord_users_table_settings: load_slice(
            storage,
            KEY_DISCORD_USERS_TABLE,
            |v| parse_table_settings(v, &DISCORD_USER_COLUMNS),
            TableSettings::default,
        ),
        is_speaking: AppState::reset_speaking(&feign_players),
        feign_players,
        view_settings: ViewSettings {
            fei: load_slice(storage, KEY_VIEW_FEI, parse_fei_settings, FeiSettings::default),
            avatar: load_slice(storage, KEY_VIEW_AVATAR, parse_avatar_settings, AvatarSettings::default),
            username: load_slice(storage, KEY_VIEW_USERNAME, parse_username_settings, UsernameSettings::default),
            streamer: load_slice(storage, KEY_VIEW_STREAMER, parse_streamer_settings, StreamerSettings::default),
        },
    }
}

// =============================================================================
// SAVE
// =============================================================================

pub fn save_voice_channel_url(storage: &mut impl KeyValueStorage, url: &str) {
    storage.set_item(KEY_VOICE_CHANNEL, url);
}

pub fn save_named_channels(storage: &mut impl KeyValueStorage, channels: &[NamedChannel]) {
    save_json(storage, KEY_NAMED_CHANNELS, &channels);
}

pub fn save_named_channels_table_settings(storage: &mut impl KeyValueStorage, settings: &TableSettings) {
    save_json(storage, KEY_NAMED_CHANNELS_TABLE, settings);
}

pub fn save_discord_users(storage: &mut impl KeyValueStorage, users: &[DiscordUser]) {
    save_json(storage, KEY_DISCORD_USERS, &users);
}

pub fn save_discord_users_table_settings(storage: &mut impl KeyValueStorage, settings: &TableSettings) {
    save_json(storage, KEY_DISCORD_USERS_TABLE, settings);
}

pub fn save_feign_players(storage: &mut impl KeyValueStorage, players: &FeignPlayers) {
    save_json(storage, KEY_FEIGN_PLAYERS, players);
}

pub fn save_fei_settings(storage: &mut impl KeyValueStorage, settings: &FeiSettings) {
    save_json(storage, KEY_VIEW_FEI, settings);
}

pub fn save_avatar_settings(storage: &mut impl KeyValueStorage, settings: &AvatarSettings) {
    save_json(storage, KEY_VIEW_AVATAR, settings);
}

pub fn save_username_settings(storage: &mut impl KeyValueStorage, settings: &UsernameSettings) {
    save_json(storage, KEY_VIEW_USERNAME, settings);
}

pub fn save_streamer_settings(storage: &mut impl KeyValueStorage, settings: &StreamerSettings) {
    save_json(storage, KEY_VIEW_STREAMER, settings);
}

/// Write every persisted slice.
pub fn save_all(storage: &mut impl KeyValueStorage, state: &AppState) {
    persist_changes(storage, None, state);
}

/// Write each slice of `next` that differs from `prev` (all of them when
/// there is no previous state).
pub fn persist_changes(storage: &mut impl KeyValueStorage, prev: Option<&AppState>, next: &AppState) {
    macro_rules! persist {
        ($($field:ident).+ => $save:ident) => {
            if prev.is_none_or(|p| p.$($field).+ != next.$($field).+) {
                $save(storage, &next.$($field).+);
            }
        };
    }

    persist!(channel_url => save_voice_channel_url);
    persist!(named_channels => save_named_channels);
    persist!(named_channels_table_settings => save_named_channels_table_settings);
    persist!(discord_users => save_discord_users);
    persist!(discord_users_table_settings => save_discord_users_table_settings);
    persist!(feign_players => save_feign_players);
    persist!(view_settings.fei => save_fei_settings);
    persist!(view_settings.avatar => save_avatar_settings);
    persist!(view_settings.username => save_username_settings);
    persist!(view_settings.streamer => save_streamer_settings);
}

// =============================================================================
// EXPORT
// =============================================================================

/// Which parts of the state go into an export file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Replace user names with `user-{n}` and drop users not in a slot.
    pub anonymize: bool,
    /// Channels, users and player assignments.
    pub include_data: bool,
    /// Appearance settings.
    pub include_view: bool,
}

#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    #[serde(rename = "channelURL", skip_serializing_if = "Option::is_none")]
    channel_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    named_channels: Option<&'a [NamedChannel]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    named_channels_table_settings: Option<&'a TableSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    discord_users: Option<Vec<DiscordUser>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    discord_users_table_settings: Option<TableSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    feign_players: Option<FeignPlayers>,
    #[serde(skip_serializing_if = "Option::is_none")]
    view_settings: Option<&'a ViewSettings>,
}

/// Serialize the selected parts of `state` as an export document.
pub fn app_state_to_json(state: &AppState, options: ExportOptions) -> String {
    let mut doc = ExportDocument::default();
    if options.include_data {
        doc.channel_url = Some(state.channel_url.as_str());
        doc.named_channels = Some(state.named_channels.as_slice());
        doc.named_channels_table_settings = Some(&state.named_channels_table_settings);
        if options.anonymize {
            let slots = state.feign_players.get_players();
            doc.discord_users = Some(
                slots
                    .active_ids()
                    .into_iter()
                    .enumerate()
                    .map(|(i, id)| DiscordUser {
                        id: id.to_owned(),
                        name: format!("user-{i}"),
                        groups: Vec::new(),
                    })
                    .collect(),
            );
            doc.discord_users_table_settings = Some(TableSettings::default());
            doc.feign_players = Some(FeignPlayers::ungrouped(slots));
        } else {
            doc.discord_users = Some(state.discord_users.clone());
            doc.discord_users_table_settings = Some(state.discord_users_table_settings.clone());
            doc.feign_players = Some(state.feign_players.clone());
        }
    }
    if options.include_view {
        doc.view_settings = Some(&state.view_settings);
    }
    serde_json::to_string(&doc).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to serialize export");
        "{}".to_owned()
    })
}

// =============================================================================
// IMPORT
// =============================================================================

/// Why an export document was rejected as a whole.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("not a JSON document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("document is empty")]
    EmptyDocument,
    #[error("document has no view settings")]
    MissingViewSettings,
}

/// `null`, `false`, `0` and `""` carry no document.
fn is_empty_document(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Apply an export document to `store`.
///
/// Fields are validated one by one and replaced by their defaults when
/// malformed; the merged state is applied as a single dispatch.
///
/// # Errors
///
/// Returns an error, leaving the store untouched, when `content` is not
/// JSON, is an empty document, or lacks `viewSettings` while `include_view`
/// is set.
pub fn load_json_string<S: KeyValueStorage>(
    store: &mut Store<S>,
    content: &str,
    include_data: bool,
    include_view: bool,
) -> Result<(), ImportError> {
    match parse_import(content, include_data, include_view) {
        Ok(patch) => {
            store.dispatch(|prev| patch.apply(prev));
            Ok(())
        }
        Err(e) => {
            tracing::warn!(error = %e, "import rejected");
            Err(e)
        }
    }
}

/// Validated fields of an import document.
#[derive(Default)]
struct ImportPatch {
    data: Option<ImportedData>,
    view_settings: Option<ViewSettings>,
}

struct ImportedData {
    channel_url: String,
    named_channels: Vec<NamedChannel>,
    named_channels_table_settings: TableSettings,
    discord_users: Vec<DiscordUser>,
    discord_users_table_settings: TableSettings,
    feign_players: FeignPlayers,
}

impl ImportPatch {
    fn apply(self, prev: &AppState) -> AppState {
        let mut next = prev.clone();
        if let Some(data) = self.data {
            next.is_speaking = AppState::reset_speaking(&data.feign_players);
            next.channel_url = data.channel_url;
            next.named_channels = data.named_channels;
            next.named_channels_table_settings = data.named_channels_table_settings;
            next.discord_users = data.discord_users;
            next.discord_users_table_settings = data.discord_users_table_settings;
            next.feign_players = data.feign_players;
        }
        if let Some(view_settings) = self.view_settings {
            next.view_settings = view_settings;
        }
        next
    }
}

fn parse_import(content: &str, include_data: bool, include_view: bool) -> Result<ImportPatch, ImportError> {
    let doc: Value = serde_json::from_str(content)?;
    if is_empty_document(&doc) {
        return Err(ImportError::EmptyDocument);
    }

    let mut patch = ImportPatch::default();
    if include_data {
        patch.data = Some(ImportedData {
            channel_url: or_default(
                "channelURL",
                parse_voice_channel_url(field(&doc, "channelURL")),
                String::new,
            ),
            named_channels: or_default(
                "namedChannels",
                parse_named_channels(field(&doc, "namedChannels")),
                Vec::new,
            ),
            named_channels_table_settings: or_default(
                "namedChannelsTableSettings",
                parse_table_settings(field(&doc, "namedChannelsTableSettings"), &NAMED_CHANNEL_COLUMNS),
                TableSettings::default,
            ),
            discord_users: or_default(
                "discordUsers",
                parse_discord_users(field(&doc, "discordUsers")),
                Vec::new,
            ),
            discord_users_table_settings: or_default(
                "discordUsersTableSettings",
                parse_table_settings(field(&doc, "discordUsersTableSettings"), &DISCORD_USER_COLUMNS),
                TableSettings::default,
            ),
            feign_players: or_default(
                "feignPlayers",
                parse_feign_players(field(&doc, "feignPlayers")),
                FeignPlayers::default,
            ),
        });
    }
    if include_view {
        let view = field(&doc, "viewSettings");
        if view.is_null() {
            return Err(ImportError::MissingViewSettings);
        }
        patch.view_settings = Some(parse_view_settings(view));
    }
    Ok(patch)
}

/// Reset the whole state to its defaults.
pub fn initialize_app_state<S: KeyValueStorage>(store: &mut Store<S>) {
    store.dispatch(|_| AppState::default());
}

