//! Voice channel URLs and the named-channel bookmark list.

#[cfg(test)]
#[path = "channel_test.rs"]
mod channel_test;

use serde::{Deserialize, Serialize};

use super::FieldError;
use crate::consts::STREAMKIT_VOICE_URL;

const CHANNEL_URL_PREFIX: &str = "https://discord.com/channels/";

/// A bookmarked voice channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedChannel {
    pub name: String,
    pub url: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}

/// Extract `(server_id, channel_id)` from a Discord voice channel URL.
///
/// Accepts `https://discord.com/channels/{digits}/{digits}` with an optional
/// trailing slash. Anything else yields a pair of empty strings.
pub fn retrieve_channel_ids(url: &str) -> (&str, &str) {
    parse_channel_ids(url).unwrap_or(("", ""))
}

fn parse_channel_ids(url: &str) -> Option<(&str, &str)> {
    let rest = url.strip_prefix(CHANNEL_URL_PREFIX)?;
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    let (server, channel) = rest.split_once('/')?;
    if is_digits(server) && is_digits(channel) {
        Some((server, channel))
    } else {
        None
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[must_use]
pub fn is_valid_voice_channel_url(url: &str) -> bool {
    parse_channel_ids(url).is_some()
}

/// # Errors
///
/// [`FieldError::InvalidUrl`] unless `url` is a voice channel URL.
pub fn validate_channel_url(url: &str) -> Result<(), FieldError> {
    if is_valid_voice_channel_url(url) {
        Ok(())
    } else {
        Err(FieldError::InvalidUrl)
    }
}

/// Build the streamkit overlay URL for a server/channel pair.
pub fn create_url(server_id: &str, channel_id: &str, show_streamer_first: bool) -> String {
    let mut url = format!("{STREAMKIT_VOICE_URL}/{server_id}/{channel_id}");
    if show_streamer_first {
        url.push_str("?streamer_avatar_first=true");
    }
    url
}

/// Whether `url` can be bookmarked: valid and not already in `channels`.
pub fn can_register(url: &str, channels: &[NamedChannel]) -> bool {
    is_valid_voice_channel_url(url) && !channels.iter().any(|c| c.url == url)
}

/// Validate a channel name edit at `index` (`None` for a new entry).
///
/// # Errors
///
/// Returns [`FieldError::AlreadyExists`] when another channel has the same name.
pub fn validate_channel_name(name: &str, channels: &[NamedChannel], index: Option<usize>) -> Result<(), FieldError> {
    if name.is_empty() {
        return Ok(());
    }
    let taken = channels
        .iter()
        .enumerate()
        .any(|(i, c)| Some(i) != index && c.name == name);
    if taken {
        return Err(FieldError::AlreadyExists { field: "name" });
    }
    Ok(())
}
