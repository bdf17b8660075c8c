//! Sort state of the rankable tables.

use serde::{Deserialize, Serialize};

/// Columns the named-channel table may be sorted by.
pub const NAMED_CHANNEL_COLUMNS: [&str; 3] = ["name", "url", "createdAt"];

/// Columns the Discord user table may be sorted by.
pub const DISCORD_USER_COLUMNS: [&str; 3] = ["name", "id", "groups"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Table sort state. Both fields are `None` when the table is unsorted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSettings {
    pub sort_key: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl TableSettings {
    /// Sorted by `key`; passing `None` for either part clears both.
    #[must_use]
    pub fn new(sort_key: Option<&str>, sort_order: Option<SortOrder>) -> Self {
        match (sort_key, sort_order) {
            (Some(key), Some(order)) => Self {
                sort_key: Some(key.to_owned()),
                sort_order: Some(order),
            },
            _ => Self::default(),
        }
    }
}
