//! Discord users and their group memberships.

#[cfg(test)]
#[path = "discord_user_test.rs"]
mod discord_user_test;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::FieldError;

/// A voice channel member that can be assigned to a player slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscordUser {
    pub id: String,
    pub name: String,
    /// Group names; empty for users saved before groups existed.
    #[serde(default)]
    pub groups: Vec<String>,
}

impl DiscordUser {
    #[must_use]
    pub fn belongs_to(&self, group: &str) -> bool {
        group.is_empty() || self.groups.iter().any(|g| g == group)
    }
}

/// Sorted, de-duplicated list of every group referenced by `users`.
pub fn find_user_groups(users: &[DiscordUser]) -> Vec<String> {
    users
        .iter()
        .flat_map(|u| u.groups.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Validate a user name edit at `index` (`None` for a new entry).
///
/// # Errors
///
/// Empty or duplicate names are rejected, ignoring surrounding whitespace.
pub fn validate_user_name(name: &str, users: &[DiscordUser], index: Option<usize>) -> Result<(), FieldError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FieldError::Required { field: "name" });
    }
    if users
        .iter()
        .enumerate()
        .any(|(i, u)| Some(i) != index && u.name.trim() == name)
    {
        return Err(FieldError::AlreadyExists { field: "name" });
    }
    Ok(())
}

/// Validate a Discord ID edit at `index` (`None` for a new entry).
///
/// # Errors
///
/// Empty, non-numeric, or duplicate IDs are rejected.
pub fn validate_user_id(id: &str, users: &[DiscordUser], index: Option<usize>) -> Result<(), FieldError> {
    if id.is_empty() {
        return Err(FieldError::Required { field: "id" });
    }
    if !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::NotNumeric { field: "id" });
    }
    if users
        .iter()
        .enumerate()
        .any(|(i, u)| Some(i) != index && u.id == id)
    {
        return Err(FieldError::AlreadyExists { field: "id" });
    }
    Ok(())
}

/// Validate both fields of a new user entry.
///
/// # Errors
///
/// Returns the first failing field, name before ID.
pub fn validate_new_user(name: &str, id: &str, users: &[DiscordUser]) -> Result<(), FieldError> {
    validate_user_name(name, users, None)?;
    validate_user_id(id, users, None)
}
