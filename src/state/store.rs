//! Single-owner state container.
//!
//! DESIGN
//! ======
//! `dispatch` runs one transform to completion, then performs the follow-up
//! work in a fixed order: reconcile player slots if the user list changed,
//! resize the speaking preview if the slots changed, and persist every slice
//! that differs from the previous state. Writes never happen mid-transform.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use super::reconcile::reconcile_feign_players;
use crate::io::app_state_io::{load_all, persist_changes, save_all};
use crate::io::storage::KeyValueStorage;
use crate::models::app_state::AppState;

/// Owns the application state and the storage it is persisted to.
pub struct Store<S: KeyValueStorage> {
    state: AppState,
    storage: S,
}

impl<S: KeyValueStorage> Store<S> {
    /// Load every slice from `storage`, repair the player slots, and write
    /// the normalized state back.
    pub fn load(mut storage: S) -> Self {
        let mut state = load_all(&storage);
        state.feign_players = reconcile_feign_players(&state);
        state.is_speaking = AppState::reset_speaking(&state.feign_players);
        save_all(&mut storage, &state);
        tracing::debug!(
            users = state.discord_users.len(),
            channels = state.named_channels.len(),
            "state loaded"
        );
        Self { state, storage }
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the storage, dropping the in-memory state.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Replace the state with `transform(previous)` and persist the changes.
    pub fn dispatch(&mut self, transform: impl FnOnce(&AppState) -> AppState) {
        let mut next = transform(&self.state);

        if next.discord_users != self.state.discord_users {
            next.feign_players = reconcile_feign_players(&next);
        }
        if next.feign_players != self.state.feign_players
            && next.is_speaking.len() != next.feign_players.number_of_active_players()
        {
            next.is_speaking = AppState::reset_speaking(&next.feign_players);
        }

        persist_changes(&mut self.storage, Some(&self.state), &next);
        self.state = next;
    }
}
