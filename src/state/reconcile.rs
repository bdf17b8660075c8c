//! Keep player slots consistent with the Discord user list.

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod reconcile_test;

use std::collections::BTreeMap;

use crate::models::app_state::AppState;
use crate::models::feign_players::{FeignPlayers, PlayerSlots, UNGROUPED};

/// Repair `state.feign_players` against `state.discord_users`.
///
/// - sequences of groups no user references any more are dropped,
/// - slot IDs that no longer name a member of that group are cleared,
/// - every live group (and the ungrouped key) gets a sequence,
/// - a vanished current group falls back to ungrouped.
///
/// Applying it twice gives the same result as applying it once.
#[must_use]
pub fn reconcile_feign_players(state: &AppState) -> FeignPlayers {
    let groups = state.user_groups();
    let users = &state.discord_users;
    let is_live = |group: &str| group == UNGROUPED || groups.iter().any(|g| g == group);

    let mut players: BTreeMap<String, PlayerSlots> = state
        .feign_players
        .players
        .iter()
        .filter(|(group, _)| is_live(group))
        .map(|(group, slots)| {
            let kept = slots.retain(|id| users.iter().any(|u| u.id == id && u.belongs_to(group)));
            (group.clone(), kept)
        })
        .collect();

    players.entry(UNGROUPED.to_owned()).or_default();
    for group in &groups {
        players.entry(group.clone()).or_default();
    }

    let current = &state.feign_players.group;
    FeignPlayers {
        group: if is_live(current) { current.clone() } else { UNGROUPED.to_owned() },
        players,
    }
}
