//! Player-slot assignments per user group.
//!
//! DESIGN
//! ======
//! Each group maps to a [`PlayerSlots`] array of exactly
//! `NUMBER_OF_FEI_COLORS` Discord IDs, so the length invariant is carried by
//! the type instead of being re-checked on read. An empty string marks an
//! unassigned slot. Assignment keeps every non-empty ID unique within one
//! sequence.

#[cfg(test)]
#[path = "feign_players_test.rs"]
mod feign_players_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::NUMBER_OF_FEI_COLORS;

/// Key of the ungrouped slot sequence.
pub const UNGROUPED: &str = "";

/// Fixed-length Discord IDs, indexed by character color.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerSlots([String; NUMBER_OF_FEI_COLORS]);

impl PlayerSlots {
    #[must_use]
    pub fn new(ids: [String; NUMBER_OF_FEI_COLORS]) -> Self {
        Self(ids)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// ID at `slot`, or `""` for unassigned and out-of-range slots.
    #[must_use]
    pub fn get(&self, slot: usize) -> &str {
        self.0.get(slot).map_or("", String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Non-empty IDs in slot order.
    pub fn active_ids(&self) -> Vec<&str> {
        self.iter().filter(|id| !id.is_empty()).collect()
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.iter().filter(|id| !id.is_empty()).count()
    }

    /// Put `id` in `slot`, clearing any other slot that held it.
    ///
    /// An empty `id` just clears `slot`. Out-of-range slots leave the
    /// sequence unchanged.
    #[must_use]
    pub fn assign(&self, slot: usize, id: &str) -> Self {
        if slot >= NUMBER_OF_FEI_COLORS {
            return self.clone();
        }
        let mut next = self.clone();
        for (i, current) in next.0.iter_mut().enumerate() {
            if i == slot {
                id.clone_into(current);
            } else if !id.is_empty() && current == id {
                current.clear();
            }
        }
        next
    }

    /// Clear every slot whose ID fails `keep`.
    #[must_use]
    pub fn retain(&self, mut keep: impl FnMut(&str) -> bool) -> Self {
        let mut next = self.clone();
        for current in &mut next.0 {
            if !current.is_empty() && !keep(current) {
                current.clear();
            }
        }
        next
    }
}

impl TryFrom<Vec<String>> for PlayerSlots {
    type Error = Vec<String>;

    fn try_from(ids: Vec<String>) -> Result<Self, Self::Error> {
        <[String; NUMBER_OF_FEI_COLORS]>::try_from(ids).map(Self)
    }
}

/// Current group selection plus the slot sequence of every group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeignPlayers {
    /// Current user group (`""` when ungrouped).
    pub group: String,
    /// Slot sequences keyed by group name.
    pub players: BTreeMap<String, PlayerSlots>,
}

impl Default for FeignPlayers {
    fn default() -> Self {
        Self::ungrouped(PlayerSlots::default())
    }
}

impl FeignPlayers {
    /// A single ungrouped sequence.
    #[must_use]
    pub fn ungrouped(slots: PlayerSlots) -> Self {
        Self {
            group: UNGROUPED.to_owned(),
            players: BTreeMap::from([(UNGROUPED.to_owned(), slots)]),
        }
    }

    /// Slot sequence of the current group, or all-empty when absent.
    #[must_use]
    pub fn get_players(&self) -> PlayerSlots {
        self.players.get(&self.group).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn number_of_active_players(&self) -> usize {
        self.players.get(&self.group).map_or(0, PlayerSlots::active_count)
    }

    /// Whether at least one player is assigned in the current group.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.number_of_active_players() > 0
    }

    /// Assign `id` to `slot` within the current group.
    #[must_use]
    pub fn assign(&self, slot: usize, id: &str) -> Self {
        let mut next = self.clone();
        let slots = next.players.entry(next.group.clone()).or_default();
        *slots = slots.assign(slot, id);
        next
    }

    /// Switch the current group.
    #[must_use]
    pub fn select_group(&self, group: &str) -> Self {
        Self {
            group: group.to_owned(),
            players: self.players.clone(),
        }
    }
}
