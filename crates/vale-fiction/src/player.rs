//! Player state management.

use std::collections::BTreeSet;

use vale_core::RoomId;

/// The player's current state in the fiction session.
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// Current room.
    pub location: RoomId,
    /// Carried items, in pickup order. Duplicates are allowed.
    pub inventory: Vec<String>,
    /// Rooms the player has entered at least once.
    visited: BTreeSet<RoomId>,
}

impl PlayerState {
    /// Create a new player standing in `location`, which counts as visited.
    pub fn new(location: RoomId) -> Self {
        Self {
            location,
            inventory: Vec::new(),
            visited: BTreeSet::from([location]),
        }
    }

    /// Check if the player carries an item (case-insensitive).
    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i.eq_ignore_ascii_case(item))
    }

    /// How many copies of an item the player carries.
    pub fn count_of(&self, item: &str) -> usize {
        self.inventory
            .iter()
            .filter(|i| i.eq_ignore_ascii_case(item))
            .count()
    }

    /// Add an item to inventory.
    pub fn add_item(&mut self, item: impl Into<String>) {
        self.inventory.push(item.into());
    }

    /// Remove the first matching item and return its stored name.
    pub fn remove_item(&mut self, item: &str) -> Option<String> {
        let pos = self
            .inventory
            .iter()
            .position(|i| i.eq_ignore_ascii_case(item))?;
        Some(self.inventory.remove(pos))
    }

    /// Whether a room has been entered before.
    pub fn has_visited(&self, room: RoomId) -> bool {
        self.visited.contains(&room)
    }

    /// Move to `room`. Returns `true` if this is the first visit.
    pub fn enter(&mut self, room: RoomId) -> bool {
        self.location = room;
        self.visited.insert(room)
    }
}
