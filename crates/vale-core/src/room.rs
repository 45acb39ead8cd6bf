use std::collections::BTreeMap;
use std::fmt;

use crate::npc::NpcId;

/// Index of a room inside the [`WorldGraph`](crate::WorldGraph) arena.
///
/// Exits store these instead of references, so mutually connected rooms
/// never own each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(pub(crate) usize);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room#{}", self.0)
    }
}

/// A one-way passage from a room to another room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exit {
    /// The room this exit leads to.
    pub target: RoomId,
    /// Whether the passage is currently barred.
    pub locked: bool,
}

/// A place the player can stand in.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    /// Display name, also the room's identity.
    pub name: String,
    /// Full description shown on first entry and on `look`.
    pub description: String,
    /// Items lying here, in placement order. Duplicates are distinct entries.
    pub items: Vec<String>,
    /// Named features the player can `look` at.
    pub points_of_interest: BTreeMap<String, String>,
    /// Action names valid in this room, in priority order for fuzzy matching.
    pub actions: Vec<String>,
    /// Canned narration per action. Missing entries fall back to "You <action>."
    pub action_results: BTreeMap<String, String>,
    /// The NPC occupying the room, if any.
    pub npc: Option<NpcId>,
    exits: BTreeMap<String, Exit>,
}

impl Room {
    /// Create an empty room with the given name and description.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            items: Vec::new(),
            points_of_interest: BTreeMap::new(),
            actions: Vec::new(),
            action_results: BTreeMap::new(),
            npc: None,
            exits: BTreeMap::new(),
        }
    }

    /// Place an item in the room.
    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.items.push(item.into());
        self
    }

    /// Add a point of interest.
    pub fn with_point_of_interest(
        mut self,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.points_of_interest.insert(name.into(), text.into());
        self
    }

    /// Add an action, optionally with canned narration.
    pub fn with_action(mut self, action: impl Into<String>, result: Option<&str>) -> Self {
        let action = action.into();
        if let Some(text) = result {
            self.action_results.insert(action.clone(), text.to_string());
        }
        self.actions.push(action);
        self
    }

    /// All exits keyed by direction name.
    pub fn exits(&self) -> &BTreeMap<String, Exit> {
        &self.exits
    }

    /// Look up an exit by direction (case-insensitive).
    pub fn exit(&self, direction: &str) -> Option<&Exit> {
        self.exits
            .iter()
            .find(|(dir, _)| dir.eq_ignore_ascii_case(direction))
            .map(|(_, exit)| exit)
    }

    /// Whether the exit in `direction` exists and is locked.
    pub fn is_locked(&self, direction: &str) -> bool {
        self.exit(direction).is_some_and(|exit| exit.locked)
    }

    pub(crate) fn insert_exit(&mut self, direction: String, exit: Exit) {
        self.exits.insert(direction, exit);
    }

    /// Set the lock flag of an existing exit. Returns `false` if there is no
    /// exit in that direction.
    pub fn set_locked(&mut self, direction: &str, locked: bool) -> bool {
        match self
            .exits
            .iter_mut()
            .find(|(dir, _)| dir.eq_ignore_ascii_case(direction))
        {
            Some((_, exit)) => {
                exit.locked = locked;
                true
            }
            None => false,
        }
    }

    /// Whether an item with this name lies here.
    pub fn has_item(&self, item: &str) -> bool {
        self.items.iter().any(|i| i.eq_ignore_ascii_case(item))
    }

    /// Remove the first matching item and return its stored name.
    pub fn take_item(&mut self, item: &str) -> Option<String> {
        let pos = self.items.iter().position(|i| i.eq_ignore_ascii_case(item))?;
        Some(self.items.remove(pos))
    }

    /// Put an item down in the room.
    pub fn put_item(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    /// Resolve an action name (case-insensitive) to the room's spelling.
    pub fn find_action(&self, action: &str) -> Option<&str> {
        self.actions
            .iter()
            .find(|a| a.eq_ignore_ascii_case(action))
            .map(String::as_str)
    }

    /// Canned narration for an action, if the room defines one.
    pub fn action_result(&self, action: &str) -> Option<&str> {
        self.action_results
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(action))
            .map(|(_, text)| text.as_str())
    }

    /// Text of a point of interest (case-insensitive).
    pub fn point_of_interest(&self, name: &str) -> Option<&str> {
        self.points_of_interest
            .iter()
            .find(|(poi, _)| poi.eq_ignore_ascii_case(name))
            .map(|(_, text)| text.as_str())
    }
}
