//! Quest flags.

use std::collections::BTreeSet;

/// Set when the hermit tells the player about the cave.
pub const TORCH_QUEST_ACTIVE: &str = "torch_quest_active";
/// Set once the cave has given up its key.
pub const TORCH_QUEST_COMPLETE: &str = "torch_quest_complete";

/// Named boolean flags. A flag is set by being present; flags are never cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestFlags {
    flags: BTreeSet<String>,
}

impl QuestFlags {
    /// No flags set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a flag. Returns `true` if it was not already set.
    pub fn set(&mut self, flag: &str) -> bool {
        self.flags.insert(flag.to_string())
    }

    /// Whether a flag is set.
    pub fn is_set(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Iterate over set flags in name order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(String::as_str)
    }
}
