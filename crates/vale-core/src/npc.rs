use std::fmt;

/// Index of an NPC inside the [`WorldGraph`](crate::WorldGraph) registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NpcId(pub(crate) usize);

impl fmt::Display for NpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "npc#{}", self.0)
    }
}

/// A single numbered option in a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueOption {
    /// What the player says.
    pub prompt: String,
    /// What the NPC answers.
    pub response: String,
    /// Quest flag raised when this option is chosen.
    pub sets_flag: Option<String>,
}

impl DialogueOption {
    /// Create a new option with the given prompt and response.
    pub fn new(prompt: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response: response.into(),
            sets_flag: None,
        }
    }

    /// Raise a quest flag when this option is chosen.
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.sets_flag = Some(flag.into());
        self
    }

    /// Choosing a farewell option is the only way a conversation ends.
    pub fn is_farewell(&self) -> bool {
        self.prompt.to_ascii_lowercase().contains("farewell")
    }
}

/// A non-player character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Npc {
    /// Name the player addresses the NPC by.
    pub name: String,
    /// Shown once when a conversation opens.
    pub greeting: String,
    /// Options offered on every round of the conversation.
    pub options: Vec<DialogueOption>,
}

impl Npc {
    /// Create an NPC with no dialogue options.
    pub fn new(name: impl Into<String>, greeting: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            greeting: greeting.into(),
            options: Vec::new(),
        }
    }

    /// Add a dialogue option.
    pub fn with_option(mut self, option: DialogueOption) -> Self {
        self.options.push(option);
        self
    }

    /// Whether any option can end the conversation.
    pub fn has_farewell(&self) -> bool {
        self.options.iter().any(DialogueOption::is_farewell)
    }
}
