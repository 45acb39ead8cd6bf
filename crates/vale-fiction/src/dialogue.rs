//! Conversation state machine.
//!
//! A conversation shows the NPC's greeting once, then the numbered options.
//! Each selection echoes its response; a farewell option closes the
//! conversation. Anything that is not a valid option number is narrated as
//! confusion and the options are listed again.

use log::debug;
use vale_core::{DialogueOption, Npc, NpcId};

use crate::error::{FictionError, FictionResult};
use crate::quest::QuestFlags;

/// Parse a 1-based option number into a 0-based index.
pub fn parse_choice(input: &str, count: usize) -> FictionResult<usize> {
    let trimmed = input.trim();
    let n: usize = trimmed
        .parse()
        .map_err(|_| FictionError::InvalidChoice(trimmed.to_string()))?;
    if n == 0 || n > count {
        return Err(FictionError::InvalidChoice(trimmed.to_string()));
    }
    Ok(n - 1)
}

/// Result of feeding one line to a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueOutcome {
    /// The conversation goes on; the text ends with the option list.
    Continue(String),
    /// A farewell was chosen and the conversation is over.
    Ended(String),
}

impl DialogueOutcome {
    /// The narration, regardless of outcome.
    pub fn text(&self) -> &str {
        match self {
            Self::Continue(text) | Self::Ended(text) => text,
        }
    }
}

/// An open conversation with one NPC.
#[derive(Debug, Clone)]
pub struct Conversation {
    npc: NpcId,
    speaker: String,
    options: Vec<DialogueOption>,
}

impl Conversation {
    /// Open a conversation. Returns the greeting followed by the option list.
    pub fn open(id: NpcId, npc: &Npc) -> (Self, String) {
        let conversation = Self {
            npc: id,
            speaker: npc.name.clone(),
            options: npc.options.clone(),
        };
        let text = format!("{}: {}\n{}", npc.name, npc.greeting, conversation.menu());
        (conversation, text)
    }

    /// The NPC being spoken to.
    pub fn npc(&self) -> NpcId {
        self.npc
    }

    /// Numbered option list.
    pub fn menu(&self) -> String {
        self.options
            .iter()
            .enumerate()
            .map(|(i, opt)| format!("  {}. {}", i + 1, opt.prompt))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Handle one line of input.
    pub fn choose(&self, input: &str, flags: &mut QuestFlags) -> DialogueOutcome {
        let index = match parse_choice(input, self.options.len()) {
            Ok(index) => index,
            Err(e) => {
                debug!("dialogue with {}: {e}", self.speaker);
                return DialogueOutcome::Continue(format!(
                    "{} looks at you, puzzled. Choose a number from the list.\n{}",
                    self.speaker,
                    self.menu()
                ));
            }
        };
        // Index is in range after parse_choice.
        let option = &self.options[index];
        if let Some(flag) = &option.sets_flag {
            if flags.set(flag) {
                debug!("quest flag set: {flag}");
            }
        }
        let reply = format!("{}: {}", self.speaker, option.response);
        if option.is_farewell() {
            DialogueOutcome::Ended(reply)
        } else {
            DialogueOutcome::Continue(format!("{reply}\n{}", self.menu()))
        }
    }
}
