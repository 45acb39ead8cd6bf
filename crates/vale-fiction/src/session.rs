//! Interactive fiction session management.

use log::{debug, trace};

use crate::config::GameConfig;
use crate::dialogue::{Conversation, DialogueOutcome};
use crate::engine::ActionEngine;
use crate::error::{FictionError, FictionResult};
use crate::logutil::escape_log;
use crate::narrator::{RoomSnapshot, render_help};
use crate::parser::{Command, CommandResolver, VerbCategory};

/// Line shown when the player leaves.
pub const FAREWELL: &str = "Farewell, wanderer...";

/// An interactive fiction session.
///
/// Feed it one line at a time with [`process`](Self::process). While a
/// conversation is open every line goes to the conversation instead of the
/// command resolver.
#[derive(Debug, Clone)]
pub struct FictionSession {
    resolver: CommandResolver,
    engine: ActionEngine,
    conversation: Option<Conversation>,
    finished: bool,
}

impl FictionSession {
    /// Create a session around an engine.
    pub fn new(engine: ActionEngine, config: &GameConfig) -> Self {
        debug!("session starts in {}", engine.player().location);
        Self {
            resolver: CommandResolver::new(config),
            engine,
            conversation: None,
            finished: false,
        }
    }

    /// Full rendering of the start room.
    pub fn opening(&self) -> String {
        self.engine.snapshot().render()
    }

    /// Get the engine.
    pub fn engine(&self) -> &ActionEngine {
        &self.engine
    }

    /// Snapshot of the current room for presentation.
    pub fn snapshot(&self) -> RoomSnapshot {
        self.engine.snapshot()
    }

    /// Whether the player has left.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether a conversation is open.
    pub fn in_conversation(&self) -> bool {
        self.conversation.is_some()
    }

    /// Process one line of player input and return the narration.
    ///
    /// Gameplay failures come back as `Err`; their `Display` text is the
    /// narration and the session carries on.
    pub fn process(&mut self, input: &str) -> FictionResult<String> {
        if let Some(conversation) = &self.conversation {
            let outcome = conversation.choose(input, self.engine.flags_mut());
            if let DialogueOutcome::Ended(_) = outcome {
                debug!("conversation with {} ended", conversation.npc());
                self.conversation = None;
            }
            return Ok(outcome.text().to_string());
        }

        let command = self.resolver.resolve(input, self.engine.room_actions());
        debug!("\"{}\" resolved to {command:?}", escape_log(input));
        self.execute(command)
    }

    /// Execute a resolved command.
    pub fn execute(&mut self, command: Command) -> FictionResult<String> {
        match command {
            Command::Empty => Ok(String::new()),
            Command::Unknown { input } => {
                trace!("unrecognised input: {}", escape_log(&input));
                Err(FictionError::UnknownCommand(input))
            }
            Command::RoomAction { action } => self.engine.room_action(&action),
            Command::Verb { category, argument } => {
                let argument = argument.as_deref();
                match category {
                    VerbCategory::Look => self.engine.look(argument),
                    VerbCategory::Go => self.engine.go(argument),
                    VerbCategory::Take => self.engine.take_item(argument),
                    VerbCategory::Drop => self.engine.drop_item(argument),
                    VerbCategory::Use => self.engine.use_thing(argument),
                    VerbCategory::Combine => self.engine.combine(argument),
                    VerbCategory::Inventory => Ok(self.engine.inventory()),
                    VerbCategory::Talk => {
                        let (conversation, text) = self.engine.talk(argument)?;
                        self.conversation = conversation;
                        Ok(text)
                    }
                    VerbCategory::Help => {
                        Ok(render_help(&self.resolver, self.engine.room_actions()))
                    }
                    VerbCategory::Exit => {
                        self.finished = true;
                        Ok(FAREWELL.to_string())
                    }
                }
            }
        }
    }
}
