//! Interactive fiction engine for the Forgotten Vale.
//!
//! Turns free-text player input into state transitions on a
//! [`vale_core::WorldGraph`]: a lexer drops stop words, a fuzzy matcher
//! forgives single typos, a resolver walks a fixed priority chain of verb
//! categories and room actions, and an action engine applies moves, item
//! transfers, crafting, quest-gated room effects, and conversations.

/// Ambient flavor text polled once per turn.
pub mod ambience;
/// Game configuration: stop words, synonyms, recipes, ambience.
pub mod config;
/// Adventure files and the built-in content.
pub mod content;
/// Conversation state machine.
pub mod dialogue;
/// Per-room action overrides and item uses.
pub mod effect;
/// State transitions for resolved commands.
pub mod engine;
/// Error types for the fiction engine.
pub mod error;
/// Single-line escaping for log output.
pub mod logutil;
/// Rendering of rooms, inventory, and the map overview.
pub mod narrator;
/// Lexing, fuzzy matching, and command resolution.
pub mod parser;
/// Player state management.
pub mod player;
/// Quest flags.
pub mod quest;
/// Interactive fiction session management.
pub mod session;

pub use ambience::{Ambience, Calm, SeededAmbience};
pub use config::{GameConfig, Recipe};
pub use content::Adventure;
pub use engine::ActionEngine;
pub use error::{FailureKind, FictionError, FictionResult};
pub use narrator::RoomSnapshot;
pub use parser::{Command, CommandResolver, VerbCategory};
pub use player::PlayerState;
pub use quest::QuestFlags;
pub use session::FictionSession;
