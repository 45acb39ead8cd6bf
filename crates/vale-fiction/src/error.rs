//! Error types for the fiction engine.
//!
//! Gameplay failures are ordinary values: their `Display` text is the
//! narration the player sees, and a failed command leaves the world untouched.

use thiserror::Error;
use vale_core::ValeError;

/// Result type for fiction operations.
pub type FictionResult<T> = Result<T, FictionError>;

/// Broad classes of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// An item, exit, point of interest, or person is absent.
    NotFound,
    /// An exit or door is gated.
    Locked,
    /// The action is not valid here, or the recipe does not exist.
    InvalidTarget,
    /// No verb category or room action matched.
    InputUnrecognized,
    /// Content or configuration could not be loaded.
    Setup,
}

/// Errors that can occur during interactive fiction.
#[derive(Debug, Error)]
pub enum FictionError {
    /// No exit in that direction.
    #[error("You can't go that way.")]
    NoExit(String),

    /// The exit exists but is locked.
    #[error("The way is locked.")]
    ExitLocked(String),

    /// Item not lying in the current room.
    #[error("There is no such item here.")]
    ItemNotHere(String),

    /// Item not in inventory.
    #[error("You don't have it.")]
    ItemNotInInventory(String),

    /// Neither a carried item nor a point of interest.
    #[error("You cannot see that here.")]
    CannotSee(String),

    /// The room has no NPC.
    #[error("There is no one here to talk to.")]
    NoOneHere,

    /// The named person is not the one in this room.
    #[error("There is no such person here.")]
    NoSuchPerson(String),

    /// The action is not offered by this room.
    #[error("You can't do that here.")]
    ActionNotHere(String),

    /// Both items are carried but no recipe joins them.
    #[error("The items refuse to join.")]
    RecipeMismatch {
        /// First operand.
        first: String,
        /// Second operand.
        second: String,
    },

    /// At least one combine operand is not carried.
    #[error("You lack the materials.")]
    MissingMaterials,

    /// A room effect refused to fire; the text is the room's own narration.
    #[error("{0}")]
    Gated(String),

    /// A verb that needs an argument was given none.
    #[error("{0}")]
    MissingArgument(&'static str),

    /// Invalid dialogue selection.
    #[error("invalid choice: {0}")]
    InvalidChoice(String),

    /// Invalid command input.
    #[error("Unknown command. Try 'help'.")]
    UnknownCommand(String),

    /// World content failed validation.
    #[error("world error: {0}")]
    World(#[from] ValeError),

    /// Adventure file could not be decoded.
    #[error("malformed adventure: {0}")]
    Content(#[from] serde_json::Error),

    /// Adventure file could not be read.
    #[error("cannot read adventure: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is inconsistent with the content.
    #[error("configuration error: {0}")]
    Config(String),
}

impl FictionError {
    /// Classify this failure.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::NoExit(_)
            | Self::ItemNotHere(_)
            | Self::ItemNotInInventory(_)
            | Self::CannotSee(_)
            | Self::NoOneHere
            | Self::NoSuchPerson(_)
            | Self::MissingMaterials => FailureKind::NotFound,
            Self::ExitLocked(_) | Self::Gated(_) => FailureKind::Locked,
            Self::ActionNotHere(_) | Self::RecipeMismatch { .. } => FailureKind::InvalidTarget,
            Self::MissingArgument(_) | Self::InvalidChoice(_) | Self::UnknownCommand(_) => {
                FailureKind::InputUnrecognized
            }
            Self::World(_) | Self::Content(_) | Self::Io(_) | Self::Config(_) => {
                FailureKind::Setup
            }
        }
    }
}
