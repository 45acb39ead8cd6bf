//! Core types for the Forgotten Vale: rooms, exits, NPCs, and the world graph.
//!
//! This crate defines the static data model the fiction engine plays against.
//! It is independent of the command interpreter. You can assemble a
//! [`WorldGraph`] programmatically or load one from JSON seed data.

/// Error types used throughout the crate.
pub mod error;
/// Non-player characters and their dialogue options.
pub mod npc;
/// Rooms, exits, and room identifiers.
pub mod room;
/// Serde seed format for world content.
pub mod seed;
/// The arena that owns every room and NPC.
pub mod world;

/// Re-export error types.
pub use error::{ValeError, ValeResult};
/// Re-export NPC types.
pub use npc::{DialogueOption, Npc, NpcId};
/// Re-export room types.
pub use room::{Exit, Room, RoomId};
/// Re-export seed types.
pub use seed::{DialogueSeed, NpcSeed, RoomSeed, WorldSeed};
/// Re-export world model types.
pub use world::{WorldGraph, WorldMeta};
