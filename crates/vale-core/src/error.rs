use crate::room::RoomId;

/// Alias for `Result<T, ValeError>`.
pub type ValeResult<T> = Result<T, ValeError>;

/// Errors that can occur when assembling or manipulating a world graph.
#[derive(Debug, thiserror::Error)]
pub enum ValeError {
    /// The world has no rooms to start in.
    #[error("world has no rooms")]
    NoRooms,

    /// A room with the same name (case-insensitive) already exists.
    #[error("room already exists: \"{0}\"")]
    DuplicateRoom(String),

    /// An NPC with the same name (case-insensitive) already exists.
    #[error("NPC already exists: \"{0}\"")]
    DuplicateNpc(String),

    /// A room name could not be resolved.
    #[error("room not found: \"{0}\"")]
    UnknownRoom(String),

    /// A room ID does not belong to this graph.
    #[error("room id out of range: {0}")]
    RoomOutOfRange(RoomId),

    /// An exit points at a room that does not exist.
    #[error("exit \"{direction}\" of \"{room}\" leads to unknown room \"{target}\"")]
    UnknownExitTarget {
        /// Room that owns the exit.
        room: String,
        /// Direction name of the exit.
        direction: String,
        /// The unresolved target room name.
        target: String,
    },

    /// A lock refers to a direction the room has no exit for.
    #[error("\"{room}\" has no exit \"{direction}\"")]
    MissingExit {
        /// Room that was expected to own the exit.
        room: String,
        /// The missing direction name.
        direction: String,
    },

    /// The configured start room does not exist.
    #[error("start room not found: \"{0}\"")]
    UnknownStartRoom(String),

    /// A room places an NPC that was never defined.
    #[error("\"{room}\" refers to unknown NPC \"{npc}\"")]
    UnknownNpc {
        /// Room that places the NPC.
        room: String,
        /// The unresolved NPC name.
        npc: String,
    },

    /// Seed data could not be decoded.
    #[error("malformed world data: {0}")]
    Parse(#[from] serde_json::Error),

    /// A generic validation error with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}
