use std::collections::{BTreeMap, HashMap};
use std::ops::Index;

use crate::error::{ValeError, ValeResult};
use crate::npc::{Npc, NpcId};
use crate::room::{Exit, Room, RoomId};

/// Metadata about the adventure itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorldMeta {
    /// Title shown when a session starts.
    pub title: String,
    /// Opening text shown before the first room.
    pub intro: String,
}

impl WorldMeta {
    /// Create metadata with a title and no intro.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            intro: String::new(),
        }
    }
}

/// The room graph. Owns every room and NPC; exits refer to rooms by index.
#[derive(Debug, Clone)]
pub struct WorldGraph {
    /// Adventure metadata.
    pub meta: WorldMeta,
    rooms: Vec<Room>,
    npcs: Vec<Npc>,
    start: Option<RoomId>,
    item_descriptions: BTreeMap<String, String>,

    // Indexes
    rooms_by_name_lower: HashMap<String, RoomId>,
    npcs_by_name_lower: HashMap<String, NpcId>,
}

impl WorldGraph {
    /// Create an empty graph.
    pub fn new(meta: WorldMeta) -> Self {
        Self {
            meta,
            rooms: Vec::new(),
            npcs: Vec::new(),
            start: None,
            item_descriptions: BTreeMap::new(),
            rooms_by_name_lower: HashMap::new(),
            npcs_by_name_lower: HashMap::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Rooms
    // -----------------------------------------------------------------------

    /// Add a room. The first room added becomes the start room until
    /// [`set_start`](Self::set_start) says otherwise.
    pub fn add_room(&mut self, room: Room) -> ValeResult<RoomId> {
        let name_lower = room.name.to_lowercase();
        if self.rooms_by_name_lower.contains_key(&name_lower) {
            return Err(ValeError::DuplicateRoom(room.name));
        }
        if let Some(npc) = room.npc {
            if npc.0 >= self.npcs.len() {
                return Err(ValeError::Validation(format!(
                    "\"{}\" places unregistered {npc}",
                    room.name
                )));
            }
        }

        let id = RoomId(self.rooms.len());
        self.rooms_by_name_lower.insert(name_lower, id);
        self.rooms.push(room);
        if self.start.is_none() {
            self.start = Some(id);
        }
        Ok(id)
    }

    /// Get a room by ID.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0)
    }

    /// Get a mutable room by ID.
    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id.0)
    }

    /// Find a room by name (case-insensitive).
    pub fn find_room(&self, name: &str) -> Option<RoomId> {
        self.rooms_by_name_lower.get(&name.to_lowercase()).copied()
    }

    /// Iterate rooms in the order they were added.
    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> {
        self.rooms.iter().enumerate().map(|(i, r)| (RoomId(i), r))
    }

    /// Number of rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// The room a new player starts in.
    pub fn start(&self) -> Option<RoomId> {
        self.start
    }

    /// Choose the start room.
    pub fn set_start(&mut self, id: RoomId) -> ValeResult<()> {
        self.check(id)?;
        self.start = Some(id);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Exits
    // -----------------------------------------------------------------------

    /// Add a one-way exit from `from` to `to`.
    pub fn connect(
        &mut self,
        from: RoomId,
        direction: impl Into<String>,
        to: RoomId,
        locked: bool,
    ) -> ValeResult<()> {
        self.check(to)?;
        let room = self
            .rooms
            .get_mut(from.0)
            .ok_or(ValeError::RoomOutOfRange(from))?;
        room.insert_exit(direction.into(), Exit { target: to, locked });
        Ok(())
    }

    /// Set the lock flag on an existing exit.
    pub fn set_locked(&mut self, room: RoomId, direction: &str, locked: bool) -> ValeResult<()> {
        let r = self
            .rooms
            .get_mut(room.0)
            .ok_or(ValeError::RoomOutOfRange(room))?;
        if r.set_locked(direction, locked) {
            Ok(())
        } else {
            Err(ValeError::MissingExit {
                room: r.name.clone(),
                direction: direction.to_string(),
            })
        }
    }

    fn check(&self, id: RoomId) -> ValeResult<()> {
        if id.0 < self.rooms.len() {
            Ok(())
        } else {
            Err(ValeError::RoomOutOfRange(id))
        }
    }

    // -----------------------------------------------------------------------
    // NPCs
    // -----------------------------------------------------------------------

    /// Register an NPC.
    pub fn add_npc(&mut self, npc: Npc) -> ValeResult<NpcId> {
        let name_lower = npc.name.to_lowercase();
        if self.npcs_by_name_lower.contains_key(&name_lower) {
            return Err(ValeError::DuplicateNpc(npc.name));
        }
        let id = NpcId(self.npcs.len());
        self.npcs_by_name_lower.insert(name_lower, id);
        self.npcs.push(npc);
        Ok(id)
    }

    /// Get an NPC by ID.
    pub fn npc(&self, id: NpcId) -> Option<&Npc> {
        self.npcs.get(id.0)
    }

    /// Find an NPC by name (case-insensitive).
    pub fn find_npc(&self, name: &str) -> Option<NpcId> {
        self.npcs_by_name_lower.get(&name.to_lowercase()).copied()
    }

    /// Put an NPC in a room, replacing any previous occupant.
    pub fn place_npc(&mut self, room: RoomId, npc: NpcId) -> ValeResult<()> {
        if npc.0 >= self.npcs.len() {
            return Err(ValeError::Validation(format!("unregistered {npc}")));
        }
        let r = self
            .rooms
            .get_mut(room.0)
            .ok_or(ValeError::RoomOutOfRange(room))?;
        r.npc = Some(npc);
        Ok(())
    }

    /// The NPC occupying a room, if any.
    pub fn npc_in(&self, room: RoomId) -> Option<(NpcId, &Npc)> {
        let id = self.room(room)?.npc?;
        self.npc(id).map(|npc| (id, npc))
    }

    /// Number of registered NPCs.
    pub fn npc_count(&self) -> usize {
        self.npcs.len()
    }

    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    /// Record the description shown when the player looks at an item.
    pub fn describe_item(&mut self, item: impl Into<String>, description: impl Into<String>) {
        self.item_descriptions
            .insert(item.into().to_lowercase(), description.into());
    }

    /// Description of an item, if one was recorded.
    pub fn item_description(&self, item: &str) -> Option<&str> {
        self.item_descriptions
            .get(&item.to_lowercase())
            .map(String::as_str)
    }

    /// Every item placed in any room, in room order.
    pub fn placed_items(&self) -> Vec<(RoomId, &str)> {
        self.rooms()
            .flat_map(|(id, room)| room.items.iter().map(move |item| (id, item.as_str())))
            .collect()
    }
}

impl Index<RoomId> for WorldGraph {
    type Output = Room;

    /// Room IDs are only minted by [`WorldGraph::add_room`], so they always
    /// index a live room of the graph that created them.
    fn index(&self, id: RoomId) -> &Room {
        &self.rooms[id.0]
    }
}
