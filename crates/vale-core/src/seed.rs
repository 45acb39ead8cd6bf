//! Seed data for building a world from JSON.
//!
//! Seeds name rooms and NPCs by string; [`WorldSeed::into_graph`] resolves
//! every name to an arena index and rejects dangling references, so a built
//! [`WorldGraph`] never has an exit into nowhere.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ValeError, ValeResult};
use crate::npc::{DialogueOption, Npc};
use crate::room::Room;
use crate::world::{WorldGraph, WorldMeta};

/// A room as written in seed data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomSeed {
    /// Room name (unique, case-insensitive).
    pub name: String,
    /// Full description.
    pub description: String,
    /// Direction name to target room name.
    pub exits: BTreeMap<String, String>,
    /// Directions that start locked.
    pub locked: Vec<String>,
    /// Items placed here at startup.
    pub items: Vec<String>,
    /// Point-of-interest name to text.
    pub points_of_interest: BTreeMap<String, String>,
    /// Action names valid in this room.
    pub actions: Vec<String>,
    /// Canned narration per action.
    pub action_results: BTreeMap<String, String>,
    /// Name of the NPC living here.
    pub npc: Option<String>,
}

/// A dialogue option as written in seed data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogueSeed {
    /// What the player says.
    pub prompt: String,
    /// What the NPC answers.
    pub response: String,
    /// Quest flag raised by this option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets_flag: Option<String>,
}

/// An NPC as written in seed data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NpcSeed {
    /// NPC name (unique, case-insensitive).
    pub name: String,
    /// Greeting shown when a conversation opens.
    pub greeting: String,
    /// Conversation options.
    pub options: Vec<DialogueSeed>,
}

/// A whole world as written in seed data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSeed {
    /// Adventure title.
    pub title: String,
    /// Opening text.
    pub intro: String,
    /// Name of the start room; defaults to the first room.
    pub start: Option<String>,
    /// Rooms, in display order.
    pub rooms: Vec<RoomSeed>,
    /// NPCs placed by rooms.
    pub npcs: Vec<NpcSeed>,
    /// Item name to description.
    pub items: BTreeMap<String, String>,
}

impl WorldSeed {
    /// Decode a seed from JSON.
    pub fn from_json(json: &str) -> ValeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build and validate the world graph.
    pub fn into_graph(self) -> ValeResult<WorldGraph> {
        if self.rooms.is_empty() {
            return Err(ValeError::NoRooms);
        }

        let mut world = WorldGraph::new(WorldMeta {
            title: self.title,
            intro: self.intro,
        });

        for seed in self.npcs {
            if !seed.options.is_empty() && !seed.options.iter().any(is_farewell_seed) {
                return Err(ValeError::Validation(format!(
                    "NPC \"{}\" has no farewell option, conversations could never end",
                    seed.name
                )));
            }
            let npc = seed.options.into_iter().fold(
                Npc::new(seed.name, seed.greeting),
                |npc, option| {
                    let mut opt = DialogueOption::new(option.prompt, option.response);
                    opt.sets_flag = option.sets_flag;
                    npc.with_option(opt)
                },
            );
            world.add_npc(npc)?;
        }

        // First pass: rooms, so exits may point forwards.
        let mut pending = Vec::with_capacity(self.rooms.len());
        for seed in self.rooms {
            let mut room = Room::new(seed.name.clone(), seed.description);
            room.items = seed.items;
            room.points_of_interest = seed.points_of_interest;
            room.actions = seed.actions;
            room.action_results = seed.action_results;
            if let Some(npc_name) = &seed.npc {
                let npc = world.find_npc(npc_name).ok_or_else(|| ValeError::UnknownNpc {
                    room: seed.name.clone(),
                    npc: npc_name.clone(),
                })?;
                room.npc = Some(npc);
            }
            let id = world.add_room(room)?;
            pending.push((id, seed.name, seed.exits, seed.locked));
        }

        // Second pass: exits and locks.
        for (id, name, exits, locked) in pending {
            for (direction, target) in exits {
                let to = world
                    .find_room(&target)
                    .ok_or_else(|| ValeError::UnknownExitTarget {
                        room: name.clone(),
                        direction: direction.clone(),
                        target: target.clone(),
                    })?;
                world.connect(id, direction, to, false)?;
            }
            for direction in locked {
                world.set_locked(id, &direction, true)?;
            }
        }

        if let Some(start) = self.start {
            let id = world
                .find_room(&start)
                .ok_or(ValeError::UnknownStartRoom(start))?;
            world.set_start(id)?;
        }

        for (item, description) in self.items {
            world.describe_item(item, description);
        }

        Ok(world)
    }
}

fn is_farewell_seed(option: &DialogueSeed) -> bool {
    option.prompt.to_ascii_lowercase().contains("farewell")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"{
        "title": "Small Vale",
        "start": "Riverbank",
        "rooms": [
            {
                "name": "Glade",
                "description": "A quiet glade.",
                "exits": { "north": "Riverbank" },
                "items": ["branch"]
            },
            {
                "name": "Riverbank",
                "description": "Reeds and water.",
                "exits": { "south": "Glade", "up": "Glade" },
                "locked": ["up"],
                "actions": ["fish"],
                "action_results": { "fish": "Nothing bites." },
                "npc": "Heron"
            }
        ],
        "npcs": [
            {
                "name": "Heron",
                "greeting": "The heron eyes you.",
                "options": [
                    { "prompt": "Caught anything?", "response": "Silence.", "sets_flag": "asked_heron" },
                    { "prompt": "Farewell.", "response": "It returns to the water." }
                ]
            }
        ],
        "items": { "branch": "A dry branch." }
    }"#;

    #[test]
    fn builds_graph_from_json() {
        let world = WorldSeed::from_json(SMALL).unwrap().into_graph().unwrap();

        assert_eq!(world.meta.title, "Small Vale");
        assert_eq!(world.room_count(), 2);

        let glade = world.find_room("glade").unwrap();
        let bank = world.find_room("riverbank").unwrap();
        assert_eq!(world.start(), Some(bank));
        assert_eq!(world[glade].exit("north").unwrap().target, bank);
        assert!(world[bank].is_locked("up"));
        assert!(!world[bank].is_locked("south"));
        assert_eq!(world.npc_in(bank).unwrap().1.name, "Heron");
        assert_eq!(world.item_description("branch"), Some("A dry branch."));
        assert_eq!(
            world.npc_in(bank).unwrap().1.options[0].sets_flag.as_deref(),
            Some("asked_heron")
        );
    }

    #[test]
    fn dangling_exit_rejected() {
        let seed = WorldSeed {
            rooms: vec![RoomSeed {
                name: "Glade".into(),
                exits: BTreeMap::from([("north".to_string(), "Nowhere".to_string())]),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(matches!(
            seed.into_graph(),
            Err(ValeError::UnknownExitTarget { .. })
        ));
    }

    #[test]
    fn lock_without_exit_rejected() {
        let seed = WorldSeed {
            rooms: vec![RoomSeed {
                name: "Glade".into(),
                locked: vec!["up".into()],
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(matches!(
            seed.into_graph(),
            Err(ValeError::MissingExit { .. })
        ));
    }

    #[test]
    fn unknown_npc_and_start_rejected() {
        let seed = WorldSeed {
            rooms: vec![RoomSeed {
                name: "Glade".into(),
                npc: Some("Ghost".into()),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(matches!(
            seed.into_graph(),
            Err(ValeError::UnknownNpc { .. })
        ));

        let seed = WorldSeed {
            start: Some("Cave".into()),
            rooms: vec![RoomSeed {
                name: "Glade".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(matches!(
            seed.into_graph(),
            Err(ValeError::UnknownStartRoom(_))
        ));
    }

    #[test]
    fn npc_without_farewell_rejected() {
        let seed = WorldSeed {
            rooms: vec![RoomSeed {
                name: "Glade".into(),
                ..Default::default()
            }],
            npcs: vec![NpcSeed {
                name: "Echo".into(),
                greeting: "...".into(),
                options: vec![DialogueSeed {
                    prompt: "Hello?".into(),
                    response: "Hello?".into(),
                    sets_flag: None,
                }],
            }],
            ..Default::default()
        };
        assert!(matches!(seed.into_graph(), Err(ValeError::Validation(_))));
    }

    #[test]
    fn empty_world_rejected() {
        assert!(matches!(
            WorldSeed::default().into_graph(),
            Err(ValeError::NoRooms)
        ));
        assert!(matches!(
            WorldSeed::from_json("{ not json"),
            Err(ValeError::Parse(_))
        ));
    }
}
