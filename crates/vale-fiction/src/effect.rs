//! Stateful room-action overrides and item uses.
//!
//! A room action normally narrates its static result. An entry in the
//! [`EffectTable`] keyed by (room, action) replaces that with a variant that
//! reads and writes game state, so new room behaviours are added as data.

use std::collections::{BTreeMap, HashMap};

use log::debug;
use serde::{Deserialize, Serialize};
use vale_core::{RoomId, WorldGraph};

use crate::error::{FictionError, FictionResult};
use crate::player::PlayerState;
use crate::quest::QuestFlags;

/// Behaviour attached to one room action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomEffect {
    /// Grant a reward once, gated on a carried item and a quest flag.
    Reveal(RevealEffect),
    /// Clear the lock on one of the room's exits when a key is carried.
    Unlock(UnlockEffect),
}

/// Parameters for [`RoomEffect::Reveal`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealEffect {
    /// Flag that must be set before the reveal can happen.
    pub active_flag: String,
    /// Flag set when the reveal happens.
    pub complete_flag: String,
    /// Item the player must carry.
    pub requires: String,
    /// Item granted on success.
    pub reward: String,
    /// Narration on success.
    pub reveal: String,
    /// Narration when the item is missing or the quest is not active.
    #[serde(default = "default_too_dark")]
    pub too_dark: String,
}

/// Parameters for [`RoomEffect::Unlock`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockEffect {
    /// Direction of the exit to unlock.
    pub exit: String,
    /// Item that opens it.
    pub key: String,
    /// Narration on success.
    #[serde(default = "default_opened")]
    pub opened: String,
    /// Narration when the exit is already unlocked.
    #[serde(default = "default_already_open")]
    pub already_open: String,
    /// Narration when the key is missing.
    #[serde(default = "default_missing_key")]
    pub missing_key: String,
}

fn default_too_dark() -> String {
    "It's too dark to see anything.".to_string()
}

fn default_opened() -> String {
    "The door creaks open.".to_string()
}

fn default_already_open() -> String {
    "The door is already open.".to_string()
}

fn default_missing_key() -> String {
    "The door is locked. You need a key.".to_string()
}

/// An effect as written in adventure files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSeed {
    /// Room name.
    pub room: String,
    /// Action name, as listed by the room.
    pub action: String,
    /// What the action does.
    pub effect: RoomEffect,
}

/// What using a carried item does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemUse {
    /// Print a line of flavor text.
    Narrate(String),
    /// Print the map overview.
    ShowMap,
}

/// Item-use table keyed by lowercase item name.
pub type ItemUses = BTreeMap<String, ItemUse>;

impl RoomEffect {
    /// Apply the effect.
    ///
    /// `Ok(None)` means the effect is spent and the room's static result
    /// should be narrated instead. Errors leave every argument unchanged.
    pub fn apply(
        &self,
        room: RoomId,
        world: &mut WorldGraph,
        player: &mut PlayerState,
        flags: &mut QuestFlags,
    ) -> FictionResult<Option<String>> {
        match self {
            Self::Reveal(reveal) => {
                if flags.is_set(&reveal.complete_flag) {
                    return Ok(None);
                }
                if !flags.is_set(&reveal.active_flag) || !player.has_item(&reveal.requires) {
                    return Err(FictionError::Gated(reveal.too_dark.clone()));
                }
                flags.set(&reveal.complete_flag);
                player.add_item(reveal.reward.clone());
                debug!(
                    "reveal in {room}: set {} and granted {}",
                    reveal.complete_flag, reveal.reward
                );
                Ok(Some(reveal.reveal.clone()))
            }
            Self::Unlock(unlock) => {
                let exit = world
                    .room(room)
                    .and_then(|r| r.exit(&unlock.exit))
                    .copied()
                    .ok_or_else(|| FictionError::NoExit(unlock.exit.clone()))?;
                if !exit.locked {
                    return Ok(Some(unlock.already_open.clone()));
                }
                if !player.has_item(&unlock.key) {
                    return Err(FictionError::Gated(unlock.missing_key.clone()));
                }
                world.set_locked(room, &unlock.exit, false)?;
                debug!("unlocked {} in {room}", unlock.exit);
                Ok(Some(unlock.opened.clone()))
            }
        }
    }
}

/// Effects keyed by (room, lowercase action).
#[derive(Debug, Clone, Default)]
pub struct EffectTable {
    effects: HashMap<(RoomId, String), RoomEffect>,
}

impl EffectTable {
    /// Resolve seeds against the world.
    ///
    /// Each seed must name an existing room and an action that room offers;
    /// unlock effects must name one of the room's exits.
    pub fn build(world: &WorldGraph, seeds: Vec<EffectSeed>) -> FictionResult<Self> {
        let mut effects = HashMap::new();
        for seed in seeds {
            let id = world
                .find_room(&seed.room)
                .ok_or_else(|| FictionError::Config(format!("effect for unknown room '{}'", seed.room)))?;
            let room = &world[id];
            let Some(action) = room.find_action(&seed.action) else {
                return Err(FictionError::Config(format!(
                    "'{}' does not offer the action '{}'",
                    room.name, seed.action
                )));
            };
            if let RoomEffect::Unlock(unlock) = &seed.effect {
                if room.exit(&unlock.exit).is_none() {
                    return Err(FictionError::Config(format!(
                        "'{}' has no exit '{}' to unlock",
                        room.name, unlock.exit
                    )));
                }
            }
            let key = (id, action.to_ascii_lowercase());
            if effects.insert(key, seed.effect).is_some() {
                return Err(FictionError::Config(format!(
                    "'{}' has two effects for '{}'",
                    room.name, seed.action
                )));
            }
        }
        Ok(Self { effects })
    }

    /// The effect for an action in a room.
    pub fn get(&self, room: RoomId, action: &str) -> Option<&RoomEffect> {
        self.effects.get(&(room, action.to_ascii_lowercase()))
    }

    /// Number of effects.
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::{TORCH_QUEST_ACTIVE, TORCH_QUEST_COMPLETE};
    use vale_core::{Room, WorldMeta};

    fn cave_world() -> (WorldGraph, RoomId, RoomId) {
        let mut world = WorldGraph::new(WorldMeta::default());
        let cave = world
            .add_room(Room::new("Cave", "Dark.").with_action("search", Some("Nothing.")))
            .unwrap();
        let tower = world
            .add_room(Room::new("Tower", "Tall.").with_action("unlock door", None))
            .unwrap();
        world.connect(tower, "up", cave, true).unwrap();
        (world, cave, tower)
    }

    fn reveal() -> RoomEffect {
        RoomEffect::Reveal(RevealEffect {
            active_flag: TORCH_QUEST_ACTIVE.into(),
            complete_flag: TORCH_QUEST_COMPLETE.into(),
            requires: "torch".into(),
            reward: "rusty key".into(),
            reveal: "A key glints.".into(),
            too_dark: default_too_dark(),
        })
    }

    fn unlock() -> RoomEffect {
        RoomEffect::Unlock(UnlockEffect {
            exit: "up".into(),
            key: "rusty key".into(),
            opened: default_opened(),
            already_open: default_already_open(),
            missing_key: default_missing_key(),
        })
    }

    #[test]
    fn reveal_is_gated_then_spent() {
        let (mut world, cave, _) = cave_world();
        let mut player = PlayerState::new(cave);
        let mut flags = QuestFlags::new();
        let effect = reveal();

        let err = effect
            .apply(cave, &mut world, &mut player, &mut flags)
            .unwrap_err();
        assert_eq!(err.to_string(), default_too_dark());

        // Carrying the torch is not enough before the quest starts.
        player.add_item("torch");
        let err = effect
            .apply(cave, &mut world, &mut player, &mut flags)
            .unwrap_err();
        assert_eq!(err.to_string(), default_too_dark());
        assert!(!player.has_item("rusty key"));
        assert!(!flags.is_set(TORCH_QUEST_COMPLETE));

        flags.set(TORCH_QUEST_ACTIVE);
        let text = effect
            .apply(cave, &mut world, &mut player, &mut flags)
            .unwrap();
        assert_eq!(text.as_deref(), Some("A key glints."));
        assert!(flags.is_set(TORCH_QUEST_COMPLETE));

        let text = effect
            .apply(cave, &mut world, &mut player, &mut flags)
            .unwrap();
        assert_eq!(text, None);
        assert_eq!(player.count_of("rusty key"), 1);
    }

    #[test]
    fn unlock_needs_key_and_is_idempotent() {
        let (mut world, _, tower) = cave_world();
        let mut player = PlayerState::new(tower);
        let mut flags = QuestFlags::new();
        let effect = unlock();

        assert!(effect
            .apply(tower, &mut world, &mut player, &mut flags)
            .is_err());
        assert!(world[tower].is_locked("up"));

        player.add_item("Rusty Key");
        let text = effect
            .apply(tower, &mut world, &mut player, &mut flags)
            .unwrap();
        assert_eq!(text, Some(default_opened()));
        assert!(!world[tower].is_locked("up"));

        let text = effect
            .apply(tower, &mut world, &mut player, &mut flags)
            .unwrap();
        assert_eq!(text, Some(default_already_open()));
    }

    #[test]
    fn table_validates_seeds() {
        let (world, cave, _) = cave_world();
        let ok = EffectTable::build(
            &world,
            vec![EffectSeed {
                room: "cave".into(),
                action: "SEARCH".into(),
                effect: reveal(),
            }],
        )
        .unwrap();
        assert!(ok.get(cave, "search").is_some());
        assert_eq!(ok.len(), 1);

        let bad_action = EffectTable::build(
            &world,
            vec![EffectSeed {
                room: "Cave".into(),
                action: "dance".into(),
                effect: reveal(),
            }],
        );
        assert!(bad_action.is_err());

        let bad_exit = EffectTable::build(
            &world,
            vec![EffectSeed {
                room: "Cave".into(),
                action: "search".into(),
                effect: unlock(),
            }],
        );
        assert!(bad_exit.is_err());
    }

    #[test]
    fn item_use_json_shapes() {
        let uses: ItemUses =
            serde_json::from_str(r#"{"map": "show_map", "stone": {"narrate": "It skips."}}"#)
                .unwrap();
        assert_eq!(uses["map"], ItemUse::ShowMap);
        assert_eq!(uses["stone"], ItemUse::Narrate("It skips.".into()));
    }
}
