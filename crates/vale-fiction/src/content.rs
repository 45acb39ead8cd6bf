//! Adventure files and the built-in content.
//!
//! An adventure is one JSON document: the world seed fields at the top
//! level, plus item uses, room effects, and an optional `config` block.

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use vale_core::WorldSeed;

use crate::config::GameConfig;
use crate::effect::{EffectSeed, EffectTable, ItemUses};
use crate::engine::ActionEngine;
use crate::error::FictionResult;
use crate::parser::FuzzyMatcher;
use crate::session::FictionSession;

/// "Whispers of the Forgotten Vale", embedded at compile time.
pub const BUILTIN_ADVENTURE: &str = include_str!("../content/forgotten_vale.json");

/// A complete adventure as written on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Adventure {
    /// Rooms, NPCs, items, and metadata.
    #[serde(flatten)]
    pub world: WorldSeed,
    /// What carried items do when used.
    #[serde(default)]
    pub item_uses: ItemUses,
    /// Stateful room-action overrides.
    #[serde(default)]
    pub effects: Vec<EffectSeed>,
    /// Interpreter settings.
    #[serde(default)]
    pub config: GameConfig,
}

impl Adventure {
    /// The built-in adventure.
    pub fn builtin() -> FictionResult<Self> {
        Self::from_json(BUILTIN_ADVENTURE)
    }

    /// Decode an adventure from JSON.
    pub fn from_json(json: &str) -> FictionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read an adventure file.
    pub fn load(path: &Path) -> FictionResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Validate everything and build the engine.
    pub fn into_parts(self) -> FictionResult<(ActionEngine, GameConfig)> {
        self.config.validate()?;
        let world = self.world.into_graph()?;
        let effects = EffectTable::build(&world, self.effects)?;
        info!(
            "loaded \"{}\": {} rooms, {} NPCs, {} effects, {} recipes",
            world.meta.title,
            world.room_count(),
            world.npc_count(),
            effects.len(),
            self.config.recipes.len()
        );
        let engine = ActionEngine::new(world)?
            .with_recipes(self.config.recipes.clone())
            .with_effects(effects)
            .with_item_uses(self.item_uses)
            .with_matcher(FuzzyMatcher::new(self.config.fuzzy_threshold));
        Ok((engine, self.config))
    }

    /// Validate everything and start a session.
    pub fn into_session(self) -> FictionResult<FictionSession> {
        let (engine, config) = self.into_parts()?;
        Ok(FictionSession::new(engine, &config))
    }
}
