//! State transitions for resolved commands.
//!
//! Every transition checks all of its preconditions before touching state,
//! so an `Err` always means nothing changed.

use log::debug;
use vale_core::{ValeError, WorldGraph};

use crate::config::{Recipe, find_recipe};
use crate::dialogue::Conversation;
use crate::effect::{EffectTable, ItemUse, ItemUses};
use crate::error::{FictionError, FictionResult};
use crate::logutil::escape_log;
use crate::narrator::{RoomSnapshot, render_inventory, render_map};
use crate::parser::FuzzyMatcher;
use crate::player::PlayerState;
use crate::quest::QuestFlags;

/// Owns the world and the player and applies commands to them.
#[derive(Debug, Clone)]
pub struct ActionEngine {
    world: WorldGraph,
    player: PlayerState,
    flags: QuestFlags,
    recipes: Vec<Recipe>,
    effects: EffectTable,
    item_uses: ItemUses,
    matcher: FuzzyMatcher,
    first_visit: bool,
}

impl ActionEngine {
    /// Create an engine with the player in the world's start room.
    pub fn new(world: WorldGraph) -> FictionResult<Self> {
        let start = world.start().ok_or(ValeError::NoRooms)?;
        Ok(Self {
            world,
            player: PlayerState::new(start),
            flags: QuestFlags::new(),
            recipes: Vec::new(),
            effects: EffectTable::default(),
            item_uses: ItemUses::new(),
            matcher: FuzzyMatcher::default(),
            first_visit: true,
        })
    }

    /// Set the crafting recipes.
    pub fn with_recipes(mut self, recipes: Vec<Recipe>) -> Self {
        self.recipes = recipes;
        self
    }

    /// Set the room-action overrides.
    pub fn with_effects(mut self, effects: EffectTable) -> Self {
        self.effects = effects;
        self
    }

    /// Set what carried items do when used.
    pub fn with_item_uses(mut self, item_uses: ItemUses) -> Self {
        self.item_uses = item_uses
            .into_iter()
            .map(|(item, use_)| (item.to_ascii_lowercase(), use_))
            .collect();
        self
    }

    /// Set the matcher used for `use <action>`.
    pub fn with_matcher(mut self, matcher: FuzzyMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// The world.
    pub fn world(&self) -> &WorldGraph {
        &self.world
    }

    /// The player.
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Quest flags.
    pub fn flags(&self) -> &QuestFlags {
        &self.flags
    }

    /// Mutable quest flags, for dialogue triggers.
    pub fn flags_mut(&mut self) -> &mut QuestFlags {
        &mut self.flags
    }

    /// Actions offered by the current room.
    pub fn room_actions(&self) -> &[String] {
        &self.world[self.player.location].actions
    }

    /// Snapshot of the current room.
    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot::capture(&self.world, self.player.location, self.first_visit)
    }

    /// Move through an exit.
    pub fn go(&mut self, direction: Option<&str>) -> FictionResult<String> {
        let direction = direction.ok_or(FictionError::MissingArgument("Go where?"))?;
        let exit = self.world[self.player.location]
            .exit(direction)
            .copied()
            .ok_or_else(|| FictionError::NoExit(direction.to_string()))?;
        if exit.locked {
            return Err(FictionError::ExitLocked(direction.to_string()));
        }

        self.first_visit = self.player.enter(exit.target);
        debug!(
            "moved {} to {} (first visit: {})",
            escape_log(direction),
            exit.target,
            self.first_visit
        );
        let snapshot = self.snapshot();
        Ok(if snapshot.first_visit {
            snapshot.render()
        } else {
            snapshot.render_revisit()
        })
    }

    /// Describe the room, a carried item, or a point of interest.
    pub fn look(&self, target: Option<&str>) -> FictionResult<String> {
        let Some(target) = target else {
            return Ok(self.snapshot().render());
        };
        if self.player.has_item(target) {
            return Ok(self
                .world
                .item_description(target)
                .map(str::to_string)
                .unwrap_or_else(|| format!("It's an ordinary {target}.")));
        }
        self.world[self.player.location]
            .point_of_interest(target)
            .map(str::to_string)
            .ok_or_else(|| FictionError::CannotSee(target.to_string()))
    }

    /// Move one item from the room to the inventory.
    pub fn take_item(&mut self, item: Option<&str>) -> FictionResult<String> {
        let item = item.ok_or(FictionError::MissingArgument("Take what?"))?;
        let taken = self
            .world
            .room_mut(self.player.location)
            .and_then(|room| room.take_item(item))
            .ok_or_else(|| FictionError::ItemNotHere(item.to_string()))?;
        debug!("took {}", escape_log(&taken));
        let text = format!("You take the {taken}.");
        self.player.add_item(taken);
        Ok(text)
    }

    /// Move one item from the inventory to the room.
    pub fn drop_item(&mut self, item: Option<&str>) -> FictionResult<String> {
        let item = item.ok_or(FictionError::MissingArgument("Drop what?"))?;
        let room = self
            .world
            .room_mut(self.player.location)
            .ok_or(ValeError::RoomOutOfRange(self.player.location))?;
        let dropped = self
            .player
            .remove_item(item)
            .ok_or_else(|| FictionError::ItemNotInInventory(item.to_string()))?;
        debug!("dropped {}", escape_log(&dropped));
        let text = format!("You drop the {dropped}.");
        room.put_item(dropped);
        Ok(text)
    }

    /// List carried items.
    pub fn inventory(&self) -> String {
        render_inventory(&self.player.inventory)
    }

    /// Open a conversation with the room's NPC.
    ///
    /// An NPC without a farewell option only greets; no conversation opens.
    pub fn talk(&self, name: Option<&str>) -> FictionResult<(Option<Conversation>, String)> {
        let (id, npc) = self
            .world
            .npc_in(self.player.location)
            .ok_or(FictionError::NoOneHere)?;
        if let Some(name) = name {
            if !npc.name.eq_ignore_ascii_case(name) {
                return Err(FictionError::NoSuchPerson(name.to_string()));
            }
        }
        if !npc.has_farewell() {
            return Ok((None, format!("{}: {}", npc.name, npc.greeting)));
        }
        debug!("conversation with {}", escape_log(&npc.name));
        let (conversation, text) = Conversation::open(id, npc);
        Ok((Some(conversation), text))
    }

    /// Craft two carried items into one.
    ///
    /// Multi-word operands are found by trying every split of the argument
    /// until both halves are carried.
    pub fn combine(&mut self, argument: Option<&str>) -> FictionResult<String> {
        let words: Vec<&str> = argument
            .map(|a| a.split_whitespace().collect())
            .unwrap_or_default();
        if words.len() < 2 {
            return Err(FictionError::MissingArgument("Combine what with what?"));
        }
        let (first, second) = self.split_operands(&words);

        let carried = if first.eq_ignore_ascii_case(&second) {
            self.player.count_of(&first) >= 2
        } else {
            self.player.has_item(&first) && self.player.has_item(&second)
        };
        if !carried {
            return Err(FictionError::MissingMaterials);
        }
        let output = find_recipe(&self.recipes, &first, &second)
            .map(|r| r.output.clone())
            .ok_or_else(|| FictionError::RecipeMismatch {
                first: first.clone(),
                second: second.clone(),
            })?;

        self.player.remove_item(&first);
        self.player.remove_item(&second);
        self.player.add_item(output.clone());
        debug!(
            "combined {} + {} -> {}",
            escape_log(&first),
            escape_log(&second),
            escape_log(&output)
        );
        Ok(format!(
            "You combine the {first} and the {second} into a {output}."
        ))
    }

    fn split_operands(&self, words: &[&str]) -> (String, String) {
        for i in 1..words.len() {
            let first = words[..i].join(" ");
            let second = words[i..].join(" ");
            if self.player.has_item(&first) && self.player.has_item(&second) {
                return (first, second);
            }
        }
        (words[0].to_string(), words[1..].join(" "))
    }

    /// Use a carried item, or else perform a room action by that name.
    pub fn use_thing(&mut self, target: Option<&str>) -> FictionResult<String> {
        let target = target.ok_or(FictionError::MissingArgument("Use what?"))?;
        if !self.player.has_item(target) {
            return self.room_action(target);
        }
        Ok(match self.item_uses.get(&target.to_ascii_lowercase()) {
            Some(ItemUse::Narrate(text)) => text.clone(),
            Some(ItemUse::ShowMap) => render_map(&self.world, Some(self.player.location)),
            None => format!("You can't think of a use for the {target}."),
        })
    }

    /// Perform an action offered by the current room.
    ///
    /// A stateful override for (room, action) runs first; otherwise the
    /// room's static narration, or "You <action>." if it has none.
    pub fn room_action(&mut self, name: &str) -> FictionResult<String> {
        let here = self.player.location;
        let room = &self.world[here];
        let action = room
            .find_action(name)
            .or_else(|| self.matcher.first_match(name, &room.actions))
            .map(str::to_string)
            .ok_or_else(|| FictionError::ActionNotHere(name.to_string()))?;

        if let Some(effect) = self.effects.get(here, &action) {
            if let Some(text) =
                effect.apply(here, &mut self.world, &mut self.player, &mut self.flags)?
            {
                return Ok(text);
            }
        }

        Ok(self.world[here]
            .action_result(&action)
            .map(str::to_string)
            .unwrap_or_else(|| format!("You {action}.")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Adventure;
    use crate::error::FailureKind;
    use crate::quest::{TORCH_QUEST_ACTIVE, TORCH_QUEST_COMPLETE};

    fn engine() -> ActionEngine {
        Adventure::builtin().unwrap().into_parts().unwrap().0
    }

    fn room_named(engine: &ActionEngine, name: &str) -> vale_core::RoomId {
        engine.world().find_room(name).unwrap()
    }

    #[test]
    fn starts_in_glade() {
        let engine = engine();
        assert_eq!(engine.snapshot().name, "Glade");
        assert!(engine.snapshot().first_visit);
    }

    #[test]
    fn move_follows_exits_or_changes_nothing() {
        let mut engine = engine();
        let world = engine.world().clone();
        for (id, room) in world.rooms() {
            for (direction, exit) in room.exits() {
                let mut trial = engine.clone();
                trial.player.location = id;
                let result = trial.go(Some(direction));
                if exit.locked {
                    let err = result.unwrap_err();
                    assert_eq!(err.kind(), FailureKind::Locked);
                    assert_eq!(trial.player().location, id);
                } else {
                    assert!(result.is_ok());
                    assert_eq!(trial.player().location, exit.target);
                }
            }
            let mut trial = engine.clone();
            trial.player.location = id;
            let err = trial.go(Some("sideways")).unwrap_err();
            assert_eq!(err.to_string(), "You can't go that way.");
            assert_eq!(trial.player().location, id);
        }
        assert!(engine.go(None).is_err());
    }

    #[test]
    fn revisit_is_summarised() {
        let mut engine = engine();
        let first = engine.go(Some("north")).unwrap();
        assert!(first.starts_with("== Riverbank =="));
        engine.go(Some("south")).unwrap();
        let back = engine.go(Some("north")).unwrap();
        assert_eq!(back, "You return to the Riverbank.");
        assert!(!engine.snapshot().first_visit);
    }

    #[test]
    fn take_drop_round_trip_for_every_placed_item() {
        let engine = engine();
        let world = engine.world().clone();
        for (room, item) in world.placed_items() {
            let mut trial = engine.clone();
            trial.player.location = room;
            let before = trial.world()[room].items.len();

            trial.take_item(Some(item)).unwrap();
            assert!(trial.player().has_item(item));
            assert_eq!(trial.world()[room].items.len(), before - 1);

            trial.drop_item(Some(item)).unwrap();
            assert!(!trial.player().has_item(item));
            assert!(trial.world()[room].has_item(item));
            assert_eq!(trial.world()[room].items.len(), before);
        }
    }

    #[test]
    fn take_and_drop_failures() {
        let mut engine = engine();
        assert_eq!(
            engine.take_item(Some("anvil")).unwrap_err().to_string(),
            "There is no such item here."
        );
        assert_eq!(
            engine.drop_item(Some("branch")).unwrap_err().to_string(),
            "You don't have it."
        );
        assert!(engine.player().inventory.is_empty());
    }

    #[test]
    fn duplicate_items_move_one_at_a_time() {
        let mut engine = engine();
        engine.take_item(Some("branch")).unwrap();
        engine.drop_item(Some("branch")).unwrap();
        engine.take_item(Some("branch")).unwrap();
        let glade = room_named(&engine, "Glade");
        engine
            .world
            .room_mut(glade)
            .unwrap()
            .put_item("branch");
        engine.drop_item(Some("branch")).unwrap();
        assert_eq!(engine.world()[glade].items.iter().filter(|i| *i == "branch").count(), 2);
        engine.take_item(Some("branch")).unwrap();
        assert_eq!(engine.player().count_of("branch"), 1);
    }

    #[test]
    fn look_checks_inventory_then_points_of_interest() {
        let mut engine = engine();
        assert!(engine.look(None).unwrap().starts_with("== Glade =="));
        assert!(engine.look(Some("trees")).is_ok());
        assert_eq!(
            engine.look(Some("branch")).unwrap_err().to_string(),
            "You cannot see that here."
        );
        engine.take_item(Some("branch")).unwrap();
        let text = engine.look(Some("branch")).unwrap();
        assert_eq!(Some(text.as_str()), engine.world().item_description("branch"));

        engine.player.add_item("pebble");
        assert_eq!(
            engine.look(Some("pebble")).unwrap(),
            "It's an ordinary pebble."
        );
    }

    #[test]
    fn combine_is_commutative() {
        for argument in ["branch cloth", "cloth branch"] {
            let mut engine = engine();
            engine.player.add_item("branch");
            engine.player.add_item("cloth");
            engine.combine(Some(argument)).unwrap();
            assert_eq!(engine.player().inventory, vec!["torch"]);
        }
    }

    #[test]
    fn combine_failures_leave_inventory() {
        let mut engine = engine();
        engine.player.add_item("branch");
        engine.player.add_item("stone");

        let err = engine.combine(Some("branch stone")).unwrap_err();
        assert_eq!(err.to_string(), "The items refuse to join.");
        assert_eq!(err.kind(), FailureKind::InvalidTarget);

        let err = engine.combine(Some("branch cloth")).unwrap_err();
        assert_eq!(err.to_string(), "You lack the materials.");

        let err = engine.combine(Some("branch branch")).unwrap_err();
        assert_eq!(err.to_string(), "You lack the materials.");

        assert!(engine.combine(Some("branch")).is_err());
        assert_eq!(engine.player().inventory, vec!["branch", "stone"]);
    }

    #[test]
    fn combine_splits_multi_word_items() {
        let mut engine = engine().with_recipes(vec![Recipe::new("rusty key", "stone", "key on a rock")]);
        engine.player.add_item("stone");
        engine.player.add_item("rusty key");
        engine.combine(Some("rusty key stone")).unwrap();
        assert_eq!(engine.player().inventory, vec!["key on a rock"]);
    }

    #[test]
    fn locked_exit_gating() {
        let mut engine = engine();
        engine.go(Some("east")).unwrap();
        let tower = engine.player().location;

        let err = engine.go(Some("up")).unwrap_err();
        assert_eq!(err.to_string(), "The way is locked.");
        assert!(engine.room_action("unlock door").is_err());
        assert!(engine.world()[tower].is_locked("up"));

        engine.player.add_item("rusty key");
        let text = engine.room_action("unlock door").unwrap();
        assert!(text.to_lowercase().contains("door"));
        assert!(text.to_lowercase().contains("open"));
        assert!(!engine.world()[tower].is_locked("up"));

        let again = engine.room_action("unlock door").unwrap();
        assert!(again.contains("already open"));
        assert!(!engine.world()[tower].is_locked("up"));

        assert!(engine.go(Some("up")).is_ok());
        assert_eq!(engine.snapshot().name, "Tower Top");
    }

    #[test]
    fn quest_gated_reveal() {
        let mut engine = engine();
        engine.go(Some("south")).unwrap();

        let err = engine.room_action("search").unwrap_err();
        assert!(err.to_string().contains("too dark"));

        engine.player.add_item("torch");
        engine.flags_mut().set(TORCH_QUEST_ACTIVE);
        let text = engine.room_action("search").unwrap();
        assert!(text.contains("key"));
        assert!(engine.flags().is_set(TORCH_QUEST_COMPLETE));
        assert_eq!(engine.player().count_of("rusty key"), 1);

        let again = engine.room_action("search").unwrap();
        assert_ne!(again, text);
        assert_eq!(engine.player().count_of("rusty key"), 1);
    }

    #[test]
    fn use_items_and_room_actions() {
        let mut engine = engine();
        engine.player.add_item("map");
        let map = engine.use_thing(Some("map")).unwrap();
        assert!(map.contains(" * [Glade]"));

        engine.player.add_item("feather");
        assert_eq!(
            engine.use_thing(Some("feather")).unwrap(),
            "You can't think of a use for the feather."
        );

        assert_eq!(engine.use_thing(Some("rest")).unwrap(), engine.room_action("rest").unwrap());
        assert_eq!(
            engine.use_thing(Some("dance")).unwrap_err().to_string(),
            "You can't do that here."
        );
    }

    #[test]
    fn actions_without_results_narrate_generically() {
        let mut engine = engine();
        engine.go(Some("north")).unwrap();
        assert_eq!(engine.room_action("drink").unwrap(), "You drink.");
        assert_eq!(engine.room_action("drnk").unwrap(), "You drink.");
    }

    #[test]
    fn talk_checks_presence_and_name() {
        let mut engine = engine();
        assert_eq!(
            engine.talk(None).unwrap_err().to_string(),
            "There is no one here to talk to."
        );
        engine.go(Some("north")).unwrap();
        engine.go(Some("east")).unwrap();
        assert_eq!(
            engine.talk(Some("ghost")).unwrap_err().to_string(),
            "There is no such person here."
        );
        let (conversation, text) = engine.talk(Some("HERMIT")).unwrap();
        assert!(conversation.is_some());
        assert!(text.starts_with("Hermit:"));
    }

    #[test]
    fn inventory_listing() {
        let mut engine = engine();
        assert_eq!(engine.inventory(), "Your inventory is empty.");
        engine.take_item(Some("branch")).unwrap();
        assert_eq!(engine.inventory(), "You are carrying: Branch.");
    }
}
