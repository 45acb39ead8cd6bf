//! Rendering of rooms, inventory, help, and the map overview.

use vale_core::{RoomId, WorldGraph};

use crate::parser::{CommandResolver, VerbCategory};

/// One exit as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitView {
    /// Direction name.
    pub direction: String,
    /// Name of the room it leads to.
    pub target: String,
    /// Whether it is locked.
    pub locked: bool,
}

/// Owned, read-only view of the current room.
///
/// Handed to presentation code each turn; holding one never borrows the
/// engine, so nothing rendered from it can change game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    /// Room ID.
    pub id: RoomId,
    /// Room name.
    pub name: String,
    /// Full description.
    pub description: String,
    /// Whether the player has just entered for the first time.
    pub first_visit: bool,
    /// Items lying here.
    pub items: Vec<String>,
    /// Point-of-interest names.
    pub points_of_interest: Vec<String>,
    /// Name of the NPC present.
    pub npc: Option<String>,
    /// Exits in direction order.
    pub exits: Vec<ExitView>,
    /// Actions offered here.
    pub actions: Vec<String>,
}

impl RoomSnapshot {
    /// Capture the state of `room`.
    pub fn capture(world: &WorldGraph, room: RoomId, first_visit: bool) -> Self {
        let r = &world[room];
        Self {
            id: room,
            name: r.name.clone(),
            description: r.description.clone(),
            first_visit,
            items: r.items.clone(),
            points_of_interest: r.points_of_interest.keys().cloned().collect(),
            npc: world.npc_in(room).map(|(_, npc)| npc.name.clone()),
            exits: r
                .exits()
                .iter()
                .map(|(direction, exit)| ExitView {
                    direction: direction.clone(),
                    target: world
                        .room(exit.target)
                        .map(|t| t.name.clone())
                        .unwrap_or_default(),
                    locked: exit.locked,
                })
                .collect(),
            actions: r.actions.clone(),
        }
    }

    /// Full room text: heading, description, contents, exits, actions.
    pub fn render(&self) -> String {
        let mut lines = vec![format!("== {} ==", self.name), self.description.clone()];
        if !self.items.is_empty() {
            lines.push(format!("You see: {}.", self.items.join(", ")));
        }
        if !self.points_of_interest.is_empty() {
            lines.push(format!(
                "You notice: {}.",
                self.points_of_interest.join(", ")
            ));
        }
        if let Some(npc) = &self.npc {
            lines.push(format!("{npc} is here."));
        }
        if self.exits.is_empty() {
            lines.push("There is no way out.".to_string());
        } else {
            let exits: Vec<String> = self
                .exits
                .iter()
                .map(|e| {
                    if e.locked {
                        format!("{} (locked)", e.direction)
                    } else {
                        e.direction.clone()
                    }
                })
                .collect();
            lines.push(format!("Exits: {}.", exits.join(", ")));
        }
        if !self.actions.is_empty() {
            lines.push(format!("You could: {}.", self.actions.join(", ")));
        }
        lines.join("\n")
    }

    /// Short text for re-entering a room already seen.
    pub fn render_revisit(&self) -> String {
        format!("You return to the {}.", self.name)
    }
}

/// Uppercase the first character.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// "You are carrying: Stone, Rusty key." or the empty message.
pub fn render_inventory(items: &[String]) -> String {
    if items.is_empty() {
        return "Your inventory is empty.".to_string();
    }
    let names: Vec<String> = items.iter().map(|i| capitalize(i)).collect();
    format!("You are carrying: {}.", names.join(", "))
}

/// Every room with its exits, the current room marked with `*`.
pub fn render_map(world: &WorldGraph, current: Option<RoomId>) -> String {
    let mut out = vec![format!("Map of {}", world.meta.title)];
    for (id, room) in world.rooms() {
        let marker = if Some(id) == current { '*' } else { ' ' };
        let exits: Vec<String> = room
            .exits()
            .iter()
            .map(|(dir, exit)| {
                let target = world
                    .room(exit.target)
                    .map(|t| t.name.as_str())
                    .unwrap_or("?");
                if exit.locked {
                    format!("{dir} -> {target} (locked)")
                } else {
                    format!("{dir} -> {target}")
                }
            })
            .collect();
        out.push(format!(" {marker} [{}] {}", room.name, exits.join(", ")));
    }
    out.join("\n")
}

/// Verb categories with their synonyms, plus the room's actions.
pub fn render_help(resolver: &CommandResolver, room_actions: &[String]) -> String {
    let mut lines = vec!["Commands:".to_string()];
    for category in VerbCategory::ALL {
        let usage = match category {
            VerbCategory::Go => "go <direction>",
            VerbCategory::Look => "look [thing]",
            VerbCategory::Take => "take <item>",
            VerbCategory::Drop => "drop <item>",
            VerbCategory::Use => "use <item or action>",
            VerbCategory::Combine => "combine <item> <item>",
            VerbCategory::Talk => "talk [name]",
            other => other.name(),
        };
        lines.push(format!(
            "  {usage:<24} {}",
            resolver.synonyms(category).join(", ")
        ));
    }
    if !room_actions.is_empty() {
        lines.push(format!("Here you could: {}.", room_actions.join(", ")));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use vale_core::{Npc, Room, WorldMeta};

    fn world() -> (WorldGraph, RoomId, RoomId) {
        let mut world = WorldGraph::new(WorldMeta::new("Test Vale"));
        let hermit = world.add_npc(Npc::new("Hermit", "Hello.")).unwrap();
        let mut hut = Room::new("Hut", "A smoky hut.")
            .with_item("cloth")
            .with_item("map")
            .with_point_of_interest("herbs", "Drying herbs.")
            .with_action("sit", None);
        hut.npc = Some(hermit);
        let hut = world.add_room(hut).unwrap();
        let roof = world.add_room(Room::new("Roof", "Windy.")).unwrap();
        world.connect(hut, "up", roof, true).unwrap();
        world.connect(roof, "down", hut, false).unwrap();
        (world, hut, roof)
    }

    #[test]
    fn snapshot_captures_room() {
        let (world, hut, _) = world();
        let snap = RoomSnapshot::capture(&world, hut, true);
        assert_eq!(snap.name, "Hut");
        assert!(snap.first_visit);
        assert_eq!(snap.items, vec!["cloth", "map"]);
        assert_eq!(snap.npc.as_deref(), Some("Hermit"));
        assert_eq!(
            snap.exits,
            vec![ExitView {
                direction: "up".into(),
                target: "Roof".into(),
                locked: true
            }]
        );
    }

    #[test]
    fn room_rendering() {
        let (world, hut, roof) = world();
        let text = RoomSnapshot::capture(&world, hut, true).render();
        assert_eq!(
            text,
            "== Hut ==\nA smoky hut.\nYou see: cloth, map.\nYou notice: herbs.\n\
             Hermit is here.\nExits: up (locked).\nYou could: sit."
        );
        let snap = RoomSnapshot::capture(&world, roof, false);
        assert_eq!(snap.render_revisit(), "You return to the Roof.");
    }

    #[test]
    fn inventory_rendering() {
        assert_eq!(render_inventory(&[]), "Your inventory is empty.");
        assert_eq!(
            render_inventory(&["stone".into(), "rusty key".into()]),
            "You are carrying: Stone, Rusty key."
        );
    }

    #[test]
    fn map_marks_current_room() {
        let (world, hut, _) = world();
        let map = render_map(&world, Some(hut));
        assert!(map.starts_with("Map of Test Vale"));
        assert!(map.contains(" * [Hut] up -> Roof (locked)"));
        assert!(map.contains("   [Roof] down -> Hut"));
    }

    #[test]
    fn help_lists_synonyms_and_actions() {
        let help = render_help(&CommandResolver::default(), &["fish".to_string()]);
        assert!(help.contains("go, move, walk"));
        assert!(help.contains("inventory, inv, i"));
        assert!(help.ends_with("Here you could: fish."));
    }
}
