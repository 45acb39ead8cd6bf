use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use vale_core::{Room, WorldGraph};

pub fn run(path: &Path) -> Result<(), String> {
    let adventure = super::load_adventure(Some(path))?;
    let (engine, config) = adventure
        .into_parts()
        .map_err(|e| format!("{}: {e}", path.display()))?;
    let world = engine.world();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Room", "Exits", "Items", "Actions", "NPC"]);
    for (id, room) in world.rooms() {
        let npc = world
            .npc_in(id)
            .map(|(_, npc)| npc.name.clone())
            .unwrap_or_else(|| "—".to_string());
        table.add_row(vec![
            room.name.clone(),
            exits_cell(world, room),
            or_dash(room.items.join(", ")),
            or_dash(room.actions.join(", ")),
            npc,
        ]);
    }

    println!("{table}");
    println!();
    println!("  All checks passed for '{}'.", world.meta.title);
    println!(
        "  {} rooms, {} NPCs, {} recipes",
        world.room_count(),
        world.npc_count(),
        config.recipes.len()
    );

    Ok(())
}

fn exits_cell(world: &WorldGraph, room: &Room) -> String {
    let exits: Vec<String> = room
        .exits()
        .iter()
        .map(|(dir, exit)| {
            let target = world.room(exit.target).map_or("?", |t| t.name.as_str());
            if exit.locked {
                format!("{dir}: {target} (locked)")
            } else {
                format!("{dir}: {target}")
            }
        })
        .collect();
    or_dash(exits.join("\n"))
}

fn or_dash(cell: String) -> String {
    if cell.is_empty() {
        "—".to_string()
    } else {
        cell
    }
}
