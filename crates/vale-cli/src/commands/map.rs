use std::path::Path;

use vale_fiction::narrator::render_map;

pub fn run(path: Option<&Path>) -> Result<(), String> {
    let adventure = super::load_adventure(path)?;
    let (engine, _) = adventure.into_parts().map_err(|e| e.to_string())?;
    let world = engine.world();
    println!("{}", render_map(world, world.start()));
    Ok(())
}
