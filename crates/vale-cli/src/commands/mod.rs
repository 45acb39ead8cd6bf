pub mod check;
pub mod map;
pub mod play;

use std::path::Path;

use vale_fiction::Adventure;

/// Load an adventure file, or the built-in vale when no path is given.
fn load_adventure(path: Option<&Path>) -> Result<Adventure, String> {
    match path {
        Some(path) => Adventure::load(path).map_err(|e| format!("{}: {e}", path.display())),
        None => Adventure::builtin().map_err(|e| format!("built-in adventure: {e}")),
    }
}
