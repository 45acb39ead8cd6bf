use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use log::info;
use vale_fiction::session::FAREWELL;
use vale_fiction::{Ambience, Calm, FictionSession, SeededAmbience};

pub fn run(world: Option<&Path>, seed: u64, calm: bool, no_color: bool) -> Result<(), String> {
    if no_color {
        colored::control::set_override(false);
    }

    let adventure = super::load_adventure(world)?;
    let title = adventure.world.title.clone();
    let intro = adventure.world.intro.clone();
    let mut ambience: Box<dyn Ambience> = if calm {
        Box::new(Calm)
    } else {
        Box::new(SeededAmbience::new(
            seed,
            adventure.config.ambience.clone(),
            adventure.config.ambience_chance,
        ))
    };
    let session = adventure
        .into_session()
        .map_err(|e| format!("failed to start session: {e}"))?;
    info!("playing \"{title}\" (seed {seed}, calm: {calm})");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let banner = Banner {
        title: &title,
        intro: &intro,
    };
    run_with(session, ambience.as_mut(), &banner, stdin.lock(), stdout.lock())
        .map_err(|e| e.to_string())
}

pub struct Banner<'a> {
    pub title: &'a str,
    pub intro: &'a str,
}

/// The read-eval loop, over any line source and sink.
pub fn run_with<R: BufRead, W: Write>(
    mut session: FictionSession,
    ambience: &mut dyn Ambience,
    banner: &Banner<'_>,
    mut input: R,
    mut out: W,
) -> io::Result<()> {
    let title = if banner.title.is_empty() {
        "the vale"
    } else {
        banner.title
    };
    writeln!(out, "Welcome to {}.", title.bold())?;
    if !banner.intro.is_empty() {
        writeln!(out, "{}", banner.intro)?;
    }
    writeln!(out, "Type 'help' for commands, 'exit' to quit.")?;
    writeln!(out)?;
    writeln!(out, "{}", paint(&session.opening()))?;

    let mut line = String::new();
    while !session.is_finished() {
        write!(out, "\n> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            // EOF
            writeln!(out)?;
            writeln!(out, "{FAREWELL}")?;
            break;
        }

        let exploring = !session.in_conversation();
        match session.process(line.trim()) {
            // Blank lines re-prompt silently.
            Ok(text) if text.is_empty() => {}
            Ok(text) => {
                writeln!(out, "{}", paint(&text))?;
                if exploring && !session.in_conversation() && !session.is_finished() {
                    if let Some(flavor) = ambience.flavor(&session.snapshot()) {
                        writeln!(out, "{}", flavor.dimmed().italic())?;
                    }
                }
            }
            Err(e) => writeln!(out, "{}", e.to_string().red())?,
        }
    }

    out.flush()
}

/// Highlight room headings.
fn paint(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.starts_with("== ") && line.ends_with(" ==") {
                line.bold().cyan().to_string()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
