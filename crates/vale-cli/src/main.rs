//! Console front end for Whispers of the Forgotten Vale.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser)]
#[command(
    name = "vale",
    about = "Whispers of the Forgotten Vale, a small text adventure",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an adventure on the console (the default)
    Play {
        /// Adventure file (default: the built-in vale)
        #[arg(short, long)]
        world: Option<PathBuf>,

        /// RNG seed for ambient flavor text
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Turn off ambient flavor text
        #[arg(long)]
        calm: bool,

        /// Plain output without ANSI colors
        #[arg(long)]
        no_color: bool,
    },

    /// Validate an adventure file and list its rooms
    Check {
        /// Adventure file to validate
        #[arg(short, long)]
        world: PathBuf,
    },

    /// Print an overview of every room and exit
    Map {
        /// Adventure file (default: the built-in vale)
        #[arg(short, long)]
        world: Option<PathBuf>,
    },
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None);
    // A logger may already be installed when embedded.
    let _ = builder.try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Play {
        world: None,
        seed: 42,
        calm: false,
        no_color: false,
    });

    let result = match command {
        Commands::Play {
            world,
            seed,
            calm,
            no_color,
        } => commands::play::run(world.as_deref(), seed, calm, no_color),
        Commands::Check { world } => commands::check::run(&world),
        Commands::Map { world } => commands::map::run(world.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
