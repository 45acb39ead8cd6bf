//! Command parsing: lexing, fuzzy matching, and resolution.

mod command;
mod fuzzy;
mod lexer;

pub use command::{Command, CommandResolver, VerbCategory};
pub use fuzzy::{FUZZY_THRESHOLD, FuzzyMatcher, edit_distance, fuzzy_match, match_action};
pub use lexer::{DEFAULT_STOP_WORDS, Lexer};
