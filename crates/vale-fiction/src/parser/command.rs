//! Command resolution for player input.

use std::collections::BTreeMap;

use super::fuzzy::FuzzyMatcher;
use super::lexer::Lexer;
use crate::config::GameConfig;

/// Verb category a command head can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VerbCategory {
    /// Describe the room or a thing in it.
    Look,
    /// Move through an exit.
    Go,
    /// Pick up an item.
    Take,
    /// Put down an item.
    Drop,
    /// Use a carried item, or fall through to a room action.
    Use,
    /// Craft two carried items into one.
    Combine,
    /// List carried items.
    Inventory,
    /// Start a conversation.
    Talk,
    /// List commands.
    Help,
    /// End the session.
    Exit,
}

const LOOK_VERBS: &[&str] = &["look", "examine", "inspect"];
const GO_VERBS: &[&str] = &["go", "move", "walk"];
const TAKE_VERBS: &[&str] = &["take", "get", "pickup", "pick", "grab"];
const DROP_VERBS: &[&str] = &["drop", "leave"];
const USE_VERBS: &[&str] = &["use", "do", "open"];
const COMBINE_VERBS: &[&str] = &["combine", "craft"];
const INVENTORY_VERBS: &[&str] = &["inventory", "inv", "i"];
const TALK_VERBS: &[&str] = &["talk", "speak", "chat"];
const HELP_VERBS: &[&str] = &["help", "?"];
const EXIT_VERBS: &[&str] = &["exit", "quit"];

impl VerbCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Look,
        Self::Go,
        Self::Take,
        Self::Drop,
        Self::Use,
        Self::Combine,
        Self::Inventory,
        Self::Talk,
        Self::Help,
        Self::Exit,
    ];

    /// Name used in configuration files and help output.
    pub fn name(self) -> &'static str {
        match self {
            Self::Look => "look",
            Self::Go => "go",
            Self::Take => "take",
            Self::Drop => "drop",
            Self::Use => "use",
            Self::Combine => "combine",
            Self::Inventory => "inventory",
            Self::Talk => "talk",
            Self::Help => "help",
            Self::Exit => "exit",
        }
    }

    /// Parse a category from its configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// Built-in synonym list.
    pub fn default_synonyms(self) -> &'static [&'static str] {
        match self {
            Self::Look => LOOK_VERBS,
            Self::Go => GO_VERBS,
            Self::Take => TAKE_VERBS,
            Self::Drop => DROP_VERBS,
            Self::Use => USE_VERBS,
            Self::Combine => COMBINE_VERBS,
            Self::Inventory => INVENTORY_VERBS,
            Self::Talk => TALK_VERBS,
            Self::Help => HELP_VERBS,
            Self::Exit => EXIT_VERBS,
        }
    }
}

/// A resolved player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A verb from one of the categories, with the remaining words joined.
    Verb {
        /// Matched category.
        category: VerbCategory,
        /// Words after the verb, space-joined; `None` when there were none.
        argument: Option<String>,
    },
    /// An action offered by the current room, in its canonical spelling.
    RoomAction {
        /// Canonical action name.
        action: String,
    },
    /// Nothing matched.
    Unknown {
        /// The lexed input, space-joined.
        input: String,
    },
    /// Input was blank or only stop words.
    Empty,
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Verb(VerbCategory),
    /// First word against the room's actions.
    RoomAction,
    /// Whole phrase against multi-word room actions.
    RoomPhrase,
}

const CHAIN: [Step; 12] = [
    Step::Verb(VerbCategory::Help),
    Step::Verb(VerbCategory::Look),
    Step::Verb(VerbCategory::Talk),
    Step::Verb(VerbCategory::Go),
    Step::Verb(VerbCategory::Take),
    Step::Verb(VerbCategory::Drop),
    Step::Verb(VerbCategory::Combine),
    Step::Verb(VerbCategory::Use),
    Step::RoomAction,
    Step::RoomPhrase,
    Step::Verb(VerbCategory::Inventory),
    Step::Verb(VerbCategory::Exit),
];

/// Maps lexed input onto verb categories and room actions.
///
/// The priority chain runs twice: first requiring exact equality, then
/// tolerating the fuzzy threshold, so an exact synonym anywhere in the chain
/// beats a fuzzy match on an earlier category.
#[derive(Debug, Clone)]
pub struct CommandResolver {
    lexer: Lexer,
    matcher: FuzzyMatcher,
    synonyms: BTreeMap<VerbCategory, Vec<String>>,
}

impl CommandResolver {
    /// Build a resolver from game configuration.
    pub fn new(config: &GameConfig) -> Self {
        let synonyms = VerbCategory::ALL
            .into_iter()
            .map(|c| {
                let words = config
                    .synonyms_for(c)
                    .into_iter()
                    .map(|w| w.to_ascii_lowercase())
                    .collect();
                (c, words)
            })
            .collect();
        Self {
            lexer: Lexer::new(&config.stop_words),
            matcher: FuzzyMatcher::new(config.fuzzy_threshold),
            synonyms,
        }
    }

    /// Synonyms recognised for a category.
    pub fn synonyms(&self, category: VerbCategory) -> &[String] {
        self.synonyms
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resolve raw input against the categories and the room's actions.
    pub fn resolve<S: AsRef<str>>(&self, input: &str, room_actions: &[S]) -> Command {
        let words = self.lexer.tokenize(input);
        let Some((head, rest)) = words.split_first() else {
            return Command::Empty;
        };
        let phrase = words.join(" ");

        for exact in [true, false] {
            for step in CHAIN {
                match step {
                    Step::Verb(category) => {
                        if self.matches(head, self.synonyms(category), exact) {
                            return Command::Verb {
                                category,
                                argument: argument_for(category, rest),
                            };
                        }
                    }
                    Step::RoomAction => {
                        if let Some(action) = self.find_action(head, room_actions, exact) {
                            return Command::RoomAction {
                                action: action.to_string(),
                            };
                        }
                    }
                    Step::RoomPhrase => {
                        if rest.is_empty() {
                            continue;
                        }
                        if let Some(action) = self.find_action(&phrase, room_actions, exact) {
                            return Command::RoomAction {
                                action: action.to_string(),
                            };
                        }
                    }
                }
            }
        }

        Command::Unknown { input: phrase }
    }

    fn matches(&self, word: &str, options: &[String], exact: bool) -> bool {
        if exact {
            options.iter().any(|opt| opt == word)
        } else {
            self.matcher.matches_any(word, options)
        }
    }

    fn find_action<'a, S: AsRef<str>>(
        &self,
        word: &str,
        actions: &'a [S],
        exact: bool,
    ) -> Option<&'a str> {
        if exact {
            actions
                .iter()
                .map(|opt| opt.as_ref())
                .find(|a| a.eq_ignore_ascii_case(word))
        } else {
            actions
                .iter()
                .map(|opt| opt.as_ref())
                .find(|a| self.matcher.is_close(word, &a.to_ascii_lowercase()))
        }
    }
}

impl Default for CommandResolver {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

/// Join the words after the verb. "pick up X" drops the particle.
fn argument_for(category: VerbCategory, rest: &[String]) -> Option<String> {
    let rest = match rest {
        [particle, tail @ ..]
            if category == VerbCategory::Take && particle == "up" && !tail.is_empty() =>
        {
            tail
        }
        _ => rest,
    };
    if rest.is_empty() {
        None
    } else {
        Some(rest.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_ACTIONS: [&str; 0] = [];

    fn verb(category: VerbCategory, argument: Option<&str>) -> Command {
        Command::Verb {
            category,
            argument: argument.map(str::to_string),
        }
    }

    #[test]
    fn resolves_each_category() {
        let r = CommandResolver::default();
        assert_eq!(
            r.resolve("go north", &NO_ACTIONS),
            verb(VerbCategory::Go, Some("north"))
        );
        assert_eq!(
            r.resolve("examine the fire pit", &NO_ACTIONS),
            verb(VerbCategory::Look, Some("fire pit"))
        );
        assert_eq!(
            r.resolve("grab stone", &NO_ACTIONS),
            verb(VerbCategory::Take, Some("stone"))
        );
        assert_eq!(
            r.resolve("leave stone", &NO_ACTIONS),
            verb(VerbCategory::Drop, Some("stone"))
        );
        assert_eq!(
            r.resolve("craft branch with cloth", &NO_ACTIONS),
            verb(VerbCategory::Combine, Some("branch cloth"))
        );
        assert_eq!(r.resolve("i", &NO_ACTIONS), verb(VerbCategory::Inventory, None));
        assert_eq!(
            r.resolve("speak to hermit", &NO_ACTIONS),
            verb(VerbCategory::Talk, Some("hermit"))
        );
        assert_eq!(r.resolve("?", &NO_ACTIONS), verb(VerbCategory::Help, None));
        assert_eq!(r.resolve("quit", &NO_ACTIONS), verb(VerbCategory::Exit, None));
    }

    #[test]
    fn typo_in_verb_is_forgiven() {
        let r = CommandResolver::default();
        assert_eq!(
            r.resolve("lok", &NO_ACTIONS),
            verb(VerbCategory::Look, None)
        );
        assert_eq!(
            r.resolve("tke stone", &NO_ACTIONS),
            verb(VerbCategory::Take, Some("stone"))
        );
    }

    #[test]
    fn exact_match_beats_earlier_fuzzy_match() {
        let r = CommandResolver::default();
        // "walk" is one edit from "talk" but is itself a go synonym.
        assert_eq!(
            r.resolve("walk north", &NO_ACTIONS),
            verb(VerbCategory::Go, Some("north"))
        );
        // "i" is one edit from "?" but is an inventory synonym.
        assert_eq!(r.resolve("i", &NO_ACTIONS), verb(VerbCategory::Inventory, None));
        assert_eq!(
            r.resolve("do fish", &NO_ACTIONS),
            verb(VerbCategory::Use, Some("fish"))
        );
    }

    #[test]
    fn room_actions_resolve_after_verbs() {
        let r = CommandResolver::default();
        let actions = ["fish", "drink"];
        assert_eq!(
            r.resolve("fish", &actions),
            Command::RoomAction {
                action: "fish".into()
            }
        );
        assert_eq!(
            r.resolve("fsh", &actions),
            Command::RoomAction {
                action: "fish".into()
            }
        );
    }

    #[test]
    fn multi_word_room_action() {
        let r = CommandResolver::default();
        let actions = ["unlock door", "climb"];
        assert_eq!(
            r.resolve("unlock the door", &actions),
            Command::RoomAction {
                action: "unlock door".into()
            }
        );
        assert_eq!(
            r.resolve("unlock dor", &actions),
            Command::RoomAction {
                action: "unlock door".into()
            }
        );
    }

    #[test]
    fn pick_up_drops_particle() {
        let r = CommandResolver::default();
        assert_eq!(
            r.resolve("pick up the stone", &NO_ACTIONS),
            verb(VerbCategory::Take, Some("stone"))
        );
        assert_eq!(
            r.resolve("pick up", &NO_ACTIONS),
            verb(VerbCategory::Take, Some("up"))
        );
    }

    #[test]
    fn empty_and_unknown() {
        let r = CommandResolver::default();
        assert_eq!(r.resolve("", &NO_ACTIONS), Command::Empty);
        assert_eq!(r.resolve("the", &NO_ACTIONS), Command::Empty);
        assert_eq!(
            r.resolve("xyzzy plugh", &NO_ACTIONS),
            Command::Unknown {
                input: "xyzzy plugh".into()
            }
        );
    }

    #[test]
    fn category_names_round_trip() {
        for c in VerbCategory::ALL {
            assert_eq!(VerbCategory::from_name(c.name()), Some(c));
            assert!(!c.default_synonyms().is_empty());
        }
        assert_eq!(VerbCategory::from_name("dance"), None);
    }
}
