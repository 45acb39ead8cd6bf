//! Game configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{FictionError, FictionResult};
use crate::parser::{DEFAULT_STOP_WORDS, FUZZY_THRESHOLD, VerbCategory};

/// Configuration for the interpreter and the flavor layer.
///
/// Every field is optional in adventure files; missing fields take the
/// built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Words removed from input before resolution.
    pub stop_words: Vec<String>,
    /// Synonym overrides keyed by category name. Categories not listed
    /// keep their built-in synonyms.
    pub synonyms: BTreeMap<String, Vec<String>>,
    /// Largest edit distance accepted by the fuzzy pass.
    pub fuzzy_threshold: usize,
    /// Crafting recipes.
    pub recipes: Vec<Recipe>,
    /// Ambient flavor lines.
    pub ambience: Vec<String>,
    /// Chance per turn that an ambience line is shown.
    pub ambience_chance: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| (*w).to_string()).collect(),
            synonyms: BTreeMap::new(),
            fuzzy_threshold: FUZZY_THRESHOLD,
            recipes: vec![Recipe::new("branch", "cloth", "torch")],
            ambience: Vec::new(),
            ambience_chance: 0.25,
        }
    }
}

impl GameConfig {
    /// Synonyms for a category: the override if present, else the defaults.
    pub fn synonyms_for(&self, category: VerbCategory) -> Vec<String> {
        self.synonyms
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(category.name()))
            .map(|(_, words)| words.clone())
            .unwrap_or_else(|| {
                category
                    .default_synonyms()
                    .iter()
                    .map(|w| (*w).to_string())
                    .collect()
            })
    }

    /// Reject settings the interpreter cannot honour.
    pub fn validate(&self) -> FictionResult<()> {
        for (name, words) in &self.synonyms {
            if VerbCategory::from_name(name).is_none() {
                return Err(FictionError::Config(format!(
                    "unknown verb category '{name}'"
                )));
            }
            if words.iter().all(|w| w.trim().is_empty()) {
                return Err(FictionError::Config(format!(
                    "verb category '{name}' has no synonyms"
                )));
            }
        }
        for recipe in &self.recipes {
            if recipe.inputs.iter().any(|i| i.trim().is_empty()) || recipe.output.trim().is_empty()
            {
                return Err(FictionError::Config("recipe with an empty item".to_string()));
            }
        }
        if !(0.0..=1.0).contains(&self.ambience_chance) {
            return Err(FictionError::Config(format!(
                "ambience_chance {} is outside 0..=1",
                self.ambience_chance
            )));
        }
        Ok(())
    }
}

/// Two items that craft into a third.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// The two consumed items.
    pub inputs: [String; 2],
    /// The produced item.
    pub output: String,
}

/// The recipe joining two items, in either order.
pub fn find_recipe<'a>(recipes: &'a [Recipe], first: &str, second: &str) -> Option<&'a Recipe> {
    recipes.iter().find(|r| r.matches(first, second))
}

impl Recipe {
    /// Create a recipe.
    pub fn new(first: &str, second: &str, output: &str) -> Self {
        Self {
            inputs: [first.to_string(), second.to_string()],
            output: output.to_string(),
        }
    }

    /// Whether the two items are this recipe's inputs, in any order.
    pub fn matches(&self, first: &str, second: &str) -> bool {
        let [a, b] = &self.inputs;
        (a.eq_ignore_ascii_case(first) && b.eq_ignore_ascii_case(second))
            || (a.eq_ignore_ascii_case(second) && b.eq_ignore_ascii_case(first))
    }
}
