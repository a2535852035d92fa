//! Static reaction rule tables, one per mode.
//!
//! The default tables are embedded at compile time from `data/reactions.json`
//! and validated when loaded: a duplicated canonical key is a load error.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::api::types::{Mode, ReactionEffect};
use crate::rules::resolver::{canonical_key, KEY_SEPARATOR};

/// Embed the default rule tables at compile time.
const BUILTIN_RULES_JSON: &str = include_str!("../../data/reactions.json");

/// Errors raised while building rule tables.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("malformed rule data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two rules in the same mode canonicalize to the same key.
    #[error("duplicate {mode} rule `{key}`: `{first}` and `{second}`")]
    DuplicateKey {
        mode: Mode,
        key: String,
        first: String,
        second: String,
    },

    #[error("{mode} rule for `{product}` needs at least 2 reactants, got {count}")]
    TooFewReactants {
        mode: Mode,
        product: String,
        count: usize,
    },

    /// A symbol is empty or contains the key separator.
    #[error("{mode} rule for `{product}` has invalid reactant symbol `{symbol}`")]
    InvalidSymbol {
        mode: Mode,
        product: String,
        symbol: String,
    },

    #[error("{mode} rule `{key}` has an empty product")]
    EmptyProduct { mode: Mode, key: String },
}

/// One reaction rule: reactants in, one product out.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Rule {
    /// Reactant symbols as authored (any order, repeats allowed).
    pub reactants: Vec<String>,
    /// Symbol of the synthesized object.
    pub product: String,
    /// Color for the synthesized object; the scene default applies when absent.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub effect: ReactionEffect,
}

impl Rule {
    pub fn new<S: Into<String>>(reactants: impl IntoIterator<Item = S>, product: impl Into<String>) -> Self {
        Self {
            reactants: reactants.into_iter().map(Into::into).collect(),
            product: product.into(),
            color: None,
            effect: ReactionEffect::None,
        }
    }

    /// Sorted, separator-joined reactant key.
    pub fn key(&self) -> String {
        canonical_key(&self.reactants)
    }
}

/// Rules for a single mode, keyed by canonical reactant key.
#[derive(Debug, Clone)]
pub struct RuleTable {
    mode: Mode,
    rules: HashMap<String, Rule>,
}

impl RuleTable {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            rules: HashMap::new(),
        }
    }

    /// Build a table, failing on the first invalid or duplicated rule.
    pub fn from_rules(mode: Mode, rules: impl IntoIterator<Item = Rule>) -> Result<Self, RuleError> {
        let mut table = Self::new(mode);
        for rule in rules {
            table.insert(rule)?;
        }
        Ok(table)
    }

    /// Validate and add a rule. Never overwrites an existing key.
    pub fn insert(&mut self, rule: Rule) -> Result<(), RuleError> {
        let mode = self.mode;
        if rule.reactants.len() < 2 {
            return Err(RuleError::TooFewReactants {
                mode,
                product: rule.product,
                count: rule.reactants.len(),
            });
        }
        if let Some(bad) = rule
            .reactants
            .iter()
            .find(|s| s.is_empty() || s.contains(KEY_SEPARATOR))
        {
            return Err(RuleError::InvalidSymbol {
                mode,
                product: rule.product.clone(),
                symbol: bad.clone(),
            });
        }
        let key = rule.key();
        if rule.product.is_empty() {
            return Err(RuleError::EmptyProduct { mode, key });
        }
        if let Some(existing) = self.rules.get(&key) {
            return Err(RuleError::DuplicateKey {
                mode,
                key,
                first: existing.product.clone(),
                second: rule.product,
            });
        }
        self.rules.insert(key, rule);
        Ok(())
    }

    /// Exact lookup by canonical key.
    pub fn get(&self, key: &str) -> Option<&Rule> {
        self.rules.get(key)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(k, r)| (k.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Raw JSON layout of a rule file.
#[derive(Debug, Deserialize)]
struct RuleBookJSON {
    #[serde(default)]
    creation: Vec<Rule>,
    #[serde(default)]
    reaction: Vec<Rule>,
}

/// Both rule tables, selected by mode.
#[derive(Debug, Clone)]
pub struct RuleBook {
    creation: RuleTable,
    reaction: RuleTable,
}

impl RuleBook {
    /// Load and validate the embedded default tables.
    pub fn builtin() -> Result<Self, RuleError> {
        Self::from_json(BUILTIN_RULES_JSON)
    }

    /// Parse and validate rule tables from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, RuleError> {
        let raw: RuleBookJSON = serde_json::from_str(json)?;
        let book = Self {
            creation: RuleTable::from_rules(Mode::Creation, raw.creation)?,
            reaction: RuleTable::from_rules(Mode::Reaction, raw.reaction)?,
        };
        log::debug!(
            "rule book loaded: {} creation, {} reaction rules",
            book.creation.len(),
            book.reaction.len()
        );
        Ok(book)
    }

    pub fn from_tables(creation: RuleTable, reaction: RuleTable) -> Self {
        Self { creation, reaction }
    }

    /// Book with no rules at all; every collision is harmless.
    pub fn empty() -> Self {
        Self::from_tables(RuleTable::new(Mode::Creation), RuleTable::new(Mode::Reaction))
    }

    pub fn table(&self, mode: Mode) -> &RuleTable {
        match mode {
            Mode::Creation => &self.creation,
            Mode::Reaction => &self.reaction,
        }
    }
}
