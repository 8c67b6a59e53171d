//! Knobs and candidate instances.

use std::fmt;

use crate::expr::{is_operator, is_paren, parse_str, tokenize, ParseError, TreeNode};

/// A named control variable that may appear as a token in an expression.
///
/// Knobs are value objects: equality, ordering and hashing go by symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Knob {
    symbol: String,
}

impl Knob {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl From<&str> for Knob {
    fn from(symbol: &str) -> Self {
        Self::new(symbol)
    }
}

impl fmt::Display for Knob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}

/// One candidate expression.
///
/// `value` is always text that [`parse_str`] accepts. `knobs` lists, in
/// insertion order and without duplicates, the knobs whose symbols occur as
/// tokens in `value`; [`prune_knobs`](Self::prune_knobs) restores that
/// property after an edit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    /// Canonical textual form of the expression.
    pub value: String,
    /// Unique within the deme that produced it.
    pub id: u64,
    /// Fitness; higher is better. `0.0` until evaluated.
    pub score: f64,
    /// Knobs referenced by `value`.
    pub knobs: Vec<Knob>,
}

impl Instance {
    /// Creates an unscored instance with no knobs.
    pub fn new(value: impl Into<String>, id: u64) -> Self {
        Self {
            value: value.into(),
            id,
            score: 0.0,
            knobs: Vec::new(),
        }
    }

    /// Sets the knob list, dropping duplicate symbols.
    pub fn with_knobs(mut self, knobs: impl IntoIterator<Item = Knob>) -> Self {
        self.knobs.clear();
        for knob in knobs {
            self.add_knob(knob);
        }
        self
    }

    /// Parses `value` into a fresh tree.
    pub fn tree(&self) -> Result<TreeNode, ParseError> {
        parse_str(&self.value)
    }

    /// Adds a knob unless one with the same symbol is already present.
    ///
    /// Returns `true` if the knob was added.
    pub fn add_knob(&mut self, knob: Knob) -> bool {
        if self.knobs.iter().any(|k| k.symbol == knob.symbol) {
            return false;
        }
        self.knobs.push(knob);
        true
    }

    /// Registers every variable token of `text` as a referenced knob.
    ///
    /// Each token is resolved against `pool` first, then `fallback`; tokens
    /// found in neither are ignored.
    pub fn register_knobs(&mut self, text: &str, pool: &[Knob], fallback: &[Knob]) {
        for token in tokenize(text) {
            if is_operator(token) || is_paren(token) {
                continue;
            }
            let found = pool
                .iter()
                .chain(fallback)
                .find(|k| k.symbol == token);
            if let Some(knob) = found {
                self.add_knob(knob.clone());
            }
        }
    }

    /// Drops knobs whose symbol no longer occurs as a token in `value`.
    pub fn prune_knobs(&mut self) {
        let tokens = tokenize(&self.value);
        self.knobs.retain(|k| tokens.contains(&k.symbol.as_str()));
    }

    /// `true` if every knob's symbol occurs as a token in `value`.
    pub fn knobs_consistent(&self) -> bool {
        let tokens = tokenize(&self.value);
        self.knobs
            .iter()
            .all(|k| tokens.contains(&k.symbol.as_str()))
    }
}
