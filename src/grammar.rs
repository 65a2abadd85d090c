//! Axiom and production rules, parsed from a line-oriented text source.
//!
//! The format is one record per line:
//!
//! ```text
//! F
//! F: F[+F]F[-F]F
//! ```
//!
//! A line of exactly one character is the axiom. Every other non-empty line
//! is `<symbol><separator><replacement>`: the first character is the key, the
//! second is an arbitrary separator, and the rest of the line is the body.

use crate::error::{LSystemError, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Width of the `<symbol><separator>` prefix on a rule line.
const RULE_PREFIX: usize = 2;

/// A parsed L-System grammar: one axiom and at most one rule per symbol.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Grammar {
    axiom: String,
    rules: HashMap<char, String>,
}

impl Grammar {
    /// Creates a grammar with the given axiom and no rules.
    pub fn new(axiom: impl Into<String>) -> Self {
        Self {
            axiom: axiom.into(),
            rules: HashMap::new(),
        }
    }

    /// Adds a production rule (builder pattern).
    ///
    /// Unlike parsing, this overwrites an existing rule for `symbol`.
    pub fn with_rule(mut self, symbol: char, replacement: &str) -> Self {
        self.rules.insert(symbol, replacement.to_string());
        self
    }

    /// Parses grammar text.
    ///
    /// Duplicate rule keys keep the first definition; later ones are logged
    /// and dropped. A later axiom line replaces an earlier one.
    pub fn parse(source: &str) -> Result<Self> {
        let mut axiom: Option<String> = None;
        let mut rules = HashMap::new();

        for (idx, raw) in source.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            if line.is_empty() {
                continue;
            }

            if line.chars().count() == 1 {
                if let Some(previous) = &axiom {
                    debug!("line {line_no}: axiom {previous:?} replaced by {line:?}");
                }
                axiom = Some(line.to_string());
                continue;
            }

            let (key, replacement) = split_rule(line)
                .ok_or_else(|| LSystemError::malformed(line_no, format!("rule line {line:?} is too short")))?;
            if rules.contains_key(&key) {
                warn!("line {line_no}: duplicate rule for {key:?} ignored");
                continue;
            }
            rules.insert(key, replacement);
        }

        let axiom = axiom.ok_or_else(|| LSystemError::malformed(0, "no axiom line found"))?;
        debug!("parsed grammar: axiom {axiom:?}, {} rule(s)", rules.len());
        Ok(Self { axiom, rules })
    }

    /// Reads and parses a grammar file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| LSystemError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source)
    }

    /// The starting symbol sequence.
    pub fn axiom(&self) -> &str {
        &self.axiom
    }

    /// Returns the replacement for `symbol`, if a rule exists.
    pub fn rule(&self, symbol: char) -> Option<&str> {
        self.rules.get(&symbol).map(String::as_str)
    }

    /// Iterates over all `(symbol, replacement)` pairs in arbitrary order.
    pub fn rules(&self) -> impl Iterator<Item = (char, &str)> {
        self.rules.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

/// Splits a rule line into its key and the body after the separator.
///
/// Offsets are in characters; returns `None` when the line is narrower than
/// the `<symbol><separator>` prefix.
fn split_rule(line: &str) -> Option<(char, String)> {
    let key = line.chars().next()?;
    let body_start = line.char_indices().nth(RULE_PREFIX).map(|(i, _)| i);
    match body_start {
        Some(i) => Some((key, line[i..].to_string())),
        None if line.chars().count() == RULE_PREFIX => Some((key, String::new())),
        None => None,
    }
}
