//! Parallel string rewriting over a [`Grammar`].
//!
//! Every generation replaces each symbol by its rule body, or keeps it when no
//! rule exists. Turtle control symbols (`F + - [ ]`) therefore pass through
//! untouched unless the grammar explicitly rewrites them.

use crate::error::{LSystemError, Result};
use crate::grammar::Grammar;
use log::debug;
use serde::{Deserialize, Serialize};

/// Default upper bound on the length of any generated string (16 Mi symbols).
pub const DEFAULT_MAX_SYMBOLS: usize = 16 * 1024 * 1024;

/// Default upper bound on the number of rewriting generations.
pub const DEFAULT_MAX_GENERATIONS: u32 = 64;

/// The result of a derivation, with every intermediate generation.
///
/// `history[0]` is the axiom and `history[n]` is generation `n`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Derivation {
    pub history: Vec<String>,
}

impl Derivation {
    /// The last generation produced.
    pub fn result(&self) -> &str {
        self.history.last().map(String::as_str).unwrap_or_default()
    }

    /// Number of rewriting steps applied (the axiom is generation 0).
    pub fn generations(&self) -> usize {
        self.history.len().saturating_sub(1)
    }
}

/// Rewrites symbol strings with configurable growth caps.
#[derive(Clone, Copy, Debug)]
pub struct Rewriter {
    max_symbols: usize,
    max_generations: u32,
}

impl Default for Rewriter {
    fn default() -> Self {
        Self {
            max_symbols: DEFAULT_MAX_SYMBOLS,
            max_generations: DEFAULT_MAX_GENERATIONS,
        }
    }
}

impl Rewriter {
    pub fn new(max_symbols: usize) -> Self {
        Self {
            max_symbols,
            ..Default::default()
        }
    }

    pub fn with_max_generations(mut self, max_generations: u32) -> Self {
        self.max_generations = max_generations;
        self
    }

    /// Expands the grammar's axiom for `generations` steps and returns only the
    /// final string.
    pub fn expand(&self, grammar: &Grammar, generations: u32) -> Result<String> {
        self.check_generations(generations)?;
        let mut current = grammar.axiom().to_string();
        for generation in 1..=generations {
            current = self.step(grammar, &current, generation, 0)?;
        }
        Ok(current)
    }

    /// Like [`expand`](Self::expand) but keeps every intermediate generation.
    ///
    /// The symbol cap applies to the whole history, not just the last string.
    pub fn derive(&self, grammar: &Grammar, generations: u32) -> Result<Derivation> {
        self.check_generations(generations)?;
        let axiom = grammar.axiom().to_string();
        let mut retained = axiom.chars().count();
        let mut history = vec![axiom];
        for generation in 1..=generations {
            let next = self.step(grammar, &history[history.len() - 1], generation, retained)?;
            retained += next.chars().count();
            history.push(next);
        }
        Ok(Derivation { history })
    }

    fn check_generations(&self, generations: u32) -> Result<()> {
        if generations > self.max_generations {
            return Err(LSystemError::TooManyGenerations {
                requested: generations,
                limit: self.max_generations,
            });
        }
        Ok(())
    }

    /// Applies one rewriting step.
    ///
    /// The output length is projected first, so an oversized generation is
    /// rejected without being allocated. `retained` counts symbols already
    /// held by the caller.
    fn step(
        &self,
        grammar: &Grammar,
        current: &str,
        generation: u32,
        retained: usize,
    ) -> Result<String> {
        let projected = projected_len(grammar, current);
        if projected.saturating_add(retained) > self.max_symbols {
            return Err(LSystemError::GenerationLimit {
                generation,
                length: projected,
                limit: self.max_symbols,
            });
        }

        let mut next = String::with_capacity(projected);
        for c in current.chars() {
            match grammar.rule(c) {
                Some(replacement) => next.push_str(replacement),
                None => next.push(c),
            }
        }
        debug!("generation {generation}: {} symbols", next.chars().count());
        Ok(next)
    }
}

/// Symbol count of the next generation of `current`.
fn projected_len(grammar: &Grammar, current: &str) -> usize {
    current
        .chars()
        .map(|c| grammar.rule(c).map_or(1, |r| r.chars().count()))
        .fold(0usize, usize::saturating_add)
}
