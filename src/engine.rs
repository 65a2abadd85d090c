//! One generation run: grammar → derivation → edges → vertex streams.
//!
//! [`LSystemEngine`] owns everything a run needs, so several plants can be
//! built side by side without shared state. Outputs are immutable once
//! returned.

use crate::config::GenerationConfig;
use crate::error::Result;
use crate::geometry::GeometryBuffer;
use crate::grammar::Grammar;
use crate::interpreter::TurtleInterpreter;
use crate::rewriter::Rewriter;
use crate::turtle::Edge;
use glam::Vec3;
use log::{debug, info};
use serde::Serialize;

/// The finished plant.
#[derive(Clone, Debug, Serialize)]
pub struct Plant {
    /// The final symbol string that was interpreted.
    pub symbols: String,
    /// Every generation from the axiom on; empty unless history was requested.
    pub history: Vec<String>,
    pub edges: Vec<Edge>,
    pub geometry: GeometryBuffer,
}

/// Per-run context tying the grammar, rewriter and turtle together.
pub struct LSystemEngine {
    grammar: Grammar,
    rewriter: Rewriter,
    interpreter: TurtleInterpreter,
    generations: u32,
    keep_history: bool,
    color: Vec3,
}

impl LSystemEngine {
    /// Validates `config` and loads its grammar file.
    pub fn from_config(config: &GenerationConfig) -> Result<Self> {
        config.validate()?;
        let grammar = Grammar::load(&config.grammar_path)?;
        info!(
            "loaded grammar {} (axiom {:?}, {} rules)",
            config.grammar_path.display(),
            grammar.axiom(),
            grammar.rule_count()
        );
        Self::with_grammar(grammar, config)
    }

    /// Uses an already-parsed grammar; `config.grammar_path` is ignored.
    pub fn with_grammar(grammar: Grammar, config: &GenerationConfig) -> Result<Self> {
        Ok(Self {
            grammar,
            rewriter: Rewriter::new(config.max_symbols)
                .with_max_generations(config.max_generations),
            interpreter: TurtleInterpreter::standard(config.turtle_config())?,
            generations: config.generations,
            keep_history: config.keep_history,
            color: config.color,
        })
    }

    /// Runs the whole pipeline. Any failure discards the partial build.
    pub fn run(&self) -> Result<Plant> {
        let (symbols, history) = if self.keep_history {
            let derivation = self.rewriter.derive(&self.grammar, self.generations)?;
            (derivation.result().to_owned(), derivation.history)
        } else {
            (self.rewriter.expand(&self.grammar, self.generations)?, Vec::new())
        };
        debug!(
            "rewrote {} generations, final length {} symbols",
            self.generations,
            symbols.chars().count()
        );

        let edges = self.interpreter.interpret(&symbols)?;
        let geometry = GeometryBuffer::flatten(&edges, self.color);
        debug!("flattened {} edges into {} vertices", edges.len(), geometry.vertex_count());

        Ok(Plant {
            symbols,
            history,
            edges,
            geometry,
        })
    }
}
