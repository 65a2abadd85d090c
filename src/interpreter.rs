//! Interpreter that converts a rewritten symbol string into an ordered list of [`Edge`]s.
//!
//! The entry point is [`TurtleInterpreter`]. Configure it with a [`TurtleConfig`],
//! register symbol-to-operation mappings via [`TurtleInterpreter::set_op`] or
//! [`TurtleInterpreter::populate_standard_symbols`], then call
//! [`TurtleInterpreter::interpret`] with the final generation of a derivation.

use crate::error::{LSystemError, Result};
use crate::turtle::{Cursor, Edge, Snapshot, TurtleOp, TurtleState};
use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for turtle interpretation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleConfig {
    /// Heading change for `+` / `-`, in degrees.
    pub turn_angle: f32,
    /// Length of one draw step before scaling.
    pub step_length: f32,
    /// Uniform scale applied to every step.
    pub scale: f32,
    /// Start point of the first edge.
    pub origin: Vec3,
    /// Maximum branch stack depth.
    pub max_stack_depth: usize,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            turn_angle: 25.7,
            step_length: 0.25,
            scale: 1.0,
            origin: Vec3::new(0.0, -0.8, 0.0),
            max_stack_depth: 4096,
        }
    }
}

impl TurtleConfig {
    /// Rejects settings that would produce degenerate or inverted geometry.
    pub fn validate(&self) -> Result<()> {
        if !self.turn_angle.is_finite() {
            return Err(LSystemError::config("turn angle must be finite"));
        }
        if !(self.step_length.is_finite() && self.step_length > 0.0) {
            return Err(LSystemError::config(format!(
                "step length must be positive, got {}",
                self.step_length
            )));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(LSystemError::config(format!(
                "scale must be positive, got {}",
                self.scale
            )));
        }
        if !self.origin.is_finite() {
            return Err(LSystemError::config("origin must be finite"));
        }
        if self.max_stack_depth == 0 {
            return Err(LSystemError::config("max stack depth must be non-zero"));
        }
        Ok(())
    }
}

/// What remained of the turtle after a full interpretation.
#[derive(Clone, Debug, PartialEq)]
pub struct Trace {
    pub edges: Vec<Edge>,
    /// Branch points still on the stack (zero for balanced input).
    pub open_branches: usize,
    /// Heading in degrees after the last symbol.
    pub heading: f32,
}

/// Interprets L-System output as planar turtle graphics.
pub struct TurtleInterpreter {
    op_map: HashMap<char, TurtleOp>,
    config: TurtleConfig,
}

impl TurtleInterpreter {
    /// Creates a new interpreter with the given configuration and an empty symbol map.
    ///
    /// Register operations with [`set_op`](Self::set_op) or
    /// [`populate_standard_symbols`](Self::populate_standard_symbols) before calling
    /// [`interpret`](Self::interpret).
    ///
    /// Fails with [`LSystemError::Config`] if `config` does not validate.
    pub fn new(config: TurtleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            op_map: HashMap::new(),
            config,
        })
    }

    /// Creates an interpreter with the standard `F + - [ ]` symbols registered.
    pub fn standard(config: TurtleConfig) -> Result<Self> {
        let mut interpreter = Self::new(config)?;
        interpreter.populate_standard_symbols();
        Ok(interpreter)
    }

    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    /// Assigns a single [`TurtleOp`] to a symbol, replacing any previous mapping.
    pub fn set_op(&mut self, symbol: char, op: TurtleOp) {
        self.op_map.insert(symbol, op);
    }

    /// Returns the operation registered for `symbol` ([`TurtleOp::Ignore`] if none).
    pub fn op(&self, symbol: char) -> TurtleOp {
        self.op_map.get(&symbol).copied().unwrap_or(TurtleOp::Ignore)
    }

    /// Registers the conventional symbol-to-operation mappings.
    pub fn populate_standard_symbols(&mut self) {
        let mappings = [
            ('F', TurtleOp::Draw),
            ('+', TurtleOp::Turn(1.0)),
            ('-', TurtleOp::Turn(-1.0)),
            ('[', TurtleOp::Push),
            (']', TurtleOp::Pop),
        ];

        for (sym, op) in mappings {
            self.set_op(sym, op);
        }
    }

    /// Interprets `symbols` and returns the edges in creation order.
    ///
    /// # Draw
    ///
    /// The very first edge starts at `origin` and always points straight up
    /// (+Y), whatever the current heading. Every later edge starts at the end
    /// point of the active edge and advances `step_length * scale` along +Y
    /// rotated about Z by the accumulated heading.
    ///
    /// # Push / Pop
    ///
    /// `[` saves the active edge and heading. `]` restores the heading and
    /// makes the saved edge active for the next draw only, so the following
    /// `F` branches from that edge's end point instead of the last one drawn.
    pub fn interpret(&self, symbols: &str) -> Result<Vec<Edge>> {
        self.interpret_traced(symbols).map(|trace| trace.edges)
    }

    /// Like [`interpret`](Self::interpret) but also reports the final turtle
    /// state.
    pub fn interpret_traced(&self, symbols: &str) -> Result<Trace> {
        let mut edges: Vec<Edge> = Vec::new();
        let mut turtle = TurtleState::default();
        let mut stack: Vec<Snapshot> = Vec::new();

        for (position, symbol) in symbols.chars().enumerate() {
            match self.op(symbol) {
                TurtleOp::Draw => {
                    let edge = self.next_edge(&edges, &turtle);
                    edges.push(edge);
                    turtle.cursor = Cursor::Append;
                }
                TurtleOp::Turn(sign) => turtle.turn(self.config.turn_angle * sign),
                TurtleOp::Push => {
                    if stack.len() >= self.config.max_stack_depth {
                        return Err(LSystemError::StackOverflow {
                            position,
                            depth: self.config.max_stack_depth,
                        });
                    }
                    stack.push(Snapshot {
                        edge: turtle.active_edge(edges.len()),
                        heading: turtle.heading,
                    });
                }
                TurtleOp::Pop => {
                    let saved = stack
                        .pop()
                        .ok_or(LSystemError::UnbalancedBracket { position })?;
                    turtle.heading = saved.heading;
                    turtle.cursor = match saved.edge {
                        Some(idx) => Cursor::Restored(idx),
                        None => Cursor::RestoredRoot,
                    };
                }
                TurtleOp::Ignore => {}
            }
        }

        debug!(
            "interpreted {} symbols into {} edges ({} open branches)",
            symbols.chars().count(),
            edges.len(),
            stack.len()
        );

        Ok(Trace {
            edges,
            open_branches: stack.len(),
            heading: turtle.heading,
        })
    }

    fn next_edge(&self, edges: &[Edge], turtle: &TurtleState) -> Edge {
        let step = self.config.step_length * self.config.scale;

        if edges.is_empty() {
            let start = self.config.origin;
            return Edge::new(start, start + Vec3::Y * step);
        }

        let start = match turtle.active_edge(edges.len()) {
            Some(idx) => edges[idx].end,
            None => self.config.origin,
        };
        let mut end = start + turtle.up() * step;
        // The turtle lives in the XY-plane.
        end.z = start.z;
        Edge::new(start, end)
    }
}
