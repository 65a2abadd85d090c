//! Error types for grammar loading, rewriting and turtle interpretation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building a plant from a grammar.
///
/// Every stage fails fast: an error discards the whole in-progress build.
#[derive(Debug, Error)]
pub enum LSystemError {
    /// The grammar source could not be read.
    #[error("failed to read grammar {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The grammar text is structurally invalid.
    #[error("malformed grammar (line {line}): {reason}")]
    MalformedGrammar {
        /// 1-based line number, or 0 when the problem is not tied to a line.
        line: usize,
        /// Human-readable description.
        reason: String,
    },

    /// A `]` was encountered with nothing left on the branch stack.
    #[error("unbalanced bracket: pop with empty stack at symbol {position}")]
    UnbalancedBracket {
        /// 0-based character index in the interpreted string.
        position: usize,
    },

    /// A `[` would exceed the configured branch stack depth.
    #[error("branch stack overflow at symbol {position} (max depth {depth})")]
    StackOverflow {
        /// 0-based character index in the interpreted string.
        position: usize,
        /// Configured maximum depth.
        depth: usize,
    },

    /// Rewriting would produce a string longer than the configured cap.
    #[error("generation {generation} would grow to {length} symbols (limit {limit})")]
    GenerationLimit {
        /// 1-based generation that would overflow.
        generation: u32,
        /// Projected length of that generation.
        length: usize,
        /// Configured cap.
        limit: usize,
    },

    /// More rewriting generations were requested than the configured cap.
    #[error("{requested} generations requested (limit {limit})")]
    TooManyGenerations {
        /// Requested generation count.
        requested: u32,
        /// Configured cap.
        limit: u32,
    },

    /// Invalid invocation parameters.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl LSystemError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedGrammar {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::Config(reason.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LSystemError>;
