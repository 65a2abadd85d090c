//! # lsystem-tree
//!
//! Grammar-driven plant generation for a simple 3D viewer.
//!
//! A [`Grammar`] (axiom + production rules) is rewritten for a number of
//! generations by the [`Rewriter`]; the resulting symbol string is walked by
//! the [`TurtleInterpreter`], which emits an ordered list of [`Edge`]s; the
//! [`GeometryBuffer`] flattens those into position and color streams ready for
//! a line-list vertex buffer. The [`scene`] module holds the ground, skybox and
//! camera data the viewer draws around the plant.
//!
//! [`LSystemEngine`] runs the whole pipeline from a [`GenerationConfig`].

pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod grammar;
pub mod interpreter;
pub mod logging;
pub mod rewriter;
pub mod scene;
pub mod turtle;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use geometry::*;
pub use grammar::*;
pub use interpreter::*;
pub use rewriter::*;
pub use turtle::*;
