//! Turtle state and operations for planar plant interpretation.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A straight line segment produced by one draw step.
///
/// Edges are immutable once created; their order in the output list is also
/// their draw order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub start: Vec3,
    pub end: Vec3,
}

impl Edge {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Unit direction from `start` to `end` (zero for a degenerate edge).
    pub fn direction(&self) -> Vec3 {
        (self.end - self.start).normalize_or_zero()
    }
}

/// Which edge the next draw step continues from.
///
/// A `]` restores a saved branch point for exactly one following `F`; after
/// that draw the turtle goes back to extending the most recently appended
/// edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cursor {
    /// Continue from the last edge in the list.
    #[default]
    Append,
    /// Continue from the end point of the edge at this index.
    Restored(usize),
    /// Continue from the turtle origin; the saved branch point predates the
    /// first edge.
    RestoredRoot,
}

/// A saved branch point: the active edge and heading at the time of `[`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Index of the active edge, or `None` if no edge existed yet.
    pub edge: Option<usize>,
    /// Heading in degrees.
    pub heading: f32,
}

/// The state of the plant turtle.
///
/// Position is implicit: it is the end point of the active edge (see
/// [`Cursor`]). Heading is a single angle about the fixed Z axis,
/// accumulated additively and never normalized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Accumulated heading in degrees. `0` points along +Y.
    pub heading: f32,
    pub cursor: Cursor,
}

impl TurtleState {
    /// Rotation for the current heading about the world Z axis.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_z(self.heading.to_radians())
    }

    /// Returns the turtle's up direction (local Y) in world space.
    pub fn up(&self) -> Vec3 {
        self.rotation() * Vec3::Y
    }

    /// Adds `degrees` to the heading (positive turns left, counter-clockwise).
    pub fn turn(&mut self, degrees: f32) {
        self.heading += degrees;
    }

    /// Resolves the active edge index against an edge list of length `len`.
    ///
    /// Returns `None` when the turtle is at the root (no edge to continue
    /// from).
    pub fn active_edge(&self, len: usize) -> Option<usize> {
        match self.cursor {
            Cursor::Append => len.checked_sub(1),
            Cursor::Restored(idx) => Some(idx),
            Cursor::RestoredRoot => None,
        }
    }
}

/// Operations that can be performed by the plant turtle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TurtleOp {
    /// Draw one edge forward (`F`).
    Draw,
    /// Change heading by `sign * turn_angle` (`+` is `1.0`, `-` is `-1.0`).
    Turn(f32),
    /// Save the active edge and heading onto the branch stack (`[`).
    Push,
    /// Restore the most recently saved branch point (`]`).
    Pop,
    /// No-op: symbol has no registered meaning.
    Ignore,
}
