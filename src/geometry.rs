//! Flattening edges into vertex streams for line-list rendering.

use crate::turtle::Edge;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Default line color (white).
pub const DEFAULT_LINE_COLOR: Vec3 = Vec3::ONE;

/// Interleaved vertex layout (24 bytes):
///
///  offset  0  position  [f32; 3]
///  offset 12  color     [f32; 3]
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Axis-aligned bounds of a point set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Parallel position and color streams; two vertices per edge.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryBuffer {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec3>,
}

impl GeometryBuffer {
    /// Emits `start, end` for every edge, in edge order, with a uniform color.
    pub fn flatten(edges: &[Edge], color: Vec3) -> Self {
        let mut positions = Vec::with_capacity(edges.len() * 2);
        for edge in edges {
            positions.push(edge.start);
            positions.push(edge.end);
        }
        let colors = vec![color; positions.len()];
        Self { positions, colors }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Interleaves positions and colors for a single vertex buffer.
    pub fn interleaved(&self) -> Vec<LineVertex> {
        self.positions
            .iter()
            .zip(&self.colors)
            .map(|(p, c)| LineVertex {
                position: p.to_array(),
                color: c.to_array(),
            })
            .collect()
    }

    /// Planar layout: every position, then every color, as raw `f32` bytes.
    pub fn planar_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.vertex_count() * 2 * std::mem::size_of::<Vec3>());
        bytes.extend_from_slice(bytemuck::cast_slice(&self.positions));
        bytes.extend_from_slice(bytemuck::cast_slice(&self.colors));
        bytes
    }

    /// Bounds of all positions, or `None` when empty.
    pub fn bounds(&self) -> Option<Bounds> {
        let first = *self.positions.first()?;
        let (min, max) = self
            .positions
            .iter()
            .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        Some(Bounds { min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges() -> Vec<Edge> {
        vec![
            Edge::new(Vec3::ZERO, Vec3::Y),
            Edge::new(Vec3::Y, Vec3::new(-1.0, 2.0, 0.0)),
        ]
    }

    #[test]
    fn two_vertices_per_edge_in_order() {
        let buf = GeometryBuffer::flatten(&edges(), DEFAULT_LINE_COLOR);
        assert_eq!(buf.vertex_count(), 4);
        assert_eq!(
            buf.positions,
            vec![Vec3::ZERO, Vec3::Y, Vec3::Y, Vec3::new(-1.0, 2.0, 0.0)]
        );
        assert!(buf.colors.iter().all(|c| *c == Vec3::ONE));
    }

    #[test]
    fn empty_edges_give_empty_buffer() {
        let buf = GeometryBuffer::flatten(&[], Vec3::X);
        assert!(buf.is_empty());
        assert!(buf.colors.is_empty());
        assert_eq!(buf.bounds(), None);
        assert!(buf.planar_bytes().is_empty());
    }

    #[test]
    fn interleaved_matches_planar_streams() {
        let buf = GeometryBuffer::flatten(&edges(), Vec3::new(0.5, 0.25, 0.0));
        let verts = buf.interleaved();
        assert_eq!(verts.len(), 4);
        assert_eq!(verts[3].position, [-1.0, 2.0, 0.0]);
        assert_eq!(verts[3].color, [0.5, 0.25, 0.0]);
        assert_eq!(std::mem::size_of::<LineVertex>(), 24);
    }

    #[test]
    fn planar_bytes_put_positions_before_colors() {
        let buf = GeometryBuffer::flatten(&edges(), Vec3::ONE);
        let bytes = buf.planar_bytes();
        assert_eq!(bytes.len(), 4 * 2 * 12);
        let floats: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        assert_eq!(&floats[9..12], &[-1.0, 2.0, 0.0]);
        assert_eq!(&floats[12..15], &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn bounds_cover_all_points() {
        let buf = GeometryBuffer::flatten(&edges(), Vec3::ONE);
        let b = buf.bounds().unwrap();
        assert_eq!(b.min, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(b.max, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(b.center(), Vec3::new(-0.5, 1.0, 0.0));
    }
}
