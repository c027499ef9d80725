//! Vertex data and procedural shapes.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::resources::Color;

/// How vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    #[default]
    TriangleList,
    LineList,
}

/// Interleaved vertex layout shared by every pipeline.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

/// CPU-side geometry. Only `positions` is mandatory; missing attributes get
/// neutral defaults when interleaved.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub positions: Vec<[f32; 3]>,
    pub normals: Option<Vec<[f32; 3]>>,
    pub uvs: Option<Vec<[f32; 2]>>,
    pub colors: Option<Vec<[f32; 4]>>,
    pub indices: Option<Vec<u32>>,
    pub topology: Topology,
}

impl Geometry {
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of elements a draw call consumes (indices if present).
    #[must_use]
    pub fn draw_count(&self) -> u32 {
        self.indices
            .as_ref()
            .map_or(self.positions.len(), Vec::len) as u32
    }

    /// Packs all attributes into [`Vertex`] records.
    #[must_use]
    pub fn interleave(&self) -> Vec<Vertex> {
        (0..self.positions.len())
            .map(|i| Vertex {
                position: self.positions[i],
                normal: self
                    .normals
                    .as_ref()
                    .and_then(|n| n.get(i).copied())
                    .unwrap_or([0.0, 0.0, 1.0]),
                uv: self.uvs.as_ref().and_then(|u| u.get(i).copied()).unwrap_or([0.0, 0.0]),
                color: self
                    .colors
                    .as_ref()
                    .and_then(|c| c.get(i).copied())
                    .unwrap_or([1.0, 1.0, 1.0, 1.0]),
            })
            .collect()
    }

    /// Axis-aligned bounds of the positions, `None` when empty.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.positions.iter().map(|&p| Vec3::from(p));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    // ========================================================================
    // Primitives
    // ========================================================================

    /// A box centered at the origin with 24 vertices (4 per face), faces in
    /// `+X, -X, +Y, -Y, +Z, -Z` order.
    #[must_use]
    pub fn new_box(width: f32, height: f32, depth: f32) -> Self {
        let half = Vec3::new(width, height, depth) * 0.5;

        // (normal, right, up) with right x up == normal
        let faces = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];
        let corners = [(-1.0, -1.0, [0.0, 1.0]), (1.0, -1.0, [1.0, 1.0]), (1.0, 1.0, [1.0, 0.0]), (-1.0, 1.0, [0.0, 0.0])];

        let mut positions = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(24);
        let mut uvs = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (face, (normal, right, up)) in faces.into_iter().enumerate() {
            let base = (face * 4) as u32;
            for (su, sv, uv) in corners {
                positions.push(((normal + right * su + up * sv) * half).to_array());
                normals.push(normal.to_array());
                uvs.push(uv);
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self {
            positions,
            normals: Some(normals),
            uvs: Some(uvs),
            colors: None,
            indices: Some(indices),
            topology: Topology::TriangleList,
        }
    }

    /// Three colored lines from the origin: X red, Y green, Z blue.
    #[must_use]
    pub fn new_axes(size: f32) -> Self {
        let axes = [
            (Vec3::X, [1.0, 0.0, 0.0, 1.0]),
            (Vec3::Y, [0.0, 1.0, 0.0, 1.0]),
            (Vec3::Z, [0.0, 0.0, 1.0, 1.0]),
        ];

        let mut positions = Vec::with_capacity(6);
        let mut colors = Vec::with_capacity(6);
        for (axis, color) in axes {
            positions.push([0.0; 3]);
            positions.push((axis * size).to_array());
            colors.extend_from_slice(&[color, color]);
        }

        Self {
            positions,
            colors: Some(colors),
            topology: Topology::LineList,
            ..Default::default()
        }
    }

    /// A square grid on the XZ plane with `divisions` cells per side. The two
    /// center lines use a darker color.
    #[must_use]
    pub fn new_grid(size: f32, divisions: u32) -> Self {
        let divisions = divisions.max(1);
        let center_color = Color::from_hex(0x44_4444).to_vec4(1.0).to_array();
        let line_color = Color::from_hex(0x88_8888).to_vec4(1.0).to_array();

        let step = size / divisions as f32;
        let half = size / 2.0;
        let center = divisions / 2;

        let mut positions = Vec::with_capacity((divisions as usize + 1) * 4);
        let mut colors = Vec::with_capacity(positions.capacity());
        for i in 0..=divisions {
            let k = -half + i as f32 * step;
            positions.extend_from_slice(&[[-half, 0.0, k], [half, 0.0, k], [k, 0.0, -half], [k, 0.0, half]]);
            let color = if i == center { center_color } else { line_color };
            colors.extend_from_slice(&[color; 4]);
        }

        Self {
            positions,
            colors: Some(colors),
            topology: Topology::LineList,
            ..Default::default()
        }
    }
}
