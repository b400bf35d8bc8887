//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Bytes between consecutive vertices in a buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
    /// Byte offset of `color` (location 1); `position` sits at 0
    pub const COLOR_OFFSET: usize = std::mem::size_of::<[f32; 2]>();

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// View a vertex list as raw bytes for upload
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.53, 0.81, 0.92, 1.0];
    pub const GRASS: [f32; 4] = [0.30, 0.60, 0.20, 1.0];
    pub const SOIL: [f32; 4] = [0.45, 0.30, 0.15, 1.0];
    pub const MARKER: [f32; 4] = [1.0, 1.0, 1.0, 0.8];
    pub const THROW_LINE: [f32; 4] = [0.9, 0.1, 0.1, 1.0];
    pub const RUNNER: [f32; 4] = [0.2, 0.3, 0.8, 1.0];
    pub const RUNNER_HEAD: [f32; 4] = [0.96, 0.80, 0.65, 1.0];
    pub const AIM_ARROW: [f32; 4] = [1.0, 0.85, 0.1, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(Vertex::STRIDE, 24);
        assert_eq!(Vertex::COLOR_OFFSET, 8);
        let verts = [Vertex::new(1.0, 2.0, colors::GRASS); 3];
        assert_eq!(as_bytes(&verts).len(), 72);
    }
}
