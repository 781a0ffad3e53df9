//! Cube geometry and its GPU vertex buffer.
//!
//! The cube is drawn non-indexed: 6 faces, 2 triangles each, 36 vertices. Every
//! face carries its own corners so texture coordinates stay per-face.
//!
//! # Vertex Layout
//!
//! | Attribute | Format    | Offset | Shader Location |
//! |-----------|-----------|--------|-----------------|
//! | position  | Float32x3 | 0      | 0               |
//! | uv        | Float32x2 | 12     | 1               |

use wgpu::util::DeviceExt;

use crate::gpu::GpuContext;

/// Number of vertices in [`cube_vertices`].
pub const CUBE_VERTEX_COUNT: u32 = 36;

/// A vertex with a model-space position and texture coordinates.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    /// Texture coordinates with v growing downward, matching image row order.
    pub uv: [f32; 2],
}

impl Vertex {
    /// The wgpu vertex buffer layout for this vertex type.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            // uv
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x2,
            },
        ],
    };

    pub fn new(position: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, uv }
    }
}

// Corners per face, counter-clockwise seen from outside:
// bottom-left, bottom-right, top-right, top-left.
#[rustfmt::skip]
const FACES: [[[f32; 3]; 4]; 6] = [
    // Front (Z+)
    [[-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5]],
    // Back (Z-)
    [[ 0.5, -0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5]],
    // Top (Y+)
    [[-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5]],
    // Bottom (Y-)
    [[-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5]],
    // Right (X+)
    [[ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5]],
    // Left (X-)
    [[-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5]],
];

const CORNER_UVS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

/// The 36 vertices of a unit cube centered at the origin.
pub fn cube_vertices() -> Vec<Vertex> {
    FACES
        .iter()
        .flat_map(|corners| {
            [0, 1, 2, 2, 3, 0].map(|i| Vertex::new(corners[i], CORNER_UVS[i]))
        })
        .collect()
}

/// GPU-resident, non-indexed geometry.
pub struct Mesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) vertex_count: u32,
}

impl Mesh {
    /// Upload vertices to a new vertex buffer.
    pub fn new(gpu: &GpuContext, vertices: &[Vertex], label: &str) -> Self {
        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        Self {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
        }
    }

    /// Unit cube centered at the origin.
    pub fn cube(gpu: &GpuContext) -> Self {
        Self::new(gpu, &cube_vertices(), "Cube Vertex Buffer")
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 20);
        assert_eq!(Vertex::LAYOUT.array_stride, 20);
    }

    #[test]
    fn cube_has_36_vertices_within_unit_bounds() {
        let vertices = cube_vertices();
        assert_eq!(vertices.len() as u32, CUBE_VERTEX_COUNT);
        for v in &vertices {
            assert!(v.position.iter().all(|c| c.abs() == 0.5));
            assert!(v.uv.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn triangles_wind_counter_clockwise_from_outside() {
        let vertices = cube_vertices();
        for tri in vertices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|v| Vec3::from(v.position));
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0, "inward triangle at {centroid}");
        }
    }

    #[test]
    fn each_face_covers_full_texture() {
        let vertices = cube_vertices();
        for face in vertices.chunks_exact(6) {
            let has = |uv: [f32; 2]| face.iter().any(|v| v.uv == uv);
            assert!(has([0.0, 0.0]) && has([1.0, 0.0]) && has([1.0, 1.0]) && has([0.0, 1.0]));
        }
    }
}
