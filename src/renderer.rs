//! Textured cube render pass with depth testing.
//!
//! [`CubeRenderer`] owns the pipeline, a single uniform buffer holding the
//! model-view-projection matrix, the texture bind group and a depth buffer that
//! follows the surface size.
//!
//! # Bind Groups
//!
//! - **Group 0**: [`Uniforms`] (MVP matrix, overlay mix factor)
//! - **Group 1**: base texture + sampler, overlay texture + sampler
//!
//! The overlay is mixed over the base by `overlay.a * mix_factor`, so binding a
//! fully transparent overlay leaves the base untouched.

use glam::{Mat4, Vec3};

use crate::gpu::GpuContext;
use crate::mesh::{Mesh, Vertex};
use crate::shader::{FRAGMENT_ENTRY, ShaderModules, VERTEX_ENTRY};
use crate::texture::Texture;

/// Background color behind the cube.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.2,
    g: 0.3,
    b: 0.3,
    a: 1.0,
};

/// Axis the cube spins around (normalized before use).
pub const SPIN_AXIS: Vec3 = Vec3::new(0.5, 1.0, 0.0);

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Per-frame uniforms shared by both shader stages.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    /// Combined projection * view * model matrix.
    pub mvp: [[f32; 4]; 4],
    /// Weight of the overlay texture, scaled by its alpha.
    pub mix_factor: f32,
    _padding: [f32; 3],
}

impl Uniforms {
    pub fn new(mvp: Mat4, mix_factor: f32) -> Self {
        Self {
            mvp: mvp.to_cols_array_2d(),
            mix_factor,
            _padding: [0.0; 3],
        }
    }
}

/// Perspective projection parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Projection {
    /// Right-handed perspective matrix for the given aspect ratio.
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), aspect, self.near, self.far)
    }
}

/// Model matrix of the cube after `seconds` of spinning (one radian per second).
pub fn spin_matrix(seconds: f32) -> Mat4 {
    Mat4::from_axis_angle(SPIN_AXIS.normalize(), seconds)
}

/// Draws a textured mesh into the window surface.
pub struct CubeRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    depth_size: (u32, u32),
    /// Projection combined with the camera's view matrix each frame.
    pub projection: Projection,
    /// Overlay weight written to the uniforms each frame.
    pub mix_factor: f32,
}

impl CubeRenderer {
    /// Build the pipeline around compiled shaders and bind both textures.
    pub fn new(
        gpu: &GpuContext,
        shaders: &ShaderModules,
        base: &Texture,
        overlay: &Texture,
        mix_factor: f32,
    ) -> Self {
        let device = &gpu.device;

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Cube Uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };
        let sampler_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        };

        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Texture Bind Group Layout"),
                entries: &[
                    texture_entry(0),
                    sampler_entry(1),
                    texture_entry(2),
                    sampler_entry(3),
                ],
            });

        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Texture Bind Group"),
            layout: &texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&base.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&base.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&overlay.view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&overlay.sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Cube Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Cube Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shaders.vertex,
                entry_point: Some(VERTEX_ENTRY),
                buffers: &[Vertex::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shaders.fragment,
                entry_point: Some(FRAGMENT_ENTRY),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                front_face: wgpu::FrontFace::Ccw,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            texture_bind_group,
            depth_view: Self::create_depth_view(gpu),
            depth_size: (gpu.width(), gpu.height()),
            projection: Projection::default(),
            mix_factor,
        }
    }

    fn create_depth_view(gpu: &GpuContext) -> wgpu::TextureView {
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: gpu.width(),
                height: gpu.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Recreate the depth buffer if the surface changed size.
    pub fn ensure_depth_size(&mut self, gpu: &GpuContext) {
        if self.depth_size != (gpu.width(), gpu.height()) {
            self.depth_view = Self::create_depth_view(gpu);
            self.depth_size = (gpu.width(), gpu.height());
        }
    }

    /// Draw `mesh` with the given view and model matrices and present the frame.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    pub fn render(&mut self, gpu: &GpuContext, mesh: &Mesh, view: Mat4, model: Mat4) {
        let output = match gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!("surface lost or outdated, reconfiguring");
                gpu.reconfigure();
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!("timed out acquiring surface texture, skipping frame");
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        self.ensure_depth_size(gpu);

        let mvp = self.projection.matrix(gpu.aspect()) * view * model;
        gpu.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[Uniforms::new(mvp, self.mix_factor)]),
        );

        let target = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Cube Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Cube Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            render_pass.set_bind_group(1, &self.texture_bind_group, &[]);
            render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            render_pass.draw(0..mesh.vertex_count, 0..1);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn uniforms_match_wgsl_layout() {
        // mat4x4<f32> + f32, rounded up to 16-byte struct alignment.
        assert_eq!(std::mem::size_of::<Uniforms>(), 80);
    }

    #[test]
    fn uniforms_store_column_major_mvp() {
        let mvp = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let uniforms = Uniforms::new(mvp, 0.2);
        assert_eq!(uniforms.mvp[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(uniforms.mix_factor, 0.2);
    }

    #[test]
    fn default_projection() {
        let projection = Projection::default();
        assert_eq!(projection.fov_y_degrees, 45.0);
        assert_eq!(projection.near, 0.1);
        assert_eq!(projection.far, 100.0);
    }

    #[test]
    fn projection_maps_near_and_far_planes() {
        let proj = Projection::default().matrix(4.0 / 3.0);

        let near = proj * Vec4::new(0.0, 0.0, -0.1, 1.0);
        assert!((near.z / near.w).abs() < 1e-5);

        let far = proj * Vec4::new(0.0, 0.0, -100.0, 1.0);
        assert!((far.z / far.w - 1.0).abs() < 1e-5);
    }

    #[test]
    fn spin_keeps_axis_fixed() {
        let axis = SPIN_AXIS.normalize();
        for seconds in [0.0, 0.5, 1.7, 12.0] {
            let rotated = spin_matrix(seconds).transform_vector3(axis);
            assert!(rotated.abs_diff_eq(axis, 1e-5));
        }
    }

    #[test]
    fn spin_starts_at_identity() {
        assert!(spin_matrix(0.0).abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }
}
