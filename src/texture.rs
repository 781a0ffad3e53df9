use std::path::Path;

use crate::error::{Error, Result};
use crate::gpu::GpuContext;

/// Light and dark squares of the fallback checkerboard.
const CHECKER_LIGHT: [u8; 4] = [214, 186, 140, 255];
const CHECKER_DARK: [u8; 4] = [92, 64, 41, 255];

/// A GPU texture that can be bound to shaders.
#[derive(Debug)]
pub struct Texture {
    #[allow(dead_code)]
    pub(crate) texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    pub(crate) sampler: wgpu::Sampler,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Create a texture from raw RGBA data.
    pub fn from_rgba(gpu: &GpuContext, data: &[u8], width: u32, height: u32, label: &str) -> Self {
        use wgpu::util::DeviceExt;

        let texture = gpu.device.create_texture_with_data(
            &gpu.queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            data,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = gpu.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{} Sampler", label)),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            width,
            height,
        }
    }

    /// Load a texture from an image file. Any format the `image` crate decodes works.
    pub fn from_file(gpu: &GpuContext, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|source| Error::Texture {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let (width, height) = img.dimensions();
        tracing::info!(path = %path.display(), width, height, "loaded texture");
        Ok(Self::from_rgba(gpu, &img, width, height, &path.display().to_string()))
    }

    /// Procedural checkerboard used when no texture file is configured.
    pub fn checkerboard(gpu: &GpuContext, size: u32, cells: u32) -> Self {
        let data = checkerboard_pixels(size, cells);
        Self::from_rgba(gpu, &data, size, size, "Checkerboard Texture")
    }

    /// A 1x1 fully transparent texture. Mixing it over anything is a no-op.
    pub fn blank(gpu: &GpuContext) -> Self {
        Self::from_rgba(gpu, &[0, 0, 0, 0], 1, 1, "Blank Texture")
    }
}

/// RGBA8 pixels of a `size`x`size` checkerboard with `cells` squares per side.
///
/// The top-left square is light. `cells` of zero is treated as one.
pub fn checkerboard_pixels(size: u32, cells: u32) -> Vec<u8> {
    let cell = (size / cells.max(1)).max(1);
    let mut data = Vec::with_capacity((size * size * 4) as usize);

    for y in 0..size {
        for x in 0..size {
            let light = ((x / cell) + (y / cell)) % 2 == 0;
            data.extend_from_slice(if light { &CHECKER_LIGHT } else { &CHECKER_DARK });
        }
    }

    data
}
