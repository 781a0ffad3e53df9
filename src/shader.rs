//! Vertex/fragment shader pair loaded from WGSL files on disk.
//!
//! The two stages live in separate files (`vertex.wgsl` and `fragment.wgsl`) inside
//! one directory. Loading reads the sources; compiling turns each into a
//! [`wgpu::ShaderModule`] and reports validation failures as [`Error::ShaderCompile`]
//! instead of letting wgpu's uncaptured-error handler abort the process.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::gpu::GpuContext;

/// File name of the vertex stage inside a shader directory.
pub const VERTEX_FILE: &str = "vertex.wgsl";
/// File name of the fragment stage inside a shader directory.
pub const FRAGMENT_FILE: &str = "fragment.wgsl";

/// Entry point expected in the vertex source.
pub const VERTEX_ENTRY: &str = "vs_main";
/// Entry point expected in the fragment source.
pub const FRAGMENT_ENTRY: &str = "fs_main";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// WGSL sources for both stages.
#[derive(Clone, Debug)]
pub struct ShaderPair {
    pub vertex: String,
    pub fragment: String,
    dir: PathBuf,
}

/// Compiled modules ready for pipeline creation.
pub struct ShaderModules {
    pub vertex: wgpu::ShaderModule,
    pub fragment: wgpu::ShaderModule,
}

impl ShaderPair {
    /// Read `vertex.wgsl` and `fragment.wgsl` from `dir`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let vertex = read_source(&dir.join(VERTEX_FILE))?;
        let fragment = read_source(&dir.join(FRAGMENT_FILE))?;
        tracing::debug!(dir = %dir.display(), "loaded shader sources");

        Ok(Self {
            vertex,
            fragment,
            dir,
        })
    }

    /// Directory the sources were read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Compile both stages, vertex first.
    pub fn compile(&self, gpu: &GpuContext) -> Result<ShaderModules> {
        let vertex = compile_stage(gpu, ShaderStage::Vertex, &self.vertex)?;
        let fragment = compile_stage(gpu, ShaderStage::Fragment, &self.fragment)?;
        tracing::info!(dir = %self.dir.display(), "compiled shader pair");
        Ok(ShaderModules { vertex, fragment })
    }
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::ShaderIo {
        path: path.to_path_buf(),
        source,
    })
}

fn compile_stage(gpu: &GpuContext, stage: ShaderStage, source: &str) -> Result<wgpu::ShaderModule> {
    gpu.device.push_error_scope(wgpu::ErrorFilter::Validation);

    let module = gpu
        .device
        .create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(match stage {
                ShaderStage::Vertex => "Vertex Shader",
                ShaderStage::Fragment => "Fragment Shader",
            }),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

    match pollster::block_on(gpu.device.pop_error_scope()) {
        None => Ok(module),
        Some(err) => Err(Error::ShaderCompile {
            stage,
            message: err.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_both_stages() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(VERTEX_FILE), "// vertex").unwrap();
        fs::write(dir.path().join(FRAGMENT_FILE), "// fragment").unwrap();

        let pair = ShaderPair::load(dir.path()).unwrap();
        assert_eq!(pair.vertex, "// vertex");
        assert_eq!(pair.fragment, "// fragment");
        assert_eq!(pair.dir(), dir.path());
    }

    #[test]
    fn missing_fragment_names_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(VERTEX_FILE), "// vertex").unwrap();

        let err = ShaderPair::load(dir.path()).unwrap_err();
        match err {
            Error::ShaderIo { path, .. } => assert_eq!(path, dir.path().join(FRAGMENT_FILE)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bundled_shaders_declare_entry_points() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders");
        let pair = ShaderPair::load(&dir).unwrap();
        assert!(pair.vertex.contains(&format!("fn {VERTEX_ENTRY}(")));
        assert!(pair.fragment.contains(&format!("fn {FRAGMENT_ENTRY}(")));
    }

    #[test]
    fn stage_names() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }
}
