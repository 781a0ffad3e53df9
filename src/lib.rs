//! # cubecam
//!
//! **A textured, spinning cube you can fly around.**
//!
//! The heart of the crate is [`Camera`]: a free-fly camera that keeps its
//! orientation as yaw and pitch angles, moves along its own basis on keyboard
//! input and turns on mouse input. Around it sit thin collaborators that open a
//! window, compile a WGSL shader pair from disk, load textures, upload a cube and
//! draw it every frame.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cubecam::{AppConfig, run};
//!
//! fn main() -> Result<(), cubecam::Error> {
//!     run(AppConfig::new().texture("container.jpg"))
//! }
//! ```
//!
//! ## Controls
//!
//! - **W/S**: Move forward/backward
//! - **A/D**: Strafe left/right
//! - **Mouse**: Look around (pitch stops at ±89°)
//! - **Escape**: Quit

mod app;
mod camera;
mod error;
mod gpu;
mod input;
mod mesh;
mod renderer;
mod shader;
mod texture;

pub use app::{AppConfig, MOVEMENT_BINDINGS, run};
pub use camera::{Camera, CameraMovement};
pub use error::{Error, Result};
pub use gpu::GpuContext;
pub use input::Input;
pub use mesh::{CUBE_VERTEX_COUNT, Mesh, Vertex, cube_vertices};
pub use renderer::{CLEAR_COLOR, CubeRenderer, Projection, SPIN_AXIS, Uniforms, spin_matrix};
pub use shader::{ShaderModules, ShaderPair, ShaderStage};
pub use texture::{Texture, checkerboard_pixels};

// Re-export glam math types for convenience
pub use glam::{Mat4, Vec2, Vec3};

// Re-export commonly used winit types for convenience
pub use winit::keyboard::KeyCode;
