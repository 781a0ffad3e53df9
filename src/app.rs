//! Window, event loop and per-frame wiring between input, camera and renderer.
//!
//! ```no_run
//! use cubecam::{AppConfig, run};
//!
//! fn main() -> Result<(), cubecam::Error> {
//!     run(AppConfig::new().title("cube").size(500, 500).inverted_y(true))
//! }
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowAttributes, WindowId};

use crate::camera::{Camera, CameraMovement};
use crate::error::{Error, Result};
use crate::gpu::GpuContext;
use crate::input::Input;
use crate::mesh::Mesh;
use crate::renderer::{CubeRenderer, spin_matrix};
use crate::shader::ShaderPair;
use crate::texture::Texture;

/// Keys driving the camera each frame.
pub const MOVEMENT_BINDINGS: [(KeyCode, CameraMovement); 4] = [
    (KeyCode::KeyW, CameraMovement::Forward),
    (KeyCode::KeyS, CameraMovement::Backward),
    (KeyCode::KeyA, CameraMovement::Left),
    (KeyCode::KeyD, CameraMovement::Right),
];

const CHECKERBOARD_SIZE: u32 = 256;
const CHECKERBOARD_CELLS: u32 = 8;

/// Startup configuration for the demo window.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    /// Flip vertical mouse look.
    pub inverted_y: bool,
    /// Directory holding `vertex.wgsl` and `fragment.wgsl`.
    pub shader_dir: PathBuf,
    /// Base texture. A checkerboard is generated when unset.
    pub texture: Option<PathBuf>,
    /// Texture mixed over the base. Nothing is mixed when unset.
    pub overlay: Option<PathBuf>,
    /// Overlay weight, scaled by the overlay's alpha.
    pub mix_factor: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "cubecam".to_string(),
            width: 800,
            height: 600,
            resizable: false,
            inverted_y: false,
            shader_dir: PathBuf::from("shaders"),
            texture: None,
            overlay: None,
            mix_factor: 0.2,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn inverted_y(mut self, inverted_y: bool) -> Self {
        self.inverted_y = inverted_y;
        self
    }

    pub fn shader_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.shader_dir = dir.into();
        self
    }

    pub fn texture(mut self, path: impl Into<PathBuf>) -> Self {
        self.texture = Some(path.into());
        self
    }

    pub fn overlay(mut self, path: impl Into<PathBuf>) -> Self {
        self.overlay = Some(path.into());
        self
    }

    /// Set the overlay weight, clamped to [0, 1].
    pub fn mix_factor(mut self, mix_factor: f32) -> Self {
        self.mix_factor = mix_factor.clamp(0.0, 1.0);
        self
    }
}

/// Open the window and run the render loop until it is closed.
///
/// Startup failures (window, GPU, shaders, textures) end the loop and are returned.
pub fn run(config: AppConfig) -> Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = CubecamApp::Pending(config);
    event_loop.run_app(&mut app)?;

    match app {
        CubecamApp::Failed(err) => Err(err),
        _ => Ok(()),
    }
}

enum CubecamApp {
    Pending(AppConfig),
    Running(Box<Demo>),
    Failed(Error),
}

/// Everything alive while the window is open.
struct Demo {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: CubeRenderer,
    cube: Mesh,
    camera: Camera,
    input: Input,
    start_time: Instant,
    last_frame: Instant,
}

impl Demo {
    fn create(event_loop: &ActiveEventLoop, config: &AppConfig) -> Result<Self> {
        let window_attrs = WindowAttributes::default()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height))
            .with_resizable(config.resizable);

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = GpuContext::new(window.clone())?;

        let shaders = ShaderPair::load(&config.shader_dir)?.compile(&gpu)?;

        let base = match &config.texture {
            Some(path) => Texture::from_file(&gpu, path)?,
            None => {
                tracing::info!("no texture configured, using checkerboard");
                Texture::checkerboard(&gpu, CHECKERBOARD_SIZE, CHECKERBOARD_CELLS)
            }
        };
        let overlay = match &config.overlay {
            Some(path) => Texture::from_file(&gpu, path)?,
            None => Texture::blank(&gpu),
        };

        let renderer = CubeRenderer::new(&gpu, &shaders, &base, &overlay, config.mix_factor);
        let cube = Mesh::cube(&gpu);

        let mut demo = Self {
            window,
            gpu,
            renderer,
            cube,
            camera: Camera::new(config.inverted_y),
            input: Input::new(),
            start_time: Instant::now(),
            last_frame: Instant::now(),
        };
        demo.capture_cursor();

        tracing::info!(
            width = demo.gpu.width(),
            height = demo.gpu.height(),
            inverted_y = config.inverted_y,
            "window ready"
        );
        Ok(demo)
    }

    /// Hide and grab the cursor. A locked cursor feeds raw motion; a confined
    /// one falls back to absolute positions.
    fn capture_cursor(&mut self) {
        self.window.set_cursor_visible(false);
        match self.window.set_cursor_grab(CursorGrabMode::Locked) {
            Ok(()) => self.input.set_raw_motion(true),
            Err(locked) => {
                tracing::debug!("cursor lock unavailable ({locked}), confining instead");
                if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::Confined) {
                    tracing::warn!("could not grab cursor: {e}");
                }
                self.input.set_raw_motion(false);
            }
        }
    }

    fn frame(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        for (key, movement) in MOVEMENT_BINDINGS {
            if self.input.key_down(key) {
                self.camera.process_keyboard(movement, dt);
            }
        }

        // Window y grows downward; the camera pitches up for positive offsets.
        let delta = self.input.mouse_delta();
        self.camera.process_mouse_movement(delta.x, -delta.y, true);

        tracing::trace!(
            position = ?self.camera.position,
            yaw = self.camera.yaw(),
            pitch = self.camera.pitch(),
            "camera"
        );

        let view = self.camera.view_matrix();
        let model = spin_matrix(self.start_time.elapsed().as_secs_f32());
        self.renderer.render(&self.gpu, &self.cube, view, model);

        self.input.end_frame();
    }
}

impl ApplicationHandler for CubecamApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let CubecamApp::Pending(config) = self {
            match Demo::create(event_loop, config) {
                Ok(demo) => *self = CubecamApp::Running(Box::new(demo)),
                Err(err) => {
                    tracing::error!("startup failed: {err}");
                    event_loop.exit();
                    *self = CubecamApp::Failed(err);
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let CubecamApp::Running(demo) = self else {
            return;
        };

        demo.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                tracing::info!("exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                demo.gpu.resize(size.width, size.height);
            }
            WindowEvent::Focused(true) => {
                demo.capture_cursor();
            }
            WindowEvent::RedrawRequested => {
                demo.frame();
                demo.window.request_redraw();
            }
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        if let CubecamApp::Running(demo) = self {
            demo.input.handle_device_event(&event);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let CubecamApp::Running(demo) = self {
            demo.window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = AppConfig::default();
        assert_eq!(config.title, "cubecam");
        assert_eq!((config.width, config.height), (800, 600));
        assert!(!config.resizable);
        assert!(!config.inverted_y);
        assert_eq!(config.shader_dir, PathBuf::from("shaders"));
        assert!(config.texture.is_none());
        assert!(config.overlay.is_none());
        assert_eq!(config.mix_factor, 0.2);
    }

    #[test]
    fn builder_sets_fields() {
        let config = AppConfig::new()
            .title("box")
            .size(500, 500)
            .resizable(true)
            .inverted_y(true)
            .shader_dir("assets/shaders")
            .texture("container.jpg")
            .overlay("face.png")
            .mix_factor(0.35);

        assert_eq!(config.title, "box");
        assert_eq!((config.width, config.height), (500, 500));
        assert!(config.resizable);
        assert!(config.inverted_y);
        assert_eq!(config.shader_dir, PathBuf::from("assets/shaders"));
        assert_eq!(config.texture, Some(PathBuf::from("container.jpg")));
        assert_eq!(config.overlay, Some(PathBuf::from("face.png")));
        assert_eq!(config.mix_factor, 0.35);
    }

    #[test]
    fn mix_factor_is_clamped() {
        assert_eq!(AppConfig::new().mix_factor(3.0).mix_factor, 1.0);
        assert_eq!(AppConfig::new().mix_factor(-1.0).mix_factor, 0.0);
    }

    #[test]
    fn bindings_cover_every_direction_once() {
        for movement in [
            CameraMovement::Forward,
            CameraMovement::Backward,
            CameraMovement::Left,
            CameraMovement::Right,
        ] {
            let count = MOVEMENT_BINDINGS
                .iter()
                .filter(|(_, bound)| *bound == movement)
                .count();
            assert_eq!(count, 1, "{movement:?}");
        }
    }
}
