use std::collections::HashSet;

use glam::Vec2;
use winit::event::{DeviceEvent, ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Tracks keyboard state and turns cursor motion into per-frame look deltas.
///
/// Cursor deltas come from absolute `CursorMoved` positions by default. The
/// first position seen after construction or [`reset_cursor`](Self::reset_cursor)
/// only seeds the tracker, so the camera never jumps on the first sample. When
/// the cursor is locked, switch to raw device motion with
/// [`set_raw_motion`](Self::set_raw_motion).
pub struct Input {
    keys_down: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    last_cursor: Option<Vec2>,
    mouse_delta: Vec2,
    raw_motion: bool,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_pressed: HashSet::new(),
            last_cursor: None,
            mouse_delta: Vec2::ZERO,
            raw_motion: false,
        }
    }
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call once the frame has consumed its input to reset per-frame state.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.mouse_delta = Vec2::ZERO;
    }

    /// Process a window event and update input state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => self.press(key),
                        ElementState::Released => self.release(key),
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } | WindowEvent::Focused(false) => {
                self.reset_cursor();
                self.keys_down.clear();
            }
            _ => {}
        }
    }

    /// Process a device event. Only raw mouse motion is used, and only in raw mode.
    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.raw_motion {
                self.mouse_delta += Vec2::new(delta.0 as f32, delta.1 as f32);
            }
        }
    }

    /// Use raw device motion instead of absolute cursor positions for look deltas.
    pub fn set_raw_motion(&mut self, raw: bool) {
        self.raw_motion = raw;
        self.reset_cursor();
    }

    pub fn raw_motion(&self) -> bool {
        self.raw_motion
    }

    /// Forget the last cursor position so the next sample seeds a zero delta.
    pub fn reset_cursor(&mut self) {
        self.last_cursor = None;
    }

    /// Returns true if the key is currently held down.
    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns true if the key was pressed this frame.
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Accumulated cursor movement this frame in window coordinates (y grows downward).
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    fn press(&mut self, key: KeyCode) {
        if self.keys_down.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    fn release(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
    }

    fn cursor_moved(&mut self, position: Vec2) {
        if !self.raw_motion {
            if let Some(last) = self.last_cursor {
                self.mouse_delta += position - last;
            }
        }
        self.last_cursor = Some(position);
    }
}
