//! Free-fly camera driven by yaw and pitch angles.
//!
//! [`Camera`] keeps its orientation as two Euler angles in degrees and derives an
//! orthonormal `front`/`right`/`up` basis from them. Keyboard input translates the
//! camera along that basis, mouse input rotates it.
//!
//! # Example
//!
//! ```
//! use cubecam::{Camera, CameraMovement};
//!
//! let mut camera = Camera::new(false);
//!
//! // In frame loop:
//! camera.process_keyboard(CameraMovement::Forward, 0.016);
//! camera.process_mouse_movement(4.0, -2.0, true);
//! let view = camera.view_matrix();
//! # let _ = view;
//! ```

use glam::{Mat4, Vec3};

/// Default yaw in degrees. Looks down -Z.
pub const YAW: f32 = -90.0;
/// Default pitch in degrees.
pub const PITCH: f32 = 0.0;
/// Default movement speed in units per second.
pub const SPEED: f32 = 2.5;
/// Default multiplier applied to raw mouse deltas.
pub const SENSITIVITY: f32 = 0.1;
/// Pitch limit in degrees when movement is constrained.
pub const PITCH_LIMIT: f32 = 89.0;

/// Discrete movement commands, decoupled from any particular key binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

/// A first-person camera with Euler-angle orientation.
///
/// `yaw` and `pitch` are the only orientation state; `front`, `right` and `up`
/// are recomputed together from them after every rotation and are read-only
/// from the outside.
#[derive(Clone, Debug)]
pub struct Camera {
    /// World-space position.
    pub position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    /// Movement speed in units per second.
    pub move_speed: f32,
    /// Multiplier applied to raw mouse deltas.
    pub sensitivity: f32,
    /// Flip the sign of pitch updates from vertical mouse motion.
    pub inverted_y: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Camera {
    /// Create a camera at (0, 0, 3) looking down -Z.
    pub fn new(inverted_y: bool) -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            world_up: Vec3::Y,
            yaw: YAW,
            pitch: PITCH,
            move_speed: SPEED,
            sensitivity: SENSITIVITY,
            inverted_y,
        };
        camera.update_camera_vectors();
        camera
    }

    /// Horizontal angle in degrees.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Vertical angle in degrees. Positive looks up.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Translate the camera along its basis for `elapsed_seconds` of travel.
    pub fn process_keyboard(&mut self, direction: CameraMovement, elapsed_seconds: f32) {
        let velocity = self.move_speed * elapsed_seconds;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    /// Rotate the camera by a raw mouse delta.
    ///
    /// `y_offset` is positive when the mouse moves up. With `constrain_pitch`
    /// the pitch is clamped to ±89° so the view never flips over the pole.
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        let x_offset = x_offset * self.sensitivity;
        let y_offset = y_offset * self.sensitivity;

        self.yaw += x_offset;
        if self.inverted_y {
            self.pitch -= y_offset;
        } else {
            self.pitch += y_offset;
        }

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_camera_vectors();
    }

    /// World-to-view transform looking from `position` along `front`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    // right and up both depend on the fresh front, so all three go together.
    fn update_camera_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn assert_orthonormal(camera: &Camera) {
        let (f, r, u) = (camera.front(), camera.right(), camera.up());
        assert!((f.length() - 1.0).abs() < EPSILON, "front = {f}");
        assert!((r.length() - 1.0).abs() < EPSILON, "right = {r}");
        assert!((u.length() - 1.0).abs() < EPSILON, "up = {u}");
        assert!(f.dot(r).abs() < EPSILON);
        assert!(f.dot(u).abs() < EPSILON);
        assert!(r.dot(u).abs() < EPSILON);
    }

    #[test]
    fn default_pose() {
        let camera = Camera::new(false);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(camera.yaw(), -90.0);
        assert_eq!(camera.pitch(), 0.0);
        assert!(camera.front().abs_diff_eq(Vec3::NEG_Z, EPSILON));
        assert!(camera.right().abs_diff_eq(Vec3::X, EPSILON));
        assert!(camera.up().abs_diff_eq(Vec3::Y, EPSILON));
    }

    #[test]
    fn basis_stays_orthonormal() {
        let mut camera = Camera::new(false);
        camera.sensitivity = 1.0;
        assert_orthonormal(&camera);

        for step in 0..200 {
            let dx = (step as f32 * 7.3) % 41.0 - 20.0;
            let dy = (step as f32 * 3.1) % 23.0 - 11.0;
            camera.process_mouse_movement(dx, dy, true);
            assert_orthonormal(&camera);
        }
    }

    #[test]
    fn pitch_clamps_to_exact_limits() {
        let mut camera = Camera::new(false);
        camera.process_mouse_movement(0.0, 5000.0, true);
        assert_eq!(camera.pitch(), 89.0);
        assert_orthonormal(&camera);

        camera.process_mouse_movement(0.0, -10000.0, true);
        assert_eq!(camera.pitch(), -89.0);
        assert_orthonormal(&camera);
    }

    #[test]
    fn unconstrained_pitch_passes_limit() {
        let mut camera = Camera::new(false);
        camera.process_mouse_movement(0.0, 950.0, false);
        assert!((camera.pitch() - 95.0).abs() < EPSILON);
    }

    #[test]
    fn inverted_y_flips_pitch() {
        let mut normal = Camera::new(false);
        let mut inverted = Camera::new(true);
        normal.process_mouse_movement(0.0, 42.0, true);
        inverted.process_mouse_movement(0.0, 42.0, true);

        let normal_delta = normal.pitch() - PITCH;
        let inverted_delta = inverted.pitch() - PITCH;
        assert!(normal_delta > 0.0);
        assert!((normal_delta + inverted_delta).abs() < EPSILON);
    }

    #[test]
    fn zero_input_changes_nothing() {
        let mut camera = Camera::new(false);
        camera.process_mouse_movement(120.0, -35.0, true);
        let before = camera.clone();

        camera.process_keyboard(CameraMovement::Forward, 0.0);
        camera.process_keyboard(CameraMovement::Left, 0.0);
        assert_eq!(camera.position, before.position);

        camera.process_mouse_movement(0.0, 0.0, true);
        assert_eq!(camera.yaw(), before.yaw());
        assert_eq!(camera.pitch(), before.pitch());
        assert_eq!(camera.front(), before.front());
        assert_eq!(camera.right(), before.right());
        assert_eq!(camera.up(), before.up());
    }

    #[test]
    fn forward_moves_down_negative_z() {
        let mut camera = Camera::new(false);
        camera.process_keyboard(CameraMovement::Forward, 1.0);
        assert!(camera.position.abs_diff_eq(Vec3::new(0.0, 0.0, 0.5), 1e-4));
    }

    #[test]
    fn strafing_and_backing_up() {
        let mut camera = Camera::new(false);
        camera.process_keyboard(CameraMovement::Right, 2.0);
        assert!(camera.position.abs_diff_eq(Vec3::new(5.0, 0.0, 3.0), 1e-4));

        camera.process_keyboard(CameraMovement::Left, 2.0);
        camera.process_keyboard(CameraMovement::Backward, 0.4);
        assert!(camera.position.abs_diff_eq(Vec3::new(0.0, 0.0, 4.0), 1e-4));
    }

    #[test]
    fn view_matrix_maps_eye_to_origin() {
        let mut camera = Camera::new(false);
        camera.process_mouse_movement(250.0, 130.0, true);
        camera.process_keyboard(CameraMovement::Forward, 1.3);
        camera.process_keyboard(CameraMovement::Right, 0.7);

        let eye = camera.view_matrix().transform_point3(camera.position);
        assert!(eye.abs_diff_eq(Vec3::ZERO, 1e-4), "eye = {eye}");
    }

    #[test]
    fn view_matrix_looks_down_negative_z() {
        let mut camera = Camera::new(false);
        camera.process_mouse_movement(-300.0, 200.0, true);

        let ahead = camera.position + camera.front() * 2.0;
        let in_view = camera.view_matrix().transform_point3(ahead);
        assert!(in_view.abs_diff_eq(Vec3::new(0.0, 0.0, -2.0), 1e-4));
    }

    #[test]
    fn yaw_accumulates_across_steps() {
        let total = 37.5;
        let steps = 25;

        let mut stepped = Camera::new(false);
        for _ in 0..steps {
            stepped.process_mouse_movement(total / steps as f32, 0.0, true);
        }
        let mut single = Camera::new(false);
        single.process_mouse_movement(total, 0.0, true);

        assert!((stepped.yaw() - single.yaw()).abs() < 1e-3);
        assert_eq!(stepped.pitch(), single.pitch());
        assert!(stepped.front().abs_diff_eq(single.front(), 1e-4));
    }

    #[test]
    fn yaw_is_unbounded() {
        let mut camera = Camera::new(false);
        camera.sensitivity = 1.0;
        camera.process_mouse_movement(720.0, 0.0, true);
        assert!((camera.yaw() - 630.0).abs() < EPSILON);
        assert!(camera.front().abs_diff_eq(Vec3::NEG_Z, 1e-4));
    }
}
