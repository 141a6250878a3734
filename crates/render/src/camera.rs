use crate::config::CameraSettings;
use glam::{Mat3, Mat4, Quat, Vec3};
use plume_input::{InputState, Key, MouseButton};

/// Narrowest field of view the wheel can zoom to, in degrees.
pub const MIN_FOV_DEGREES: f32 = 1.0;
/// Widest field of view, in degrees.
pub const MAX_FOV_DEGREES: f32 = 45.0;
/// Pitch limit in degrees; stops the view flipping over the poles.
pub const PITCH_LIMIT_DEGREES: f32 = 89.0;

/// Free-look camera driven by per-frame input.
///
/// Mouse look is active only while the right button is held. Keyboard
/// movement and roll apply in both modes. Angles are stored in degrees.
///
/// View and projection matrices are recomputed whenever the state they
/// depend on changes, so they always match the last `update`.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    orientation: Quat,

    yaw: f32,
    pitch: f32,
    roll: f32,

    fov: f32,
    aspect: f32,
    near: f32,
    far: f32,

    movement_speed: f32,
    mouse_sensitivity: f32,
    roll_speed: f32,

    view: Mat4,
    projection: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&CameraSettings::default())
    }
}

impl Camera {
    pub fn new(settings: &CameraSettings) -> Self {
        let mut camera = Self {
            position: settings.position,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            world_up: Vec3::Y,
            orientation: Quat::IDENTITY,
            yaw: settings.yaw,
            pitch: settings
                .pitch
                .clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES),
            roll: settings.roll,
            fov: settings.fov.clamp(MIN_FOV_DEGREES, MAX_FOV_DEGREES),
            aspect: settings.aspect_ratio(),
            near: settings.near,
            far: settings.far,
            movement_speed: settings.movement_speed,
            mouse_sensitivity: settings.mouse_sensitivity,
            roll_speed: settings.roll_speed,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.update_vectors();
        camera.update_view();
        camera.update_projection();
        camera
    }

    /// Advance one frame from the current input snapshot.
    ///
    /// Order: orientation (mouse look, roll), basis, translation, view,
    /// then zoom. A zero or invalid `dt` moves nothing but still refreshes
    /// orientation from mouse look.
    pub fn update(&mut self, input: &impl InputState, dt: f32) {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        if input.is_mouse_button_pressed(MouseButton::Right) {
            let (dx, dy) = input.mouse_motion();
            self.process_mouse_movement(dx as f32, dy as f32);
        }

        let roll_step = self.roll_speed * dt;
        if input.is_key_pressed(Key::E) {
            self.roll += roll_step;
        }
        if input.is_key_pressed(Key::Q) {
            self.roll -= roll_step;
        }

        self.update_vectors();

        let velocity = self.movement_speed * dt;
        let held = |a: Key, b: Key| input.is_key_pressed(a) || input.is_key_pressed(b);
        if held(Key::W, Key::Up) {
            self.position += self.front * velocity;
        }
        if held(Key::S, Key::Down) {
            self.position -= self.front * velocity;
        }
        if held(Key::A, Key::Left) {
            self.position -= self.right * velocity;
        }
        if held(Key::D, Key::Right) {
            self.position += self.right * velocity;
        }
        if input.is_key_pressed(Key::LeftShift) {
            self.position += self.world_up * velocity;
        }
        if input.is_key_pressed(Key::LeftCtrl) {
            self.position -= self.world_up * velocity;
        }

        self.update_view();

        let wheel = input.mouse_wheel_y();
        if wheel != 0 {
            self.process_mouse_scroll(wheel);
        }
    }

    fn process_mouse_movement(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.mouse_sensitivity;
        self.pitch -= dy * self.mouse_sensitivity;
        self.pitch = self
            .pitch
            .clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
    }

    fn process_mouse_scroll(&mut self, wheel: i32) {
        self.fov = (self.fov - wheel as f32).clamp(MIN_FOV_DEGREES, MAX_FOV_DEGREES);
        self.update_projection();
        tracing::trace!(fov = self.fov, "camera zoom");
    }

    /// Rebuild the orthonormal basis from yaw/pitch, then roll the up vector
    /// about the forward axis and re-derive right from it.
    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        let front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();

        let level_right = front.cross(self.world_up).normalize();
        let level_up = level_right.cross(front).normalize();

        let roll = Quat::from_axis_angle(front, self.roll.to_radians());
        let up = (roll * level_up).normalize();
        let right = front.cross(up).normalize();

        self.front = front;
        self.up = up;
        self.right = right;
        self.orientation = Quat::from_mat3(&Mat3::from_cols(right, up, -front)).normalize();
    }

    fn update_view(&mut self) {
        self.view = Mat4::look_at_rh(self.position, self.position + self.front, self.up);
    }

    fn update_projection(&mut self) {
        self.projection =
            Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.near, self.far);
    }

    /// Resize the viewport. Zero-sized viewports (minimized windows) are ignored.
    pub fn set_viewport_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
        self.update_projection();
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_view();
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    pub fn position(&self) -> Vec3 {
        self.position
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

    /// Rotation taking camera-local axes (-Z forward, +Y up) to world space.
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn roll(&self) -> f32 {
        self.roll
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_input::{Input, InputEvent};

    const EPS: f32 = 1e-4;

    fn looking(dx: i32, dy: i32) -> Input {
        let mut input = Input::new();
        input.handle_event(InputEvent::MouseButtonDown(MouseButton::Right));
        input.handle_event(InputEvent::MouseMotion { dx, dy });
        input
    }

    fn assert_orthonormal(cam: &Camera) {
        for v in [cam.front(), cam.right(), cam.up()] {
            assert!((v.length() - 1.0).abs() < EPS, "not unit: {v:?}");
        }
        assert!(cam.front().dot(cam.right()).abs() < EPS);
        assert!(cam.front().dot(cam.up()).abs() < EPS);
        assert!(cam.right().dot(cam.up()).abs() < EPS);
    }

    #[test]
    fn default_camera_looks_down_negative_z() {
        let cam = Camera::default();
        assert_eq!(cam.position(), Vec3::new(0.0, 0.0, 3.0));
        assert!(cam.front().abs_diff_eq(Vec3::NEG_Z, EPS));
        assert!(cam.right().abs_diff_eq(Vec3::X, EPS));
        assert!(cam.up().abs_diff_eq(Vec3::Y, EPS));
        assert_eq!(cam.fov(), 45.0);
        assert!(!cam.view_projection().col(0).x.is_nan());
    }

    #[test]
    fn mouse_motion_ignored_without_right_button() {
        let mut cam = Camera::default();
        let mut input = Input::new();
        input.handle_event(InputEvent::MouseMotion { dx: 200, dy: -50 });
        cam.update(&input, 0.016);
        assert_eq!(cam.yaw(), -90.0);
        assert_eq!(cam.pitch(), 0.0);
    }

    #[test]
    fn mouse_look_applies_sensitivity() {
        let mut cam = Camera::default();
        cam.update(&looking(100, -50), 0.016);
        assert!((cam.yaw() - (-80.0)).abs() < EPS);
        assert!((cam.pitch() - 5.0).abs() < EPS);
        assert_orthonormal(&cam);
    }

    #[test]
    fn pitch_stays_clamped_under_extreme_input() {
        let mut cam = Camera::default();
        let mut seed: u32 = 0x1234_5678;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let dy = (seed >> 8) as i32 % 200_000 - 100_000;
            let dx = (seed >> 4) as i32 % 5_000 - 2_500;
            cam.update(&looking(dx, dy), 0.016);
            assert!(cam.pitch() <= PITCH_LIMIT_DEGREES);
            assert!(cam.pitch() >= -PITCH_LIMIT_DEGREES);
            assert_orthonormal(&cam);
        }

        cam.update(&looking(0, -1_000_000), 0.016);
        assert_eq!(cam.pitch(), PITCH_LIMIT_DEGREES);
        cam.update(&looking(0, 1_000_000), 0.016);
        assert_eq!(cam.pitch(), -PITCH_LIMIT_DEGREES);
    }

    #[test]
    fn fov_stays_clamped_for_any_wheel_sequence() {
        let mut cam = Camera::default();
        for wheel in [3, 100, -7, -1000, 12, 1, -1, i32::MAX, i32::MIN + 1] {
            let mut input = Input::new();
            input.handle_event(InputEvent::MouseWheel { y: wheel });
            cam.update(&input, 0.016);
            assert!((MIN_FOV_DEGREES..=MAX_FOV_DEGREES).contains(&cam.fov()));
        }

        let mut input = Input::new();
        input.handle_event(InputEvent::MouseWheel { y: 10 });
        let mut cam = Camera::default();
        cam.update(&input, 0.0);
        assert_eq!(cam.fov(), 35.0);
    }

    #[test]
    fn zero_wheel_keeps_projection() {
        let mut cam = Camera::default();
        let before = cam.projection_matrix();
        cam.update(&Input::new(), 0.016);
        assert_eq!(cam.projection_matrix(), before);
    }

    #[test]
    fn movement_keys_translate_along_basis() {
        let mut cam = Camera::default();
        let mut input = Input::new();
        input.handle_event(InputEvent::KeyDown(Key::W));
        cam.update(&input, 1.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, 0.5), EPS));

        input.handle_event(InputEvent::KeyUp(Key::W));
        input.handle_event(InputEvent::KeyDown(Key::Right));
        input.handle_event(InputEvent::KeyDown(Key::LeftShift));
        cam.update(&input, 2.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(5.0, 5.0, 0.5), EPS));
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut cam = Camera::default();
        let mut input = Input::new();
        input.handle_event(InputEvent::KeyDown(Key::A));
        input.handle_event(InputEvent::KeyDown(Key::D));
        cam.update(&input, 1.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, 3.0), EPS));
    }

    #[test]
    fn zero_dt_is_a_no_op_with_valid_matrices() {
        let mut cam = Camera::default();
        let view = cam.view_matrix();
        let mut input = Input::new();
        input.handle_event(InputEvent::KeyDown(Key::W));
        input.handle_event(InputEvent::KeyDown(Key::E));
        cam.update(&input, 0.0);
        cam.update(&input, f32::NAN);
        cam.update(&input, -1.0);
        assert_eq!(cam.position(), Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(cam.roll(), 0.0);
        assert!(cam.view_matrix().abs_diff_eq(view, EPS));
    }

    #[test]
    fn roll_rotates_up_about_front() {
        let mut cam = Camera::default();
        let mut input = Input::new();
        input.handle_event(InputEvent::KeyDown(Key::E));
        // 50 deg/s for 1.8 s = 90 degrees.
        cam.update(&input, 1.8);
        assert!((cam.roll() - 90.0).abs() < 1e-3);
        assert!(cam.front().abs_diff_eq(Vec3::NEG_Z, EPS));
        assert!(cam.up().abs_diff_eq(Vec3::X, 1e-3));
        assert!(cam.right().abs_diff_eq(Vec3::NEG_Y, 1e-3));
        assert_orthonormal(&cam);
    }

    #[test]
    fn view_matches_look_at_of_state() {
        let mut cam = Camera::default();
        let mut input = looking(37, 12);
        input.handle_event(InputEvent::KeyDown(Key::Q));
        input.handle_event(InputEvent::KeyDown(Key::S));
        cam.update(&input, 0.25);
        let expected = Mat4::look_at_rh(cam.position(), cam.position() + cam.front(), cam.up());
        assert!(cam.view_matrix().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn orientation_maps_forward_to_front() {
        let mut cam = Camera::default();
        let mut input = looking(-240, 90);
        input.handle_event(InputEvent::KeyDown(Key::E));
        cam.update(&input, 0.3);
        let q = cam.orientation();
        assert!((q.length() - 1.0).abs() < EPS);
        assert!((q * Vec3::NEG_Z).abs_diff_eq(cam.front(), 1e-3));
        assert!((q * Vec3::Y).abs_diff_eq(cam.up(), 1e-3));
    }

    #[test]
    fn viewport_resize_updates_aspect() {
        let mut cam = Camera::default();
        cam.set_viewport_size(800, 800);
        assert_eq!(cam.aspect(), 1.0);
        let projection = cam.projection_matrix();
        cam.set_viewport_size(0, 600);
        assert_eq!(cam.projection_matrix(), projection);
        assert_eq!(
            projection,
            Mat4::perspective_rh_gl(45.0_f32.to_radians(), 1.0, 0.1, 100.0)
        );
    }
}
