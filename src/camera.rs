//! Orbiting perspective camera: view-projection and pointer rays.

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec2, Vec3};

use crate::params::CameraConfig;
use crate::picking::{Ray, Viewport};

/// Keeps the camera off the poles so `look_at_rh` with Y up stays defined
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.017;

/// Scroll units to log-distance
const ZOOM_SPEED: f32 = 0.0015;

/// Camera on a sphere around a target, with damped drag and zoom.
///
/// Input queues motion; each [`OrbitCamera::step`] applies a `damping`
/// fraction of what is still pending, so the camera glides to rest.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_zoom: f32,
    damping: f32,
    rotate_speed: f32,
    min_distance: f32,
    max_distance: f32,
}

impl OrbitCamera {
    pub fn new(config: &CameraConfig) -> Self {
        let target = Vec3::from_array(config.target);
        let offset = Vec3::from_array(config.position) - target;
        let min_distance = config.min_distance.max(1e-3);
        let max_distance = config.max_distance.max(min_distance);
        let distance = offset.length().clamp(min_distance, max_distance);

        Self {
            target,
            yaw: offset.z.atan2(offset.x),
            pitch: (offset.y / distance)
                .clamp(-1.0, 1.0)
                .asin()
                .clamp(-PITCH_LIMIT, PITCH_LIMIT),
            distance,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_zoom: 0.0,
            damping: config.damping.clamp(1e-3, 1.0),
            rotate_speed: config.rotate_speed,
            min_distance,
            max_distance,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn eye(&self) -> Vec3 {
        self.target
            + self.distance
                * Vec3::new(
                    self.yaw.cos() * self.pitch.cos(),
                    self.pitch.sin(),
                    self.yaw.sin() * self.pitch.cos(),
                )
    }

    /// Queue an orbit by a pointer drag (pixels)
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.pending_yaw -= dx * self.rotate_speed;
        self.pending_pitch -= dy * self.rotate_speed;
    }

    /// Queue a zoom; positive scroll moves closer
    pub fn zoom(&mut self, scroll: f32) {
        self.pending_zoom -= scroll * ZOOM_SPEED;
    }

    /// Apply one frame of damped motion
    pub fn step(&mut self) {
        let yaw = self.pending_yaw * self.damping;
        let pitch = self.pending_pitch * self.damping;
        let zoom = self.pending_zoom * self.damping;
        self.pending_yaw -= yaw;
        self.pending_pitch -= pitch;
        self.pending_zoom -= zoom;

        self.yaw += yaw;
        self.pitch = (self.pitch + pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.distance = (self.distance * zoom.exp()).clamp(self.min_distance, self.max_distance);
    }

    /// Read drag and scroll from egui, then step.
    ///
    /// While the UI owns the pointer no new motion is queued, but motion
    /// already in flight keeps settling.
    pub fn update_from_input(&mut self, ctx: &egui::Context, ui_hijacked: bool) {
        if !ui_hijacked {
            ctx.input(|i| {
                let dragging = i.pointer.button_down(egui::PointerButton::Primary)
                    || i.pointer.button_down(egui::PointerButton::Secondary);
                if dragging {
                    let d = i.pointer.delta();
                    self.rotate(d.x, d.y);
                }
                let scroll = i.smooth_scroll_delta.y;
                if scroll.abs() > 0.0 {
                    self.zoom(scroll);
                }
            });
        }
        self.step();
    }
}

/// Perspective camera around the scene, sized to the window
#[derive(Debug, Clone)]
pub struct CameraSystem {
    orbit: OrbitCamera,
    fov_degrees: f32,
    near_plane: f32,
    far_plane: f32,
    viewport: Viewport,
}

impl CameraSystem {
    pub fn new(config: &CameraConfig, viewport: Viewport) -> Self {
        Self {
            orbit: OrbitCamera::new(config),
            fov_degrees: config.fov_degrees,
            near_plane: config.near_plane,
            far_plane: config.far_plane,
            viewport,
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.orbit.eye()
    }

    pub fn target(&self) -> Vec3 {
        self.orbit.target()
    }

    pub fn orbit(&self) -> &OrbitCamera {
        &self.orbit
    }

    pub fn orbit_mut(&mut self) -> &mut OrbitCamera {
        &mut self.orbit
    }

    pub fn update_from_input(&mut self, ctx: &egui::Context, ui_hijacked: bool) {
        self.orbit.update_from_input(ctx, ui_hijacked);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Track the window size. A minimized (zero-area) window keeps the last
    /// usable viewport.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        let viewport = Viewport::new(width, height);
        if !viewport.is_empty() {
            self.viewport = viewport;
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.viewport.aspect_ratio().max(1e-3)
    }

    pub fn view_matrix(&self) -> Mat4 {
        // Always keep Y as up vector (camera never rolls)
        Mat4::look_at_rh(self.eye(), self.target(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect_ratio(),
            self.near_plane,
            self.far_plane,
        )
    }

    /// Create view-projection matrix for rendering
    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a normalized device coordinate.
    ///
    /// The ray starts on the near plane (depth 0) and points toward the far
    /// plane (depth 1).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_proj().inverse();
        let near = inverse.project_point3(ndc.extend(0.0));
        let far = inverse.project_point3(ndc.extend(1.0));
        Ray::new(near, far - near)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> CameraSystem {
        CameraSystem::new(&CameraConfig::default(), Viewport::new(1280, 720))
    }

    fn settle(orbit: &mut OrbitCamera) {
        for _ in 0..400 {
            orbit.step();
        }
    }

    #[test]
    fn test_view_proj_matrix_generation() {
        let view_proj = camera().view_proj();

        // Matrix should not be identity or zero
        assert_ne!(view_proj, Mat4::IDENTITY);
        assert_ne!(view_proj, Mat4::ZERO);
        assert!(view_proj.is_finite());
    }

    #[test]
    fn test_orbit_starts_at_configured_position() {
        let camera = camera();
        assert!((camera.eye() - Vec3::new(4.0, 4.0, 5.0)).length() < 1e-4);
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let camera = camera();
        let ndc = camera.view_proj().project_point3(camera.target());
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = camera();
        let ray = camera.ray_from_ndc(Vec2::ZERO);
        let expected = (camera.target() - camera.eye()).normalize();
        assert!((ray.direction - expected).length() < 1e-4);
        // Origin sits on the near plane, in front of the eye
        assert!((ray.origin - camera.eye()).length() < 0.2);
    }

    #[test]
    fn test_set_viewport_updates_aspect() {
        let mut camera = camera();
        let before = camera.projection_matrix();
        camera.set_viewport(600, 600);
        assert_eq!(camera.aspect_ratio(), 1.0);
        assert_ne!(camera.projection_matrix(), before);
    }

    #[test]
    fn test_minimized_window_keeps_finite_matrices() {
        let mut camera = camera();
        for (w, h) in [(800, 0), (0, 720), (0, 0)] {
            camera.set_viewport(w, h);
            assert!(camera.view_proj().is_finite(), "{}x{}", w, h);
            assert_eq!(camera.viewport(), Viewport::new(1280, 720));
            assert!(camera.ray_from_ndc(Vec2::ZERO).direction.is_finite());
        }
    }

    #[test]
    fn test_drag_is_damped() {
        let mut orbit = OrbitCamera::new(&CameraConfig::default());
        let start = orbit.pitch();
        orbit.rotate(0.0, -100.0);

        orbit.step();
        let first = orbit.pitch() - start;
        // 5% of 0.5 rad on the first frame
        assert!((first - 0.025).abs() < 1e-5);

        settle(&mut orbit);
        assert!((orbit.pitch() - start - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_orbit_keeps_distance_and_clamps_pitch() {
        let mut orbit = OrbitCamera::new(&CameraConfig::default());
        let distance = orbit.distance();
        orbit.rotate(250.0, -10_000.0);
        settle(&mut orbit);

        assert!((orbit.pitch() - PITCH_LIMIT).abs() < 1e-6);
        assert!(((orbit.eye() - orbit.target()).length() - distance).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_stays_in_range() {
        let config = CameraConfig::default();
        let mut orbit = OrbitCamera::new(&config);
        orbit.zoom(1.0e5);
        settle(&mut orbit);
        assert_eq!(orbit.distance(), config.min_distance);

        orbit.zoom(-1.0e5);
        settle(&mut orbit);
        assert_eq!(orbit.distance(), config.max_distance);
    }
}
