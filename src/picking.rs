//! Pointer intersection monitor.
//!
//! Casts a ray from the camera through the pointer and tests it against the
//! base (undisplaced) surface mesh. The GPU displacement is not taken into
//! account, so near the silhouette the result can differ from what is drawn.

use glam::{Mat4, Vec2, Vec3};

use crate::camera::CameraSystem;
use crate::mesh::BaseMesh;

/// Below this determinant a triangle is edge-on or facing away
const DET_EPSILON: f32 = 1e-7;

/// Drawable area in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Last known pointer position in normalized device coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    ndc: Option<Vec2>,
    captured: bool,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a raw pixel position to `[-1, 1]` with +y up
    pub fn on_move(&mut self, px: f64, py: f64, viewport: Viewport) {
        if viewport.is_empty() {
            self.ndc = None;
            return;
        }
        let x = px / viewport.width as f64 * 2.0 - 1.0;
        let y = -(py / viewport.height as f64) * 2.0 + 1.0;
        self.ndc = Some(Vec2::new(x as f32, y as f32));
    }

    /// Pointer left the window
    pub fn clear(&mut self) {
        self.ndc = None;
    }

    /// Another consumer (the control panel) owns the pointer
    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
    }

    /// Position available for picking
    pub fn ndc(&self) -> Option<Vec2> {
        if self.captured {
            None
        } else {
            self.ndc
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn transformed(&self, matrix: &Mat4) -> Ray {
        Ray::new(
            matrix.transform_point3(self.origin),
            matrix.transform_vector3(self.direction),
        )
    }

    /// Could the ray reach an origin-centered sphere of `radius`?
    pub fn may_hit_sphere(&self, radius: f32) -> bool {
        let b = self.origin.dot(self.direction);
        let c = self.origin.length_squared() - radius * radius;
        if c > 0.0 && b > 0.0 {
            // Outside and pointing away
            return false;
        }
        b * b - c >= 0.0
    }

    /// Möller–Trumbore, front faces (counter-clockwise) only
    pub fn hit_triangle(&self, [a, b, c]: [Vec3; 3]) -> Option<f32> {
        let edge1 = b - a;
        let edge2 = c - a;
        let p = self.direction.cross(edge2);
        let det = edge1.dot(p);
        if det < DET_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        let q = s.cross(edge1);
        let v = self.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(q) * inv_det;
        (t > DET_EPSILON).then_some(t)
    }
}

/// Per-frame hit test of the pointer against the surface mesh
#[derive(Debug, Clone)]
pub struct IntersectionMonitor {
    mesh: BaseMesh,
    inverse_model: Mat4,
    bounding_radius: f32,
}

impl IntersectionMonitor {
    pub fn new(mesh: BaseMesh, model: Mat4) -> Self {
        let bounding_radius = mesh.bounding_radius();
        Self {
            mesh,
            inverse_model: model.inverse(),
            bounding_radius,
        }
    }

    /// Does the pointer currently cover the surface? Absent pointer never hits.
    pub fn test(&self, pointer: &PointerState, camera: &CameraSystem) -> bool {
        match pointer.ndc() {
            Some(ndc) => self.test_ray(&camera.ray_from_ndc(ndc)),
            None => false,
        }
    }

    /// Test a world-space ray
    pub fn test_ray(&self, ray: &Ray) -> bool {
        let local = ray.transformed(&self.inverse_model);
        if !local.may_hit_sphere(self.bounding_radius) {
            return false;
        }
        self.mesh
            .triangles()
            .any(|triangle| local.hit_triangle(triangle).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{CameraConfig, SurfaceConfig, SurfaceMesh};

    const EPS: f32 = 1e-6;

    fn sphere_monitor() -> IntersectionMonitor {
        let config = SurfaceConfig::default();
        IntersectionMonitor::new(BaseMesh::from_config(&config), config.model_matrix())
    }

    #[test]
    fn test_pointer_normalizes_corners_and_center() {
        let viewport = Viewport::new(800, 600);
        let mut pointer = PointerState::new();

        pointer.on_move(0.0, 0.0, viewport);
        assert_eq!(pointer.ndc(), Some(Vec2::new(-1.0, 1.0)));

        pointer.on_move(800.0, 600.0, viewport);
        assert_eq!(pointer.ndc(), Some(Vec2::new(1.0, -1.0)));

        pointer.on_move(400.0, 300.0, viewport);
        let center = pointer.ndc().unwrap();
        assert!(center.length() < EPS);
    }

    #[test]
    fn test_pointer_absent_cases() {
        let mut pointer = PointerState::new();
        assert_eq!(pointer.ndc(), None);

        pointer.on_move(10.0, 10.0, Viewport::new(0, 600));
        assert_eq!(pointer.ndc(), None);

        pointer.on_move(10.0, 10.0, Viewport::new(100, 100));
        pointer.set_captured(true);
        assert_eq!(pointer.ndc(), None);
        pointer.set_captured(false);
        assert!(pointer.ndc().is_some());

        pointer.clear();
        assert_eq!(pointer.ndc(), None);
    }

    #[test]
    fn test_ray_through_center_hits() {
        let monitor = sphere_monitor();
        let ray = Ray::new(Vec3::new(0.013, 1.021, 5.0), -Vec3::Z);
        assert!(monitor.test_ray(&ray));
    }

    #[test]
    fn test_ray_beside_sphere_misses() {
        let monitor = sphere_monitor();
        assert!(!monitor.test_ray(&Ray::new(Vec3::new(1.5, 1.0, 5.0), -Vec3::Z)));
        // Pointing away from the sphere
        assert!(!monitor.test_ray(&Ray::new(Vec3::new(0.0, 1.0, 5.0), Vec3::Z)));
    }

    #[test]
    fn test_hit_ignores_displacement() {
        // A crest of amplitude 0.3 would reach radius 1.3; the base mesh does not
        let monitor = sphere_monitor();
        assert!(!monitor.test_ray(&Ray::new(Vec3::new(1.2, 1.0, 5.0), -Vec3::Z)));
        assert!(monitor.test_ray(&Ray::new(Vec3::new(0.9, 1.01, 5.0), -Vec3::Z)));
    }

    #[test]
    fn test_back_faces_are_ignored() {
        let monitor = sphere_monitor();
        // Starting inside, every triangle faces away
        assert!(!monitor.test_ray(&Ray::new(Vec3::new(0.01, 1.02, 0.0), -Vec3::Z)));
    }

    #[test]
    fn test_pointer_through_default_camera() {
        let monitor = sphere_monitor();
        let camera = CameraSystem::new(&CameraConfig::default(), Viewport::new(1280, 720));
        let mut pointer = PointerState::new();

        pointer.on_move(640.0, 360.0, camera.viewport());
        assert!(monitor.test(&pointer, &camera));

        pointer.on_move(0.0, 0.0, camera.viewport());
        assert!(!monitor.test(&pointer, &camera));
    }

    #[test]
    fn test_orbiting_away_moves_the_surface_off_the_pointer() {
        let monitor = sphere_monitor();
        let mut camera = CameraSystem::new(&CameraConfig::default(), Viewport::new(1280, 720));
        let mut pointer = PointerState::new();

        // Upper half of the sphere as seen from the starting view
        pointer.on_move(640.0, 270.0, camera.viewport());
        assert!(monitor.test(&pointer, &camera));

        // Drag down until the camera looks up at the sphere from below
        camera.orbit_mut().rotate(0.0, 391.0);
        for _ in 0..400 {
            camera.orbit_mut().step();
        }
        assert!(camera.orbit().pitch() < -1.3);
        assert!(!monitor.test(&pointer, &camera));
    }

    #[test]
    fn test_plane_is_hit_from_above_only() {
        let config = SurfaceConfig {
            mesh: SurfaceMesh::Plane,
            ..SurfaceConfig::default()
        };
        let monitor = IntersectionMonitor::new(BaseMesh::from_config(&config), config.model_matrix());
        let down = Ray::new(Vec3::new(0.37, 5.0, 0.21), -Vec3::Y);
        let up = Ray::new(Vec3::new(0.37, -5.0, 0.21), Vec3::Y);
        assert!(monitor.test_ray(&down));
        assert!(!monitor.test_ray(&up));
    }

    #[test]
    fn test_triangle_winding() {
        let tri = [Vec3::ZERO, Vec3::X, Vec3::Y];
        let front = Ray::new(Vec3::new(0.2, 0.2, 1.0), -Vec3::Z);
        let back = Ray::new(Vec3::new(0.2, 0.2, -1.0), Vec3::Z);
        let t = front.hit_triangle(tri).unwrap();
        assert!((t - 1.0).abs() < EPS);
        assert_eq!(back.hit_triangle(tri), None);
    }
}
