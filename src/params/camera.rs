//! Camera placement and orbit tuning.

/// Perspective camera orbiting a target
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    /// Initial camera position (world units)
    pub position: [f32; 3],

    /// Orbit center and look-at target (world units)
    pub target: [f32; 3],

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane
    pub near_plane: f32,

    /// Far clipping plane
    pub far_plane: f32,

    /// Fraction of the pending orbit motion applied per frame (0-1]
    pub damping: f32,

    /// Orbit speed (radians per dragged pixel)
    pub rotate_speed: f32,

    /// Closest zoom distance from the target
    pub min_distance: f32,

    /// Farthest zoom distance from the target
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [4.0, 4.0, 5.0], // Above and to the side of the surface
            target: [0.0, 0.0, 0.0],
            fov_degrees: 75.0,
            near_plane: 0.1,
            far_plane: 1000.0,
            damping: 0.05,
            rotate_speed: 0.005,
            min_distance: 1.5,
            max_distance: 50.0,
        }
    }
}
