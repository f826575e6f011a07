//! Displaced surface mesh configuration.

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};

/// Base mesh the wave is applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SurfaceMesh {
    /// UV sphere, displaced along its normals
    Sphere,
    /// Flat plane, displaced along its fixed up axis
    Plane,
}

/// Surface mesh parameters
#[derive(Debug, Clone)]
pub struct SurfaceConfig {
    pub mesh: SurfaceMesh,

    /// Sphere radius (world units)
    pub sphere_radius: f32,

    /// Sphere segments around the equator
    pub sphere_width_segments: u32,

    /// Sphere segments from pole to pole
    pub sphere_height_segments: u32,

    /// Plane edge length (world units)
    pub plane_size: f32,

    /// Plane subdivisions per side (fine enough for the wave to show)
    pub plane_segments: u32,

    /// Mesh origin in world space
    pub position: [f32; 3],
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            mesh: SurfaceMesh::Sphere,
            sphere_radius: 1.0,
            sphere_width_segments: 32,
            sphere_height_segments: 32,
            plane_size: 10.0,
            plane_segments: 128,
            position: [0.0, 1.0, 0.0],
        }
    }
}

impl SurfaceConfig {
    /// Object-to-world transform. The plane is built in local XY and laid flat in XZ.
    pub fn model_matrix(&self) -> Mat4 {
        let translation = Mat4::from_translation(Vec3::from_array(self.position));
        match self.mesh {
            SurfaceMesh::Sphere => translation,
            SurfaceMesh::Plane => translation * Mat4::from_rotation_x(-FRAC_PI_2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_normal_points_up_in_world() {
        let config = SurfaceConfig {
            mesh: SurfaceMesh::Plane,
            ..SurfaceConfig::default()
        };
        let up = config.model_matrix().transform_vector3(Vec3::Z);
        assert!((up - Vec3::Y).length() < 1e-6);
    }
}
