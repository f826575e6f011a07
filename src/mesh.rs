//! Base (undisplaced) surface meshes.
//!
//! The wave displacement happens only on the GPU, so these vertices are what
//! the CPU sees: they are uploaded once and reused for pointer intersection.

use std::f32::consts::{PI, TAU};

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::params::{SurfaceConfig, SurfaceMesh};

/// Vertex data for the surface mesh (position + normal + UV)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Indexed triangle mesh with counter-clockwise front faces
#[derive(Debug, Clone)]
pub struct BaseMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl BaseMesh {
    /// Build the mesh selected in `config`
    pub fn from_config(config: &SurfaceConfig) -> Self {
        match config.mesh {
            SurfaceMesh::Sphere => Self::sphere(
                config.sphere_radius,
                config.sphere_width_segments,
                config.sphere_height_segments,
            ),
            SurfaceMesh::Plane => Self::plane(config.plane_size, config.plane_segments),
        }
    }

    /// UV sphere centered on the origin, poles on the Y axis
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);

        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let (sin_theta, cos_theta) = (v * PI).sin_cos();
                let (sin_phi, cos_phi) = (u * TAU).sin_cos();

                let normal = Vec3::new(-cos_phi * sin_theta, cos_theta, sin_phi * sin_theta);
                vertices.push(Vertex {
                    position: (normal * radius).to_array(),
                    normal: normal.to_array(),
                    uv: [u, 1.0 - v],
                });
            }
        }

        // Rows share their seam vertex, so each row holds width_segments + 1
        let row = width_segments + 1;
        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;

                // Pole rows collapse to a single triangle
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self { vertices, indices }
    }

    /// Square plane in the local XY plane facing +Z
    pub fn plane(size: f32, segments: u32) -> Self {
        let segments = segments.max(1);
        let half = size / 2.0;
        let step = size / segments as f32;

        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for iy in 0..=segments {
            for ix in 0..=segments {
                vertices.push(Vertex {
                    position: [ix as f32 * step - half, half - iy as f32 * step, 0.0],
                    normal: [0.0, 0.0, 1.0],
                    uv: [
                        ix as f32 / segments as f32,
                        1.0 - iy as f32 / segments as f32,
                    ],
                });
            }
        }

        let row = segments + 1;
        for iy in 0..segments {
            for ix in 0..segments {
                let a = iy * row + ix;
                let b = (iy + 1) * row + ix;
                let c = (iy + 1) * row + ix + 1;
                let d = iy * row + ix + 1;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Corner positions of triangle `i`
    pub fn triangle(&self, i: usize) -> [Vec3; 3] {
        let corner = |k: usize| Vec3::from_array(self.vertices[self.indices[i * 3 + k] as usize].position);
        [corner(0), corner(1), corner(2)]
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        (0..self.triangle_count()).map(move |i| self.triangle(i))
    }

    /// Radius of the origin-centered sphere enclosing every vertex
    pub fn bounding_radius(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| Vec3::from_array(v.position).length())
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_counts() {
        let mesh = BaseMesh::sphere(1.0, 32, 32);
        assert_eq!(mesh.vertices.len(), 33 * 33);
        // Full quads everywhere except the two pole rows
        assert_eq!(mesh.triangle_count(), 32 * 32 * 2 - 2 * 32);
        assert!(mesh
            .indices
            .iter()
            .all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn test_sphere_vertices_lie_on_radius() {
        let mesh = BaseMesh::sphere(2.0, 12, 8);
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            let n = Vec3::from_array(v.normal);
            assert!((p.length() - 2.0).abs() < 1e-5);
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
        assert!((mesh.bounding_radius() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_faces_point_outward() {
        let mesh = BaseMesh::sphere(1.0, 16, 16);
        for [a, b, c] in mesh.triangles() {
            let face_normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(face_normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn test_plane_counts_and_winding() {
        let mesh = BaseMesh::plane(10.0, 4);
        assert_eq!(mesh.vertices.len(), 25);
        assert_eq!(mesh.triangle_count(), 32);
        for [a, b, c] in mesh.triangles() {
            let face_normal = (b - a).cross(c - a);
            assert!(face_normal.z > 0.0);
        }
        assert!((mesh.bounding_radius() - 50.0_f32.sqrt()).abs() < 1e-4);
    }
}
