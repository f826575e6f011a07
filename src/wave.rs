//! Displacement shader model.
//!
//! The GPU program in `shader.wgsl` displaces every vertex with a traveling
//! wave and colors it by elevation. This module is the CPU mirror of that
//! math, used by tests and anywhere the host needs to reason about the wave
//! (periods, color blend) without reading GPU state back.
//!
//! ```text
//! elevation(x, y, t) = A * sin(x*fx + d*t) * sin(y*fy + d*t)
//! displaced          = base + elevation * axis
//! mix                = clamp((elevation + A) / 2A, 0, 1)
//! color              = lerp(depth, surface, mix)
//! ```

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use crate::params::WaveSettings;

/// WGSL source for both shading variants
pub const SHADER_SOURCE: &str = include_str!("shader.wgsl");

/// Fragment shading variant. Both read the same uniform block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ShadingVariant {
    /// Pure depth-to-surface gradient
    Unlit,
    /// Gradient modulated by ambient + diffuse, plus a specular highlight
    Lit,
}

impl ShadingVariant {
    /// Fragment entry point in `shader.wgsl`
    pub fn fragment_entry(self) -> &'static str {
        match self {
            ShadingVariant::Unlit => "fs_unlit",
            ShadingVariant::Lit => "fs_lit",
        }
    }
}

/// Below this amplitude the color range is treated as degenerate
const DEGENERATE_RANGE: f32 = 1e-6;

/// Wave terms that drive displacement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParams {
    pub amplitude: f32,
    pub frequency: Vec2,
    pub direction: f32,
}

impl WaveParams {
    pub fn new(amplitude: f32, frequency: Vec2, direction: f32) -> Self {
        Self {
            amplitude,
            frequency,
            direction,
        }
    }

    pub fn from_settings(settings: &WaveSettings) -> Self {
        Self::new(
            settings.elevation,
            Vec2::new(settings.frequency_x, settings.frequency_y),
            settings.direction,
        )
    }

    /// Scalar displacement at local `(x, y)` and time `t` (seconds)
    pub fn elevation(&self, x: f32, y: f32, time_s: f32) -> f32 {
        let phase = self.direction * time_s;
        self.amplitude
            * (x * self.frequency.x + phase).sin()
            * (y * self.frequency.y + phase).sin()
    }

    /// Time period of the wave, `None` when it does not move
    pub fn period(&self) -> Option<f32> {
        if self.direction == 0.0 {
            None
        } else {
            Some(TAU / self.direction.abs())
        }
    }

    /// Lowest and highest elevation the wave can reach
    pub fn elevation_range(&self) -> (f32, f32) {
        let a = self.amplitude.abs();
        (-a, a)
    }

    /// Blend factor between depth (0) and surface (1) color
    pub fn color_mix(&self, elevation: f32) -> f32 {
        let (lo, hi) = self.elevation_range();
        let span = hi - lo;
        if span < DEGENERATE_RANGE {
            return 0.5;
        }
        ((elevation - lo) / span).clamp(0.0, 1.0)
    }
}

/// Direction a vertex moves when displaced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplacementAxis {
    /// Along the vertex normal
    Normal,
    /// Along one fixed object-space axis
    Fixed(Vec3),
}

/// Displace a base vertex at time `t`
pub fn displace(
    params: &WaveParams,
    base: Vec3,
    normal: Vec3,
    axis: DisplacementAxis,
    time_s: f32,
) -> Vec3 {
    let axis = match axis {
        DisplacementAxis::Normal => normal.normalize_or_zero(),
        DisplacementAxis::Fixed(axis) => axis.normalize_or_zero(),
    };
    base + axis * params.elevation(base.x, base.y, time_s)
}

/// Linear RGB endpoints of the elevation gradient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub depth: Vec3,
    pub surface: Vec3,
}

impl Palette {
    pub fn from_settings(settings: &WaveSettings) -> Self {
        Self {
            depth: Vec3::from_array(settings.depth_color.to_linear()),
            surface: Vec3::from_array(settings.surface_color.to_linear()),
        }
    }

    /// Unlit surface color for a given elevation
    pub fn shade(&self, params: &WaveParams, elevation: f32) -> Vec3 {
        self.depth.lerp(self.surface, params.color_mix(elevation))
    }
}

/// Single directional light for the lit variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector pointing from the surface toward the light
    pub direction: Vec3,
    pub intensity: f32,
    pub ambient: f32,
}

impl DirectionalLight {
    /// Light placed at `position`, shining toward the origin
    pub fn from_position(position: Vec3, intensity: f32, ambient: f32) -> Self {
        Self {
            direction: position.try_normalize().unwrap_or(Vec3::Y),
            intensity,
            ambient,
        }
    }
}

// shader.wgsl declares the same two constants; keep them in step.

/// Shininess exponent of the specular highlight
pub const SPECULAR_POWER: f32 = 32.0;

/// Specular strength relative to the light intensity
pub const SPECULAR_STRENGTH: f32 = 0.5;

/// Lit color: gradient * (ambient + diffuse) + specular
pub fn shade_lit(base: Vec3, normal: Vec3, to_eye: Vec3, light: &DirectionalLight) -> Vec3 {
    let n = normal.normalize_or_zero();
    let l = light.direction.normalize_or_zero();
    let diffuse = n.dot(l).max(0.0) * light.intensity;
    let half = (l + to_eye.normalize_or_zero()).normalize_or_zero();
    let specular =
        n.dot(half).max(0.0).powf(SPECULAR_POWER) * SPECULAR_STRENGTH * light.intensity;
    base * (light.ambient + diffuse) + Vec3::splat(specular)
}
