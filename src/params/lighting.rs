//! Directional light for the lit shading variant.

use super::ParamEntry;
use crate::store::{ParamRange, ParamValue};

pub mod names {
    pub const LIGHT_X: &str = "light_x";
    pub const LIGHT_Y: &str = "light_y";
    pub const LIGHT_Z: &str = "light_z";
}

/// Directional light parameters
#[derive(Debug, Clone, PartialEq)]
pub struct LightSettings {
    /// Light position; the light shines from here toward the origin
    pub position: [f32; 3],

    /// Panel range for each position component
    pub position_range: ParamRange,

    /// Diffuse and specular intensity (dimensionless)
    pub intensity: f32,

    /// Ambient term added to the diffuse factor
    pub ambient: f32,
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            position: [1.0, 3.0, 1.0],
            position_range: ParamRange::new(-10.0, 10.0, 0.001),
            intensity: 1.0,
            ambient: 0.35,
        }
    }
}

impl LightSettings {
    /// Registrable position entries in panel order
    pub fn entries(&self) -> [ParamEntry; 3] {
        let [x, y, z] = self.position;
        [
            ParamEntry {
                name: names::LIGHT_X,
                label: "Light X",
                value: ParamValue::Scalar(x),
                range: self.position_range,
            },
            ParamEntry {
                name: names::LIGHT_Y,
                label: "Light Y",
                value: ParamValue::Scalar(y),
                range: self.position_range,
            },
            ParamEntry {
                name: names::LIGHT_Z,
                label: "Light Z",
                value: ParamValue::Scalar(z),
                range: self.position_range,
            },
        ]
    }
}
