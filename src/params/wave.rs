//! Wave shader parameters: live defaults, hover override constants and ranges.

use super::ParamEntry;
use crate::color::Rgb;
use crate::error::ParamError;
use crate::store::{Parameter, ParameterSet, ParamRange, ParamValue};

/// Parameter keys, in control panel order
pub mod names {
    pub const WAVE_ELEVATION: &str = "wave_elevation";
    pub const WAVE_FREQUENCY_X: &str = "wave_frequency_x";
    pub const WAVE_FREQUENCY_Y: &str = "wave_frequency_y";
    pub const DEPTH_COLOR: &str = "depth_color";
    pub const SURFACE_COLOR: &str = "surface_color";
    pub const WAVE_DIRECTION: &str = "wave_direction";
    pub const WIREFRAME: &str = "wireframe";
}

/// One complete wave configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSettings {
    /// Wave amplitude along the displacement axis (object-space units)
    pub elevation: f32,

    /// Spatial frequency along local X (radians per unit)
    pub frequency_x: f32,

    /// Spatial frequency along local Y (radians per unit)
    pub frequency_y: f32,

    /// Color at the wave troughs
    pub depth_color: Rgb,

    /// Color at the wave crests
    pub surface_color: Rgb,

    /// Phase speed in radians per second; the sign sets the travel direction
    pub direction: f32,

    /// Draw the surface as lines instead of filled triangles
    pub wireframe: bool,
}

impl Default for WaveSettings {
    fn default() -> Self {
        Self {
            elevation: 0.3,
            frequency_x: 3.0,
            frequency_y: 1.0,
            depth_color: Rgb::from_u32(0x00a3d7),
            surface_color: Rgb::WHITE,
            direction: 4.0,
            wireframe: false,
        }
    }
}

impl WaveSettings {
    /// Constants shown while the pointer hovers the surface.
    ///
    /// Frequency and wireframe stay at the live defaults so the override is a
    /// complete set.
    pub fn hover_override() -> Self {
        Self {
            elevation: 0.5,
            depth_color: Rgb::from_u32(0xffaa00),
            surface_color: Rgb::from_u32(0xaa2222),
            direction: -4.0,
            ..Self::default()
        }
    }

    /// Registrable entries in panel order
    pub fn entries(&self, ranges: &WaveRanges) -> [ParamEntry; 7] {
        [
            ParamEntry {
                name: names::WAVE_ELEVATION,
                label: "Wave Elevation",
                value: ParamValue::Scalar(self.elevation),
                range: ranges.elevation,
            },
            ParamEntry {
                name: names::WAVE_FREQUENCY_X,
                label: "Wave Frequency X",
                value: ParamValue::Scalar(self.frequency_x),
                range: ranges.frequency,
            },
            ParamEntry {
                name: names::WAVE_FREQUENCY_Y,
                label: "Wave Frequency Y",
                value: ParamValue::Scalar(self.frequency_y),
                range: ranges.frequency,
            },
            ParamEntry {
                name: names::DEPTH_COLOR,
                label: "Depth Color",
                value: ParamValue::Color(self.depth_color),
                range: ParamRange::UNIT,
            },
            ParamEntry {
                name: names::SURFACE_COLOR,
                label: "Surface Color",
                value: ParamValue::Color(self.surface_color),
                range: ParamRange::UNIT,
            },
            ParamEntry {
                name: names::WAVE_DIRECTION,
                label: "Wave Direction",
                value: ParamValue::Scalar(self.direction),
                range: ranges.direction,
            },
            ParamEntry {
                name: names::WIREFRAME,
                label: "Wireframe",
                value: ParamValue::Boolean(self.wireframe),
                range: ParamRange::UNIT,
            },
        ]
    }

    /// Build a standalone set (used for the hover override)
    pub fn to_parameter_set(&self, ranges: &WaveRanges) -> Result<ParameterSet, ParamError> {
        let mut set = ParameterSet::new();
        for entry in self.entries(ranges) {
            set.insert(Parameter::new(
                entry.name,
                entry.label,
                entry.value,
                entry.range,
            )?)?;
        }
        Ok(set)
    }

    /// Read a configuration back out of a set, if every entry is present
    pub fn from_parameter_set(set: &ParameterSet) -> Option<Self> {
        Some(Self {
            elevation: set.scalar(names::WAVE_ELEVATION)?,
            frequency_x: set.scalar(names::WAVE_FREQUENCY_X)?,
            frequency_y: set.scalar(names::WAVE_FREQUENCY_Y)?,
            depth_color: set.color(names::DEPTH_COLOR)?,
            surface_color: set.color(names::SURFACE_COLOR)?,
            direction: set.scalar(names::WAVE_DIRECTION)?,
            wireframe: set.boolean(names::WIREFRAME)?,
        })
    }
}

/// Panel ranges for the scalar wave parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveRanges {
    pub elevation: ParamRange,
    pub frequency: ParamRange,
    pub direction: ParamRange,
}

impl Default for WaveRanges {
    fn default() -> Self {
        Self {
            elevation: ParamRange::new(0.0, 1.0, 0.001),
            frequency: ParamRange::new(0.0, 10.0, 0.001),
            direction: ParamRange::new(-4.0, 4.0, 0.001),
        }
    }
}
