//! Parameter definitions with units and documented ranges.
//!
//! All tunable defaults live here:
//! - Wave shader values (live defaults and the hover override constants)
//! - Lighting for the lit shading variant
//! - Camera, surface mesh, window and recording setup

mod camera;
mod lighting;
mod render;
mod surface;
mod wave;

use crate::store::{ParamRange, ParamValue};

// Re-export all types
pub use camera::CameraConfig;
pub use lighting::{names as light_names, LightSettings};
pub use render::{RecordingConfig, RenderConfig};
pub use surface::{SurfaceConfig, SurfaceMesh};
pub use wave::{names as wave_names, WaveRanges, WaveSettings};

/// One registrable parameter: key, panel label, initial value and range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamEntry {
    pub name: &'static str,
    pub label: &'static str,
    pub value: ParamValue,
    pub range: ParamRange,
}
