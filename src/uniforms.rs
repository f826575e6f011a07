//! Uniform synchronizer.
//!
//! [`UniformSet`] is the CPU-side value object for the GPU program's uniform
//! block. It is refreshed once per frame from whichever [`ParameterSet`] the
//! interaction blender selected, and single entries are written immediately
//! when the control panel edits a live parameter. Colors cross from the
//! store's sRGB representation to linear RGB here.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

use crate::params::{light_names, wave_names};
use crate::store::{ParamValue, ParameterSet};

/// Uniform names of the GPU program contract
pub mod names {
    pub const TIME: &str = "uTime";
    pub const WAVE_ELEVATION: &str = "uWaveElevation";
    pub const WAVE_FREQUENCY: &str = "uWaveFrequency";
    pub const DEPTH_COLOR: &str = "uDepthColor";
    pub const SURFACE_COLOR: &str = "uSurfaceColor";
    pub const WAVE_DIRECTION: &str = "uWaveDirection";
    pub const WIREFRAME: &str = "wireframe";
    pub const LIGHT_DIRECTION: &str = "uLightDirection";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformType {
    Float,
    Vec2,
    Vec3,
    Color,
    Bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    /// Linear RGB
    Color([f32; 3]),
    Bool(bool),
}

impl UniformValue {
    pub fn ty(&self) -> UniformType {
        match self {
            UniformValue::Float(_) => UniformType::Float,
            UniformValue::Vec2(_) => UniformType::Vec2,
            UniformValue::Vec3(_) => UniformType::Vec3,
            UniformValue::Color(_) => UniformType::Color,
            UniformValue::Bool(_) => UniformType::Bool,
        }
    }
}

/// A named uniform and its current value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniform {
    pub name: &'static str,
    pub value: UniformValue,
}

/// Parameter set the wave uniforms currently mirror
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UniformSource {
    #[default]
    Live,
    HoverOverride,
}

/// Result of a single-parameter write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The uniform now holds the new value
    Written,
    /// The override is active; the value shows up once the set returns to live
    Deferred,
    /// The parameter has no uniform or the value kind does not fit
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Elevation,
    FrequencyX,
    FrequencyY,
    DepthColor,
    SurfaceColor,
    Direction,
    Wireframe,
    Light(usize),
}

impl Slot {
    fn for_param(name: &str) -> Option<Slot> {
        Some(match name {
            wave_names::WAVE_ELEVATION => Slot::Elevation,
            wave_names::WAVE_FREQUENCY_X => Slot::FrequencyX,
            wave_names::WAVE_FREQUENCY_Y => Slot::FrequencyY,
            wave_names::DEPTH_COLOR => Slot::DepthColor,
            wave_names::SURFACE_COLOR => Slot::SurfaceColor,
            wave_names::WAVE_DIRECTION => Slot::Direction,
            wave_names::WIREFRAME => Slot::Wireframe,
            light_names::LIGHT_X => Slot::Light(0),
            light_names::LIGHT_Y => Slot::Light(1),
            light_names::LIGHT_Z => Slot::Light(2),
            _ => return None,
        })
    }

    /// Wave slots follow the blender; light slots are never overridden
    fn is_wave(self) -> bool {
        !matches!(self, Slot::Light(_))
    }
}

/// CPU mirror of the GPU program's uniforms
#[derive(Debug, Clone, PartialEq)]
pub struct UniformSet {
    time: f32,
    wave_elevation: f32,
    wave_frequency: Vec2,
    depth_color: [f32; 3],
    surface_color: [f32; 3],
    wave_direction: f32,
    wireframe: bool,
    light_position: Vec3,
    source: UniformSource,
}

impl Default for UniformSet {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformSet {
    pub fn new() -> Self {
        Self {
            time: 0.0,
            wave_elevation: 0.0,
            wave_frequency: Vec2::ZERO,
            depth_color: [0.0; 3],
            surface_color: [0.0; 3],
            wave_direction: 0.0,
            wireframe: false,
            light_position: Vec3::Y,
            source: UniformSource::Live,
        }
    }

    /// Copy every wave entry of `set` plus the frame time
    pub fn apply(&mut self, set: &ParameterSet, source: UniformSource, time_s: f32) {
        self.source = source;
        self.time = time_s;
        for param in set.iter() {
            if let Some(slot) = Slot::for_param(param.name()) {
                if slot.is_wave() {
                    self.write_slot(slot, param.value());
                }
            }
        }
    }

    /// Copy the lighting entries of the scene set
    pub fn apply_scene(&mut self, scene: &ParameterSet) {
        for param in scene.iter() {
            if let Some(slot) = Slot::for_param(param.name()) {
                if !slot.is_wave() {
                    self.write_slot(slot, param.value());
                }
            }
        }
    }

    /// Immediate single-uniform update after a control panel edit.
    ///
    /// Wave entries are deferred while the hover override is active so the
    /// block never mixes the two sets.
    pub fn write_param(&mut self, name: &str, value: ParamValue) -> WriteOutcome {
        let Some(slot) = Slot::for_param(name) else {
            return WriteOutcome::Ignored;
        };
        if slot.is_wave() && self.source == UniformSource::HoverOverride {
            return WriteOutcome::Deferred;
        }
        if self.write_slot(slot, value) {
            WriteOutcome::Written
        } else {
            WriteOutcome::Ignored
        }
    }

    fn write_slot(&mut self, slot: Slot, value: ParamValue) -> bool {
        match (slot, value) {
            (Slot::Elevation, ParamValue::Scalar(v)) => self.wave_elevation = v,
            (Slot::FrequencyX, ParamValue::Scalar(v)) => self.wave_frequency.x = v,
            (Slot::FrequencyY, ParamValue::Scalar(v)) => self.wave_frequency.y = v,
            (Slot::DepthColor, ParamValue::Color(c)) => self.depth_color = c.to_linear(),
            (Slot::SurfaceColor, ParamValue::Color(c)) => self.surface_color = c.to_linear(),
            (Slot::Direction, ParamValue::Scalar(v)) => self.wave_direction = v,
            (Slot::Wireframe, ParamValue::Boolean(b)) => self.wireframe = b,
            (Slot::Light(axis), ParamValue::Scalar(v)) => self.light_position[axis] = v,
            _ => return false,
        }
        true
    }

    pub fn source(&self) -> UniformSource {
        self.source
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn wave_elevation(&self) -> f32 {
        self.wave_elevation
    }

    pub fn wave_frequency(&self) -> Vec2 {
        self.wave_frequency
    }

    pub fn depth_color(&self) -> [f32; 3] {
        self.depth_color
    }

    pub fn surface_color(&self) -> [f32; 3] {
        self.surface_color
    }

    pub fn wave_direction(&self) -> f32 {
        self.wave_direction
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn light_position(&self) -> Vec3 {
        self.light_position
    }

    /// The uniform contract with current values
    pub fn uniforms(&self) -> [Uniform; 8] {
        [
            Uniform {
                name: names::TIME,
                value: UniformValue::Float(self.time),
            },
            Uniform {
                name: names::WAVE_ELEVATION,
                value: UniformValue::Float(self.wave_elevation),
            },
            Uniform {
                name: names::WAVE_FREQUENCY,
                value: UniformValue::Vec2(self.wave_frequency.to_array()),
            },
            Uniform {
                name: names::DEPTH_COLOR,
                value: UniformValue::Color(self.depth_color),
            },
            Uniform {
                name: names::SURFACE_COLOR,
                value: UniformValue::Color(self.surface_color),
            },
            Uniform {
                name: names::WAVE_DIRECTION,
                value: UniformValue::Float(self.wave_direction),
            },
            Uniform {
                name: names::WIREFRAME,
                value: UniformValue::Bool(self.wireframe),
            },
            Uniform {
                name: names::LIGHT_DIRECTION,
                value: UniformValue::Vec3(
                    self.light_position.try_normalize().unwrap_or(Vec3::Y).to_array(),
                ),
            },
        ]
    }

    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.uniforms()
            .into_iter()
            .find(|u| u.name == name)
            .map(|u| u.value)
    }

    /// Pack into the std140 block read by `shader.wgsl`
    pub fn to_gpu(&self, frame: &GpuFrame) -> GpuUniforms {
        let light = self.light_position.try_normalize().unwrap_or(Vec3::Y);
        let [dr, dg, db] = self.depth_color;
        let [sr, sg, sb] = self.surface_color;
        GpuUniforms {
            view_proj: frame.view_proj.to_cols_array_2d(),
            model: frame.model.to_cols_array_2d(),
            depth_color: [dr, dg, db, 1.0],
            surface_color: [sr, sg, sb, 1.0],
            light_direction: [light.x, light.y, light.z, frame.light_intensity],
            camera_position: frame.camera_position.extend(1.0).to_array(),
            wave_frequency: self.wave_frequency.to_array(),
            time: self.time,
            wave_elevation: self.wave_elevation,
            wave_direction: self.wave_direction,
            ambient: frame.ambient,
            _padding: [0.0; 2],
        }
    }
}

/// Per-frame values that come from the camera and scene rather than parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpuFrame {
    pub view_proj: Mat4,
    pub model: Mat4,
    pub camera_position: Vec3,
    pub light_intensity: f32,
    pub ambient: f32,
}

/// Uniform buffer layout of `WaveUniforms` in `shader.wgsl`
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct GpuUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub depth_color: [f32; 4],
    pub surface_color: [f32; 4],
    pub light_direction: [f32; 4],
    pub camera_position: [f32; 4],
    pub wave_frequency: [f32; 2],
    pub time: f32,
    pub wave_elevation: f32,
    pub wave_direction: f32,
    pub ambient: f32,
    pub _padding: [f32; 2], // Pad to a multiple of 16 bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::params::{WaveRanges, WaveSettings};

    fn live_set() -> ParameterSet {
        WaveSettings::default()
            .to_parameter_set(&WaveRanges::default())
            .unwrap()
    }

    #[test]
    fn test_gpu_layout_size() {
        assert_eq!(std::mem::size_of::<GpuUniforms>(), 224);
        assert_eq!(std::mem::size_of::<GpuUniforms>() % 16, 0);
    }

    #[test]
    fn test_apply_copies_every_wave_entry() {
        let mut uniforms = UniformSet::new();
        uniforms.apply(&live_set(), UniformSource::Live, 1.25);

        assert_eq!(uniforms.time(), 1.25);
        assert_eq!(uniforms.wave_elevation(), 0.3);
        assert_eq!(uniforms.wave_frequency(), Vec2::new(3.0, 1.0));
        assert_eq!(uniforms.wave_direction(), 4.0);
        assert_eq!(
            uniforms.depth_color(),
            Rgb::from_u32(0x00a3d7).to_linear()
        );
        assert_eq!(uniforms.surface_color(), Rgb::WHITE.to_linear());
        assert!(!uniforms.wireframe());
    }

    #[test]
    fn test_write_param_is_deferred_while_overridden() {
        let mut uniforms = UniformSet::new();
        uniforms.apply(&live_set(), UniformSource::HoverOverride, 0.0);

        let outcome = uniforms.write_param(wave_names::WAVE_ELEVATION, ParamValue::Scalar(0.9));
        assert_eq!(outcome, WriteOutcome::Deferred);
        assert_eq!(uniforms.wave_elevation(), 0.3);

        // Lighting is not part of the override
        let outcome = uniforms.write_param(light_names::LIGHT_X, ParamValue::Scalar(2.0));
        assert_eq!(outcome, WriteOutcome::Written);
        assert_eq!(uniforms.light_position().x, 2.0);
    }

    #[test]
    fn test_write_param_updates_single_uniform() {
        let mut uniforms = UniformSet::new();
        uniforms.apply(&live_set(), UniformSource::Live, 0.5);
        let before = uniforms.clone();

        let outcome = uniforms.write_param(wave_names::WAVE_FREQUENCY_Y, ParamValue::Scalar(6.0));
        assert_eq!(outcome, WriteOutcome::Written);
        assert_eq!(uniforms.wave_frequency(), Vec2::new(3.0, 6.0));
        assert_eq!(uniforms.wave_elevation(), before.wave_elevation());
        assert_eq!(uniforms.time(), before.time());

        assert_eq!(
            uniforms.write_param("unknown", ParamValue::Scalar(1.0)),
            WriteOutcome::Ignored
        );
        assert_eq!(
            uniforms.write_param(wave_names::WIREFRAME, ParamValue::Scalar(1.0)),
            WriteOutcome::Ignored
        );
    }

    #[test]
    fn test_contract_names() {
        let uniforms = UniformSet::new();
        let listed: Vec<_> = uniforms.uniforms().iter().map(|u| u.name).collect();
        assert_eq!(
            listed,
            [
                "uTime",
                "uWaveElevation",
                "uWaveFrequency",
                "uDepthColor",
                "uSurfaceColor",
                "uWaveDirection",
                "wireframe",
                "uLightDirection",
            ]
        );
        assert_eq!(
            uniforms.get(names::WAVE_FREQUENCY).map(|v| v.ty()),
            Some(UniformType::Vec2)
        );
    }

    #[test]
    fn test_to_gpu_packs_light_direction() {
        let mut uniforms = UniformSet::new();
        let mut scene = ParameterSet::new();
        for entry in crate::params::LightSettings::default().entries() {
            scene
                .insert(
                    crate::store::Parameter::new(entry.name, entry.label, entry.value, entry.range)
                        .unwrap(),
                )
                .unwrap();
        }
        uniforms.apply_scene(&scene);

        let gpu = uniforms.to_gpu(&GpuFrame {
            view_proj: Mat4::IDENTITY,
            model: Mat4::IDENTITY,
            camera_position: Vec3::new(4.0, 4.0, 5.0),
            light_intensity: 0.8,
            ambient: 0.3,
        });
        let dir = Vec3::new(
            gpu.light_direction[0],
            gpu.light_direction[1],
            gpu.light_direction[2],
        );
        assert!((dir - Vec3::new(1.0, 3.0, 1.0).normalize()).length() < 1e-6);
        assert_eq!(gpu.light_direction[3], 0.8);
        assert_eq!(gpu.ambient, 0.3);
        assert_eq!(gpu.camera_position, [4.0, 4.0, 5.0, 1.0]);
    }
}
