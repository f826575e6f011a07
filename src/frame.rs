//! Render loop driver.
//!
//! One [`FrameDriver::tick`] per redraw: advance the clock, test the pointer,
//! update the blender, refresh the uniforms from the selected set, then hand
//! the frame to a [`FrameSink`]. Nothing carries over between ticks except
//! the clock, the blender state and the parameter sets.

use glam::Mat4;

use crate::camera::CameraSystem;
use crate::clock::Clock;
use crate::interaction::{InteractionBlender, InteractionState, Transition};
use crate::params::LightSettings;
use crate::picking::{IntersectionMonitor, PointerState};
use crate::store::ParameterStore;
use crate::uniforms::{GpuFrame, GpuUniforms, UniformSet};

/// Everything a sink needs to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub index: u64,
    pub time_s: f32,
    pub state: InteractionState,
    pub uniforms: &'a UniformSet,
    pub gpu: GpuUniforms,
}

/// What became of a frame handed to a sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    Presented,
    /// Nothing reached the screen (e.g. the surface was reconfigured)
    Skipped,
}

/// Consumer of finished frames (the GPU renderer, or a recorder in tests)
pub trait FrameSink {
    type Error;

    fn draw(&mut self, frame: &FrameView<'_>) -> Result<DrawOutcome, Self::Error>;
}

/// Summary of one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub index: u64,
    pub time_s: f32,
    pub state: InteractionState,
    pub transition: Transition,
    pub hit: bool,
    pub outcome: DrawOutcome,
}

pub struct FrameDriver {
    clock: Clock,
    monitor: IntersectionMonitor,
    blender: InteractionBlender,
    uniforms: UniformSet,
    model: Mat4,
    light_intensity: f32,
    ambient: f32,
    frame: u64,
}

impl FrameDriver {
    pub fn new(clock: Clock, monitor: IntersectionMonitor, model: Mat4, light: &LightSettings) -> Self {
        Self {
            clock,
            monitor,
            blender: InteractionBlender::new(),
            uniforms: UniformSet::new(),
            model,
            light_intensity: light.intensity,
            ambient: light.ambient,
            frame: 0,
        }
    }

    pub fn uniforms(&self) -> &UniformSet {
        &self.uniforms
    }

    /// Target for control binding observers
    pub fn uniforms_mut(&mut self) -> &mut UniformSet {
        &mut self.uniforms
    }

    pub fn state(&self) -> InteractionState {
        self.blender.state()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn tick<S: FrameSink>(
        &mut self,
        store: &ParameterStore,
        pointer: &PointerState,
        camera: &CameraSystem,
        sink: &mut S,
    ) -> Result<FrameReport, S::Error> {
        let time_s = self.clock.advance();

        let hit = self.monitor.test(pointer, camera);
        let transition = self.blender.update(hit);
        match transition {
            Transition::Entered => log::debug!("Frame {}: pointer entered surface", self.frame),
            Transition::Exited => log::debug!("Frame {}: pointer left surface", self.frame),
            Transition::None => {}
        }

        let (active, source) = self.blender.select(store);
        self.uniforms.apply(active, source, time_s);
        self.uniforms.apply_scene(store.scene());

        let gpu = self.uniforms.to_gpu(&GpuFrame {
            view_proj: camera.view_proj(),
            model: self.model,
            camera_position: camera.eye(),
            light_intensity: self.light_intensity,
            ambient: self.ambient,
        });

        let index = self.frame;
        let state = self.blender.state();
        let outcome = sink.draw(&FrameView {
            index,
            time_s,
            state,
            uniforms: &self.uniforms,
            gpu,
        })?;
        match outcome {
            DrawOutcome::Presented => self.frame += 1,
            DrawOutcome::Skipped => {
                // Retry the same index and time on the next tick
                log::debug!("Frame {} skipped", index);
                self.clock.hold();
            }
        }

        Ok(FrameReport {
            index,
            time_s,
            state,
            transition,
            hit,
            outcome,
        })
    }
}
