//! Wavesphere library - wave-displaced surface with a hover override

pub mod binding;
pub mod camera;
pub mod cli;
pub mod clock;
pub mod color;
pub mod error;
pub mod frame;
pub mod interaction;
pub mod mesh;
pub mod panel;
pub mod params;
pub mod picking;
pub mod rendering;
pub mod store;
pub mod uniforms;
pub mod wave;
