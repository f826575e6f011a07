//! Rendering and recording configuration.

use crate::wave::ShadingVariant;

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Fragment shading variant
    pub variant: ShadingVariant,

    /// Background clear color (linear RGB)
    pub clear_color: [f64; 3],

    /// Control panel expanded at startup
    pub panel_open: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            variant: ShadingVariant::Unlit,
            clear_color: [0.0, 0.0, 0.0],
            panel_open: false,
        }
    }
}

/// Recording mode configuration
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Duration to record (seconds)
    pub duration_secs: f32,

    /// Output directory for frames
    pub output_dir: String,

    /// Frame rate (FPS), also the fixed clock step
    pub fps: u32,
}

impl RecordingConfig {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            duration_secs,
            output_dir: "recording".to_string(),
            fps: 60,
        }
    }

    /// Total number of frames to capture
    pub fn total_frames(&self) -> usize {
        (self.duration_secs * self.fps as f32).ceil() as usize
    }

    /// Seconds between captured frames
    pub fn frame_step_s(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }

    /// Frame directory path
    pub fn frames_dir(&self) -> String {
        format!("{}/frames", self.output_dir)
    }

    /// Path of one captured frame
    pub fn frame_path(&self, frame_num: u64) -> String {
        format!("{}/frame_{:05}.png", self.frames_dir(), frame_num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_frame_count() {
        let config = RecordingConfig::new(2.5);
        assert_eq!(config.total_frames(), 150);
        assert_eq!(config.frame_path(7), "recording/frames/frame_00007.png");
    }
}
