//! Command-line argument parsing.

use clap::Parser;

use crate::params::{RecordingConfig, RenderConfig, SurfaceConfig, SurfaceMesh};
use crate::wave::ShadingVariant;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "wavesphere")]
#[command(about = "Interactive wave-displaced sphere with hover override", long_about = None)]
pub struct Args {
    /// Fragment shading variant
    #[arg(long, value_enum, default_value_t = ShadingVariant::Unlit)]
    pub variant: ShadingVariant,

    /// Base mesh the wave is applied to
    #[arg(long, value_enum, default_value_t = SurfaceMesh::Sphere)]
    pub mesh: SurfaceMesh,

    /// Window width (pixels)
    #[arg(long, value_name = "PIXELS", default_value_t = 1280)]
    pub width: u32,

    /// Window height (pixels)
    #[arg(long, value_name = "PIXELS", default_value_t = 720)]
    pub height: u32,

    /// Expand the control panel folders at startup
    #[arg(long)]
    pub panel_open: bool,

    /// Record frames to disk (duration in seconds), then exit
    #[arg(long, value_name = "SECONDS")]
    pub record: Option<f32>,
}

impl Args {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width,
            window_height: self.height,
            variant: self.variant,
            panel_open: self.panel_open,
            ..RenderConfig::default()
        }
    }

    pub fn surface_config(&self) -> SurfaceConfig {
        SurfaceConfig {
            mesh: self.mesh,
            ..SurfaceConfig::default()
        }
    }

    /// Create recording configuration if recording mode is enabled
    pub fn create_recording_config(&self) -> std::io::Result<Option<RecordingConfig>> {
        let Some(duration) = self.record else {
            return Ok(None);
        };
        let config = RecordingConfig::new(duration.max(0.0));

        // Create output directories
        std::fs::create_dir_all(config.frames_dir())?;
        Ok(Some(config))
    }
}
