//! Rendering system with wgpu pipeline and shader management.

use std::sync::Arc;

use bytemuck::Zeroable;
use wgpu::util::DeviceExt;

use crate::error::InitError;
use crate::frame::{DrawOutcome, FrameSink, FrameView};
use crate::mesh::{BaseMesh, Vertex};
use crate::panel::OverlayFrame;
use crate::params::{RecordingConfig, RenderConfig};
use crate::uniforms::GpuUniforms;
use crate::wave::{ShadingVariant, SHADER_SOURCE};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Rendering system managing wgpu device, pipelines, and buffers
pub struct RenderSystem {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    fill_pipeline: wgpu::RenderPipeline,
    /// Present only when the adapter supports `POLYGON_MODE_LINE`
    line_pipeline: Option<wgpu::RenderPipeline>,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    index_count: u32,
    clear_color: wgpu::Color,
    egui_renderer: egui_wgpu::Renderer,
    recording_config: Option<RecordingConfig>,
    warned_no_wireframe: bool,
}

impl RenderSystem {
    /// Create new rendering system
    pub async fn new(
        window: Arc<winit::window::Window>,
        mesh: &BaseMesh,
        render_config: &RenderConfig,
        recording_config: Option<RecordingConfig>,
    ) -> Result<Self, InitError> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface (window must have 'static lifetime via Arc)
        let surface = instance.create_surface(window)?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(InitError::NoAdapter)?;

        // Line rasterization is optional; without it the wireframe toggle is ignored
        let wireframe_supported = adapter
            .features()
            .contains(wgpu::Features::POLYGON_MODE_LINE);
        let required_features = if wireframe_supported {
            wgpu::Features::POLYGON_MODE_LINE
        } else {
            wgpu::Features::empty()
        };

        // Request device
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features,
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(InitError::NoSurfaceFormat)?;

        let mut usage = wgpu::TextureUsages::RENDER_ATTACHMENT;

        // Add COPY_SRC if recording (needed for frame capture)
        if recording_config.is_some() {
            usage |= wgpu::TextureUsages::COPY_SRC;
        }

        let config = wgpu::SurfaceConfiguration {
            usage,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Wave Shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
        });

        // Create buffers
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::bytes_of(&GpuUniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Wave Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let fill_pipeline = create_wave_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            config.format,
            render_config.variant,
            wgpu::PolygonMode::Fill,
        );
        let line_pipeline = wireframe_supported.then(|| {
            create_wave_pipeline(
                &device,
                &pipeline_layout,
                &shader,
                config.format,
                render_config.variant,
                wgpu::PolygonMode::Line,
            )
        });

        let depth_view = create_depth_view(&device, config.width, config.height);
        let egui_renderer = egui_wgpu::Renderer::new(&device, config.format, None, 1, false);

        let [r, g, b] = render_config.clear_color;
        log::info!(
            "Renderer ready: {:?}, {}x{}, wireframe {}",
            config.format,
            config.width,
            config.height,
            if wireframe_supported { "available" } else { "unsupported" }
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            fill_pipeline,
            line_pipeline,
            vertex_buffer,
            index_buffer,
            uniform_buffer,
            uniform_bind_group,
            depth_view,
            index_count: mesh.indices.len() as u32,
            clear_color: wgpu::Color { r, g, b, a: 1.0 },
            egui_renderer,
            recording_config,
            warned_no_wireframe: false,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Reconfigure the surface and depth buffer. A zero size is ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, width, height);
    }

    /// Render a frame (and optionally capture if recording).
    ///
    /// A lost or outdated surface is reconfigured and the frame is reported
    /// as skipped, so nothing is captured for it.
    pub fn render(
        &mut self,
        uniforms: &GpuUniforms,
        wireframe: bool,
        overlay: Option<OverlayFrame>,
        frame_num: u64,
    ) -> Result<DrawOutcome, wgpu::SurfaceError> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                // egui only sends texture updates once
                if let Some(overlay) = &overlay {
                    self.upload_overlay_textures(&overlay.textures_delta);
                }
                return Ok(DrawOutcome::Skipped);
            }
            Err(e) => return Err(e),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[*uniforms]));

        let pipeline = match (&self.line_pipeline, wireframe) {
            (Some(line), true) => line,
            (None, true) => {
                if !self.warned_no_wireframe {
                    log::warn!("Wireframe requested but POLYGON_MODE_LINE is unsupported");
                    self.warned_no_wireframe = true;
                }
                &self.fill_pipeline
            }
            _ => &self.fill_pipeline,
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Wave Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..self.index_count, 0, 0..1);
        }

        let mut command_buffers = Vec::new();
        if let Some(overlay) = overlay {
            command_buffers = self.draw_overlay(&mut encoder, &view, overlay);
        }
        command_buffers.push(encoder.finish());
        self.queue.submit(command_buffers);

        // Capture frame if recording
        if let Some(config) = &self.recording_config {
            self.capture_frame(frame_num, config, &output);
        }

        output.present();

        Ok(DrawOutcome::Presented)
    }

    fn upload_overlay_textures(&mut self, delta: &egui::TexturesDelta) {
        for (id, image) in &delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image);
        }
    }

    /// Paint the control panel on top of the wave pass
    fn draw_overlay(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        overlay: OverlayFrame,
    ) -> Vec<wgpu::CommandBuffer> {
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: overlay.pixels_per_point,
        };

        self.upload_overlay_textures(&overlay.textures_delta);
        let command_buffers = self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            encoder,
            &overlay.paint_jobs,
            &screen,
        );

        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Panel Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &overlay.paint_jobs, &screen);
        }

        for id in &overlay.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        command_buffers
    }

    /// Capture a frame to disk (recording mode only)
    fn capture_frame(
        &self,
        frame_num: u64,
        config: &RecordingConfig,
        texture: &wgpu::SurfaceTexture,
    ) {
        let (width, height) = self.size();
        let bytes_per_pixel = 4; // RGBA8 or BGRA8
        let unpadded_bytes_per_row = width * bytes_per_pixel;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_bytes_per_row = unpadded_bytes_per_row.div_ceil(align) * align;

        // Create buffer to read texture data
        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Capture Buffer"),
            size: (padded_bytes_per_row * height) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        // Copy texture to buffer
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Capture Encoder"),
            });

        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &texture.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        self.queue.submit(std::iter::once(encoder.finish()));

        // Map buffer and save to PNG
        let buffer_slice = buffer.slice(..);
        buffer_slice.map_async(wgpu::MapMode::Read, |_| {});
        self.device.poll(wgpu::Maintain::Wait);

        let data = buffer_slice.get_mapped_range();
        let mut image_data = vec![0u8; (width * height * bytes_per_pixel) as usize];

        // Remove padding
        for y in 0..height {
            let padded_offset = (y * padded_bytes_per_row) as usize;
            let unpadded_offset = (y * unpadded_bytes_per_row) as usize;
            image_data[unpadded_offset..unpadded_offset + unpadded_bytes_per_row as usize]
                .copy_from_slice(
                    &data[padded_offset..padded_offset + unpadded_bytes_per_row as usize],
                );
        }

        drop(data);
        buffer.unmap();

        if is_bgra(self.config.format) {
            for pixel in image_data.chunks_exact_mut(4) {
                pixel.swap(0, 2);
            }
        }

        let frame_path = config.frame_path(frame_num);
        if let Err(e) = image::save_buffer(
            &frame_path,
            &image_data,
            width,
            height,
            image::ColorType::Rgba8,
        ) {
            log::error!("Failed to save frame {}: {}", frame_num, e);
        }
    }
}

fn is_bgra(format: wgpu::TextureFormat) -> bool {
    matches!(
        format,
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb
    )
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_wave_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    variant: ShadingVariant,
    polygon_mode: wgpu::PolygonMode,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(match polygon_mode {
            wgpu::PolygonMode::Line => "Wave Line Pipeline",
            _ => "Wave Fill Pipeline",
        }),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![
                    0 => Float32x3,
                    1 => Float32x3,
                    2 => Float32x2
                ],
            }],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(variant.fragment_entry()),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            polygon_mode,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

/// Adapter that lets the frame driver draw into the window
pub struct WindowSink<'a> {
    pub renderer: &'a mut RenderSystem,
    pub overlay: Option<OverlayFrame>,
}

impl FrameSink for WindowSink<'_> {
    type Error = wgpu::SurfaceError;

    fn draw(&mut self, frame: &FrameView<'_>) -> Result<DrawOutcome, Self::Error> {
        self.renderer.render(
            &frame.gpu,
            frame.uniforms.wireframe(),
            self.overlay.take(),
            frame.index,
        )
    }
}
