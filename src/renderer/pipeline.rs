//! wgpu render pipeline setup

use std::sync::Arc;

use winit::window::Window;

use super::vertex::{Vertex, linear_color};
use crate::consts::BACKGROUND;
use crate::sim::{Rgb, Size};

/// Error type for GPU initialization
#[derive(Debug)]
pub enum RenderError {
    Surface(wgpu::CreateSurfaceError),
    Adapter(wgpu::RequestAdapterError),
    Device(wgpu::RequestDeviceError),
    /// The adapter reports no usable format or alpha mode for the surface
    IncompatibleSurface,
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Surface(e) => write!(f, "Failed to create surface: {}", e),
            RenderError::Adapter(e) => write!(f, "No suitable GPU adapter: {}", e),
            RenderError::Device(e) => write!(f, "Failed to create device: {}", e),
            RenderError::IncompatibleSurface => {
                write!(f, "Surface is not compatible with the GPU adapter")
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Surface(e) => Some(e),
            RenderError::Adapter(e) => Some(e),
            RenderError::Device(e) => Some(e),
            RenderError::IncompatibleSurface => None,
        }
    }
}

/// What the caller should do after a failed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Presented,
    /// Surface was reconfigured; try again next frame
    Skipped,
    /// Unrecoverable; stop the loop
    Fatal,
}

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
    /// Surface size in physical pixels
    pub size: (u32, u32),
    /// Logical playfield size the game draws in
    pub world: Size,
}

impl RenderState {
    /// Create a surface for `window` and build the pipeline (blocks on device setup)
    pub fn new(window: Arc<Window>, world: Size) -> Result<Self, RenderError> {
        let physical = window.inner_size();
        let (width, height) = (physical.width.max(1), physical.height.max(1));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .map_err(RenderError::Surface)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(RenderError::Adapter)?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        // Flat-colored triangles need nothing beyond the downlevel baseline,
        // except a texture size large enough for the window
        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("breakout-device"),
            required_limits: wgpu::Limits::downlevel_defaults().using_resolution(adapter.limits()),
            ..Default::default()
        }))
        .map_err(RenderError::Device)?;

        let config = surface_config(&surface.get_capabilities(&adapter), width, height)
            .ok_or(RenderError::IncompatibleSurface)?;
        surface.configure(&device, &config);

        let pipeline = create_pipeline(&device, config.format);

        // Grown on the first frame
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("vertex_buffer"),
            size: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            vertex_count: 0,
            size: (width, height),
            world,
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Upload pixel-space vertices, draw them and present
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        let ndc_vertices: Vec<Vertex> = vertices
            .iter()
            .map(|v| {
                let (x, y) = pixel_to_ndc(self.world, v.position[0], v.position[1]);
                Vertex::new(x, y, v.color)
            })
            .collect();

        // Reuse the buffer across frames; grow it when the frame outgrows it
        let bytes: &[u8] = bytemuck::cast_slice(&ndc_vertices);
        if bytes.len() as wgpu::BufferAddress > self.vertex_buffer.size() {
            self.vertex_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("vertex_buffer"),
                size: (bytes.len() as wgpu::BufferAddress).next_power_of_two(),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        }
        if !bytes.is_empty() {
            self.queue.write_buffer(&self.vertex_buffer, 0, bytes);
        }
        self.vertex_count = ndc_vertices.len() as u32;

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if self.vertex_count > 0 {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.draw(0..self.vertex_count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Render and turn surface errors into a loop decision
    pub fn render_frame(&mut self, vertices: &[Vertex]) -> FrameStatus {
        match self.render(vertices) {
            Ok(()) => FrameStatus::Presented,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                self.resize(self.size.0, self.size.1);
                FrameStatus::Skipped
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                FrameStatus::Fatal
            }
            Err(e) => {
                log::warn!("Render error: {:?}", e);
                FrameStatus::Skipped
            }
        }
    }
}

/// Surface setup for the given capabilities, preferring an sRGB format
///
/// Vsync paces the simulation: one tick per presented frame.
pub fn surface_config(
    caps: &wgpu::SurfaceCapabilities,
    width: u32,
    height: u32,
) -> Option<wgpu::SurfaceConfiguration> {
    let format = caps
        .formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| caps.formats.first().copied())?;
    let alpha_mode = caps.alpha_modes.first().copied()?;

    Some(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: width.max(1),
        height: height.max(1),
        present_mode: wgpu::PresentMode::AutoVsync,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    })
}

/// Alpha-blended triangle list with per-vertex color
fn create_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("flat_color_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("flat_color_layout"),
        bind_group_layouts: &[],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("flat_color_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        // Quads are emitted with mixed winding, so nothing is culled
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

/// Map a pixel position (origin top-left, y down) to normalized device coordinates
pub fn pixel_to_ndc(world: Size, x: f32, y: f32) -> (f32, f32) {
    let w = world.width.max(1) as f32;
    let h = world.height.max(1) as f32;
    (x / w * 2.0 - 1.0, 1.0 - y / h * 2.0)
}

fn clear_color() -> wgpu::Color {
    let (r, g, b) = BACKGROUND;
    let [r, g, b, a] = linear_color(Rgb::new(r, g, b));
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: a as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_to_ndc_corners() {
        let world = Size::new(800, 600);
        assert_eq!(pixel_to_ndc(world, 0.0, 0.0), (-1.0, 1.0));
        assert_eq!(pixel_to_ndc(world, 800.0, 600.0), (1.0, -1.0));
        assert_eq!(pixel_to_ndc(world, 400.0, 300.0), (0.0, 0.0));
    }

    fn caps(formats: Vec<wgpu::TextureFormat>) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats,
            present_modes: vec![wgpu::PresentMode::Fifo],
            alpha_modes: vec![wgpu::CompositeAlphaMode::Opaque],
            usages: wgpu::TextureUsages::RENDER_ATTACHMENT,
        }
    }

    #[test]
    fn test_surface_config_prefers_srgb() {
        let config = surface_config(
            &caps(vec![
                wgpu::TextureFormat::Bgra8Unorm,
                wgpu::TextureFormat::Bgra8UnormSrgb,
            ]),
            800,
            600,
        )
        .unwrap();
        assert_eq!(config.format, wgpu::TextureFormat::Bgra8UnormSrgb);
        assert_eq!(config.present_mode, wgpu::PresentMode::AutoVsync);
        assert_eq!((config.width, config.height), (800, 600));
    }

    #[test]
    fn test_surface_config_falls_back_to_first_format() {
        let config = surface_config(&caps(vec![wgpu::TextureFormat::Rgba8Unorm]), 0, 0).unwrap();
        assert_eq!(config.format, wgpu::TextureFormat::Rgba8Unorm);
        // Zero-sized surfaces cannot be configured
        assert_eq!((config.width, config.height), (1, 1));
    }

    #[test]
    fn test_surface_config_rejects_empty_caps() {
        assert!(surface_config(&caps(Vec::new()), 800, 600).is_none());
        let mut no_alpha = caps(vec![wgpu::TextureFormat::Rgba8UnormSrgb]);
        no_alpha.alpha_modes.clear();
        assert!(surface_config(&no_alpha, 800, 600).is_none());
    }

    #[test]
    fn test_clear_color_is_opaque_and_dark() {
        let c = clear_color();
        assert_eq!(c.a, 1.0);
        assert!(c.r < 0.05 && c.g < 0.05 && c.b < 0.05);
    }
}
