//! GPU side of the attractor field: one compute tick plus one point pass per frame.

pub mod compute;
pub mod horizon;
pub mod points;

use field_core::constants::WORKGROUP_SIZE;
use field_core::{
    generate_scatter, pack_scatter, seed_field, FieldConfig, FieldError, FrameOutput,
    ParticleState,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

pub use compute::ComputeStepper;
pub use horizon::HorizonRenderer;
pub use points::PointRenderer;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter found")]
    NoAdapter,
    #[error("surface reports no supported texture format")]
    NoSurfaceFormat,
    #[error("grid width {width} needs {needed} {resource}, device allows {limit}")]
    GridExceedsDevice {
        width: u32,
        resource: &'static str,
        needed: u64,
        limit: u64,
    },
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Colours are written unconverted, so prefer a linear swapchain format.
fn pick_format(caps: &wgpu::SurfaceCapabilities) -> Option<wgpu::TextureFormat> {
    caps.formats
        .iter()
        .copied()
        .find(|f| {
            matches!(
                f,
                wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
            )
        })
        .or_else(|| caps.formats.first().copied())
}

/// Reject grids whose buffers or dispatch would not fit on this device.
pub fn check_limits(limits: &wgpu::Limits, field: &FieldConfig) -> Result<(), RenderError> {
    let states = field.state_count()? as u64;
    let points = field.point_count()? as u64;
    let checks = [
        (
            "bytes of state storage",
            states * std::mem::size_of::<ParticleState>() as u64,
            limits.max_storage_buffer_binding_size as u64,
        ),
        (
            "bytes of scatter storage",
            points * std::mem::size_of::<u32>() as u64,
            limits.max_storage_buffer_binding_size as u64,
        ),
        (
            "compute workgroups",
            states.div_ceil(WORKGROUP_SIZE as u64),
            limits.max_compute_workgroups_per_dimension as u64,
        ),
    ];
    for (resource, needed, limit) in checks {
        if needed > limit {
            return Err(RenderError::GridExceedsDevice {
                width: field.grid_width,
                resource,
                needed,
                limit,
            });
        }
    }
    Ok(())
}

pub struct FieldRenderer<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    compute: ComputeStepper,
    points: PointRenderer,
    horizon: HorizonRenderer,
}

impl<'a> FieldRenderer<'a> {
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'a>,
        width: u32,
        height: u32,
        field: &FieldConfig,
    ) -> Result<Self, RenderError> {
        field.validate()?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;
        log::info!("adapter: {:?}", adapter.get_info().name);
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;
        check_limits(&device.limits(), field)?;

        let caps = surface.get_capabilities(&adapter);
        let format = pick_format(&caps).ok_or(RenderError::NoSurfaceFormat)?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let mut rng = StdRng::seed_from_u64(field.seed);
        let states = seed_field(field.state_count()? as usize, &mut rng);
        let scatter = pack_scatter(&generate_scatter(field.point_count()? as usize, &mut rng));
        let compute = ComputeStepper::new(&device, &states);
        let points = PointRenderer::new(&device, format, compute.state_buffers(), &scatter);
        let horizon = HorizonRenderer::new(&device, format);
        log::info!(
            "field ready: {} trajectories, {} points, {:?}",
            states.len(),
            points.total_points(),
            format
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            compute,
            points,
            horizon,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.config.width || height != self.config.height {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Advance the field one tick and draw it.
    pub fn render(&mut self, frame: &FrameOutput) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("field_encoder"),
            });

        self.compute.step(&self.queue, &mut encoder, &frame.sim);
        self.points.write_uniforms(&self.queue, &frame.view);
        if frame.show_horizon {
            self.horizon.write_uniforms(&self.queue, &frame.horizon);
        }

        let [r, g, b, a] = frame.clear_color;
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("points_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if frame.show_horizon {
                self.horizon.draw(&mut rpass);
            }
            self.points.draw(
                &mut rpass,
                self.compute.current_index(),
                frame.visible_points,
                frame.blend,
            );
        }

        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}
