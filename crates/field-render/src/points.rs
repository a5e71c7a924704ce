//! Instanced point sprites drawn from the current state buffer.

use field_core::constants::SUB_PARTICLES;
use field_core::{BlendMode, ViewUniforms};
use wgpu::util::DeviceExt;

const VERTS_PER_POINT: u32 = 6;

const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

fn make_points_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    label: &str,
    color_format: wgpu::TextureFormat,
    blend: wgpu::BlendState,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

pub struct PointRenderer {
    additive: wgpu::RenderPipeline,
    alpha: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    // One per state buffer so the draw always reads the one written last.
    bind_groups: [wgpu::BindGroup; 2],
    total_points: u32,
}

impl PointRenderer {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        state_buffers: [&wgpu::Buffer; 2],
        packed_scatter: &[u32],
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("points_shader"),
            source: wgpu::ShaderSource::Wgsl(field_core::POINTS_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("points_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("points_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let additive = make_points_pipeline(
            device,
            &layout,
            &shader,
            "points_additive",
            color_format,
            ADDITIVE,
        );
        let alpha = make_points_pipeline(
            device,
            &layout,
            &shader,
            "points_alpha",
            color_format,
            wgpu::BlendState::ALPHA_BLENDING,
        );

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("points_uniforms"),
            size: std::mem::size_of::<ViewUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scatter_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scatter"),
            contents: bytemuck::cast_slice(packed_scatter),
            usage: wgpu::BufferUsages::STORAGE,
        });

        let make_bg = |label: &str, states: &wgpu::Buffer| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &bgl,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: states.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: scatter_buffer.as_entire_binding(),
                    },
                ],
            })
        };
        let bind_groups = [
            make_bg("points_bg_a", state_buffers[0]),
            make_bg("points_bg_b", state_buffers[1]),
        ];

        Self {
            additive,
            alpha,
            uniform_buffer,
            bind_groups,
            total_points: packed_scatter.len() as u32,
        }
    }

    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    pub fn write_uniforms(&self, queue: &wgpu::Queue, uniforms: &ViewUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Draw the first `visible` points reading state buffer `state_index`.
    pub fn draw(
        &self,
        rpass: &mut wgpu::RenderPass<'_>,
        state_index: usize,
        visible: u32,
        blend: BlendMode,
    ) {
        let visible = visible.min(self.total_points);
        if visible == 0 {
            return;
        }
        debug_assert_eq!(self.total_points % SUB_PARTICLES, 0);
        rpass.set_pipeline(match blend {
            BlendMode::Additive => &self.additive,
            BlendMode::Alpha => &self.alpha,
        });
        rpass.set_bind_group(0, &self.bind_groups[state_index], &[]);
        rpass.draw(0..VERTS_PER_POINT, 0..visible);
    }
}
