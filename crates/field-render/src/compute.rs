//! Ping-pong storage buffers advanced by `simulate.wgsl`.

use field_core::constants::WORKGROUP_SIZE;
use field_core::{ParticleState, SimUniforms};
use wgpu::util::DeviceExt;

pub struct ComputeStepper {
    pipeline: wgpu::ComputePipeline,
    uniform_buffer: wgpu::Buffer,
    states: [wgpu::Buffer; 2],
    // bind_groups[i] reads states[i] and writes states[1 - i]
    bind_groups: [wgpu::BindGroup; 2],
    current: usize,
    count: u32,
}

impl ComputeStepper {
    pub fn new(device: &wgpu::Device, initial: &[ParticleState]) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("simulate_shader"),
            source: wgpu::ShaderSource::Wgsl(field_core::SIMULATE_WGSL.into()),
        });

        let storage = |binding: u32, read_only: bool| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::COMPUTE,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Storage { read_only },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("simulate_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                storage(1, true),
                storage(2, false),
            ],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("simulate_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("simulate_pipeline"),
            layout: Some(&layout),
            module: &shader,
            entry_point: Some("cs_main"),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            cache: None,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("simulate_uniforms"),
            size: std::mem::size_of::<SimUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let usage = wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST;
        let states = [
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("state_a"),
                contents: bytemuck::cast_slice(initial),
                usage,
            }),
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("state_b"),
                size: std::mem::size_of_val(initial) as u64,
                usage,
                mapped_at_creation: false,
            }),
        ];

        let make_bg = |label: &str, src: &wgpu::Buffer, dst: &wgpu::Buffer| {
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
                        resource: src.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: dst.as_entire_binding(),
                    },
                ],
            })
        };
        let bind_groups = [
            make_bg("simulate_a_to_b", &states[0], &states[1]),
            make_bg("simulate_b_to_a", &states[1], &states[0]),
        ];

        Self {
            pipeline,
            uniform_buffer,
            states,
            bind_groups,
            current: 0,
            count: initial.len() as u32,
        }
    }

    /// Both state buffers, indexed as reported by [`ComputeStepper::current_index`].
    pub fn state_buffers(&self) -> [&wgpu::Buffer; 2] {
        [&self.states[0], &self.states[1]]
    }

    /// Index of the buffer written by the most recent tick.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &wgpu::Buffer {
        &self.states[self.current]
    }

    /// Record one tick into `encoder` and swap roles.
    pub fn step(&mut self, queue: &wgpu::Queue, encoder: &mut wgpu::CommandEncoder, uniforms: &SimUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("simulate_pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_groups[self.current], &[]);
            pass.dispatch_workgroups(self.count.div_ceil(WORKGROUP_SIZE), 1, 1);
        }
        self.current = 1 - self.current;
    }
}
