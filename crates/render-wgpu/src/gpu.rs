use crate::shaders;
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use wirecubes_kernel::Scene;
use wirecubes_render::{OrthoView, Palette, Rgba};

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    viewport: [f32; 4],
}

impl Uniforms {
    fn from_view(view: &OrthoView) -> Self {
        Self {
            view_proj: view.view_projection().to_cols_array_2d(),
            viewport: [view.width as f32, view.height as f32, 0.0, 0.0],
        }
    }
}

/// One polyline segment as uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SegmentInstance {
    /// Start point xyz, line distance at the start in w.
    pub start: [f32; 4],
    /// End point xyz, line distance at the end in w.
    pub end: [f32; 4],
    pub color: [f32; 4],
    /// `(width_px, dash_size, gap_size, 0)`; a zero dash size means solid.
    pub style: [f32; 4],
}

/// Flatten the scene into segment instances in draw order.
///
/// `linear` converts colors for sRGB render targets.
pub fn segment_instances(scene: &Scene, palette: &Palette, linear: bool) -> Vec<SegmentInstance> {
    let mut instances = Vec::with_capacity(scene.primitive_count() * 4);
    for prim in scene.primitives_in_draw_order() {
        let material = palette.material(prim.style);
        let color = if linear {
            material.color.to_linear()
        } else {
            material.color
        };
        let (dash, gap) = material.dash.map_or((0.0, 0.0), |d| (d.size, d.gap));
        let distances = prim.cumulative_distances();
        for (k, (a, b)) in prim.segments().enumerate() {
            instances.push(SegmentInstance {
                start: a.extend(distances[k]).to_array(),
                end: b.extend(distances[k + 1]).to_array(),
                color: color.to_array(),
                style: [material.width, dash, gap, 0.0],
            });
        }
    }
    instances
}

fn clear_color(color: Rgba) -> wgpu::Color {
    wgpu::Color {
        r: color.r as f64,
        g: color.g as f64,
        b: color.b as f64,
        a: color.a as f64,
    }
}

/// wgpu line renderer for a static scene.
pub struct WgpuRenderer {
    line_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    background: wgpu::Color,
}

impl WgpuRenderer {
    /// Build pipelines and upload the scene once.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        view: &OrthoView,
        scene: &Scene,
        palette: &Palette,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms::from_view(view)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let line_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("line_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::LINE_SHADER.into()),
        });

        let line_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("line_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &line_shader,
                entry_point: Some("vs_line"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<SegmentInstance>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x4,
                        1 => Float32x4,
                        2 => Float32x4,
                        3 => Float32x4,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &line_shader,
                entry_point: Some("fs_line"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let linear = surface_format.is_srgb();
        let instances = segment_instances(scene, palette, linear);
        let instance_count = instances.len() as u32;
        // wgpu rejects empty vertex buffers; upload one zeroed instance that is never drawn
        let contents: &[u8] = if instances.is_empty() {
            bytemuck::bytes_of(&PLACEHOLDER)
        } else {
            bytemuck::cast_slice(&instances)
        };
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("segment_instance_buffer"),
            contents,
            usage: wgpu::BufferUsages::VERTEX,
        });

        let background = if linear {
            palette.background.to_linear()
        } else {
            palette.background
        };

        tracing::info!(
            segments = instance_count,
            format = ?surface_format,
            "uploaded scene to GPU"
        );

        Self {
            line_pipeline,
            uniform_buffer,
            uniform_bind_group,
            instance_buffer,
            instance_count,
            background: clear_color(background),
        }
    }

    pub fn segment_count(&self) -> u32 {
        self.instance_count
    }

    /// Present one frame of the uploaded scene.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        view: &OrthoView,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms::from_view(view)),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("line_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.background),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            if self.instance_count > 0 {
                pass.set_pipeline(&self.line_pipeline);
                pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
                pass.draw(0..6, 0..self.instance_count);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}

const PLACEHOLDER: SegmentInstance = SegmentInstance {
    start: [0.0; 4],
    end: [0.0; 4],
    color: [0.0; 4],
    style: [0.0; 4],
};
