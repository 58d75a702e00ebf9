//=========================================================================
// GPU Surface
//=========================================================================
//
// Hardware-accelerated `RenderSurface` on top of wgpu.
//
// Architecture:
// ```text
//   clear()         → reset frame draw list
//   draw_texture()  → append (TextureId, Rect)
//   present()       → acquire swapchain frame
//                     → build one quad (6 vertices) per draw
//                     → single render pass: LoadOp::Clear, then
//                       bind texture + draw quad, in call order
//                     → submit, present
// ```
//
// Pixel rectangles are converted to clip space against the current
// surface size; textures are sampled with alpha blending so the trail's
// transparency shows through.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use log::{debug, info, warn};
use winit::{dpi::PhysicalSize, window::Window};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::InitError;
use crate::core::render::{AssetLoadError, Rect, RenderSurface, TextureData, TextureId};

//=== Vertex ==============================================================

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
struct Vertex {
    position: [f32; 2],
    uv: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

const VERTICES_PER_QUAD: usize = 6;

/// Two triangles covering `dest`, in clip space for a `target`-sized surface.
fn quad(dest: Rect, target: (u32, u32)) -> [Vertex; VERTICES_PER_QUAD] {
    let (w, h) = (target.0.max(1) as f32, target.1.max(1) as f32);

    let left = dest.x as f32 / w * 2.0 - 1.0;
    let right = (dest.x as f32 + dest.width as f32) / w * 2.0 - 1.0;
    let top = 1.0 - dest.y as f32 / h * 2.0;
    let bottom = 1.0 - (dest.y as f32 + dest.height as f32) / h * 2.0;

    let top_left = Vertex { position: [left, top], uv: [0.0, 0.0] };
    let bottom_left = Vertex { position: [left, bottom], uv: [0.0, 1.0] };
    let bottom_right = Vertex { position: [right, bottom], uv: [1.0, 1.0] };
    let top_right = Vertex { position: [right, top], uv: [1.0, 0.0] };

    [top_left, bottom_left, bottom_right, top_left, bottom_right, top_right]
}

//=== GpuTexture ==========================================================

struct GpuTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

#[derive(Debug, Clone, Copy)]
struct DrawCommand {
    texture: TextureId,
    dest: Rect,
}

//=== GpuSurface ==========================================================

/// wgpu swapchain, sprite pipeline and texture registry for one window.
pub(crate) struct GpuSurface {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    vertex_buffer: wgpu::Buffer,
    /// Capacity of `vertex_buffer`, in vertices.
    vertex_capacity: usize,
    /// Slot `i` holds `TextureId(i)`; released slots stay `None`.
    textures: Vec<Option<GpuTexture>>,
    frame: Vec<DrawCommand>,
    clear_color: wgpu::Color,
}

impl GpuSurface {
    const INITIAL_QUADS: usize = 64;

    //--- Construction -----------------------------------------------------

    /// Creates the renderer for `window`. Blocks on adapter/device setup.
    pub(crate) fn new(window: Arc<Window>, vsync: bool) -> Result<Self, InitError> {
        pollster::block_on(Self::create(window, vsync))
    }

    async fn create(window: Arc<Window>, vsync: bool) -> Result<Self, InitError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(|e| InitError::SurfaceCreation(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(InitError::AdapterUnavailable)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("cursor-trail device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .map_err(|e| InitError::DeviceRequest(e.to_string()))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or(InitError::UnsupportedSurface)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sprite bind group layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline = Self::create_pipeline(&device, &bind_group_layout, config.format);

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sprite sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let vertex_capacity = Self::INITIAL_QUADS * VERTICES_PER_QUAD;
        let vertex_buffer = Self::create_vertex_buffer(&device, vertex_capacity);

        info!(
            target: "platform::gpu",
            "Renderer ready: {} ({:?}), {}x{} {:?}, {:?}",
            adapter.get_info().name,
            adapter.get_info().backend,
            config.width,
            config.height,
            config.format,
            config.present_mode
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            bind_group_layout,
            sampler,
            vertex_buffer,
            vertex_capacity,
            textures: Vec::new(),
            frame: Vec::with_capacity(Self::INITIAL_QUADS),
            clear_color: wgpu::Color::BLACK,
        })
    }

    fn create_pipeline(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sprite shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("sprite.wgsl").into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sprite pipeline layout"),
            bind_group_layouts: &[bind_group_layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sprite pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    fn create_vertex_buffer(device: &wgpu::Device, vertices: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sprite vertex buffer"),
            size: (std::mem::size_of::<Vertex>() * vertices) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    //--- Window Integration -----------------------------------------------

    /// Reconfigures the swapchain. Zero sizes (minimized) are ignored.
    pub(crate) fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            debug!(target: "platform::gpu", "Ignoring resize to {}x{}", size.width, size.height);
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
    }

    //--- Internal Helpers -------------------------------------------------

    fn ensure_vertex_capacity(&mut self, vertices: usize) {
        if vertices <= self.vertex_capacity {
            return;
        }
        let capacity = vertices.next_power_of_two();
        debug!(target: "platform::gpu", "Growing vertex buffer to {} vertices", capacity);
        self.vertex_buffer = Self::create_vertex_buffer(&self.device, capacity);
        self.vertex_capacity = capacity;
    }

    fn validate(&self, data: &TextureData) -> Result<(), AssetLoadError> {
        let max = self.device.limits().max_texture_dimension_2d;
        if data.width > max || data.height > max {
            return Err(AssetLoadError::Unsupported {
                reason: format!("{}x{} exceeds the {}px limit", data.width, data.height, max),
            });
        }
        let expected = data.width as usize * data.height as usize * 4;
        if data.width == 0 || data.height == 0 || data.pixels.len() != expected {
            return Err(AssetLoadError::Unsupported {
                reason: format!(
                    "{}x{} needs {} RGBA bytes, got {}",
                    data.width,
                    data.height,
                    expected,
                    data.pixels.len()
                ),
            });
        }
        Ok(())
    }
}

//=== RenderSurface =======================================================

impl RenderSurface for GpuSurface {
    fn create_texture(&mut self, data: &TextureData) -> Result<TextureId, AssetLoadError> {
        self.validate(data)?;

        let size = wgpu::Extent3d {
            width: data.width,
            height: data.height,
            depth_or_array_layers: 1,
        };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("sprite texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &data.pixels,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(data.bytes_per_row()),
                rows_per_image: Some(data.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sprite bind group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        let id = TextureId(self.textures.len() as u32);
        self.textures.push(Some(GpuTexture { texture, bind_group }));
        debug!(target: "platform::gpu", "Created texture {:?} ({}x{})", id, data.width, data.height);
        Ok(id)
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        let released = self
            .textures
            .get_mut(texture.index() as usize)
            .and_then(Option::take);

        match released {
            Some(gpu) => {
                gpu.texture.destroy();
                debug!(target: "platform::gpu", "Destroyed texture {:?}", texture);
            }
            None => warn!(target: "platform::gpu", "destroy_texture on unknown {:?}", texture),
        }
    }

    fn clear(&mut self) {
        self.frame.clear();
    }

    fn draw_texture(&mut self, texture: TextureId, dest: Rect) {
        if dest.is_degenerate() {
            return;
        }
        self.frame.push(DrawCommand { texture, dest });
    }

    fn present(&mut self) {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!(target: "platform::gpu", "Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                self.frame.clear();
                return;
            }
            Err(e) => {
                warn!(target: "platform::gpu", "Skipping frame: {}", e);
                self.frame.clear();
                return;
            }
        };

        //--- Build vertices for live textures, in draw order --------------
        let target = (self.config.width, self.config.height);
        let mut vertices = Vec::with_capacity(self.frame.len() * VERTICES_PER_QUAD);
        let mut slots = Vec::with_capacity(self.frame.len());
        for command in &self.frame {
            let slot = command.texture.index() as usize;
            if matches!(self.textures.get(slot), Some(Some(_))) {
                vertices.extend_from_slice(&quad(command.dest, target));
                slots.push(slot);
            }
        }
        self.frame.clear();

        self.ensure_vertex_capacity(vertices.len());
        if !vertices.is_empty() {
            self.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        }

        //--- Record the pass ----------------------------------------------
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sprite pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

            for (quad_index, slot) in slots.iter().enumerate() {
                if let Some(Some(gpu)) = self.textures.get(*slot) {
                    let first = (quad_index * VERTICES_PER_QUAD) as u32;
                    pass.set_bind_group(0, &gpu.bind_group, &[]);
                    pass.draw(first..first + VERTICES_PER_QUAD as u32, 0..1);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }

    fn output_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
