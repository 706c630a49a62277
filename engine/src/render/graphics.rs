//! Window-bound GPU state.

use std::sync::Arc;

use glam::Vec3;
use wgpu::util::DeviceExt;
use winit::{dpi::PhysicalSize, event_loop::EventLoopProxy, window::Window};

use super::{pipeline, Globals, InstanceRaw};
use crate::assets::MeshData;
use crate::error::EngineError;
use crate::scene::{Renderable, World};

/// Delivered to the event loop once the GPU is ready (or failed).
pub type GraphicsResult = Result<Graphics, EngineError>;

const INITIAL_INSTANCE_CAPACITY: usize = 64;
const LIGHT_DIR: Vec3 = Vec3::new(-0.4, 0.6, -1.0);

struct GpuMesh {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, mesh: &MeshData) -> Self {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertices"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_indices"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertices,
            indices,
            index_count: mesh.indices.len() as u32,
        }
    }
}

pub struct Graphics {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::RenderPipeline,
    globals: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    instances: wgpu::Buffer,
    instance_capacity: usize,
    meshes: Vec<GpuMesh>,
    clear_color: wgpu::Color,
}

/// Initialises the GPU for `window` and hands the result to the event loop.
pub async fn create_graphics(
    window: Arc<Window>,
    proxy: EventLoopProxy<GraphicsResult>,
    clear_color: [f64; 3],
) {
    let result = Graphics::new(window, clear_color).await;
    if proxy.send_event(result).is_err() {
        log::error!("event loop closed before graphics were ready");
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("instances"),
        size: (capacity * std::mem::size_of::<InstanceRaw>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

impl Graphics {
    async fn new(window: Arc<Window>, clear_color: [f64; 3]) -> Result<Self, EngineError> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window.clone())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await?;
        let info = adapter.get_info();
        log::info!("Adapter: {:?} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("engine_device"),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                ..Default::default()
            })
            .await?;

        let surface_config = surface
            .get_default_config(&adapter, size.width.max(1), size.height.max(1))
            .ok_or(EngineError::SurfaceUnsupported)?;
        surface.configure(&device, &surface_config);

        let pipeline = pipeline::create_mesh_pipeline(&device, surface_config.format);
        let globals = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals"),
            contents: bytemuck::bytes_of(&Globals::new(glam::Mat4::IDENTITY, LIGHT_DIR)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bind_group"),
            layout: &pipeline.get_bind_group_layout(0),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals.as_entire_binding(),
            }],
        });
        let instances = create_instance_buffer(&device, INITIAL_INSTANCE_CAPACITY);

        let [r, g, b] = clear_color;
        Ok(Self {
            window,
            surface,
            surface_config,
            device,
            queue,
            pipeline,
            globals,
            globals_bind_group,
            instances,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            meshes: Vec::new(),
            clear_color: wgpu::Color { r, g, b, a: 1.0 },
        })
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.surface_config.width = size.width;
        self.surface_config.height = size.height;
        self.surface.configure(&self.device, &self.surface_config);
        log::debug!("Resized to {}x{}", size.width, size.height);
    }

    fn aspect(&self) -> f32 {
        self.surface_config.width as f32 / self.surface_config.height.max(1) as f32
    }

    fn upload_new_meshes(&mut self, world: &World) {
        for mesh in world.assets.meshes().iter().skip(self.meshes.len()) {
            self.meshes.push(GpuMesh::upload(&self.device, mesh));
        }
    }

    fn write_instances(&mut self, renderables: &[Renderable]) {
        if renderables.len() > self.instance_capacity {
            self.instance_capacity = renderables.len().next_power_of_two();
            self.instances = create_instance_buffer(&self.device, self.instance_capacity);
        }
        let raw: Vec<InstanceRaw> = renderables
            .iter()
            .map(|r| InstanceRaw::new(r.transform, r.color))
            .collect();
        self.queue
            .write_buffer(&self.instances, 0, bytemuck::cast_slice(&raw));
    }

    pub fn draw(&mut self, world: &World) {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.surface_config);
                return;
            }
            Err(e) => {
                log::warn!("Dropped frame: {e}");
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.upload_new_meshes(world);
        let renderables = sorted_back_to_front(world.scene.renderables(), world.camera.position());
        self.write_instances(&renderables);
        let globals = Globals::new(world.camera.view_projection(self.aspect()), LIGHT_DIR);
        self.queue
            .write_buffer(&self.globals, 0, bytemuck::bytes_of(&globals));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                ..Default::default()
            });

            if !renderables.is_empty() {
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.globals_bind_group, &[]);
                pass.set_vertex_buffer(1, self.instances.slice(..));
                for (i, r) in renderables.iter().enumerate() {
                    let Some(mesh) = self.meshes.get(r.mesh.index()) else {
                        continue;
                    };
                    let i = i as u32;
                    pass.set_vertex_buffer(0, mesh.vertices.slice(..));
                    pass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..mesh.index_count, 0, i..i + 1);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        frame.present();
    }
}

/// Painter's order: farthest instance first.
fn sorted_back_to_front(mut renderables: Vec<Renderable>, eye: Vec3) -> Vec<Renderable> {
    let distance = |r: &Renderable| r.transform.w_axis.truncate().distance_squared(eye);
    renderables.sort_by(|a, b| distance(b).total_cmp(&distance(a)));
    renderables
}
