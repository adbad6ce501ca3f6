//! Window shell: winit event wiring and the wgpu streak canvas.
//!
//! This is the glue between the platform and the simulation: it opens a
//! window, owns the GPU canvas, and maps window events onto the effect's
//! observer methods: resize to [`RainEffect::resize`], occlusion to
//! [`RainEffect::set_visible`]. Redraws are only re-requested while
//! [`RainEffect::tick`] reports the loop running, which is what makes
//! stop/start actually pause the frame chain.
//!
//! # Example
//!
//! ```ignore
//! use rainfall::prelude::*;
//!
//! rainfall::window::run(RainConfig::for_profile(Profile::Desktop))?;
//! ```

use std::sync::Arc;

use glam::Vec2;
use wgpu::util::DeviceExt;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::RainConfig;
use crate::error::{EffectError, GpuError};
use crate::render::Canvas;
use crate::shader::{StreakInstance, Uniforms, INSTANCE_ATTRIBUTES, STREAK_SHADER};
use crate::simulation::RainEffect;
use crate::time::FrameClock;
use crate::visuals::Rgba;

/// Night-sky backdrop behind the streaks.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.05,
    a: 1.0,
};

/// How many frames between window-title FPS refreshes.
const TITLE_REFRESH_FRAMES: u64 = 120;

/// Open a window and run the rain effect until it is closed.
///
/// Blocks on the event loop. Returns an error if the event loop or the
/// GPU stack cannot be initialized.
pub fn run(config: RainConfig) -> Result<(), EffectError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.init_error.take() {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

/// GPU-backed implementation of [`Canvas`].
///
/// Strokes accumulate into an instance list during the tick and are
/// flushed to the surface by [`GpuCanvas::render`].
pub struct GpuCanvas {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    instances: Vec<StreakInstance>,
}

impl GpuCanvas {
    /// Initialize the GPU stack against a window.
    ///
    /// `initial_capacity` sizes the instance buffer; it grows on demand
    /// if a frame ever strokes more segments.
    pub async fn new(window: Arc<Window>, initial_capacity: usize) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniforms = Uniforms {
            surface: [config.width as f32, config.height as f32],
            _pad: [0.0; 2],
        };

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
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
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Streak Shader"),
            source: wgpu::ShaderSource::Wgsl(STREAK_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Streak Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Streak Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<StreakInstance>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &INSTANCE_ATTRIBUTES,
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
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
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let instance_capacity = initial_capacity.max(64);
        let instance_buffer = Self::create_instance_buffer(&device, instance_capacity);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            instance_buffer,
            instance_capacity,
            instances: Vec::with_capacity(instance_capacity),
        })
    }

    fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Streak Instance Buffer"),
            size: (capacity * std::mem::size_of::<StreakInstance>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Reconfigure the surface for new window dimensions.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Surface size in pixels.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.config.width as f32, self.config.height as f32)
    }

    /// Flush the accumulated strokes to the surface.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if self.instances.len() > self.instance_capacity {
            self.instance_capacity = self.instances.len().next_power_of_two();
            self.instance_buffer = Self::create_instance_buffer(&self.device, self.instance_capacity);
        }
        if !self.instances.is_empty() {
            self.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&self.instances));
        }

        let uniforms = Uniforms {
            surface: [self.config.width as f32, self.config.height as f32],
            _pad: [0.0; 2],
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Streak Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Streak Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !self.instances.is_empty() {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
                render_pass.draw(0..6, 0..self.instances.len() as u32);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

impl Canvas for GpuCanvas {
    fn clear(&mut self) {
        self.instances.clear();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.instances
            .push(StreakInstance::new(from, to, width, color));
    }
}

struct App {
    config: Option<RainConfig>,
    window: Option<Arc<Window>>,
    canvas: Option<GpuCanvas>,
    effect: Option<RainEffect>,
    clock: FrameClock,
    init_error: Option<GpuError>,
}

impl App {
    fn new(config: RainConfig) -> Self {
        Self {
            config: Some(config),
            window: None,
            canvas: None,
            effect: None,
            clock: FrameClock::new(),
            init_error: None,
        }
    }

    fn refresh_title(&self) {
        if let (Some(window), Some(effect)) = (&self.window, &self.effect) {
            window.set_title(&format!(
                "rainfall - {} drops - {:.0} fps",
                effect.drops().len(),
                self.clock.fps()
            ));
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("rainfall")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs).unwrap());
        self.window = Some(window.clone());

        let config = self.config.take().unwrap_or_default();
        let capacity = config.density + crate::spawn::MAX_SPAWN_PER_TICK;

        match pollster::block_on(GpuCanvas::new(window.clone(), capacity)) {
            Ok(canvas) => {
                let size = canvas.size();
                let mut effect = RainEffect::new(size.x, size.y, config);
                effect.start(self.clock.now_ms());
                log::info!("rain effect started on {}x{} surface", size.x, size.y);

                self.canvas = Some(canvas);
                self.effect = Some(effect);
                window.request_redraw();
            }
            Err(e) => {
                log::error!("GPU initialization failed: {}", e);
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(effect) = &mut self.effect {
                    effect.destroy();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(canvas) = &mut self.canvas {
                    canvas.resize(physical_size);
                }
                if let Some(effect) = &mut self.effect {
                    effect.resize(physical_size.width as f32, physical_size.height as f32);
                }
            }
            WindowEvent::Occluded(occluded) => {
                if let Some(effect) = &mut self.effect {
                    let was_running = effect.is_running();
                    effect.set_visible(!occluded, self.clock.now_ms());
                    if !was_running && effect.is_running() {
                        log::debug!("surface visible again, resuming");
                        if let Some(window) = &self.window {
                            window.request_redraw();
                        }
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                let (Some(canvas), Some(effect)) = (&mut self.canvas, &mut self.effect) else {
                    return;
                };

                let now_ms = self.clock.tick();
                let keep_running = effect.tick(now_ms, canvas);

                match canvas.render() {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost) => canvas.resize(PhysicalSize {
                        width: canvas.config.width,
                        height: canvas.config.height,
                    }),
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("GPU out of memory, shutting down");
                        event_loop.exit();
                        return;
                    }
                    Err(e) => log::warn!("render error: {:?}", e),
                }

                if self.clock.frame() % TITLE_REFRESH_FRAMES == 0 {
                    self.refresh_title();
                }

                if keep_running {
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }
            }
            _ => {}
        }
    }
}
