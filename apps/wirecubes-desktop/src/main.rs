use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};
use wirecubes_kernel::{ComposerConfig, Scene, SceneComposer, SceneSeed, SimplexField};
use wirecubes_render::{OrthoView, Palette};
use wirecubes_render_wgpu::WgpuRenderer;
use wirecubes_tools::SceneInspector;

#[derive(Parser)]
#[command(name = "wirecubes-desktop", about = "Noise-deformed wireframe cube grid")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Master seed; a fresh one is drawn when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file overriding composition constants
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Window size and orthographic extent in pixels (square)
    #[arg(long, default_value = "800")]
    size: u32,
}

/// Surface and device state, created once the window exists.
struct Gpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
}

fn init_gpu(window: Arc<Window>, scene: &Scene, palette: &Palette, view: &OrthoView) -> Result<Gpu> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    let surface = instance
        .create_surface(window.clone())
        .context("create surface")?;

    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::HighPerformance,
        compatible_surface: Some(&surface),
        force_fallback_adapter: false,
    }))
    .context("no compatible GPU adapter")?;

    let (device, queue) = pollster::block_on(adapter.request_device(
        &wgpu::DeviceDescriptor {
            label: Some("wirecubes_device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
        },
        None,
    ))
    .context("create device")?;

    let size = window.inner_size();
    let surface_caps = surface.get_capabilities(&adapter);
    let surface_format = surface_caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .or_else(|| surface_caps.formats.first())
        .copied()
        .context("surface reports no formats")?;
    let alpha_mode = surface_caps
        .alpha_modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);

    let config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: surface_format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode: wgpu::PresentMode::AutoVsync,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };
    surface.configure(&device, &config);

    let renderer = WgpuRenderer::new(&device, surface_format, view, scene, palette);

    tracing::info!(
        "GPU initialized with {} backend",
        adapter.get_info().backend.to_str()
    );

    Ok(Gpu {
        surface,
        device,
        queue,
        config,
        renderer,
    })
}

struct GpuApp {
    scene: Scene,
    palette: Palette,
    view: OrthoView,
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
}

impl GpuApp {
    fn new(scene: Scene, size: u32) -> Self {
        Self {
            scene,
            palette: Palette::default(),
            view: OrthoView::square(size.max(1)),
            window: None,
            gpu: None,
        }
    }

    /// Reconfigure the surface. The orthographic extent stays fixed at the
    /// initial square.
    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        let (width, height) = (new_size.width.max(1), new_size.height.max(1));
        if let Some(gpu) = &mut self.gpu {
            gpu.config.width = width;
            gpu.config.height = height;
            gpu.surface.configure(&gpu.device, &gpu.config);
        }
    }

    fn redraw(&mut self) {
        let Some(gpu) = &self.gpu else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let target = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        gpu.renderer
            .render(&gpu.device, &gpu.queue, &target, &self.view);
        output.present();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Wirecubes")
            .with_inner_size(PhysicalSize::new(self.view.width, self.view.height))
            .with_resizable(false);
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match init_gpu(window.clone(), &self.scene, &self.palette, &self.view) {
            Ok(gpu) => {
                tracing::debug!(segments = gpu.renderer.segment_count(), "scene uploaded");
                self.gpu = Some(gpu);
                self.window = Some(window);
            }
            Err(e) => {
                tracing::error!("failed to initialize GPU: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.resize(new_size);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => ComposerConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ComposerConfig::default(),
    };
    let seed = cli.seed.map(SceneSeed).unwrap_or_else(SceneSeed::fresh);
    tracing::info!(%seed, "wirecubes-desktop starting");

    let noise = SimplexField::new(seed.noise_seed());
    tracing::debug!(noise_seed = noise.seed(), "noise field seeded");
    let scene = SceneComposer::new(config).compose(&noise, &mut seed.random());
    tracing::info!("{}", SceneInspector::summary(&scene));

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(scene, cli.size);
    event_loop.run_app(&mut app)?;

    Ok(())
}
