//! Desktop preview for touch controls
//!
//! Opens a window, routes mouse and touch input through the collector, and
//! logs axis values as the configured controls produce them. Run with
//! RUST_LOG=debug to watch captures and releases.

use glam::Vec2;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use touchstick::camera::OrthographicCamera;
use touchstick::config::ControlsConfig;
use touchstick::controls::{Control, ControlKind, ControlSet, StickControl, StickVisuals};
use touchstick::input::TouchCollector;

/// World-space height visible through the preview camera
const VIEW_HEIGHT: f32 = 12.0;

struct App {
    config: ControlsConfig,
    window: Option<Window>,
    camera: OrthographicCamera,
    collector: TouchCollector,
    controls: ControlSet,
    /// Last logged axis values, parallel to the control list
    last_axes: Vec<Vec2>,
}

impl App {
    fn new(config: ControlsConfig) -> Self {
        info!(profile = %config.profile, "starting preview");

        let mut controls = ControlSet::new();
        match config.build_controls() {
            Ok(built) => {
                for control in built {
                    controls.add_control(control);
                }
            }
            Err(e) => error!(error = %e, "failed to build controls from config"),
        }

        let viewport = Vec2::new(config.window.width as f32, config.window.height as f32);
        let aspect = viewport.x / viewport.y;
        let camera = OrthographicCamera::centered(VIEW_HEIGHT * aspect, VIEW_HEIGHT, viewport);

        Self {
            config,
            window: None,
            camera,
            collector: TouchCollector::new(),
            controls,
            last_axes: Vec::new(),
        }
    }

    fn from_env() -> Self {
        let config = ControlsConfig::load_from_env().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using default configuration");
            ControlsConfig::default()
        });
        Self::new(config)
    }

    /// Attaches stick visuals and enables everything once a window exists
    fn setup_controls(&mut self) {
        let stick_names: Vec<String> = self
            .controls
            .controls()
            .iter()
            .filter(|c| c.kind() == ControlKind::Stick)
            .map(|c| c.name().to_string())
            .collect();

        for name in stick_names {
            if let Some(stick) = self.controls.get_control_typed_mut::<StickControl>(&name) {
                stick.attach_visuals(StickVisuals::default());
            }
        }

        if let Err(e) = self.controls.enable_all(&self.camera) {
            error!(error = %e, "failed to enable controls");
        }
    }

    /// Logs any control whose axis output changed this tick
    fn log_axis_changes(&mut self) {
        self.last_axes.resize(self.controls.len(), Vec2::ZERO);

        for (control, last) in self.controls.controls().iter().zip(&mut self.last_axes) {
            let axis = control.axis_values();
            if axis != *last {
                info!(control = %control.name(), x = axis.x, y = axis.y, "axis");
                *last = axis;
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let attrs = Window::default_attributes()
                .with_title(self.config.window.title.clone())
                .with_inner_size(LogicalSize::new(
                    self.config.window.width,
                    self.config.window.height,
                ))
                .with_resizable(self.config.window.resizable);

            match event_loop.create_window(attrs) {
                Ok(window) => {
                    let size = window.inner_size();
                    self.camera
                        .set_viewport(Vec2::new(size.width as f32, size.height as f32));
                    self.window = Some(window);
                    self.setup_controls();
                }
                Err(e) => {
                    error!(error = %e, "failed to create window");
                    event_loop.exit();
                }
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
            WindowEvent::CloseRequested => {
                info!("close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.camera
                    .set_viewport(Vec2::new(size.width as f32, size.height as f32));
                self.controls.invalidate_layout();
            }
            event => self.collector.handle_window_event(&event),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            return;
        }

        let snapshot = self.collector.snapshot();
        self.controls.tick(&snapshot, &self.camera);
        self.collector.advance_frame();
        self.log_axis_changes();
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::from_env();

    event_loop
        .run_app(&mut app)
        .expect("Failed to run event loop");
}
