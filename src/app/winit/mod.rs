//! Winit-based Application Framework
//!
//! - [`App`]: builder for configuring and launching a demo window
//! - [`AppHandler`]: trait that applications implement
//! - `AppRunner`: internal winit [`ApplicationHandler`]
//!
//! # Example
//!
//! ```rust,ignore
//! use myth_playground::app::winit::{App, AppHandler};
//!
//! struct Viewer;
//!
//! impl AppHandler for Viewer {
//!     fn init(engine: &mut Engine, window: &Arc<Window>) -> Result<Self> {
//!         Ok(Viewer)
//!     }
//! }
//!
//! fn main() -> myth_playground::errors::Result<()> {
//!     App::new().with_title("Viewer").run::<Viewer>()
//! }
//! ```

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
pub use winit::window::{Window, WindowId};

use crate::app::input_adapter;
use crate::engine::{DEFAULT_SIZE, Engine, FrameState};
use crate::errors::Error;
use crate::renderer::FrameComposer;
use crate::renderer::settings::RenderSettings;
use crate::utils::Clock;

/// Trait for defining application behavior.
///
/// # Lifecycle
///
/// 1. [`init`](Self::init) - once, after the window and renderer exist. An
///    error is logged and ends the event loop.
/// 2. [`on_event`](Self::on_event) - for each window event
/// 3. [`update`](Self::update) - each frame before rendering
/// 4. [`compose_frame`](Self::compose_frame) - to add render nodes
pub trait AppHandler: Sized + 'static {
    fn init(engine: &mut Engine, window: &Arc<Window>) -> crate::errors::Result<Self>;

    /// Return `true` to consume the event (the engine's input state will
    /// not see it).
    #[allow(unused_variables)]
    fn on_event(&mut self, engine: &mut Engine, window: &Arc<Window>, event: &WindowEvent) -> bool {
        false
    }

    #[allow(unused_variables)]
    fn update(&mut self, engine: &mut Engine, window: &Arc<Window>, frame: &FrameState) {}

    /// The default renders only the scene.
    fn compose_frame<'a>(&'a mut self, composer: FrameComposer<'a>) {
        composer.render();
    }
}

/// Application builder.
///
/// ```rust,ignore
/// App::new()
///     .with_title("Shader Cube")
///     .with_settings(RenderSettings::webgl2())
///     .run::<MyHandler>()?;
/// ```
pub struct App {
    title: String,
    render_settings: RenderSettings,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: "Myth Playground".into(),
            render_settings: RenderSettings::default(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: RenderSettings) -> Self {
        self.render_settings = settings;
        self
    }

    /// Runs the event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns an error if event loop creation or execution fails.
    pub fn run<H: AppHandler>(self) -> crate::errors::Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut runner = AppRunner::<H>::new(self.title, self.render_settings);
        event_loop.run_app(&mut runner).map_err(Error::from)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

struct AppRunner<H: AppHandler> {
    title: String,
    render_settings: RenderSettings,

    window: Option<Arc<Window>>,
    engine: Option<Engine>,
    user_state: Option<H>,

    clock: Clock,
}

impl<H: AppHandler> AppRunner<H> {
    fn new(title: String, render_settings: RenderSettings) -> Self {
        Self {
            title,
            render_settings,
            window: None,
            engine: None,
            user_state: None,
            clock: Clock::new(),
        }
    }

    fn update_logic(&mut self) {
        self.clock.tick();

        let (Some(window), Some(engine), Some(user_state)) =
            (&self.window, &mut self.engine, &mut self.user_state)
        else {
            return;
        };

        let frame_state = FrameState {
            time: self.clock.elapsed_seconds(),
            dt: self.clock.delta_seconds(),
            frame_count: engine.frame_count(),
        };

        user_state.update(engine, window, &frame_state);
        engine.update(frame_state.dt);
    }

    fn render_frame(&mut self) {
        let (Some(engine), Some(user_state)) = (&mut self.engine, &mut self.user_state) else {
            return;
        };

        let time = engine.time();
        if let Some(composer) = engine.renderer.begin_frame(&engine.scene, &engine.assets, time) {
            user_state.compose_frame(composer);
        }
    }

    fn redraw(&mut self) {
        self.update_logic();
        self.render_frame();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl<H: AppHandler> ApplicationHandler for AppRunner<H> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(DEFAULT_SIZE.0, DEFAULT_SIZE.1));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        log::info!("Initializing Renderer Backend...");

        let mut engine = Engine::new(self.render_settings.clone());
        let size = window.inner_size();

        if let Err(e) = pollster::block_on(engine.init(window.clone(), size.width, size.height)) {
            log::error!("Fatal Renderer Error: {e}");
            event_loop.exit();
            return;
        }

        match H::init(&mut engine, &window) {
            Ok(state) => self.user_state = Some(state),
            Err(e) => {
                log::error!("Application init failed: {e}");
                event_loop.exit();
                return;
            }
        }
        self.engine = Some(engine);
        self.clock = Clock::new();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let (Some(window), Some(engine), Some(user_state)) =
            (&self.window, &mut self.engine, &mut self.user_state)
        else {
            return;
        };

        let consumed = user_state.on_event(engine, window, &event);
        if !consumed {
            input_adapter::process_window_event(&mut engine.input, &event);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(physical_size) => {
                engine.resize(physical_size.width, physical_size.height);
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.engine.is_some()
            && let Some(window) = &self.window
        {
            window.request_redraw();
        }
    }
}
