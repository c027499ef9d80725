//! Engine Core Module
//!
//! [`Engine`] is the explicit context every demo is driven through: it owns
//! the renderer, the scene, the asset storage and the input state. It holds
//! no window logic, so tests can build one without a GPU and tick demos
//! directly.
//!
//! # Example
//!
//! ```rust,ignore
//! use myth_playground::{Engine, RenderSettings};
//!
//! let mut engine = Engine::new(RenderSettings::default());
//! engine.init(window, 1280, 720).await?;
//!
//! loop {
//!     engine.update(dt);
//!     // ... render frame ...
//! }
//! ```

use std::sync::Arc;

use winit::window::Window;

use crate::assets::AssetServer;
use crate::renderer::{RenderSettings, Renderer};
use crate::resources::input::Input;
use crate::scene::Scene;

/// Surface size assumed until a window reports its own.
pub const DEFAULT_SIZE: (u32, u32) = (1280, 720);

/// The engine instance shared by the app runner and the demos.
///
/// # Lifecycle
///
/// 1. Create with [`Engine::new`] (or [`Engine::with_assets`] in tests)
/// 2. Initialize the GPU with [`Engine::init`]
/// 3. Advance each frame with [`Engine::update`]
/// 4. Render through [`Renderer::begin_frame`]
pub struct Engine {
    pub renderer: Renderer,
    pub scene: Scene,
    pub assets: AssetServer,
    pub input: Input,

    time: f32,
    frame_count: u64,
    size: (u32, u32),
}

impl Engine {
    /// Creates an engine reading assets from the default root.
    ///
    /// GPU resources are not allocated until [`init`](Self::init) is called.
    #[must_use]
    pub fn new(settings: RenderSettings) -> Self {
        Self::with_assets(settings, AssetServer::new())
    }

    #[must_use]
    pub fn with_assets(settings: RenderSettings, assets: AssetServer) -> Self {
        let mut input = Input::new();
        input.inject_resize(DEFAULT_SIZE.0, DEFAULT_SIZE.1);
        Self {
            renderer: Renderer::new(settings),
            scene: Scene::new(),
            assets,
            input,
            time: 0.0,
            frame_count: 0,
            size: DEFAULT_SIZE,
        }
    }

    /// Initializes GPU resources for `window`.
    ///
    /// # Errors
    ///
    /// Fails when no compatible adapter exists, the device request is
    /// rejected or the surface cannot be configured.
    pub async fn init(&mut self, window: Arc<Window>, width: u32, height: u32) -> crate::errors::Result<()> {
        self.renderer.init(window, width, height).await?;
        self.resize(width, height);
        Ok(())
    }

    /// Total elapsed time in seconds.
    #[inline]
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Number of completed [`update`](Self::update) calls.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Surface size in pixels, or the last reported window size before the
    /// renderer exists.
    #[inline]
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.renderer.size().unwrap_or(self.size)
    }

    /// Resizes the surface and keeps the active camera's aspect in sync.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.size = (width, height);
        self.renderer.resize(width, height);
        self.input.inject_resize(width, height);
        self.update_camera_aspect(width as f32 / height as f32);
    }

    /// Advances time, propagates transforms and resets per-frame input.
    pub fn update(&mut self, dt: f32) {
        self.time += dt;
        self.frame_count += 1;

        self.scene.update_matrix_world();
        self.input.start_frame();
    }

    fn update_camera_aspect(&mut self, aspect: f32) {
        if let Some((_, camera)) = self.scene.active_camera_bundle() {
            camera.set_aspect(aspect);
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(RenderSettings::default())
    }
}

/// Per-frame timing passed to application callbacks.
#[derive(Debug, Clone, Copy)]
pub struct FrameState {
    /// Total elapsed time since the application started (in seconds).
    pub time: f32,
    /// Delta time since the last frame (in seconds).
    pub dt: f32,
    /// Total number of frames rendered since startup.
    pub frame_count: u64,
}
