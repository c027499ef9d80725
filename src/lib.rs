#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod animation;
pub mod app;
pub mod assets;
pub mod demos;
pub mod engine;
pub mod errors;
pub mod renderer;
pub mod resources;
pub mod scene;
pub mod ui;
pub mod utils;

pub use animation::{AnimationClip, AnimationMixer, AnimationState, KeyframeAnimation, LoopMode};
pub use app::{App, AppHandler};
pub use assets::{AssetServer, LoadState, Prefab};
pub use demos::{Command, Demo, DemoApp};
pub use engine::{Engine, FrameState};
pub use errors::{Error, Result};
pub use renderer::{RenderSettings, Renderer, WgpuContext};
pub use resources::{Color, Geometry, Material, Mesh, ShaderMaterial, Side, Texture};
pub use scene::{Camera, Node, NodeHandle, Scene};
pub use ui::{Stats, UiPass};
pub use utils::OrbitControls;
