//! Application layer: the winit runner and its input adapter.

pub mod input_adapter;
pub mod winit;

pub use self::winit::{App, AppHandler};
