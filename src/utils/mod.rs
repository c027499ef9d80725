//! Utility Module
//!
//! - [`OrbitControls`]: camera orbit controller
//! - [`FpsCounter`]: frame rate measurement
//! - [`Clock`]: frame timing

pub mod fps_counter;
pub mod orbit_control;
pub mod time;

pub use fps_counter::FpsCounter;
pub use orbit_control::OrbitControls;
pub use time::Clock;
