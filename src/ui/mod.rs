//! Debug GUI: the egui render node, parameter widgets and the stats overlay.

pub mod panel;
pub mod pass;
pub mod stats;

pub use pass::UiPass;
pub use stats::Stats;
