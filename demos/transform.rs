//! Transform: move, recolor and rotate a cube inside a box skybox.
//!
//! Assets are read from `assets/` or from the directory in `MYTH_ASSET_ROOT`.
//! Run with `RUST_LOG=info` to see adapter and loading details.

use myth_playground::demos::TransformDemo;
use myth_playground::{App, Demo, DemoApp};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    App::new()
        .with_title(TransformDemo::TITLE)
        .with_settings(TransformDemo::settings())
        .run::<DemoApp<TransformDemo>>()?;
    Ok(())
}
