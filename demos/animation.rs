//! Animation: play / stop a keyframe animation on a cube.
//!
//! Assets are read from `assets/` or from the directory in `MYTH_ASSET_ROOT`.
//! Run with `RUST_LOG=info` to see adapter and loading details.

use myth_playground::demos::AnimationDemo;
use myth_playground::{App, Demo, DemoApp};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    App::new()
        .with_title(AnimationDemo::TITLE)
        .with_settings(AnimationDemo::settings())
        .run::<DemoApp<AnimationDemo>>()?;
    Ok(())
}
