//! Showcase: env-mapped animated cube, pulse shader cube, skybox and duck model.
//!
//! Assets are read from `assets/` or from the directory in `MYTH_ASSET_ROOT`.
//! Run with `RUST_LOG=info` to see adapter and loading details.

use myth_playground::demos::ShowcaseDemo;
use myth_playground::{App, Demo, DemoApp};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    App::new()
        .with_title(ShowcaseDemo::TITLE)
        .with_settings(ShowcaseDemo::settings())
        .run::<DemoApp<ShowcaseDemo>>()?;
    Ok(())
}
