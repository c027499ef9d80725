//! Shadertoy: a time and resolution driven gradient on a cube, on the GL backend.
//!
//! Run with `RUST_LOG=info` to see which adapter was picked.

use myth_playground::demos::ShadertoyDemo;
use myth_playground::{App, Demo, DemoApp};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    App::new()
        .with_title(ShadertoyDemo::TITLE)
        .with_settings(ShadertoyDemo::settings())
        .run::<DemoApp<ShadertoyDemo>>()?;
    Ok(())
}
