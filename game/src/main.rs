use engine::EngineContext;

mod config;
mod controls;
mod demo;
mod movement;
mod orbit;
mod ring;

use config::HomeBaseConfig;
use demo::HomeBase;

fn main() -> anyhow::Result<()> {
    engine::init_logging();

    let config = HomeBaseConfig::load_default()?;
    let window = config.window.clone();

    // ---- Create engine context (game owns this) ----
    let ctx = EngineContext::new(window, HomeBase::new(config))?;
    ctx.run()?;
    Ok(())
}
