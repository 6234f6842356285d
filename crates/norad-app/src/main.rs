use anyhow::Result;
use clap::Parser;

use norad_app::cli::{AppConfig, Args};
use norad_app::game_loop;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::try_from(Args::parse())?;
    log::info!("starting NORAD display");
    game_loop::run(config)
}
