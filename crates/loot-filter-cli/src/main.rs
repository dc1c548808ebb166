use loot_filter_config::Config;
use std::{env, process};

mod cli;

fn main() {
    let loaded = Config::load();
    let config = loaded.as_ref().ok().and_then(Option::as_ref);

    let default_level = config.map_or("info", |config| config.log_level.as_str());
    env_logger::Builder::new()
        .parse_filters(default_level)
        .parse_default_env()
        .init();

    match &loaded {
        Ok(Some(_)) => log::debug!("Loaded config from {}", Config::config_path().display()),
        Ok(None) => log::debug!("No config file at {}", Config::config_path().display()),
        Err(e) => log::warn!("Ignoring config: {e}"),
    }

    let args: Vec<String> = env::args().collect();
    process::exit(cli::run_with_args(&args, config));
}
