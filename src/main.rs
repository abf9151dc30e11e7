// MNIST View - Main Entry Point
//
// Renders the configured digit source in a window and runs the background
// counter worker alongside it.

use log::info;
use mnist_view::config::{AppConfig, CONFIG_FILE};
use mnist_view::display::run_viewer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Default filter is "info" if RUST_LOG is not set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    info!("MNIST View v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load_or_default(CONFIG_FILE);
    info!("Configuration loaded from '{}'", CONFIG_FILE);

    run_viewer(config)?;

    info!("Viewer closed.");
    Ok(())
}
