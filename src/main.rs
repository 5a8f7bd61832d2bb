mod app;
mod cli;
mod config;
mod error;
mod favorites;
mod interactive;
mod languages;
mod logging;
mod notification;
mod page;
mod providers;
mod state;
mod words;

use cli::CliHandler;
use config::ConfigManager;
use interactive::InteractiveMode;
use std::error::Error;
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_path = ConfigManager::get_default_config_path()?;
    let config_manager = Arc::new(ConfigManager::new(config_path.to_string_lossy().as_ref())?);
    logging::init(&config_manager.get_config().log_level);

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        let mut cli = CliHandler::new(config_manager)?;
        cli.process_args(args).await
    } else {
        let mut interactive = InteractiveMode::new(config_manager)?;
        interactive.start().await
    }
}
