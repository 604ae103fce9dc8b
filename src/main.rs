use dotenvy::dotenv;
mod application;
mod domain;
mod infrastructure;
mod utils;
use crate::application::services::BotConfig;
use crate::infrastructure::discord_bot::run_bot;
use tracing::error;

#[tokio::main]
async fn main() {
    dotenv().ok();
    utils::setup_logging();

    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run_bot(config).await {
        error!("Error running bot: {:#}", e);
        std::process::exit(1);
    }
}
