use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Installs the stdout subscriber. `LOG_LEVEL` picks the maximum level, INFO by default.
pub fn setup_logging() {
    let level = std::env::var("LOG_LEVEL")
        .ok()
        .and_then(|value| value.parse::<Level>().ok())
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set default tracing subscriber: {}", e);
    }
}
