pub mod bot;
pub mod discord_messenger;
pub mod render;

pub use bot::run_bot;
