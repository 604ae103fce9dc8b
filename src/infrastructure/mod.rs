pub mod discord_bot;
pub mod repositories;
pub mod scheduler;
pub mod timezone;
