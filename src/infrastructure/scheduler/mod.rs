pub mod scheduler_tokio;

pub use scheduler_tokio::start_scheduler;
