pub mod handlers;
pub mod scheduler;
pub mod services;
