pub mod config_service;
pub mod messages;
pub mod notification_service;
pub mod task_lifecycle;
pub mod task_orchestrator;
pub mod task_registry;
pub mod task_statistics;

pub use config_service::BotConfig;
pub use notification_service::NotificationService;
pub use task_orchestrator::TaskOrchestrator;
