pub mod chat_command;
pub mod notification;
pub mod task;
pub mod task_action;
pub mod user;
