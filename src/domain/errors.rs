//! Error types for the chore bot.

use std::path::PathBuf;

/// Malformed catalog, schedule or environment. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("task '{title}' has day {day}, expected 0 (Monday) to 6 (Sunday)")]
    InvalidDay { title: String, day: u8 },

    #[error("task #{id} has an empty title")]
    EmptyTitle { id: u64 },

    #[error("task id {0} appears more than once in the catalog")]
    DuplicateId(u64),

    #[error("no id left to give task '{title}'")]
    IdsExhausted { title: String },

    #[error("invalid schedule rule: {0}")]
    InvalidRule(String),

    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),

    #[error("invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("unknown timezone '{0}'")]
    InvalidTimezone(String),
}

/// Lifecycle failures. Recoverable, surfaced to the user by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("no task #{id} on day {day}")]
    NotFound { id: u64, day: u8 },

    #[error("task belongs to day {task_day} but today is day {current_day}")]
    Stale { task_day: u8, current_day: u8 },

    #[error("task is not assigned to anyone")]
    NotAssigned,

    #[error("task is already done")]
    AlreadyDone,
}

/// Notification send failure. Logged only.
#[derive(Debug, thiserror::Error)]
#[error("delivery to {target} failed: {reason}")]
pub struct DeliveryError {
    pub target: String,
    pub reason: String,
}
