pub mod recurrence_scheduler;
pub mod schedule_policy;

pub use recurrence_scheduler::{JobCallback, RecurrenceScheduler};
pub use schedule_policy::{Job, SchedulePolicy};
