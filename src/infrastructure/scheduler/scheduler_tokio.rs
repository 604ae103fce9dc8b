use crate::application::scheduler::RecurrenceScheduler;
use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};
use tracing::info;

/// Ticks the scheduler once per wall-clock minute in `timezone`.
/// Minutes missed while the process was down are never replayed.
pub fn start_scheduler(mut scheduler: RecurrenceScheduler, timezone: Tz) -> JoinHandle<()> {
    info!(
        "Starting scheduler with {} rules in timezone {}",
        scheduler.len(),
        timezone
    );

    tokio::spawn(async move {
        loop {
            let now = Utc::now().with_timezone(&timezone);
            scheduler.tick(now.naive_local());
            sleep(until_next_minute(&now)).await;
        }
    })
}

fn until_next_minute(now: &DateTime<Tz>) -> Duration {
    let elapsed = Duration::from_secs(now.second() as u64)
        + Duration::from_nanos((now.nanosecond() % 1_000_000_000) as u64);

    // leap seconds can push `elapsed` past a minute
    Duration::from_secs(60)
        .saturating_sub(elapsed)
        .max(Duration::from_millis(100))
}
