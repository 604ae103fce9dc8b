use crate::domain::errors::ConfigError;
use crate::domain::value_objects::{DAYS_PER_WEEK, WeekdayFormat};
use chrono::{Datelike, NaiveDateTime, Timelike};
use std::collections::BTreeSet;
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::{debug, error};

pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;
pub type JobCallback = Box<dyn FnMut() -> Result<(), CallbackError> + Send>;

/// Cron-style rule: fires on every combination of the three sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    weekdays: BTreeSet<u8>,
    hours: BTreeSet<u8>,
    minutes: BTreeSet<u8>,
}

impl RecurrenceRule {
    pub fn new(
        weekdays: impl IntoIterator<Item = u8>,
        hours: impl IntoIterator<Item = u8>,
        minutes: impl IntoIterator<Item = u8>,
    ) -> Result<Self, ConfigError> {
        let weekdays = Self::checked("weekday", weekdays, DAYS_PER_WEEK as u8)?;
        let hours = Self::checked("hour", hours, 24)?;
        let minutes = Self::checked("minute", minutes, 60)?;
        Ok(Self {
            weekdays,
            hours,
            minutes,
        })
    }

    fn checked(
        field: &str,
        values: impl IntoIterator<Item = u8>,
        limit: u8,
    ) -> Result<BTreeSet<u8>, ConfigError> {
        let values: BTreeSet<u8> = values.into_iter().collect();
        if values.is_empty() {
            return Err(ConfigError::InvalidRule(format!("no {} given", field)));
        }
        if let Some(value) = values.iter().find(|&&value| value >= limit) {
            return Err(ConfigError::InvalidRule(format!(
                "{} {} out of range 0..{}",
                field,
                value,
                limit - 1
            )));
        }
        Ok(values)
    }

    /// True when `time` falls on one of the rule's weekday/hour/minute combinations
    pub fn matches<T: Datelike + Timelike>(&self, time: &T) -> bool {
        self.weekdays.contains(&time.weekday().to_day_index())
            && self.hours.contains(&(time.hour() as u8))
            && self.minutes.contains(&(time.minute() as u8))
    }
}

struct ScheduledRule {
    name: String,
    rule: RecurrenceRule,
    callback: JobCallback,
    last_fired: Option<NaiveDateTime>,
}

/// Registry of independent recurring rules, driven by `tick`.
#[derive(Default)]
pub struct RecurrenceScheduler {
    rules: Vec<ScheduledRule>,
}

impl RecurrenceScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_recurring(
        &mut self,
        name: impl Into<String>,
        rule: RecurrenceRule,
        callback: JobCallback,
    ) {
        self.rules.push(ScheduledRule {
            name: name.into(),
            rule,
            callback,
            last_fired: None,
        });
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Fires every rule matching `now`, at most once per minute each.
    /// Failing or panicking callbacks are logged and stay registered.
    /// Returns how many callbacks ran.
    pub fn tick(&mut self, now: NaiveDateTime) -> usize {
        let minute = now
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now);

        let mut fired = 0;
        for scheduled in &mut self.rules {
            if !scheduled.rule.matches(&minute) || scheduled.last_fired == Some(minute) {
                continue;
            }
            scheduled.last_fired = Some(minute);
            fired += 1;

            debug!("Firing scheduled job '{}' at {}", scheduled.name, minute);
            match catch_unwind(AssertUnwindSafe(|| (scheduled.callback)())) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!("Scheduled job '{}' failed: {}", scheduled.name, e),
                Err(_) => error!("Scheduled job '{}' panicked", scheduled.name),
            }
        }
        fired
    }
}
