use crate::domain::repositories::Calendar;
use crate::domain::value_objects::WeekdayFormat;
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

/// Wall-clock calendar in the bot's configured timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemCalendar {
    timezone: Tz,
}

impl SystemCalendar {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    /// Local day index of `instant`
    pub fn day_at(&self, instant: DateTime<Utc>) -> u8 {
        instant.with_timezone(&self.timezone).weekday().to_day_index()
    }
}

impl Calendar for SystemCalendar {
    fn current_day(&self) -> u8 {
        self.day_at(Utc::now())
    }
}
