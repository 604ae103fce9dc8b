pub mod weekday_format;

pub use weekday_format::{DAYS_PER_WEEK, WeekdayFormat, day_name, previous_day_index};
