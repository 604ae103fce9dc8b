use chrono::Weekday;

/// Number of day buckets in a weekly cycle.
pub const DAYS_PER_WEEK: usize = 7;

/// Day index convention used across the bot: Monday = 0 ... Sunday = 6.
pub trait WeekdayFormat {
    fn to_long_en(&self) -> &'static str;
    fn to_day_index(&self) -> u8;
    fn from_day_index(day: u8) -> Option<Weekday>;
}

impl WeekdayFormat for Weekday {
    fn to_long_en(&self) -> &'static str {
        match self {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }

    fn to_day_index(&self) -> u8 {
        self.num_days_from_monday() as u8
    }

    fn from_day_index(day: u8) -> Option<Weekday> {
        match day {
            0 => Some(Weekday::Mon),
            1 => Some(Weekday::Tue),
            2 => Some(Weekday::Wed),
            3 => Some(Weekday::Thu),
            4 => Some(Weekday::Fri),
            5 => Some(Weekday::Sat),
            6 => Some(Weekday::Sun),
            _ => None,
        }
    }
}

/// Display name for a day index, "Unknown day" when out of range.
pub fn day_name(day: u8) -> &'static str {
    <Weekday as WeekdayFormat>::from_day_index(day)
        .map(|weekday| weekday.to_long_en())
        .unwrap_or("Unknown day")
}

/// Day index preceding `day`, wrapping Monday back to Sunday.
pub fn previous_day_index(day: u8) -> u8 {
    let week = DAYS_PER_WEEK as u8;
    (day % week + week - 1) % week
}
