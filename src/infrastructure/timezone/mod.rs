pub mod system_calendar;

pub use system_calendar::SystemCalendar;
