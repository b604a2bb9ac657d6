use chrono::{DateTime, Local, TimeZone};

/// Capture-time format shown on the form (`dd/mm/YYYY, HH:MM:SS`).
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

pub fn display_now() -> String {
    display(&Local::now())
}

pub fn display<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format(DISPLAY_FORMAT).to_string()
}

/// Stored instants rendered in local time, or "--" when unset.
pub fn display_opt<Tz: TimeZone>(dt: Option<&DateTime<Tz>>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match dt {
        Some(d) => display(&d.with_timezone(&Local)),
        None => "--".to_string(),
    }
}
