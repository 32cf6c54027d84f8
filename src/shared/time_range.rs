//! Parsing of free-text time ranges such as `"10:00 AM - 8:00 PM"`.

use chrono::NaiveTime;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// One clock time: `10:00 AM`, `6 pm`, `14:30`
    static ref CLOCK_TIME_REGEX: Regex =
        Regex::new(r"(?i)^\s*(\d{1,2})(?::(\d{2}))?\s*([ap]\.?m\.?)?\s*$").unwrap();
}

/// Parse a single clock time in 12- or 24-hour notation.
pub fn parse_clock_time(input: &str) -> Option<NaiveTime> {
    let caps = CLOCK_TIME_REGEX.captures(input)?;
    let mut hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    if let Some(meridiem) = caps.get(3) {
        if hour == 0 || hour > 12 {
            return None;
        }
        let pm = meridiem.as_str().to_ascii_lowercase().starts_with('p');
        hour = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, true) => h + 12,
            (h, false) => h,
        };
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Split `"start - end"` into its two times. A lone time yields only a start.
pub fn parse_time_range(input: &str) -> (Option<NaiveTime>, Option<NaiveTime>) {
    let mut parts = input.splitn(2, ['-', '–']);
    let start = parts.next().and_then(parse_clock_time);
    let end = parts.next().and_then(parse_clock_time);
    (start, end)
}
