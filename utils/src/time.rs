//! Time formatting helpers.

use ethkl_types::Timestamp;

/// Kuala Lumpur is UTC+8 all year round.
const MALAYSIA_OFFSET_SECS: u64 = 8 * 3600;

/// Format a claim timestamp the way the history table shows it:
/// Malaysia local time, `dd/mm/yyyy, h:mm:ss am`.
pub fn format_malaysia_time(timestamp: Timestamp) -> String {
    let Some(local) = timestamp.as_secs().checked_add(MALAYSIA_OFFSET_SECS) else {
        return timestamp.to_string();
    };
    let (year, month, day) = civil_from_days(local / 86_400);
    let secs_of_day = local % 86_400;
    let (hour, minute, second) = (secs_of_day / 3600, secs_of_day % 3600 / 60, secs_of_day % 60);
    let (hour, meridiem) = match hour {
        0 => (12, "am"),
        1..=11 => (hour, "am"),
        12 => (12, "pm"),
        _ => (hour - 12, "pm"),
    };
    format!("{day:02}/{month:02}/{year}, {hour}:{minute:02}:{second:02} {meridiem}")
}

/// Days since 1970-01-01 to a proleptic Gregorian (year, month, day).
fn civil_from_days(days: u64) -> (u64, u64, u64) {
    // Eras of 400 years, each starting on March 1st.
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + u64::from(month <= 2);
    (year, month, day)
}
