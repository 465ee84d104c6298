//! Timezone-aware datetime construction.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::error::{RaceCalError, RaceCalResult};

/// Combine a `YYYY-MM-DD` date, an `HH:MM:SS` time and an IANA timezone
/// identifier into a zone-aware instant.
///
/// The zone's offset rules apply at the given instant, so DST transitions are
/// respected. An ambiguous local time (DST fold) resolves to the earlier
/// instant; a nonexistent one (spring-forward gap) is an error.
pub fn build_datetime(date: &str, time: &str, tz_name: &str) -> RaceCalResult<DateTime<Tz>> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| RaceCalError::Format(format!("'{date}' does not match YYYY-MM-DD")))?;
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S")
        .map_err(|_| RaceCalError::Format(format!("'{time}' does not match HH:MM:SS")))?;
    let tz: Tz = tz_name
        .parse()
        .map_err(|_| RaceCalError::Timezone(tz_name.to_string()))?;

    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .ok_or_else(|| RaceCalError::Format(format!("'{date} {time}' does not exist in {tz_name}")))
}
