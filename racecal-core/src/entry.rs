//! Calendar entry types produced by the builders.
//!
//! Entries are flat, immutable records: built once per source record,
//! appended to the output document and discarded after serialization.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Start or end instant of a calendar entry.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryTime {
    /// UTC instant, serialized with a `Z` suffix.
    Utc(DateTime<Utc>),
    /// Local instant in a named timezone, serialized with a `TZID` parameter.
    Zoned { datetime: NaiveDateTime, tzid: String },
}

impl EntryTime {
    /// Collapse a zone-aware instant into its serialized shape. UTC stays
    /// UTC; every other zone keeps its local wall time plus the zone name.
    pub fn from_zoned(dt: DateTime<Tz>) -> Self {
        if dt.timezone() == Tz::UTC {
            EntryTime::Utc(dt.with_timezone(&Utc))
        } else {
            EntryTime::Zoned {
                datetime: dt.naive_local(),
                tzid: dt.timezone().name().to_string(),
            }
        }
    }
}

/// One VEVENT-equivalent item of the output document.
#[derive(Debug, Clone)]
pub struct CalendarEntry {
    pub uid: String,
    pub dtstamp: DateTime<Utc>,
    pub start: EntryTime,
    pub end: EntryTime,
    pub summary: String,
    pub description: String,
    pub location: Option<String>,
    pub geo: Option<(f64, f64)>,
    pub url: Option<String>,
    pub categories: Vec<String>,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_from_zoned_keeps_utc_as_utc() {
        let dt = Tz::UTC.with_ymd_and_hms(2025, 4, 21, 9, 0, 0).unwrap();
        assert_eq!(
            EntryTime::from_zoned(dt),
            EntryTime::Utc(Utc.with_ymd_and_hms(2025, 4, 21, 9, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_from_zoned_keeps_local_wall_time() {
        let tz: Tz = "Asia/Shanghai".parse().unwrap();
        let dt = tz.with_ymd_and_hms(2025, 10, 19, 7, 30, 0).unwrap();
        match EntryTime::from_zoned(dt) {
            EntryTime::Zoned { datetime, tzid } => {
                assert_eq!(datetime.to_string(), "2025-10-19 07:30:00");
                assert_eq!(tzid, "Asia/Shanghai");
            }
            other => panic!("Expected Zoned, got {:?}", other),
        }
    }
}
