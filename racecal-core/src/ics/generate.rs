//! ICS document generation.

use icalendar::{Calendar, Component, EventLike, Property};

use crate::constants::{CALENDAR_DESCRIPTION, CALENDAR_NAME, CALENDAR_TIMEZONE, PRODID};
use crate::entry::{CalendarEntry, EntryTime};

/// Serialize the finished entries into one iCalendar document, in order.
pub fn generate_calendar(entries: &[CalendarEntry]) -> String {
    let mut cal = Calendar::new();

    // Calendar-level metadata: METHOD plus the de facto X-WR properties
    cal.append_property(Property::new("METHOD", "PUBLISH"));
    cal.append_property(Property::new("X-WR-CALNAME", CALENDAR_NAME));
    cal.append_property(Property::new("X-WR-TIMEZONE", CALENDAR_TIMEZONE));
    cal.append_property(Property::new("X-WR-CALDESC", CALENDAR_DESCRIPTION));

    for entry in entries {
        cal.push(entry_to_vevent(entry));
    }

    let cal = cal.done();
    set_prodid(&cal.to_string())
}

fn entry_to_vevent(entry: &CalendarEntry) -> icalendar::Event {
    let mut ev = icalendar::Event::new();
    ev.uid(&entry.uid);
    ev.summary(&entry.summary);

    // DTSTAMP - required by RFC 5545; the only non-deterministic field
    ev.add_property("DTSTAMP", entry.dtstamp.format("%Y%m%dT%H%M%SZ").to_string());

    add_datetime_property(&mut ev, "DTSTART", &entry.start);
    add_datetime_property(&mut ev, "DTEND", &entry.end);

    ev.description(&entry.description);

    if let Some(ref location) = entry.location {
        ev.location(location);
    }

    if let Some((lat, lon)) = entry.geo {
        ev.add_property("GEO", format!("{lat};{lon}"));
    }

    if let Some(ref url) = entry.url {
        ev.add_property("URL", url);
    }

    if !entry.categories.is_empty() {
        ev.add_property("CATEGORIES", entry.categories.join(","));
    }

    ev.add_property("STATUS", &entry.status);

    ev.done()
}

/// Add a datetime property with formatting based on the EntryTime variant.
fn add_datetime_property(ev: &mut icalendar::Event, name: &str, time: &EntryTime) {
    match time {
        EntryTime::Utc(dt) => {
            // UTC datetime with Z suffix
            ev.add_property(name, dt.format("%Y%m%dT%H%M%SZ").to_string());
        }
        EntryTime::Zoned { datetime, tzid } => {
            // Datetime with TZID parameter
            let mut prop = Property::new(name, datetime.format("%Y%m%dT%H%M%S").to_string());
            prop.add_parameter("TZID", tzid);
            ev.append_property(prop);
        }
    }
}

/// Replace the icalendar crate's own PRODID with the published one.
fn set_prodid(ics: &str) -> String {
    let mut out = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            out.push_str("PRODID:");
            out.push_str(PRODID);
            out.push_str("\r\n");
            continue;
        }
        out.push_str(line);
        out.push_str("\r\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_test_entry() -> CalendarEntry {
        CalendarEntry {
            uid: "boston-2025@marathon-calendar.com".to_string(),
            dtstamp: Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap(),
            start: EntryTime::Utc(Utc.with_ymd_and_hms(2025, 4, 21, 9, 0, 0).unwrap()),
            end: EntryTime::Utc(Utc.with_ymd_and_hms(2025, 4, 21, 15, 0, 0).unwrap()),
            summary: "🏃 Boston Marathon".to_string(),
            description: "A race.".to_string(),
            location: None,
            geo: None,
            url: None,
            categories: vec![],
            status: "CONFIRMED".to_string(),
        }
    }

    #[test]
    fn test_calendar_metadata() {
        let ics = generate_calendar(&[make_test_entry()]);

        assert!(
            ics.contains("PRODID:-//Marathon Calendar//marathon-calendar.com//"),
            "PRODID not pinned. ICS:\n{}",
            ics
        );
        assert!(ics.contains("VERSION:2.0"), "missing VERSION. ICS:\n{}", ics);
        assert!(ics.contains("CALSCALE:GREGORIAN"), "missing CALSCALE. ICS:\n{}", ics);
        assert!(ics.contains("METHOD:PUBLISH"), "missing METHOD. ICS:\n{}", ics);
        assert!(
            ics.contains("X-WR-CALNAME:Marathon Events Calendar"),
            "missing calendar name. ICS:\n{}",
            ics
        );
        assert!(ics.contains("X-WR-TIMEZONE:UTC"), "missing timezone. ICS:\n{}", ics);
        assert!(
            ics.contains("X-WR-CALDESC:Marathon races worldwide with registration windows"),
            "missing description. ICS:\n{}",
            ics
        );
    }

    #[test]
    fn test_vevent_core_fields() {
        let ics = generate_calendar(&[make_test_entry()]);

        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
        assert!(ics.contains("UID:boston-2025@marathon-calendar.com"), "ICS:\n{}", ics);
        assert!(ics.contains("DTSTAMP:20250101T120000Z"), "ICS:\n{}", ics);
        assert!(ics.contains("DTSTART:20250421T090000Z"), "ICS:\n{}", ics);
        assert!(ics.contains("DTEND:20250421T150000Z"), "ICS:\n{}", ics);
        assert!(ics.contains("STATUS:CONFIRMED"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_vevent_optional_fields() {
        let mut entry = make_test_entry();
        entry.location = Some("Boston, MA, USA".to_string());
        entry.geo = Some((42.3601, -71.0589));
        entry.url = Some("https://example.org".to_string());
        entry.categories = vec!["Registration".to_string(), "Deadline".to_string()];

        let ics = generate_calendar(&[entry]);

        assert!(ics.contains("GEO:42.3601;-71.0589"), "ICS:\n{}", ics);
        assert!(ics.contains("URL:https://example.org"), "ICS:\n{}", ics);
        assert!(ics.contains("CATEGORIES:Registration,Deadline"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_zoned_times_carry_tzid() {
        let mut entry = make_test_entry();
        entry.start = EntryTime::Zoned {
            datetime: chrono::NaiveDate::from_ymd_opt(2025, 10, 19)
                .unwrap()
                .and_hms_opt(7, 30, 0)
                .unwrap(),
            tzid: "Asia/Shanghai".to_string(),
        };

        let ics = generate_calendar(&[entry]);
        assert!(
            ics.contains("DTSTART;TZID=Asia/Shanghai:20251019T073000"),
            "ICS:\n{}",
            ics
        );
    }

    #[test]
    fn test_entry_order_is_preserved() {
        let mut second = make_test_entry();
        second.uid = "boston-2025-registration@marathon-calendar.com".to_string();

        let ics = generate_calendar(&[make_test_entry(), second]);

        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        let race = ics.find("UID:boston-2025@marathon-calendar.com").unwrap();
        let registration = ics
            .find("UID:boston-2025-registration@marathon-calendar.com")
            .unwrap();
        assert!(race < registration, "entries out of order. ICS:\n{}", ics);
    }
}
