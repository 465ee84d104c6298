//! Entry builders: one race-day entry per record, plus one
//! registration-window entry when the record has a registration section.

use chrono::{Duration, Utc};

use crate::constants::{DEFAULT_RACE_TIME, RACE_DURATION_HOURS, UID_DOMAIN};
use crate::datetime::build_datetime;
use crate::description;
use crate::entry::{CalendarEntry, EntryTime};
use crate::error::{RaceCalError, RaceCalResult};
use crate::record::RaceRecord;

/// Build the calendar entry for the race day itself.
///
/// The end instant is a fixed six hours after the start; no attempt is made
/// to model per-category finish times.
pub fn race_day_entry(record: &RaceRecord) -> RaceCalResult<CalendarEntry> {
    let id = record.id()?;
    let name = record.name()?;
    let date = record.date()?;

    let start = build_datetime(
        date,
        record.time.as_deref().unwrap_or(DEFAULT_RACE_TIME),
        record.timezone(),
    )?;
    let end = start + Duration::hours(RACE_DURATION_HOURS);

    let location = record.location.as_ref().and_then(|loc| loc.full());
    let geo = record
        .location
        .as_ref()
        .and_then(|loc| loc.coordinates.as_ref())
        .map(|coords| (coords.lat, coords.lon));
    let url = record.details.as_ref().and_then(|details| details.website.clone());

    Ok(CalendarEntry {
        uid: format!("{id}@{UID_DOMAIN}"),
        dtstamp: Utc::now(),
        start: EntryTime::from_zoned(start),
        end: EntryTime::from_zoned(end),
        summary: format!("🏃 {name}"),
        description: description::race_day(record)?,
        location,
        geo,
        url,
        categories: record.tags.clone().unwrap_or_default(),
        status: record.status.as_deref().unwrap_or("confirmed").to_uppercase(),
    })
}

/// Build the registration-window entry, if the record has one.
///
/// Returns `Ok(None)` for records without a registration section. The window
/// spans the resolved open date (time defaults to midnight) through the
/// resolved close date (time defaults to end of day), in the record's
/// timezone.
pub fn registration_entry(record: &RaceRecord) -> RaceCalResult<Option<CalendarEntry>> {
    let Some(reg) = record.registration.as_ref() else {
        return Ok(None);
    };

    let id = record.id()?;
    let name = record.name()?;
    let url = reg.url(record.label())?;

    let open_date = reg
        .open_date()
        .ok_or_else(|| missing(record, "registration.open_date"))?;
    let close_date = reg
        .close_date()
        .ok_or_else(|| missing(record, "registration.close_date"))?;

    let start = build_datetime(open_date, reg.open_time(), record.timezone())?;
    let end = build_datetime(close_date, reg.close_time(), record.timezone())?;

    let location = record.location.as_ref().and_then(|loc| loc.city_level());

    Ok(Some(CalendarEntry {
        uid: format!("{id}-registration@{UID_DOMAIN}"),
        dtstamp: Utc::now(),
        start: EntryTime::from_zoned(start),
        end: EntryTime::from_zoned(end),
        summary: format!("📝 {name} - 报名 (Registration)"),
        description: description::registration(record, reg)?,
        location,
        geo: None,
        url: Some(url.to_string()),
        categories: vec!["Registration".to_string(), "Deadline".to_string()],
        status: "CONFIRMED".to_string(),
    }))
}

fn missing(record: &RaceRecord, field: &'static str) -> RaceCalError {
    RaceCalError::MissingField {
        record: record.label().to_string(),
        field,
    }
}
