//! Full pipeline: load records, build entries, serialize the calendar.

use std::path::{Path, PathBuf};

use crate::build;
use crate::entry::CalendarEntry;
use crate::error::RaceCalResult;
use crate::ics;
use crate::loader;
use crate::record::RaceRecord;

/// Counts reported after a successful run.
#[derive(Debug, Default, Clone)]
pub struct RunSummary {
    pub files_read: usize,
    pub templates_skipped: Vec<PathBuf>,
    pub records: usize,
    pub race_entries: usize,
    pub registration_entries: usize,
}

/// Generate the calendar document from every record under `events_dir`.
///
/// Record order is preserved, and within a record the race-day entry comes
/// before the registration-window entry. The document is assembled fully in
/// memory; on any error nothing is returned and nothing should be written.
pub fn generate(events_dir: &Path) -> RaceCalResult<(String, RunSummary)> {
    let loaded = loader::load_records(events_dir)?;

    let mut summary = RunSummary {
        files_read: loaded.files_read,
        templates_skipped: loaded.templates_skipped,
        records: loaded.records.len(),
        ..Default::default()
    };

    let entries = build_entries(&loaded.records, &mut summary)?;

    Ok((ics::generate_calendar(&entries), summary))
}

fn build_entries(
    records: &[RaceRecord],
    summary: &mut RunSummary,
) -> RaceCalResult<Vec<CalendarEntry>> {
    let mut entries = Vec::with_capacity(records.len() * 2);

    for record in records {
        entries.push(build::race_day_entry(record)?);
        summary.race_entries += 1;

        if let Some(entry) = build::registration_entry(record)? {
            entries.push(entry);
            summary.registration_entries += 1;
        }
    }

    Ok(entries)
}
