//! End-to-end pipeline tests over a temporary events directory.

use std::fs;
use std::path::Path;

use racecal_core::RaceCalError;
use racecal_core::pipeline;

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

const BOSTON: &str = r#"
- id: boston-2025
  name: Boston Marathon
  date: "2025-04-21"
  registration:
    opens: "2024-09-01"
    closes: "2024-09-15"
    url: https://example.org
"#;

const WRAPPED: &str = r#"
events:
  - id: beijing-2025
    name: Beijing Marathon
    date: "2025-10-19"
    time: "07:30:00"
    timezone: Asia/Shanghai
    location:
      city: Beijing
      country: China
"#;

#[test]
fn generates_one_document_from_mixed_shape_files() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a_boston.yaml", BOSTON);
    write(dir.path(), "b_beijing.yaml", WRAPPED);
    write(dir.path(), "EVENT_TEMPLATE.yaml", "{this is not even yaml: [");

    let (ics, summary) = pipeline::generate(dir.path()).unwrap();

    assert_eq!(summary.files_read, 2);
    assert_eq!(summary.records, 2);
    assert_eq!(summary.race_entries, 2);
    assert_eq!(summary.registration_entries, 1);
    assert_eq!(summary.templates_skipped.len(), 1);

    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 3);
    assert!(ics.contains("UID:boston-2025@marathon-calendar.com"), "ICS:\n{}", ics);
    assert!(
        ics.contains("UID:boston-2025-registration@marathon-calendar.com"),
        "ICS:\n{}",
        ics
    );
    assert!(ics.contains("UID:beijing-2025@marathon-calendar.com"), "ICS:\n{}", ics);

    // The boston race day defaults to 09:00 UTC and runs six hours
    assert!(ics.contains("DTSTART:20250421T090000Z"), "ICS:\n{}", ics);
    assert!(ics.contains("DTEND:20250421T150000Z"), "ICS:\n{}", ics);

    // The registration window spans midnight through end of day
    assert!(ics.contains("DTSTART:20240901T000000Z"), "ICS:\n{}", ics);
    assert!(ics.contains("DTEND:20240915T235959Z"), "ICS:\n{}", ics);

    // The zoned race keeps its wall time and zone
    assert!(
        ics.contains("DTSTART;TZID=Asia/Shanghai:20251019T073000"),
        "ICS:\n{}",
        ics
    );

    assert!(
        ics.contains("X-WR-CALNAME:Marathon Events Calendar"),
        "ICS:\n{}",
        ics
    );
}

#[test]
fn race_day_entry_precedes_registration_entry() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "boston.yaml", BOSTON);

    let (ics, _) = pipeline::generate(dir.path()).unwrap();

    let race = ics.find("UID:boston-2025@marathon-calendar.com").unwrap();
    let registration = ics
        .find("UID:boston-2025-registration@marathon-calendar.com")
        .unwrap();
    assert!(race < registration, "ICS:\n{}", ics);
}

#[test]
fn reruns_differ_only_in_dtstamp() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a_boston.yaml", BOSTON);
    write(dir.path(), "b_beijing.yaml", WRAPPED);

    let (first, _) = pipeline::generate(dir.path()).unwrap();
    let (second, _) = pipeline::generate(dir.path()).unwrap();

    let strip = |ics: &str| {
        ics.lines()
            .filter(|line| !line.starts_with("DTSTAMP:"))
            .collect::<Vec<_>>()
            .join("\r\n")
    };
    assert_eq!(strip(&first), strip(&second));
}

#[test]
fn registration_without_url_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "bad.yaml",
        r#"
- id: incomplete-2025
  name: Incomplete Race
  date: "2025-05-01"
  registration:
    opens: "2025-01-01"
    closes: "2025-02-01"
"#,
    );

    let err = pipeline::generate(dir.path()).unwrap_err();
    match err {
        RaceCalError::MissingField { record, field } => {
            assert_eq!(record, "incomplete-2025");
            assert_eq!(field, "registration.url");
        }
        other => panic!("Expected MissingField, got {:?}", other),
    }
}

#[test]
fn broken_yaml_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "good.yaml", BOSTON);
    write(dir.path(), "zz_broken.yaml", "{unclosed: [");

    let err = pipeline::generate(dir.path()).unwrap_err();
    assert!(matches!(err, RaceCalError::Parse { .. }), "got {:?}", err);
}
