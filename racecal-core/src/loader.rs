//! Discovery and decoding of race record files.

use std::path::{Path, PathBuf};

use serde_yaml::Value;
use walkdir::WalkDir;

use crate::error::{RaceCalError, RaceCalResult};
use crate::record::RaceRecord;

/// Everything found under the events directory.
#[derive(Debug, Default)]
pub struct Loaded {
    /// Records in file-path-then-in-file order.
    pub records: Vec<RaceRecord>,
    /// Record files read (including ones that held zero records).
    pub files_read: usize,
    /// Template files excluded by naming convention.
    pub templates_skipped: Vec<PathBuf>,
}

/// Accepted top-level shapes of a record file: a bare list of records, or a
/// mapping with the list under an `events` key.
enum DocumentShape {
    BareList(Vec<Value>),
    WrappedList(Vec<Value>),
}

/// Recursively load every record file under `events_dir`.
///
/// Files are visited in lexicographic path order and records keep their
/// in-file order. A file whose top-level shape is unrecognized contributes
/// zero records; a file that fails to parse aborts the run.
pub fn load_records(events_dir: &Path) -> RaceCalResult<Loaded> {
    let mut paths: Vec<PathBuf> = WalkDir::new(events_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_record_extension(path))
        .collect();
    paths.sort();

    let mut loaded = Loaded::default();

    for path in paths {
        if is_template(&path) {
            loaded.templates_skipped.push(path);
            continue;
        }

        let content = std::fs::read_to_string(&path)?;
        let value: Value = serde_yaml::from_str(&content).map_err(|e| RaceCalError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        loaded.files_read += 1;

        let Some(shape) = classify(value) else {
            continue;
        };

        let items = match shape {
            DocumentShape::BareList(items) | DocumentShape::WrappedList(items) => items,
        };
        for item in items {
            let record: RaceRecord =
                serde_yaml::from_value(item).map_err(|e| RaceCalError::Parse {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
            loaded.records.push(record);
        }
    }

    Ok(loaded)
}

/// Record files use a YAML extension.
fn has_record_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

/// Template files are excluded by naming convention: a `template` marker
/// anywhere in the file name, or an `.example` marker.
fn is_template(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| {
            let lower = name.to_lowercase();
            lower.contains("template") || lower.contains(".example")
        })
}

/// Sort a parsed document into one of the accepted shapes.
fn classify(value: Value) -> Option<DocumentShape> {
    match value {
        Value::Sequence(items) => Some(DocumentShape::BareList(items)),
        Value::Mapping(map) => {
            let key = Value::String("events".to_string());
            map.into_iter()
                .find(|(k, _)| *k == key)
                .and_then(|(_, v)| match v {
                    Value::Sequence(items) => Some(DocumentShape::WrappedList(items)),
                    _ => None,
                })
        }
        _ => None,
    }
}
