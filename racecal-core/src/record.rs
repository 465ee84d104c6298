//! Race record data model.
//!
//! Records are decoded leniently: everything the pipeline can fall back on is
//! an `Option`, and alternative field spellings are kept as separate fields
//! resolved through accessor methods, `open_date` winning over `opens` and so
//! on. Required fields are checked by the entry builders, not at decode time.

use std::fmt;

use serde::Deserialize;

use crate::constants::{DEFAULT_CLOSE_TIME, DEFAULT_OPEN_TIME, DEFAULT_TIMEZONE};
use crate::error::{RaceCalError, RaceCalResult};

/// One race record as found in a source document.
#[derive(Debug, Clone, Deserialize)]
pub struct RaceRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub details: Option<Details>,
    #[serde(default)]
    pub categories: Option<Vec<RaceCategory>>,
    #[serde(default)]
    pub registration: Option<Registration>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub status: Option<String>,
}

impl RaceRecord {
    /// Record id, required for building any entry.
    pub fn id(&self) -> RaceCalResult<&str> {
        self.required(&self.id, "id")
    }

    /// Race name, required for building any entry.
    pub fn name(&self) -> RaceCalResult<&str> {
        self.required(&self.name, "name")
    }

    /// Race date, required for building any entry.
    pub fn date(&self) -> RaceCalResult<&str> {
        self.required(&self.date, "date")
    }

    /// Timezone identifier, `UTC` when absent.
    pub fn timezone(&self) -> &str {
        self.timezone.as_deref().unwrap_or(DEFAULT_TIMEZONE)
    }

    /// A handle for error messages: the id, falling back to the name.
    pub fn label(&self) -> &str {
        self.id
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("<unnamed record>")
    }

    fn required<'a>(
        &self,
        field: &'a Option<String>,
        name: &'static str,
    ) -> RaceCalResult<&'a str> {
        field
            .as_deref()
            .filter(|value| !value.is_empty())
            .ok_or_else(|| RaceCalError::MissingField {
                record: self.label().to_string(),
                field: name,
            })
    }
}

/// Free-form details about the race.
#[derive(Debug, Clone, Deserialize)]
pub struct Details {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub contact: Option<Contact>,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub wechat: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// One competition category (full, half, fun run, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct RaceCategory {
    pub name: String,
    pub distance: Scalar,
    #[serde(default)]
    pub distance_unit: Option<String>,
    #[serde(default)]
    pub capacity: Option<Scalar>,
}

/// The registration section of a record.
///
/// Both accepted spellings of each window field are decoded; the accessors
/// resolve the fallback chains.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    #[serde(default)]
    open_date: Option<String>,
    #[serde(default)]
    opens: Option<String>,
    #[serde(default)]
    close_date: Option<String>,
    #[serde(default)]
    closes: Option<String>,
    #[serde(default)]
    open_time: Option<String>,
    #[serde(default)]
    opens_time: Option<String>,
    #[serde(default)]
    close_time: Option<String>,
    #[serde(default)]
    closes_time: Option<String>,
    #[serde(default)]
    pub lottery_date: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    pub cost: Option<Cost>,
    #[serde(default)]
    pub requirements: Option<Vec<String>>,
    #[serde(default)]
    pub packet_pickup: Option<PacketPickup>,
}

impl Registration {
    /// Opening date, `open_date` over `opens`.
    pub fn open_date(&self) -> Option<&str> {
        self.open_date.as_deref().or(self.opens.as_deref())
    }

    /// Closing date, `close_date` over `closes`.
    pub fn close_date(&self) -> Option<&str> {
        self.close_date.as_deref().or(self.closes.as_deref())
    }

    /// Opening time, defaulting to midnight.
    pub fn open_time(&self) -> &str {
        self.open_time
            .as_deref()
            .or(self.opens_time.as_deref())
            .unwrap_or(DEFAULT_OPEN_TIME)
    }

    /// Closing time, defaulting to end of day.
    pub fn close_time(&self) -> &str {
        self.close_time
            .as_deref()
            .or(self.closes_time.as_deref())
            .unwrap_or(DEFAULT_CLOSE_TIME)
    }

    /// Registration URL, required whenever the section exists.
    pub fn url(&self, record_label: &str) -> RaceCalResult<&str> {
        self.url
            .as_deref()
            .ok_or_else(|| RaceCalError::MissingField {
                record: record_label.to_string(),
                field: "registration.url",
            })
    }
}

/// Registration cost: one scalar amount, or per-category amounts in
/// document order.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Cost {
    Tiered(serde_yaml::Mapping),
    Flat(Scalar),
}

/// Packet pickup window.
#[derive(Debug, Clone, Deserialize)]
pub struct PacketPickup {
    pub start: Scalar,
    pub end: Scalar,
    #[serde(default)]
    pub note: Option<String>,
}

/// Where the race takes place.
#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

impl Location {
    /// `venue, city[, state], country` with absent segments elided.
    pub fn full(&self) -> Option<String> {
        join_segments(&[&self.venue, &self.city, &self.state, &self.country])
    }

    /// `city[, state], country` - the venue is omitted.
    pub fn city_level(&self) -> Option<String> {
        join_segments(&[&self.city, &self.state, &self.country])
    }
}

fn join_segments(segments: &[&Option<String>]) -> Option<String> {
    let joined = segments
        .iter()
        .filter_map(|segment| segment.as_deref())
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    if joined.is_empty() { None } else { Some(joined) }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A YAML scalar kept verbatim (string, number or bool) and rendered with
/// its natural textual form.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct Scalar(pub serde_yaml::Value);

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&scalar_text(&self.0))
    }
}

/// Render a YAML value the way it reads in the source document.
pub(crate) fn scalar_text(value: &serde_yaml::Value) -> String {
    use serde_yaml::Value;

    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
