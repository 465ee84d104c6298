//! Fixed calendar metadata and entry defaults.

/// Domain suffix for VEVENT UIDs.
pub const UID_DOMAIN: &str = "marathon-calendar.com";

/// PRODID emitted at the top of the generated document.
pub const PRODID: &str = "-//Marathon Calendar//marathon-calendar.com//";

/// Display name of the published calendar (X-WR-CALNAME).
pub const CALENDAR_NAME: &str = "Marathon Events Calendar";

/// Display timezone of the published calendar (X-WR-TIMEZONE).
pub const CALENDAR_TIMEZONE: &str = "UTC";

/// Calendar description (X-WR-CALDESC).
pub const CALENDAR_DESCRIPTION: &str = "Marathon races worldwide with registration windows";

/// Start time assumed for races that do not specify one.
pub const DEFAULT_RACE_TIME: &str = "09:00:00";

/// Assumed race duration in hours.
pub const RACE_DURATION_HOURS: i64 = 6;

/// Registration windows open at midnight unless the record says otherwise.
pub const DEFAULT_OPEN_TIME: &str = "00:00:00";

/// Registration windows close at end of day unless the record says otherwise.
pub const DEFAULT_CLOSE_TIME: &str = "23:59:59";

/// Timezone assumed when a record has none.
pub const DEFAULT_TIMEZONE: &str = "UTC";
