//! Parsing des horodatages d'entrée et rendus textuels (ICS, `z`, heure locale).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse un horodatage ISO 8601 et le normalise en UTC.
///
/// Un suffixe `Z` vaut `+00:00`. Sans décalage explicite, l'heure est lue
/// comme UTC ; une date seule vaut minuit UTC.
pub fn parse_utc(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let normalized = match raw.strip_suffix(&['Z', 'z'][..]) {
        Some(head) => format!("{head}+00:00"),
        None => raw.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::<FixedOffset>::parse_from_str(&normalized, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

/// `YYYYMMDDThhmmssZ`
pub fn ics_datetime(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// `YYYYMMDD`
pub fn ics_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Heure UTC suivie d'un `z` minuscule, ex. `08:00z`.
pub fn time_z(dt: DateTime<Utc>) -> String {
    format!("{}z", dt.format("%H:%M"))
}

/// Heure locale dans `zone`, ex. `09:00 LT`.
pub fn time_lt(dt: DateTime<Utc>, zone: Tz) -> String {
    format!("{} LT", dt.with_timezone(&zone).format("%H:%M"))
}
