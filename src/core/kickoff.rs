use crate::domain::model::Kickoff;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Converts a provider timestamp to the report zone.
///
/// A trailing `Z` means UTC, explicit offsets are honoured and a timestamp
/// with no offset at all is taken as UTC. Anything unparseable becomes
/// [`Kickoff::Unknown`].
pub fn convert_kickoff(raw: &str, zone: Tz) -> Kickoff {
    match parse_instant(raw) {
        Some(instant) => Kickoff::At(instant.with_timezone(&zone)),
        None => {
            tracing::debug!("Unparseable kickoff timestamp: {:?}", raw);
            Kickoff::Unknown
        }
    }
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    // `%:z` does not accept a `Z` designator, so spell it out as an offset.
    let with_offset = match raw.strip_suffix(['Z', 'z']) {
        Some(head) => format!("{}+00:00", head),
        None => raw.to_string(),
    };

    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(&with_offset, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
