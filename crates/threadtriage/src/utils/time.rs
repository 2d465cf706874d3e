use std::sync::OnceLock;

use time::format_description::well_known::Rfc3339;
use time::format_description::{self, OwnedFormatItem};
use time::{OffsetDateTime, PrimitiveDateTime};

/// Chronological sort key tolerant of missing and malformed timestamps.
///
/// Epoch seconds are the primary key; the raw timestamp string breaks ties so
/// that distinct malformed inputs never compare as equal. Missing or
/// unparsable inputs map to epoch zero and sort before every valid timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey {
    pub epoch_seconds: i64,
    pub raw: String,
}

impl SortKey {
    #[must_use]
    pub fn missing() -> Self {
        Self::default()
    }
}

#[must_use]
pub fn sort_key(raw: Option<&str>) -> SortKey {
    let Some(raw) = raw else {
        return SortKey::missing();
    };

    match parse_epoch_seconds(raw) {
        Some(epoch_seconds) => SortKey {
            epoch_seconds,
            raw: raw.to_string(),
        },
        None => SortKey {
            epoch_seconds: 0,
            raw: raw.to_string(),
        },
    }
}

fn parse_epoch_seconds(raw: &str) -> Option<i64> {
    let candidate = raw.trim();
    if candidate.is_empty() {
        return None;
    }

    if let Ok(parsed) = OffsetDateTime::parse(candidate, &Rfc3339) {
        return Some(parsed.unix_timestamp());
    }

    // Export timestamps occasionally omit the UTC designator; read them as UTC.
    if let Ok(parsed) = PrimitiveDateTime::parse(candidate, naive_format()) {
        return Some(parsed.assume_utc().unix_timestamp());
    }

    None
}

fn naive_format() -> &'static OwnedFormatItem {
    static FORMAT: OnceLock<OwnedFormatItem> = OnceLock::new();
    FORMAT.get_or_init(|| {
        format_description::parse_owned::<2>(
            "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]",
        )
        .expect("naive timestamp format should compile")
    })
}
