use chrono::format::{parse, Parsed, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Date-times carrying an explicit offset. `%#z` takes `+02`, `+0200`,
/// `+02:00` and `Z`.
const OFFSET_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%MZ",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Reduced-precision calendar dates and whether the month is implied.
const REDUCED_DATE_FORMATS: [(&str, bool); 2] = [("%Y-%m", false), ("%Y", true)];

/// Parses the ISO-8601 forms accepted for meeting timestamps.
///
/// Full RFC 3339 instants are accepted as-is, as are minute-precision and
/// basic-format (`+0200`) offsets. Date-time values without an offset and
/// calendar dates (down to year-month and bare year) are read as UTC. Only
/// validity matters to the commitment; the instant itself is never hashed.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(instant) = DateTime::parse_from_str(value, format) {
            return Some(instant.with_timezone(&Utc));
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_reduced_date(value))
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `YYYY-MM` and `YYYY`, pinned to the first day of the period.
fn parse_reduced_date(value: &str) -> Option<NaiveDate> {
    for (format, month_implied) in REDUCED_DATE_FORMATS {
        let mut parsed = Parsed::new();
        if parse(&mut parsed, value, StrftimeItems::new(format)).is_err() {
            continue;
        }
        if month_implied {
            parsed.set_month(1).ok()?;
        }
        parsed.set_day(1).ok()?;
        return parsed.to_naive_date().ok();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_iso_forms() {
        for value in [
            "2025-09-18T10:00:00Z",
            "2025-09-18T10:00:00.250+02:00",
            "2025-09-18T10:00:00",
            "2025-09-18T10:00",
            "2025-09-18",
        ] {
            assert!(parse_timestamp(value).is_some(), "{value} should parse");
        }
    }

    #[test]
    fn accepts_minute_precision_and_basic_offsets() {
        let utc = parse_timestamp("2025-09-18T10:00:00Z").unwrap();
        assert_eq!(parse_timestamp("2025-09-18T10:00Z"), Some(utc));
        assert_eq!(parse_timestamp("2025-09-18T12:00+02:00"), Some(utc));
        assert_eq!(parse_timestamp("2025-09-18T12:00:00+0200"), Some(utc));
        assert_eq!(parse_timestamp("2025-09-18T12:00:00.000+02"), Some(utc));
    }

    #[test]
    fn reduced_dates_start_their_period() {
        let september = parse_timestamp("2025-09-01").unwrap();
        assert_eq!(parse_timestamp("2025-09"), Some(september));
        let new_year = parse_timestamp("2025-01-01").unwrap();
        assert_eq!(parse_timestamp("2025"), Some(new_year));
    }

    #[test]
    fn offsets_are_normalised_to_utc() {
        let instant = parse_timestamp("2025-09-18T12:00:00+02:00").unwrap();
        assert_eq!(instant.to_rfc3339(), "2025-09-18T10:00:00+00:00");
    }

    #[test]
    fn rejects_garbage_and_impossible_dates() {
        for value in [
            "",
            "yesterday",
            "2025-13-01",
            "2025-13",
            "2025-02-30T00:00:00Z",
            "18/09/2025",
            "2025-09-18T25:00Z",
        ] {
            assert!(parse_timestamp(value).is_none(), "{value} should not parse");
        }
    }
}
