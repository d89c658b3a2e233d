use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

pub const UNKNOWN_TIME: &str = "unknown time";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Formats `raw` relative to `now`.
///
/// Unparsable input is returned unchanged. Timestamps without an offset are
/// read as local time; a bare date is local midnight.
pub fn relative_time(raw: &str, now: DateTime<Local>) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return UNKNOWN_TIME.to_string();
    }
    let Some(timestamp) = parse_timestamp(raw) else {
        return raw.to_string();
    };

    let diff = now.signed_duration_since(timestamp);
    if diff.num_seconds() < 0 {
        // Small clock skew between server and client.
        if diff.num_seconds() > -60 {
            return "just now".to_string();
        }
        return calendar_date(timestamp);
    }

    match diff.num_days() {
        0 => match diff.num_hours() {
            0 => match diff.num_minutes() {
                minutes if minutes <= 1 => "just now".to_string(),
                minutes => format!("{minutes} minutes ago"),
            },
            1 => "1 hour ago".to_string(),
            hours => format!("{hours} hours ago"),
        },
        1 => "yesterday".to_string(),
        days if days < 7 => format!("{days} days ago"),
        _ => calendar_date(timestamp),
    }
}

fn calendar_date(timestamp: DateTime<Local>) -> String {
    timestamp.format("%Y/%-m/%-d").to_string()
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Local));
    }
    if let Ok(parsed) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(parsed.with_timezone(&Local));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;
    Local.from_local_datetime(&naive).earliest()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_formats() {
        for raw in [
            "2024-03-01T08:30:00+08:00",
            "2024-03-01T08:30:00Z",
            "2024-03-01 08:30:00+08:00",
            "2024-03-01T08:30:00.123456",
            "2024-03-01 08:30:00",
            "2024-03-01T08:30",
            "2024-03-01",
        ] {
            assert!(parse_timestamp(raw).is_some(), "failed to parse {raw}");
        }
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("last tuesday").is_none());
        assert!(parse_timestamp("2024-13-45").is_none());
    }
}
