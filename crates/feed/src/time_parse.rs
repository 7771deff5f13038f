// ABOUTME: Parses RSS date strings (pubDate, lastBuildDate) into UTC timestamps.
// ABOUTME: Tries RFC 2822, RFC 3339 and RFC 822 dates with North American / European zone names.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

const ZONE_NAMES: &[(&str, i32)] = &[
    ("GMT", 0),
    ("UTC", 0),
    ("UT", 0),
    ("Z", 0),
    ("EST", -5),
    ("EDT", -4),
    ("CST", -6),
    ("CDT", -5),
    ("MST", -7),
    ("MDT", -6),
    ("PST", -8),
    ("PDT", -7),
    ("WET", 0),
    ("BST", 1),
    ("CET", 1),
    ("CEST", 2),
    ("EET", 2),
    ("EEST", 3),
];

const NAIVE_FORMATS: &[&str] = &[
    "%a, %d %b %Y %H:%M:%S",
    "%a, %e %b %Y %H:%M:%S",
    "%a, %d %b %Y %H:%M",
    "%d %b %Y %H:%M:%S",
];

/// Parses an RSS date. Returns `None` when no known format matches.
pub fn parse_rss_date(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%a, %d %b %Y %H:%M:%S %z", "%a, %e %b %Y %H:%M:%S %z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    parse_with_zone_name(s)
}

fn parse_with_zone_name(s: &str) -> Option<DateTime<Utc>> {
    let (base, zone) = s.rsplit_once(' ')?;
    let hours = ZONE_NAMES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(zone))
        .map(|(_, hours)| *hours)?;
    let offset = FixedOffset::east_opt(hours * 3600)?;

    NAIVE_FORMATS.iter().find_map(|fmt| {
        let naive = NaiveDateTime::parse_from_str(base.trim(), fmt).ok()?;
        let local = offset.from_local_datetime(&naive).single()?;
        Some(local.with_timezone(&Utc))
    })
}
