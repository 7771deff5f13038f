// ABOUTME: Parses <itunes:duration> values into whole seconds.
// ABOUTME: Accepts plain seconds, MM:SS, HH:MM:SS and unit strings such as "1h30m".

/// Parses an episode duration into seconds.
///
/// Apple documents plain seconds as the preferred form, but feeds in the wild
/// also carry clock notation and the occasional unit string. Fractional
/// seconds (`"1079.5"`, `"17:59.5"`) are truncated.
pub fn parse_duration_seconds(raw: &str) -> Option<u32> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if s.contains(':') {
        return parse_clock(s);
    }

    if let Some(secs) = parse_seconds(s) {
        return Some(secs);
    }

    parse_duration::parse(s)
        .ok()
        .and_then(|duration| u32::try_from(duration.as_secs()).ok())
}

fn parse_seconds(s: &str) -> Option<u32> {
    let whole = s.split_once('.').map_or(s, |(whole, _)| whole);
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    whole.parse().ok()
}

fn parse_clock(s: &str) -> Option<u32> {
    let parts: Vec<&str> = s.split(':').collect();
    let (hours, mins, secs) = match parts.as_slice() {
        [m, s] => ("0", *m, *s),
        [h, m, s] => (*h, *m, *s),
        _ => return None,
    };

    let hours: u64 = hours.trim().parse().ok()?;
    let mins: u64 = mins.trim().parse().ok()?;
    let secs = u64::from(parse_seconds(secs.trim())?);
    let total = hours
        .checked_mul(3600)?
        .checked_add(mins.checked_mul(60)?)?
        .checked_add(secs)?;
    u32::try_from(total).ok()
}
