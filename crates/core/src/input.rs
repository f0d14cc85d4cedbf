use tracing::warn;

use crate::models::{PlanRequest, Preference};

pub const MAX_TRIP_DAYS: u32 = 365;

pub fn normalize_query(input: &str) -> String {
    input.trim().to_string()
}

/// Integer at the start of `raw` plus whether text followed the digits
/// ("2.7" and "3 days" read as 2 and 3). Overlong digit runs saturate.
fn leading_integer(raw: &str) -> Option<(i64, bool)> {
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let value = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    let value = if negative { -value } else { value };
    Some((value, digits_len < rest.len()))
}

/// Missing, non-numeric and negative values become 0; large values are
/// clamped to [`MAX_TRIP_DAYS`].
pub fn parse_day_count(raw: &str) -> u32 {
    let trimmed = raw.trim();
    match leading_integer(trimmed) {
        Some((days, _)) if days < 0 => {
            warn!(raw = trimmed, "negative day count, using 0");
            0
        }
        Some((days, _)) if days > MAX_TRIP_DAYS as i64 => {
            warn!(raw = trimmed, max = MAX_TRIP_DAYS, "day count clamped");
            MAX_TRIP_DAYS
        }
        Some((days, truncated)) => {
            if truncated {
                warn!(raw = trimmed, days, "day count truncated to its leading integer");
            }
            days as u32
        }
        None => {
            if !trimmed.is_empty() {
                warn!(raw = trimmed, "day count is not a number, using 0");
            }
            0
        }
    }
}

pub fn parse_budget(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match leading_integer(trimmed) {
        Some((budget, _)) if budget > 0 => Some(budget as u64),
        Some(_) => None,
        None => {
            warn!(raw = trimmed, "ignoring unparseable budget");
            None
        }
    }
}

/// Keeps order and duplicates; unknown tags are dropped.
pub fn parse_preferences<I, S>(tags: I) -> Vec<Preference>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .filter_map(|tag| {
            let tag = tag.as_ref();
            let parsed = Preference::parse(tag);
            if parsed.is_none() {
                warn!(tag, "ignoring unknown preference");
            }
            parsed
        })
        .collect()
}

impl PlanRequest {
    pub fn from_form<I, S>(destination: &str, days: &str, budget: &str, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            destination: normalize_query(destination),
            days: parse_day_count(days),
            budget: parse_budget(budget),
            preferences: parse_preferences(preferences),
        }
    }
}
