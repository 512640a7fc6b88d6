// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Datelike, Duration, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// ISO week key ("YYYY-Www") for a timestamp, e.g. "2026-W42".
pub fn iso_week_key(date: DateTime<Utc>) -> String {
    let week = date.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

/// Week keys for the `count` weeks ending with the week of `now`, oldest first.
pub fn recent_week_keys(now: DateTime<Utc>, count: usize) -> Vec<String> {
    (0..count)
        .rev()
        .map(|weeks_back| iso_week_key(now - Duration::weeks(weeks_back as i64)))
        .collect()
}
