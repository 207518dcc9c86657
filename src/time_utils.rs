// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Utc};

/// Format a UTC timestamp as "<Month> <day>", e.g. "October 19".
pub fn month_day(date: DateTime<Utc>) -> String {
    date.format("%B %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_month_day_has_no_padding() {
        let date = Utc.with_ymd_and_hms(2026, 10, 9, 23, 59, 0).unwrap();
        assert_eq!(month_day(date), "October 9");
    }
}
