// Copyright (C) 2025 Clara Platform Contributors
// SPDX-License-Identifier: Apache-2.0
//! Decoding of the timestamp strings the platform sends.
//!
//! Depending on the server version a timestamp arrives either as decimal
//! seconds since year 1 (proleptic Gregorian) or as a pre-formatted
//! `YYYY-MM-DD HH:MM:SSZ` literal. Both decode to UTC.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Seconds between 0001-01-01T00:00:00Z and the Unix epoch.
const SECONDS_BETWEEN_YEAR_ONE_AND_EPOCH: i64 = 62_167_219_200;

const LITERAL_FORMAT: &str = "%Y-%m-%d %H:%M:%SZ";

/// Decode a platform timestamp string.
///
/// Returns `None` for unset values: the empty string, a numeric value that
/// falls before the Unix epoch, or a literal that does not parse.
pub fn decode_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if value.is_empty() {
        return None;
    }

    if let Ok(seconds_since_year_one) = value.parse::<i64>() {
        let unix_seconds = seconds_since_year_one - SECONDS_BETWEEN_YEAR_ONE_AND_EPOCH;
        if unix_seconds < 0 {
            return None;
        }
        return DateTime::<Utc>::from_timestamp(unix_seconds, 0);
    }

    NaiveDateTime::parse_from_str(value, LITERAL_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Encode a UTC instant as seconds since year 1, the form list filters use.
pub(crate) fn to_year_one_seconds(instant: DateTime<Utc>) -> i64 {
    instant.timestamp() + SECONDS_BETWEEN_YEAR_ONE_AND_EPOCH
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_numeric_seconds_since_year_one() {
        let decoded = decode_timestamp("63763345820").unwrap();
        let expected = DateTime::<Utc>::from_timestamp(
            63_763_345_820 - SECONDS_BETWEEN_YEAR_ONE_AND_EPOCH,
            0,
        )
        .unwrap();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_numeric_before_epoch_is_unset() {
        // Year-one-relative values below the epoch offset predate 1970.
        assert_eq!(decode_timestamp("0"), None);
        assert_eq!(decode_timestamp("62167219199"), None);
        assert_eq!(decode_timestamp("-5"), None);
    }

    #[test]
    fn test_numeric_at_epoch() {
        let decoded = decode_timestamp("62167219200").unwrap();
        assert_eq!(decoded, Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_literal_format() {
        let decoded = decode_timestamp("2021-03-08 18:06:31Z").unwrap();
        assert_eq!(decoded, Utc.with_ymd_and_hms(2021, 3, 8, 18, 6, 31).unwrap());
    }

    #[test]
    fn test_empty_is_unset() {
        assert_eq!(decode_timestamp(""), None);
    }

    #[test]
    fn test_garbage_is_unset() {
        assert_eq!(decode_timestamp("not a timestamp"), None);
        assert_eq!(decode_timestamp("2021/03/08"), None);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let instant = Utc.with_ymd_and_hms(2021, 3, 8, 18, 6, 31).unwrap();
        let encoded = to_year_one_seconds(instant);
        assert_eq!(decode_timestamp(&encoded.to_string()), Some(instant));
    }
}
