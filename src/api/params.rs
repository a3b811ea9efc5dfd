use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::db::TimeRange;

/// Earliest instant a PostgreSQL `timestamptz` can hold
/// (4714-11-24 00:00:00 BC), in Unix seconds. chrono's upper bound is
/// already below Postgres's, so only the floor needs checking.
pub const MIN_STORE_TIMESTAMP_SECS: i64 = -210_866_803_200;

/// `?start=<unix secs>&end=<unix secs>` on the time-series endpoints.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct RangeParams {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl RangeParams {
    /// Fill in missing bounds: `end` defaults to `now`, `start` to
    /// `default_days` before `end`.
    pub fn resolve(&self, now: DateTime<Utc>, default_days: u32) -> Result<TimeRange, ApiError> {
        let end = match self.end {
            Some(secs) => from_unix("end", secs)?,
            None => now,
        };
        let start = match self.start {
            Some(secs) => from_unix("start", secs)?,
            None => {
                let floor = min_store_timestamp();
                Duration::try_days(i64::from(default_days))
                    .and_then(|window| end.checked_sub_signed(window))
                    .map_or(floor, |start| start.max(floor))
            }
        };

        if start > end {
            return Err(ApiError::BadRequest(format!(
                "start ({}) must not be after end ({})",
                start.timestamp(),
                end.timestamp()
            )));
        }

        Ok(TimeRange { start, end })
    }
}

fn from_unix(name: &str, secs: i64) -> Result<DateTime<Utc>, ApiError> {
    if secs < MIN_STORE_TIMESTAMP_SECS {
        return Err(out_of_range(name, secs));
    }
    DateTime::from_timestamp(secs, 0).ok_or_else(|| out_of_range(name, secs))
}

fn out_of_range(name: &str, secs: i64) -> ApiError {
    ApiError::BadRequest(format!("{} timestamp {} is out of range", name, secs))
}

fn min_store_timestamp() -> DateTime<Utc> {
    DateTime::from_timestamp(MIN_STORE_TIMESTAMP_SECS, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_defaults_to_trailing_window() {
        let now = ts(1_600_000_000);
        let range = RangeParams::default().resolve(now, 30).unwrap();
        assert_eq!(range.end, now);
        assert_eq!(range.start, ts(1_600_000_000 - 30 * 86_400));
    }

    #[test]
    fn test_start_defaults_relative_to_explicit_end() {
        let params = RangeParams {
            start: None,
            end: Some(1_000_000),
        };
        let range = params.resolve(ts(2_000_000_000), 1).unwrap();
        assert_eq!(range.start, ts(1_000_000 - 86_400));
        assert_eq!(range.end, ts(1_000_000));
    }

    #[test]
    fn test_explicit_bounds_pass_through() {
        let params = RangeParams {
            start: Some(100),
            end: Some(200),
        };
        let range = params.resolve(ts(1_000), 30).unwrap();
        assert_eq!((range.start, range.end), (ts(100), ts(200)));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let params = RangeParams {
            start: Some(300),
            end: Some(200),
        };
        assert!(matches!(params.resolve(ts(1_000), 30), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_timestamps_before_store_floor_are_rejected() {
        let at_floor = RangeParams {
            start: Some(MIN_STORE_TIMESTAMP_SECS),
            end: Some(0),
        };
        assert_eq!(
            at_floor.resolve(ts(1_000), 30).unwrap().start,
            ts(MIN_STORE_TIMESTAMP_SECS)
        );

        for params in [
            RangeParams {
                start: Some(MIN_STORE_TIMESTAMP_SECS - 1),
                end: Some(0),
            },
            RangeParams {
                start: Some(-300_000_000_000),
                end: None,
            },
            RangeParams {
                start: None,
                end: Some(MIN_STORE_TIMESTAMP_SECS - 1),
            },
        ] {
            assert!(matches!(params.resolve(ts(1_000), 30), Err(ApiError::BadRequest(_))));
        }
    }

    #[test]
    fn test_default_window_clamps_to_store_floor() {
        let params = RangeParams {
            start: None,
            end: Some(MIN_STORE_TIMESTAMP_SECS + 86_400),
        };
        let range = params.resolve(ts(1_000), 30).unwrap();
        assert_eq!(range.start, ts(MIN_STORE_TIMESTAMP_SECS));
        assert_eq!(range.end, ts(MIN_STORE_TIMESTAMP_SECS + 86_400));
    }

    #[test]
    fn test_out_of_range_timestamp_is_rejected() {
        let params = RangeParams {
            start: Some(i64::MAX),
            end: None,
        };
        assert!(matches!(params.resolve(ts(1_000), 30), Err(ApiError::BadRequest(_))));
    }
}
