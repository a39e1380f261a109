use std::time::Duration;

use crate::error::ConfigError;

const SECONDS_PER_HOUR: u64 = 3600;

/// Convert a session lifetime in whole hours to a `Duration`.
///
/// STS enforces its own upper bound, so nothing is clamped here.
pub fn hours_to_duration(hours: i64) -> Result<Duration, ConfigError> {
    if hours <= 0 {
        return Err(ConfigError::NonPositiveDuration { hours });
    }

    (hours as u64)
        .checked_mul(SECONDS_PER_HOUR)
        .map(Duration::from_secs)
        .ok_or(ConfigError::DurationOutOfRange { hours })
}

/// Seconds value carried by the `DurationSeconds` field of an STS request
pub fn duration_seconds(duration: Duration) -> Result<i32, ConfigError> {
    i32::try_from(duration.as_secs()).map_err(|_| ConfigError::DurationOutOfRange {
        hours: (duration.as_secs() / SECONDS_PER_HOUR) as i64,
    })
}
