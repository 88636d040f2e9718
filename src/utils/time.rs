//! Time parsing and formatting utilities

use crate::error::{FrameXError, FrameXResult};

/// Time parser for trim bounds given on the command line
pub struct TimeParser;

impl TimeParser {
    /// Parse `SS`, `MM:SS` or `HH:MM:SS` into whole seconds.
    ///
    /// Fractional seconds are truncated since trim windows have one-second granularity.
    pub fn parse_seconds(time_str: &str) -> FrameXResult<i64> {
        let time_str = time_str.trim();
        let invalid = || FrameXError::InvalidTimeFormat {
            time: time_str.to_string(),
        };

        let parts: Vec<&str> = time_str.split(':').collect();
        if parts.is_empty() || parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(invalid());
        }

        // Only the last component may carry a fraction
        let (whole, last) = parts.split_at(parts.len() - 1);
        let seconds: f64 = last[0].parse().map_err(|_| invalid())?;
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(invalid());
        }
        if !whole.is_empty() && seconds >= 60.0 {
            return Err(invalid());
        }

        let mut total = 0i64;
        for (i, part) in whole.iter().enumerate() {
            let value: i64 = part.parse().map_err(|_| invalid())?;
            if value < 0 {
                return Err(invalid());
            }
            // Minutes must stay below 60 when hours are present
            if whole.len() == 2 && i == 1 && value >= 60 {
                return Err(invalid());
            }
            total = total
                .checked_mul(60)
                .and_then(|t| t.checked_add(value))
                .ok_or_else(invalid)?;
        }

        total
            .checked_mul(60)
            .and_then(|t| t.checked_add(seconds as i64))
            .ok_or_else(invalid)
    }

    /// Format whole seconds as `HH:MM:SS`
    pub fn format_hms(seconds: i64) -> String {
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        let secs = seconds % 60;
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    }
}
