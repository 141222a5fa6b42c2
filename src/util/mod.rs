//
//  cctrl-client
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! Timestamp helpers shared by the resource layer.
//!
//! The API exchanges instants as fractional Unix timestamps: log entries
//! carry a float `time` field and the log endpoint takes a `timestamp`
//! query parameter of the form `<seconds>.<microseconds>`.
//!
//! ## Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use cctrl_client::util::{build_timestamp, parse_timestamp};
//!
//! let instant = Utc.with_ymd_and_hms(2013, 1, 1, 0, 0, 0).unwrap();
//! assert_eq!(build_timestamp(&instant), "1356998400.000000");
//! assert_eq!(parse_timestamp(1356998400.0), Some(instant));
//! ```

use chrono::{DateTime, Utc};

/// Formats an instant as the `timestamp` parameter of the log endpoint.
///
/// The result is the Unix time in seconds followed by a dot and exactly six
/// digits of microseconds.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use cctrl_client::util::build_timestamp;
///
/// let instant = Utc.timestamp_opt(1356998400, 123_456_789).unwrap();
/// assert_eq!(build_timestamp(&instant), "1356998400.123456");
/// ```
pub fn build_timestamp(instant: &DateTime<Utc>) -> String {
    format!(
        "{}.{:06}",
        instant.timestamp(),
        instant.timestamp_subsec_micros()
    )
}

/// Converts a fractional Unix timestamp into an instant.
///
/// Returns `None` for values that are not finite or out of range.
/// Precision is kept down to the microsecond.
pub fn parse_timestamp(timestamp: f64) -> Option<DateTime<Utc>> {
    if !timestamp.is_finite() {
        return None;
    }

    let micros = (timestamp * 1_000_000.0).round();
    if micros.abs() > i64::MAX as f64 {
        return None;
    }

    DateTime::from_timestamp_micros(micros as i64)
}
