//! Axis label formatting: timestamps on the shared X axis and values on the
//! Y axes.
//!
//! Timestamps are seconds since the UNIX epoch and are rendered in UTC, the
//! same zone naive timestamps are read in.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// TimeFormat
// ─────────────────────────────────────────────────────────────────────────────

/// How tick labels on the time axis are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    /// `HH:MM:SS`
    TimeOnly,
    /// `YYYY-MM-DD HH:MM`
    DateTime,
}

impl TimeFormat {
    pub fn from_time_only(time_only: bool) -> Self {
        if time_only {
            TimeFormat::TimeOnly
        } else {
            TimeFormat::DateTime
        }
    }

    pub fn pattern(&self) -> &'static str {
        match self {
            TimeFormat::TimeOnly => "%H:%M:%S",
            TimeFormat::DateTime => "%Y-%m-%d %H:%M",
        }
    }

    /// Text for the toolbar toggle. While only times are shown the button
    /// displays the year of `first`, otherwise its `HH:MM`.
    pub fn toggle_label(&self, first: f64) -> String {
        let dt = secs_to_utc(first);
        match self {
            TimeFormat::TimeOnly => dt.year().to_string(),
            TimeFormat::DateTime => dt.format("%H:%M").to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TimeFormatter
// ─────────────────────────────────────────────────────────────────────────────

/// Formats time axis tick labels.
///
/// When the visible span drops below [`milliseconds_threshold`](Self::milliseconds_threshold)
/// seconds, the time-only format gains a millisecond suffix so neighbouring
/// ticks stay distinguishable.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeFormatter {
    pub format: TimeFormat,
    pub milliseconds_threshold: f64,
}

impl Default for TimeFormatter {
    fn default() -> Self {
        Self {
            format: TimeFormat::TimeOnly,
            milliseconds_threshold: 10.0,
        }
    }
}

impl TimeFormatter {
    pub fn new(format: TimeFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Format `value` (seconds) given the visible range `x_range`.
    pub fn format(&self, value: f64, x_range: (f64, f64)) -> String {
        let dt = secs_to_utc(value);
        let base = dt.format(self.format.pattern()).to_string();
        let span = (x_range.1 - x_range.0).abs();
        if self.format == TimeFormat::TimeOnly && span < self.milliseconds_threshold {
            format!("{}.{:03}", base, dt.nanosecond() / 1_000_000)
        } else {
            base
        }
    }
}

fn secs_to_utc(secs: f64) -> DateTime<Utc> {
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round().clamp(0.0, 999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos).unwrap_or_default()
}

// ─────────────────────────────────────────────────────────────────────────────
// Value formatting
// ─────────────────────────────────────────────────────────────────────────────

/// Format a Y tick. Small steps switch to scientific notation.
pub fn format_value(value: f64, step: f64) -> String {
    let step = step.abs();
    if step > 0.0 && step < 1e-3 {
        return format_scientific(value, 2);
    }
    let places = if step >= 1.0 || step == 0.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    format!("{:.*}", places, value)
}

/// Format a tick on the secondary percent axis.
pub fn format_percent(value: f64) -> String {
    format!("{:.0}%", value)
}

/// Render `value` as compact scientific notation like `1.23e5` or `-4.00e-2`.
fn format_scientific(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return format!("{:.*}", digits, 0.0_f64);
    }
    if !value.is_finite() {
        return format!("{}", value);
    }
    let exp = value.abs().log10().floor() as i32;
    let mantissa = value / 10f64.powi(exp);
    if exp == 0 {
        format!("{:.*}", digits, mantissa)
    } else {
        format!("{:.*}e{}", digits, mantissa, exp)
    }
}
