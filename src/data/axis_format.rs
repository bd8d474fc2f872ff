//! Axis tick formatters: adaptive timestamps plus decimal/scientific numerics.
//!
//! Tick labels on the time axis adapt to the visible span: the date part only
//! appears when the span crosses a calendar day, the year only when it crosses
//! a year, and sub-second digits appear as the span shrinks.

use chrono::{Datelike, Timelike};

/// Granularity of the sub-second portion shown in a time label, ordered from
/// coarsest to finest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TickResolution {
    Seconds,
    Milliseconds,
    Microseconds,
}

/// Adaptive timestamp formatter for the X axis.
#[derive(Debug, Clone)]
pub struct TimestampFormatter {
    /// Always show the date part, even within a single calendar day.
    pub force_date: bool,
    /// Visible span (seconds) below which milliseconds are shown. Default 1 hour.
    pub milliseconds_threshold: f64,
    /// Visible span (seconds) below which microseconds are shown. Default 1 s.
    pub microseconds_threshold: f64,
    /// Hard ceiling on granularity.
    pub max_resolution: TickResolution,
}

impl Default for TimestampFormatter {
    fn default() -> Self {
        Self {
            force_date: false,
            milliseconds_threshold: 3_600.0,
            microseconds_threshold: 1.0,
            max_resolution: TickResolution::Microseconds,
        }
    }
}

impl TimestampFormatter {
    /// Format `value_secs` (seconds since epoch) for a visible range
    /// `x_range` in the same unit.
    pub fn format(&self, value_secs: f64, x_range: (f64, f64)) -> String {
        let (lo, hi) = if x_range.0 <= x_range.1 {
            (x_range.0, x_range.1)
        } else {
            (x_range.1, x_range.0)
        };
        let span = hi - lo;

        let start = secs_to_local(lo);
        let end = secs_to_local(hi);
        let value = secs_to_local(value_secs);

        let date_changes = start.date_naive() != end.date_naive();
        let show_date = date_changes || self.force_date;
        let show_year = show_date && start.year() != end.year();

        let base = if show_year {
            value.format("%Y-%m-%d %H:%M:%S").to_string()
        } else if show_date {
            value.format("%m-%d %H:%M:%S").to_string()
        } else {
            value.format("%H:%M:%S").to_string()
        };

        match self.resolution(span) {
            TickResolution::Seconds => base,
            TickResolution::Milliseconds => {
                format!("{}.{:03}", base, value.nanosecond() / 1_000_000)
            }
            TickResolution::Microseconds => {
                format!("{}.{:06}", base, value.nanosecond() / 1_000)
            }
        }
    }

    /// Select the sub-second resolution for the given visible span, clamped to
    /// `max_resolution`.
    pub fn resolution(&self, span_secs: f64) -> TickResolution {
        let mut res = TickResolution::Seconds;
        if span_secs < self.milliseconds_threshold {
            res = TickResolution::Milliseconds;
        }
        if span_secs < self.microseconds_threshold {
            res = TickResolution::Microseconds;
        }
        res.min(self.max_resolution)
    }
}

/// Convert seconds-since-epoch to local time; non-finite or out-of-range
/// values fall back to the UNIX epoch.
fn secs_to_local(secs: f64) -> chrono::DateTime<chrono::Local> {
    if !secs.is_finite() {
        return chrono::DateTime::from_timestamp(0, 0)
            .unwrap()
            .with_timezone(&chrono::Local);
    }
    let s = secs.floor() as i64;
    let ns = (((secs - s as f64) * 1e9).round() as u32).min(999_999_999);
    chrono::DateTime::from_timestamp(s, ns)
        .unwrap_or_else(|| chrono::DateTime::from_timestamp(0, 0).unwrap())
        .with_timezone(&chrono::Local)
}

/// Numeric formatter for value axes: fixed decimal or compact scientific.
#[derive(Debug, Clone, Default)]
pub struct NumericFormatter {
    /// Fixed number of decimal places, or `None` to use the caller's fallback.
    pub decimal_places: Option<usize>,
    /// Optional unit suffix (e.g. `"V"`).
    pub unit: Option<String>,
    /// Force scientific notation regardless of magnitude.
    pub scientific: bool,
}

impl NumericFormatter {
    /// Format `value` with a fallback decimal-place count. Values whose tick
    /// step is far outside the decimal range switch to scientific notation
    /// automatically.
    pub fn format(&self, value: f64, dec_pl: usize, step: f64) -> String {
        let places = self.decimal_places.unwrap_or(dec_pl);
        let sci = self.scientific
            || (step.is_finite() && step != 0.0 && {
                let exp = step.abs().log10().floor() as i32;
                exp < -(places as i32) || exp >= places as i32
            });
        let body = if sci {
            format_scientific(value, places)
        } else {
            format!("{:.*}", places, value)
        };
        match &self.unit {
            Some(u) => format!("{} {}", body, u),
            None => body,
        }
    }
}

/// Render `value` as compact scientific notation like `1.23e5`. Returns plain
/// decimal for exponent 0 and passes non-finite values through.
pub fn format_scientific(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return format!("{:.*}", digits, 0.0_f64);
    }
    if !value.is_finite() {
        return format!("{}", value);
    }
    let sign = if value < 0.0 { -1.0 } else { 1.0 };
    let abs = value.abs();
    let exp = abs.log10().floor() as i32;
    let mantissa = sign * abs / 10f64.powi(exp);
    if exp == 0 {
        format!("{:.*}", digits, mantissa)
    } else {
        format!("{:.*}e{}", digits, mantissa, exp)
    }
}
