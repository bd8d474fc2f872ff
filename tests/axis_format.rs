use scibench::data::axis_format::*;

// Helper: build a UTC timestamp as seconds
fn utc_secs(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32) -> f64 {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
    let ndt = NaiveDateTime::new(
        NaiveDate::from_ymd_opt(year, month, day).unwrap(),
        NaiveTime::from_hms_opt(h, m, s).unwrap(),
    );
    chrono::Utc.from_utc_datetime(&ndt).timestamp() as f64
}

// Helper: build a LOCAL timestamp as seconds
fn local_secs(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32) -> f64 {
    use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
    let ndt = NaiveDateTime::new(
        NaiveDate::from_ymd_opt(year, month, day).unwrap(),
        NaiveTime::from_hms_opt(h, m, s).unwrap(),
    );
    Local
        .from_local_datetime(&ndt)
        .earliest()
        .map(|dt| dt.timestamp() as f64)
        .unwrap_or(0.0)
}

#[test]
fn resolution_wide_range_returns_seconds() {
    let tf = TimestampFormatter::default();
    assert_eq!(tf.resolution(7_200.0), TickResolution::Seconds);
}

#[test]
fn resolution_just_below_ms_threshold() {
    let tf = TimestampFormatter::default();
    assert_eq!(tf.resolution(3_599.0), TickResolution::Milliseconds);
}

#[test]
fn resolution_honors_max_cap() {
    let tf = TimestampFormatter {
        max_resolution: TickResolution::Milliseconds,
        ..Default::default()
    };
    assert_eq!(tf.resolution(0.5), TickResolution::Milliseconds);
}

#[test]
fn format_no_date_when_range_within_day() {
    let tf = TimestampFormatter::default();
    let t = utc_secs(2024, 1, 15, 12, 0, 0);
    let range = (t - 5.0, t + 5.0);
    let out = tf.format(t, range);
    let colon_count = out.chars().filter(|&c| c == ':').count();
    assert_eq!(colon_count, 2, "Expected HH:MM:SS format, got: {}", out);
    assert!(!out.contains('-'), "Unexpected date in: {}", out);
}

#[test]
fn format_shows_date_when_range_crosses_midnight() {
    let tf = TimestampFormatter::default();
    let before = local_secs(2024, 1, 15, 23, 59, 55);
    let after = local_secs(2024, 1, 16, 0, 0, 5);
    let out = tf.format(before, (before, after));
    assert!(out.contains('-'), "Expected date in: {}", out);
}

#[test]
fn format_shows_year_when_year_changes() {
    let tf = TimestampFormatter::default();
    let dec31 = local_secs(2023, 12, 31, 23, 59, 55);
    let jan01 = local_secs(2024, 1, 1, 0, 0, 5);
    let out = tf.format(dec31, (dec31, jan01));
    assert!(
        out.contains("2023") || out.contains("2024"),
        "No year in: {}",
        out
    );
}

#[test]
fn format_reversed_range_is_tolerated() {
    let tf = TimestampFormatter::default();
    let t = utc_secs(2024, 6, 1, 9, 30, 0);
    let out_fwd = tf.format(t, (t - 5.0, t + 5.0));
    let out_rev = tf.format(t, (t + 5.0, t - 5.0));
    assert_eq!(out_fwd, out_rev);
}

#[test]
fn numeric_formatter_uses_caller_dec_pl() {
    let nf = NumericFormatter::default();
    assert_eq!(nf.format(3.14159, 2, 0.1), "3.14");
}

#[test]
fn numeric_formatter_switches_to_scientific_for_tiny_steps() {
    let nf = NumericFormatter::default();
    let s = nf.format(0.000123, 2, 0.0001);
    assert!(s.contains('e'), "Expected scientific, got: {}", s);
}

#[test]
fn numeric_formatter_appends_unit() {
    let nf = NumericFormatter {
        unit: Some("V".to_string()),
        ..Default::default()
    };
    assert!(nf.format(1.5, 2, 0.1).ends_with(" V"));
}

#[test]
fn scientific_zero_and_infinity() {
    assert_eq!(format_scientific(0.0, 2), "0.00");
    assert_eq!(format_scientific(f64::INFINITY, 2), "inf");
}
