//! Integration tests for timezone conversion and date/time/number rendering.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use reqloc::{
    Error, FormatKind, Granularity, I18n, I18nConfig, Style, TimedeltaOptions, format_date,
    format_datetime, format_decimal, format_number, format_time, format_timedelta,
    from_user_timezone, to_user_timezone, to_utc,
};

fn app() -> I18n {
    I18n::new(I18nConfig::default())
}

fn vienna_app() -> I18n {
    I18n::new(
        I18nConfig::builder()
            .default_timezone("Europe/Vienna")
            .build(),
    )
}

fn sample_dt() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2010, 4, 12)
        .unwrap()
        .and_hms_opt(13, 46, 0)
        .unwrap()
}

// =========================================================================
// Timezone Conversion
// =========================================================================

#[test]
fn to_user_timezone_applies_offset() {
    let i18n = vienna_app();
    let ctx = i18n.context();

    // April is summer time in Vienna: UTC+2.
    let local = to_user_timezone(sample_dt(), &ctx).unwrap();
    assert_eq!(local.hour(), 15);
    assert_eq!(local.minute(), 46);
}

#[test]
fn conversion_round_trips() {
    let i18n = vienna_app();
    let ctx = i18n.context();

    let dt = sample_dt();
    assert_eq!(to_utc(to_user_timezone(dt, &ctx).unwrap()), dt);
}

#[test]
fn from_user_timezone_inverts_wall_time() {
    let i18n = vienna_app();
    let ctx = i18n.context();

    let wall = NaiveDate::from_ymd_opt(2010, 4, 12)
        .unwrap()
        .and_hms_opt(15, 46, 0)
        .unwrap();
    assert_eq!(from_user_timezone(wall, &ctx).unwrap(), sample_dt());
}

#[test]
fn nonexistent_wall_time_is_an_error() {
    let i18n = vienna_app();
    let ctx = i18n.context();

    // 2:30 on the spring-forward night does not exist.
    let gap = NaiveDate::from_ymd_opt(2010, 3, 28)
        .unwrap()
        .and_hms_opt(2, 30, 0)
        .unwrap();
    assert!(matches!(
        from_user_timezone(gap, &ctx).unwrap_err(),
        Error::NonexistentLocalTime { .. }
    ));
}

// =========================================================================
// Styles
// =========================================================================

#[test]
fn datetime_defaults_to_medium() {
    let i18n = app();
    let ctx = i18n.context();

    let text = format_datetime(sample_dt(), None, &ctx).unwrap();
    assert!(text.contains("Apr 12, 2010"), "got: {text}");
    assert!(text.contains("1:46:00"), "got: {text}");
}

#[test]
fn datetime_rebases_into_user_timezone() {
    let i18n = vienna_app();
    let ctx = i18n.context();

    let text = format_datetime(sample_dt(), None, &ctx).unwrap();
    assert!(text.contains("3:46:00"), "got: {text}");
}

#[test]
fn date_short_style() {
    let i18n = app();
    let ctx = i18n.context();

    let date = NaiveDate::from_ymd_opt(2010, 4, 12).unwrap();
    assert_eq!(format_date(date, Some("short"), &ctx).unwrap(), "4/12/10");
}

#[test]
fn date_long_style_localizes() {
    let i18n = I18n::new(I18nConfig::builder().default_locale("de").build());
    let ctx = i18n.context();

    let date = NaiveDate::from_ymd_opt(2010, 4, 12).unwrap();
    let text = format_date(date, Some("long"), &ctx).unwrap();
    assert!(text.contains("April 2010"), "got: {text}");
}

#[test]
fn time_medium_style() {
    let i18n = app();
    let ctx = i18n.context();

    let text = format_time(sample_dt(), None, &ctx).unwrap();
    assert!(text.contains("1:46:00"), "got: {text}");
}

#[test]
fn time_rebases_into_user_timezone() {
    let i18n = vienna_app();
    let ctx = i18n.context();

    let text = format_time(sample_dt(), None, &ctx).unwrap();
    assert!(text.contains("3:46:00"), "got: {text}");
}

// =========================================================================
// Literal Patterns
// =========================================================================

#[test]
fn literal_pattern_renders_exactly() {
    let i18n = app();
    let ctx = i18n.context();

    let text = format_datetime(sample_dt(), Some("%Y-%m-%d %H:%M"), &ctx).unwrap();
    assert_eq!(text, "2010-04-12 13:46");
}

#[test]
fn literal_pattern_respects_timezone() {
    let i18n = vienna_app();
    let ctx = i18n.context();

    let text = format_datetime(sample_dt(), Some("%H:%M"), &ctx).unwrap();
    assert_eq!(text, "15:46");
}

#[test]
fn malformed_pattern_is_an_error() {
    let i18n = app();
    let ctx = i18n.context();

    assert!(matches!(
        format_datetime(sample_dt(), Some("%Q"), &ctx).unwrap_err(),
        Error::InvalidPattern { .. }
    ));
}

#[test]
fn style_pattern_override_applies() {
    let i18n = app();
    i18n.with_config_mut(|config| {
        config
            .date_formats
            .set_style_pattern(FormatKind::DateTime, Style::Medium, "%Y/%m/%d");
    });
    let ctx = i18n.context();

    assert_eq!(format_datetime(sample_dt(), None, &ctx).unwrap(), "2010/04/12");
}

// =========================================================================
// Elapsed Time
// =========================================================================

#[test]
fn six_days_round_up_to_a_week() {
    let i18n = app();
    let ctx = i18n.context();

    let text = format_timedelta(TimeDelta::days(6), &TimedeltaOptions::default(), &ctx).unwrap();
    assert_eq!(text, "1 week");
}

#[test]
fn raised_threshold_keeps_days() {
    let i18n = app();
    let ctx = i18n.context();

    let options = TimedeltaOptions::builder().threshold(1.0).build();
    let text = format_timedelta(TimeDelta::days(6), &options, &ctx).unwrap();
    assert_eq!(text, "6 days");
}

#[test]
fn direction_wraps_future_and_past() {
    let i18n = app();
    let ctx = i18n.context();

    let options = TimedeltaOptions::builder().add_direction(true).build();
    assert_eq!(
        format_timedelta(TimeDelta::hours(3), &options, &ctx).unwrap(),
        "in 3 hours"
    );
    assert_eq!(
        format_timedelta(TimeDelta::hours(-3), &options, &ctx).unwrap(),
        "3 hours ago"
    );
}

#[test]
fn granularity_reports_at_least_one_unit() {
    let i18n = app();
    let ctx = i18n.context();

    let options = TimedeltaOptions::builder()
        .granularity(Granularity::Hour)
        .build();
    let text = format_timedelta(TimeDelta::seconds(30), &options, &ctx).unwrap();
    assert_eq!(text, "1 hour");
}

#[test]
fn zero_delta_reports_zero_seconds() {
    let i18n = app();
    let ctx = i18n.context();

    let text =
        format_timedelta(TimeDelta::zero(), &TimedeltaOptions::default(), &ctx).unwrap();
    assert_eq!(text, "0 seconds");
}

// =========================================================================
// Numbers
// =========================================================================

#[test]
fn numbers_group_per_locale() {
    let en = app();
    let ctx = en.context();
    assert_eq!(format_number(1_234_567, &ctx).unwrap(), "1,234,567");

    let de = I18n::new(I18nConfig::builder().default_locale("de").build());
    let ctx = de.context();
    assert_eq!(format_number(1_234_567, &ctx).unwrap(), "1.234.567");
}

#[test]
fn decimals_use_locale_separator() {
    let i18n = app();
    let ctx = i18n.context();
    assert_eq!(format_decimal(1234.5, &ctx).unwrap(), "1,234.5");
}
