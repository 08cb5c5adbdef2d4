//! Timezone conversion and locale-aware date/time rendering.
//!
//! Values enter as naive UTC and are rebased into the request's resolved
//! timezone before rendering (dates excepted: calendar dates are not
//! timezone-converted). Named styles delegate to ICU4X field sets; literal
//! patterns delegate to chrono's localized strftime. This module never
//! interprets CLDR data itself, it only selects locale, timezone, and format.

use std::fmt::{Display, Write as _};

use bon::Builder;
use chrono::{
    DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone,
    Timelike, Utc,
};
use chrono_tz::Tz;
use icu_calendar::{Date, Iso};
use icu_datetime::DateTimeFormatter;
use icu_datetime::fieldsets;
use icu_datetime::fieldsets::enums::{DateAndTimeFieldSet, DateFieldSet, TimeFieldSet};
use icu_datetime::input::{DateTime as IcuDateTime, Time};
use icu_datetime::options::Length;
use icu_locale_core::Locale;

use crate::config::{FormatKind, FormatSpec, Style};
use crate::context::RequestContext;
use crate::error::Error;
use crate::translate::{gettext, ngettext};
use crate::vars;

// =============================================================================
// Timezone Conversion
// =============================================================================

/// Convert a naive UTC datetime into the request's timezone.
///
/// This is the rebasing step every datetime/time formatting call performs;
/// it is exposed because applications need the same conversion when doing
/// their own rendering.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use reqloc::{I18n, I18nConfig, to_user_timezone, to_utc};
///
/// let i18n = I18n::new(
///     I18nConfig::builder()
///         .default_timezone("Europe/Vienna")
///         .build(),
/// );
/// let ctx = i18n.context();
///
/// let utc = NaiveDate::from_ymd_opt(2010, 4, 12)
///     .unwrap()
///     .and_hms_opt(13, 46, 0)
///     .unwrap();
/// let local = to_user_timezone(utc, &ctx).unwrap();
///
/// assert_eq!(to_utc(local), utc);
/// ```
pub fn to_user_timezone(dt: NaiveDateTime, ctx: &RequestContext<'_>) -> Result<DateTime<Tz>, Error> {
    let tz = ctx.timezone()?;
    Ok(Utc.from_utc_datetime(&dt).with_timezone(&tz))
}

/// Convert a timezone-aware datetime back to naive UTC.
///
/// The inverse of [`to_user_timezone`]: `to_utc(to_user_timezone(dt, ctx))`
/// returns `dt`.
pub fn to_utc(dt: DateTime<Tz>) -> NaiveDateTime {
    dt.naive_utc()
}

/// Interpret a naive wall time in the request's timezone and return the
/// corresponding naive UTC instant.
///
/// This covers form input: a user types a local time, the application stores
/// UTC. During a DST fold the earlier instant is chosen; a wall time inside a
/// DST gap does not exist and is an error.
pub fn from_user_timezone(
    dt: NaiveDateTime,
    ctx: &RequestContext<'_>,
) -> Result<NaiveDateTime, Error> {
    let tz = ctx.timezone()?;
    match tz.from_local_datetime(&dt) {
        LocalResult::Single(aware) => Ok(aware.naive_utc()),
        LocalResult::Ambiguous(earlier, _) => Ok(earlier.naive_utc()),
        LocalResult::None => Err(Error::NonexistentLocalTime {
            time: dt.to_string(),
            timezone: tz.name().to_string(),
        }),
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Render a naive UTC datetime in the request's locale and timezone.
///
/// `format` accepts a style name (`short`, `medium`, `long`, `full`) or a
/// literal strftime pattern; `None` uses the configured default for datetime
/// values (`medium` unless changed).
pub fn format_datetime(
    dt: NaiveDateTime,
    format: Option<&str>,
    ctx: &RequestContext<'_>,
) -> Result<String, Error> {
    let locale = ctx.locale()?;
    let spec = ctx
        .i18n()
        .with_config(|config| config.date_formats.resolve(FormatKind::DateTime, format));
    let local = to_user_timezone(dt, ctx)?;

    match spec {
        FormatSpec::Style(style) => {
            let value = icu_datetime_value(local.naive_local())?;
            let length = style_length(style);
            let ymd = fieldsets::YMD::for_length(length);
            let ymdt = match style {
                Style::Short => ymd.with_time_hm(),
                _ => ymd.with_time_hms(),
            };
            let formatter = DateTimeFormatter::<DateAndTimeFieldSet>::try_new(
                locale.clone().into(),
                DateAndTimeFieldSet::YMDT(ymdt),
            )
            .map_err(|_| formatter_data_error(&locale))?;
            Ok(formatter.format(&value).to_string())
        }
        FormatSpec::Pattern(pattern) => {
            write_formatted(local.format_localized(&pattern, chrono_locale(&locale)), &pattern)
        }
    }
}

/// Render a calendar date in the request's locale.
///
/// Dates carry no instant, so no timezone conversion happens.
pub fn format_date(
    date: NaiveDate,
    format: Option<&str>,
    ctx: &RequestContext<'_>,
) -> Result<String, Error> {
    let locale = ctx.locale()?;
    let spec = ctx
        .i18n()
        .with_config(|config| config.date_formats.resolve(FormatKind::Date, format));

    match spec {
        FormatSpec::Style(style) => {
            let value = icu_date(date)?;
            let ymd = fieldsets::YMD::for_length(style_length(style));
            let formatter = DateTimeFormatter::<DateFieldSet>::try_new(
                locale.clone().into(),
                DateFieldSet::YMD(ymd),
            )
            .map_err(|_| formatter_data_error(&locale))?;
            Ok(formatter.format(&value).to_string())
        }
        FormatSpec::Pattern(pattern) => {
            write_formatted(date.format_localized(&pattern, chrono_locale(&locale)), &pattern)
        }
    }
}

/// Render the time-of-day part of a naive UTC datetime in the request's
/// locale and timezone.
///
/// Takes a full datetime rather than a bare time: rebasing a time across
/// timezones needs the date to resolve DST.
pub fn format_time(
    dt: NaiveDateTime,
    format: Option<&str>,
    ctx: &RequestContext<'_>,
) -> Result<String, Error> {
    let locale = ctx.locale()?;
    let spec = ctx
        .i18n()
        .with_config(|config| config.date_formats.resolve(FormatKind::Time, format));
    let local = to_user_timezone(dt, ctx)?;

    match spec {
        FormatSpec::Style(style) => {
            let value = icu_time(local.time())?;
            let length = style_length(style);
            let field_set = match style {
                Style::Short => fieldsets::T::hm().with_length(length),
                _ => fieldsets::T::hms().with_length(length),
            };
            let formatter = DateTimeFormatter::<TimeFieldSet>::try_new(
                locale.clone().into(),
                TimeFieldSet::T(field_set),
            )
            .map_err(|_| formatter_data_error(&locale))?;
            Ok(formatter.format(&value).to_string())
        }
        FormatSpec::Pattern(pattern) => {
            write_formatted(local.format_localized(&pattern, chrono_locale(&locale)), &pattern)
        }
    }
}

// =============================================================================
// Elapsed Time
// =============================================================================

/// The smallest unit [`format_timedelta`] may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

/// Options for [`format_timedelta`].
#[derive(Debug, Clone, Builder)]
pub struct TimedeltaOptions {
    /// Smallest unit that may be reported.
    #[builder(default = Granularity::Second)]
    pub granularity: Granularity,

    /// Fraction of a unit that must be reached before that unit is used.
    /// With the default `0.85`, six days reads as "1 week".
    #[builder(default = 0.85)]
    pub threshold: f64,

    /// Render with a direction: "in 3 hours" / "3 hours ago".
    #[builder(default = false)]
    pub add_direction: bool,
}

impl Default for TimedeltaOptions {
    fn default() -> Self {
        TimedeltaOptions::builder().build()
    }
}

/// Unit table: seconds per unit, source forms, granularity tag.
const TIMEDELTA_UNITS: &[(f64, &str, &str, Granularity)] = &[
    (31_536_000.0, "%(num)s year", "%(num)s years", Granularity::Year),
    (2_592_000.0, "%(num)s month", "%(num)s months", Granularity::Month),
    (604_800.0, "%(num)s week", "%(num)s weeks", Granularity::Week),
    (86_400.0, "%(num)s day", "%(num)s days", Granularity::Day),
    (3_600.0, "%(num)s hour", "%(num)s hours", Granularity::Hour),
    (60.0, "%(num)s minute", "%(num)s minutes", Granularity::Minute),
    (1.0, "%(num)s second", "%(num)s seconds", Granularity::Second),
];

/// Render an elapsed time as a single humanized unit.
///
/// Walks units from years down to the configured granularity and stops at the
/// first one whose value reaches `threshold`. Unit labels go through
/// [`ngettext`] (and the direction wrappers through [`gettext`]), so catalogs
/// translate them like any other message. A positive delta lies in the
/// future for direction purposes.
pub fn format_timedelta(
    delta: TimeDelta,
    options: &TimedeltaOptions,
    ctx: &RequestContext<'_>,
) -> Result<String, Error> {
    let seconds = delta.num_seconds();
    let magnitude = seconds.unsigned_abs() as f64;

    for (unit_seconds, singular, plural, granularity) in TIMEDELTA_UNITS {
        let mut value = magnitude / unit_seconds;
        if value >= options.threshold || *granularity == options.granularity {
            if *granularity == options.granularity && value > 0.0 {
                value = value.max(1.0);
            }
            let count = value.round() as i64;
            let quantity = ngettext(singular, plural, count, ctx, vars! {})?;

            if options.add_direction {
                return if seconds >= 0 {
                    gettext("in %(delta)s", ctx, vars! { "delta" => quantity })
                } else {
                    gettext("%(delta)s ago", ctx, vars! { "delta" => quantity })
                };
            }
            return Ok(quantity);
        }
    }

    Ok(String::new())
}

// =============================================================================
// Rendering Helpers
// =============================================================================

/// ICU4X exposes three lengths; `full` uses the widest.
fn style_length(style: Style) -> Length {
    match style {
        Style::Short => Length::Short,
        Style::Medium => Length::Medium,
        Style::Long | Style::Full => Length::Long,
    }
}

fn formatter_data_error(locale: &Locale) -> Error {
    Error::FormatterData {
        locale: locale.to_string(),
    }
}

/// Drive a chrono `DelayedFormat`; a malformed pattern surfaces here as a
/// formatting error rather than panicking in `Display`.
fn write_formatted(formatted: impl Display, pattern: &str) -> Result<String, Error> {
    let mut rendered = String::new();
    write!(rendered, "{formatted}").map_err(|_| Error::InvalidPattern {
        pattern: pattern.to_string(),
    })?;
    Ok(rendered)
}

/// The chrono locale matching an ICU locale, for literal pattern rendering.
/// Unmatched locales render with POSIX (English) names.
fn chrono_locale(locale: &Locale) -> chrono::Locale {
    let name = locale.to_string().replace('-', "_");
    chrono::Locale::try_from(name.as_str()).unwrap_or(chrono::Locale::POSIX)
}

fn icu_date(date: NaiveDate) -> Result<Date<Iso>, Error> {
    Date::try_new_iso(date.year(), date.month() as u8, date.day() as u8).map_err(|_| {
        Error::ValueOutOfRange {
            value: date.to_string(),
        }
    })
}

fn icu_time(time: NaiveTime) -> Result<Time, Error> {
    // chrono encodes leap seconds as nanosecond overflow; clamp them away.
    Time::try_new(
        time.hour() as u8,
        time.minute() as u8,
        time.second() as u8,
        time.nanosecond().min(999_999_999),
    )
    .map_err(|_| Error::ValueOutOfRange {
        value: time.to_string(),
    })
}

fn icu_datetime_value(dt: NaiveDateTime) -> Result<IcuDateTime<Iso>, Error> {
    Ok(IcuDateTime {
        date: icu_date(dt.date())?,
        time: icu_time(dt.time())?,
    })
}
