//! Locale-aware number rendering via ICU4X decimal formatting.

use fixed_decimal::{Decimal, FloatPrecision};
use icu_decimal::DecimalFormatter;
use icu_decimal::options::DecimalFormatterOptions;
use icu_locale_core::Locale;

use crate::context::RequestContext;
use crate::error::Error;

/// Render an integer with the request locale's grouping and digits.
///
/// `1234567` renders as `1,234,567` for `en` and `1.234.567` for `de`.
pub fn format_number(number: i64, ctx: &RequestContext<'_>) -> Result<String, Error> {
    let locale = ctx.locale()?;
    let formatter = decimal_formatter(&locale)?;
    Ok(formatter.format(&Decimal::from(number)).to_string())
}

/// Render a decimal number with the request locale's grouping, digits, and
/// decimal separator.
pub fn format_decimal(number: f64, ctx: &RequestContext<'_>) -> Result<String, Error> {
    let locale = ctx.locale()?;
    let decimal =
        Decimal::try_from_f64(number, FloatPrecision::RoundTrip).map_err(|_| {
            Error::ValueOutOfRange {
                value: number.to_string(),
            }
        })?;
    let formatter = decimal_formatter(&locale)?;
    Ok(formatter.format(&decimal).to_string())
}

fn decimal_formatter(locale: &Locale) -> Result<DecimalFormatter, Error> {
    DecimalFormatter::try_new(locale.clone().into(), DecimalFormatterOptions::default()).map_err(
        |_| Error::FormatterData {
            locale: locale.to_string(),
        },
    )
}
