pub mod catalog;
pub mod config;
pub mod context;
pub mod datetime;
pub mod error;
pub mod i18n;
pub mod lazy;
pub mod numbers;
mod plural;
mod template;
pub mod translate;
pub mod value;

pub use catalog::Translations;
pub use config::{DateFormats, FormatKind, FormatSpec, I18nConfig, Style};
pub use context::{ForcedLocale, RequestContext};
pub use datetime::{
    Granularity, TimedeltaOptions, format_date, format_datetime, format_time, format_timedelta,
    from_user_timezone, to_user_timezone, to_utc,
};
pub use error::{Error, SelectorError};
pub use i18n::{I18n, SelectorResult};
pub use lazy::LazyString;
pub use numbers::{format_decimal, format_number};
pub use plural::plural_category;
pub use translate::{
    Vars, gettext, lazy_gettext, lazy_ngettext, lazy_npgettext, lazy_pgettext, ngettext, npgettext,
    pgettext,
};
pub use value::Value;

// Re-exported so embedders can name the resolved types without adding the
// underlying crates themselves.
pub use chrono_tz::Tz;
pub use icu_locale_core::Locale;

/// Creates a `HashMap<String, Value>` from key-value pairs.
///
/// Values are automatically converted via `Into<Value>`, so you can pass
/// integers, floats, or strings directly.
///
/// # Example
///
/// ```
/// use reqloc::{Value, vars};
///
/// let v = vars! { "num" => 3, "name" => "Alice" };
/// assert_eq!(v.len(), 2);
/// assert_eq!(v["num"].as_number(), Some(3));
/// assert_eq!(v["name"].as_string(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! vars {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
