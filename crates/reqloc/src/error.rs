//! Error types for request-scoped localization.

use std::error::Error as StdError;

use thiserror::Error;

/// Boxed error returned by a selector callback.
pub type SelectorError = Box<dyn StdError + Send + Sync + 'static>;

/// An error raised while resolving or rendering for a request.
#[derive(Debug, Error)]
pub enum Error {
    /// Locale string rejected by the BCP-47 parser.
    #[error("invalid locale '{name}'")]
    InvalidLocale { name: String },

    /// Timezone name not present in the IANA database.
    #[error("unknown timezone '{name}'")]
    UnknownTimezone { name: String },

    /// The registered locale selector failed for this request.
    #[error("locale selector failed")]
    LocaleSelector {
        #[source]
        source: SelectorError,
    },

    /// The registered timezone selector failed for this request.
    #[error("timezone selector failed")]
    TimezoneSelector {
        #[source]
        source: SelectorError,
    },

    /// A literal format pattern was rejected by the rendering engine.
    #[error("invalid format pattern '{pattern}'")]
    InvalidPattern { pattern: String },

    /// No CLDR data could be loaded for the resolved locale.
    #[error("no formatting data for locale '{locale}'")]
    FormatterData { locale: String },

    /// Value out of range for the formatting engine.
    #[error("value out of range for formatting: {value}")]
    ValueOutOfRange { value: String },

    /// The wall time falls into a DST gap in the target timezone.
    #[error("local time {time} does not exist in timezone '{timezone}'")]
    NonexistentLocalTime { time: String, timezone: String },
}
