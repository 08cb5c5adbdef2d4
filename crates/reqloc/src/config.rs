//! Configuration consumed at resolution time.
//!
//! Nothing here is cached at startup: the controller re-reads the
//! configuration store on every uncached resolution, so runtime changes take
//! effect on the next request (or after [`refresh`](crate::RequestContext::refresh)).

use std::collections::HashMap;
use std::path::PathBuf;

use bon::Builder;
use serde::{Deserialize, Serialize};

/// Named CLDR length for date and time rendering.
///
/// `Full` maps to the widest length the data engine exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Short,
    Medium,
    Long,
    Full,
}

impl Style {
    /// Parse a style name. Returns `None` for anything that is not one of
    /// `short`, `medium`, `long`, `full`.
    pub fn from_name(name: &str) -> Option<Style> {
        match name {
            "short" => Some(Style::Short),
            "medium" => Some(Style::Medium),
            "long" => Some(Style::Long),
            "full" => Some(Style::Full),
            _ => None,
        }
    }

    /// The lowercase style name.
    pub fn name(self) -> &'static str {
        match self {
            Style::Short => "short",
            Style::Medium => "medium",
            Style::Long => "long",
            Style::Full => "full",
        }
    }
}

/// The kind of value a format applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    DateTime,
    Date,
    Time,
}

impl FormatKind {
    /// Key used in the pattern-override table.
    pub fn name(self) -> &'static str {
        match self {
            FormatKind::DateTime => "datetime",
            FormatKind::Date => "date",
            FormatKind::Time => "time",
        }
    }
}

/// A format specification: a named style or a literal strftime pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FormatSpec {
    /// One of the named CLDR lengths; rendering delegates to locale data.
    Style(Style),
    /// A literal pattern, rendered with locale-aware strftime.
    Pattern(String),
}

impl FormatSpec {
    /// Parse a user-supplied format string the way the formatting functions
    /// accept it: `short|medium|long|full` select a style, anything else is
    /// a literal pattern.
    ///
    /// # Example
    ///
    /// ```
    /// use reqloc::{FormatSpec, Style};
    ///
    /// assert_eq!(FormatSpec::parse("long"), FormatSpec::Style(Style::Long));
    /// assert_eq!(
    ///     FormatSpec::parse("%Y-%m-%d"),
    ///     FormatSpec::Pattern("%Y-%m-%d".to_string())
    /// );
    /// ```
    pub fn parse(spec: &str) -> FormatSpec {
        match Style::from_name(spec) {
            Some(style) => FormatSpec::Style(style),
            None => FormatSpec::Pattern(spec.to_string()),
        }
    }
}

/// Default format selection per value kind, with optional per-style pattern
/// overrides.
///
/// When a formatting function is called without a format, the per-kind
/// default applies (`medium` everywhere out of the box). When the chosen
/// format is a named style, the override table is consulted: an entry for
/// `"<kind>.<style>"` replaces the style with a literal pattern. This lets an
/// application pin, say, every `long` datetime to one exact pattern while
/// leaving the other styles on locale data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateFormats {
    /// Default format for combined date and time values.
    pub datetime: FormatSpec,
    /// Default format for date values.
    pub date: FormatSpec,
    /// Default format for time values.
    pub time: FormatSpec,
    /// Literal patterns keyed by `"<kind>.<style>"`.
    overrides: HashMap<String, String>,
}

impl Default for DateFormats {
    fn default() -> Self {
        DateFormats {
            datetime: FormatSpec::Style(Style::Medium),
            date: FormatSpec::Style(Style::Medium),
            time: FormatSpec::Style(Style::Medium),
            overrides: HashMap::new(),
        }
    }
}

impl DateFormats {
    /// Pin a named style of one kind to a literal pattern.
    pub fn set_style_pattern(
        &mut self,
        kind: FormatKind,
        style: Style,
        pattern: impl Into<String>,
    ) {
        self.overrides
            .insert(format!("{}.{}", kind.name(), style.name()), pattern.into());
    }

    /// Remove a previously pinned pattern.
    pub fn clear_style_pattern(&mut self, kind: FormatKind, style: Style) {
        self.overrides
            .remove(&format!("{}.{}", kind.name(), style.name()));
    }

    /// Resolve the effective format for one call: the caller-supplied spec if
    /// any, else the per-kind default; named styles are then redirected
    /// through the override table.
    pub(crate) fn resolve(&self, kind: FormatKind, requested: Option<&str>) -> FormatSpec {
        let spec = match requested {
            Some(raw) => FormatSpec::parse(raw),
            None => match kind {
                FormatKind::DateTime => self.datetime.clone(),
                FormatKind::Date => self.date.clone(),
                FormatKind::Time => self.time.clone(),
            },
        };

        if let FormatSpec::Style(style) = &spec {
            let key = format!("{}.{}", kind.name(), style.name());
            if let Some(pattern) = self.overrides.get(&key) {
                return FormatSpec::Pattern(pattern.clone());
            }
        }

        spec
    }
}

/// Settings for the [`I18n`](crate::I18n) controller.
///
/// # Example
///
/// ```
/// use reqloc::I18nConfig;
///
/// let config = I18nConfig::builder()
///     .default_locale("de")
///     .default_timezone("Europe/Vienna")
///     .build();
///
/// assert_eq!(config.default_locale, "de");
/// assert_eq!(config.domain, "messages");
/// ```
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
#[serde(default)]
pub struct I18nConfig {
    /// Locale used when no selector is registered or the selector defers.
    #[builder(default = "en".to_string())]
    pub default_locale: String,

    /// Timezone used when no selector is registered or the selector defers.
    #[builder(default = "UTC".to_string())]
    pub default_timezone: String,

    /// Directories searched for compiled message catalogs. Catalogs found in
    /// later directories take precedence over earlier ones.
    #[builder(default = vec![PathBuf::from("translations")])]
    pub translation_directories: Vec<PathBuf>,

    /// Gettext domain: catalogs load from
    /// `<dir>/<locale>/LC_MESSAGES/<domain>.mo`.
    #[builder(default = "messages".to_string())]
    pub domain: String,

    /// Default format styles and pattern overrides.
    #[builder(default)]
    pub date_formats: DateFormats,
}

impl Default for I18nConfig {
    fn default() -> Self {
        I18nConfig::builder().build()
    }
}
