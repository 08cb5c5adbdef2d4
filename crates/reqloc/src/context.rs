//! Per-request resolution state: locale, timezone, and translations.
//!
//! A [`RequestContext`] is created per in-flight request and is its single
//! logical owner; nothing here is shared across requests. Resolved values are
//! memoized on the context, so repeated formatting and translation calls
//! within one request observe the same locale, timezone, and catalog unless
//! [`refresh`](RequestContext::refresh) is called.

use std::any::Any;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono_tz::Tz;
use icu_locale_core::Locale;

use crate::catalog::Translations;
use crate::error::Error;
use crate::i18n::I18n;

/// Cached per-request values. Created lazily on first access.
#[derive(Default)]
struct ResolvedState {
    locale: Option<Locale>,
    timezone: Option<Tz>,
    translations: Option<Arc<Translations>>,
    forced_locale: Option<Locale>,
}

/// The per-request token passed to every formatting and translation call.
pub struct RequestContext<'app> {
    i18n: &'app I18n,
    data: Option<Box<dyn Any + Send + Sync>>,
    state: Mutex<ResolvedState>,
}

impl<'app> RequestContext<'app> {
    pub(crate) fn new(i18n: &'app I18n, data: Option<Box<dyn Any + Send + Sync>>) -> Self {
        RequestContext {
            i18n,
            data,
            state: Mutex::new(ResolvedState::default()),
        }
    }

    /// The controller this context belongs to.
    pub fn i18n(&self) -> &I18n {
        self.i18n
    }

    /// Downcast the request data attached via
    /// [`I18n::context_with`](crate::I18n::context_with). Selectors use this
    /// to reach headers, session state, or whatever the application stored.
    pub fn data<T: Any>(&self) -> Option<&T> {
        self.data.as_deref().and_then(|data| data.downcast_ref())
    }

    fn state(&self) -> MutexGuard<'_, ResolvedState> {
        self.state.lock().expect("request state lock poisoned")
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// The locale for this request.
    ///
    /// Resolution order: active [`force_locale`](Self::force_locale) override,
    /// cached value, registered selector, configured default. The result is
    /// cached; selector failures propagate and are not cached, so the next
    /// call retries the selector.
    pub fn locale(&self) -> Result<Locale, Error> {
        {
            let state = self.state();
            if let Some(locale) = &state.forced_locale {
                return Ok(locale.clone());
            }
            if let Some(locale) = &state.locale {
                return Ok(locale.clone());
            }
        }

        // Selector callbacks run without the state lock held: they may
        // themselves look at the context.
        let selected = self.i18n.select_locale(self)?;
        let locale = match selected {
            Some(name) => parse_locale(&name)?,
            None => parse_locale(&self.i18n.default_locale())?,
        };

        self.state().locale = Some(locale.clone());
        Ok(locale)
    }

    /// The timezone for this request.
    ///
    /// Same algorithm as [`locale`](Self::locale), with an independent cache
    /// slot and selector.
    pub fn timezone(&self) -> Result<Tz, Error> {
        if let Some(timezone) = self.state().timezone {
            return Ok(timezone);
        }

        let selected = self.i18n.select_timezone(self)?;
        let name = match selected {
            Some(name) => name,
            None => self.i18n.default_timezone(),
        };
        let timezone = Tz::from_str(&name).map_err(|_| Error::UnknownTimezone { name })?;

        self.state().timezone = Some(timezone);
        Ok(timezone)
    }

    /// The translation catalog for this request's locale.
    ///
    /// Catalog objects are cached process-wide on the controller and the
    /// chosen one is memoized here, keyed to this request's lifetime.
    pub fn translations(&self) -> Result<Arc<Translations>, Error> {
        if let Some(translations) = self.state().translations.clone() {
            return Ok(translations);
        }

        let locale = self.locale()?;
        let translations = self.i18n.translations_for(&catalog_locale(&locale));

        self.state().translations = Some(Arc::clone(&translations));
        Ok(translations)
    }

    /// Clear the cached locale, timezone, and translations.
    ///
    /// The next resolution re-runs the selectors. Safe to call repeatedly and
    /// before anything was resolved; an active [`force_locale`](Self::force_locale)
    /// override survives.
    pub fn refresh(&self) {
        let mut state = self.state();
        state.locale = None;
        state.timezone = None;
        state.translations = None;
    }

    // =========================================================================
    // Scoped Override
    // =========================================================================

    /// Temporarily force a specific locale for this request.
    ///
    /// Translation and formatting calls made while the returned guard is
    /// alive resolve to `locale`, selectors notwithstanding. Dropping the
    /// guard restores the previous state, including on unwind. Overrides
    /// nest: exiting an inner scope restores the outer override.
    ///
    /// # Example
    ///
    /// ```
    /// use reqloc::{I18n, I18nConfig};
    ///
    /// let i18n = I18n::new(I18nConfig::default());
    /// let ctx = i18n.context();
    ///
    /// {
    ///     let _scope = ctx.force_locale("de_AT").unwrap();
    ///     assert_eq!(ctx.locale().unwrap().to_string(), "de-AT");
    /// }
    /// assert_eq!(ctx.locale().unwrap().to_string(), "en");
    /// ```
    pub fn force_locale(&self, locale: &str) -> Result<ForcedLocale<'_, 'app>, Error> {
        let forced = parse_locale(locale)?;

        let mut state = self.state();
        let guard = ForcedLocale {
            context: self,
            prior_forced: state.forced_locale.take(),
            prior_locale: state.locale.take(),
            prior_translations: state.translations.take(),
        };
        state.forced_locale = Some(forced);
        Ok(guard)
    }
}

/// Scoped locale override for one request.
///
/// Restores the previously cached locale and translations (or their absence)
/// exactly once, when dropped.
pub struct ForcedLocale<'ctx, 'app> {
    context: &'ctx RequestContext<'app>,
    prior_forced: Option<Locale>,
    prior_locale: Option<Locale>,
    prior_translations: Option<Arc<Translations>>,
}

impl std::fmt::Debug for ForcedLocale<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForcedLocale")
            .field("prior_forced", &self.prior_forced)
            .field("prior_locale", &self.prior_locale)
            .finish_non_exhaustive()
    }
}

impl Drop for ForcedLocale<'_, '_> {
    fn drop(&mut self) {
        let mut state = self.context.state();
        state.forced_locale = self.prior_forced.take();
        state.locale = self.prior_locale.take();
        state.translations = self.prior_translations.take();
    }
}

/// Parse a locale string, accepting both `de_AT` and `de-AT` spellings.
fn parse_locale(name: &str) -> Result<Locale, Error> {
    Locale::try_from_str(&name.replace('_', "-")).map_err(|_| Error::InvalidLocale {
        name: name.to_string(),
    })
}

/// The catalog directory form of a locale: `de-AT` becomes `de_AT`.
pub(crate) fn catalog_locale(locale: &Locale) -> String {
    locale.to_string().replace('-', "_")
}
