//! Central controller wiring configuration, selectors, and catalog caching.
//!
//! An application builds one [`I18n`] at startup, registers its selector
//! callbacks, and creates one [`RequestContext`] per in-flight request. All
//! per-request state lives on the context; the controller only carries
//! process-wide state (configuration and the shared catalog cache).

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::catalog::{self, Translations};
use crate::config::I18nConfig;
use crate::context::RequestContext;
use crate::error::{Error, SelectorError};

/// Result of a selector callback.
///
/// `Ok(Some(value))` selects a locale or timezone, `Ok(None)` defers to the
/// configured default, and `Err` propagates to whichever formatting or
/// translation call triggered resolution.
pub type SelectorResult = Result<Option<String>, SelectorError>;

type Selector = Box<dyn Fn(&RequestContext<'_>) -> SelectorResult + Send + Sync>;

/// Process-wide localization controller.
///
/// # Example
///
/// ```
/// use reqloc::{I18n, I18nConfig, gettext, vars};
///
/// let i18n = I18n::new(I18nConfig::default());
/// i18n.set_locale_selector(|_ctx| Ok(Some("de".to_string())));
///
/// let ctx = i18n.context();
/// // No catalogs on disk: translation passes through, substitution applies.
/// let text = gettext("Hello %(name)s!", &ctx, vars! { "name" => "Peter" }).unwrap();
/// assert_eq!(text, "Hello Peter!");
/// ```
pub struct I18n {
    config: RwLock<I18nConfig>,
    locale_selector: RwLock<Option<Selector>>,
    timezone_selector: RwLock<Option<Selector>>,
    translations_cache: RwLock<HashMap<String, Arc<Translations>>>,
}

impl I18n {
    /// Create a controller with the given configuration.
    pub fn new(config: I18nConfig) -> I18n {
        I18n {
            config: RwLock::new(config),
            locale_selector: RwLock::new(None),
            timezone_selector: RwLock::new(None),
            translations_cache: RwLock::new(HashMap::new()),
        }
    }

    // =========================================================================
    // Configuration Access
    // =========================================================================

    /// Provides read access to the configuration.
    pub fn with_config<T>(&self, f: impl FnOnce(&I18nConfig) -> T) -> T {
        let guard = self.config.read().expect("config lock poisoned");
        f(&guard)
    }

    /// Provides write access to the configuration.
    ///
    /// Changes are read at resolution time, so they apply to the next
    /// uncached resolution. Contexts that already resolved keep their cached
    /// values until [`RequestContext::refresh`] is called.
    pub fn with_config_mut<T>(&self, f: impl FnOnce(&mut I18nConfig) -> T) -> T {
        let mut guard = self.config.write().expect("config lock poisoned");
        f(&mut guard)
    }

    /// The configured default locale.
    pub fn default_locale(&self) -> String {
        self.with_config(|config| config.default_locale.clone())
    }

    /// The configured default timezone.
    pub fn default_timezone(&self) -> String {
        self.with_config(|config| config.default_timezone.clone())
    }

    // =========================================================================
    // Selector Registration
    // =========================================================================

    /// Register the locale selector callback.
    ///
    /// At most one selector is active; registering again replaces the
    /// previous one. Returning `Ok(None)` falls back to the configured
    /// default locale.
    pub fn set_locale_selector(
        &self,
        selector: impl Fn(&RequestContext<'_>) -> SelectorResult + Send + Sync + 'static,
    ) {
        let mut slot = self
            .locale_selector
            .write()
            .expect("selector lock poisoned");
        *slot = Some(Box::new(selector));
    }

    /// Register the timezone selector callback.
    ///
    /// Same replacement semantics as [`set_locale_selector`](Self::set_locale_selector).
    pub fn set_timezone_selector(
        &self,
        selector: impl Fn(&RequestContext<'_>) -> SelectorResult + Send + Sync + 'static,
    ) {
        let mut slot = self
            .timezone_selector
            .write()
            .expect("selector lock poisoned");
        *slot = Some(Box::new(selector));
    }

    /// Invoke the locale selector, if registered.
    pub(crate) fn select_locale(&self, ctx: &RequestContext<'_>) -> Result<Option<String>, Error> {
        let slot = self.locale_selector.read().expect("selector lock poisoned");
        match slot.as_ref() {
            Some(selector) => selector(ctx).map_err(|source| Error::LocaleSelector { source }),
            None => Ok(None),
        }
    }

    /// Invoke the timezone selector, if registered.
    pub(crate) fn select_timezone(
        &self,
        ctx: &RequestContext<'_>,
    ) -> Result<Option<String>, Error> {
        let slot = self
            .timezone_selector
            .read()
            .expect("selector lock poisoned");
        match slot.as_ref() {
            Some(selector) => selector(ctx).map_err(|source| Error::TimezoneSelector { source }),
            None => Ok(None),
        }
    }

    // =========================================================================
    // Catalogs
    // =========================================================================

    /// Translations for a locale (directory form), loading and caching on
    /// first use.
    ///
    /// The cache is process-wide and shared across requests; per-request
    /// resolution state never is.
    pub(crate) fn translations_for(&self, locale: &str) -> Arc<Translations> {
        {
            let cache = self
                .translations_cache
                .read()
                .expect("catalog cache lock poisoned");
            if let Some(translations) = cache.get(locale) {
                return Arc::clone(translations);
            }
        }

        let translations = self.with_config(|config| {
            Arc::new(Translations::load(
                &config.translation_directories,
                locale,
                &config.domain,
            ))
        });

        let mut cache = self
            .translations_cache
            .write()
            .expect("catalog cache lock poisoned");
        Arc::clone(cache.entry(locale.to_string()).or_insert(translations))
    }

    /// Drop every cached catalog, forcing reloads on the next resolution.
    pub fn clear_translations_cache(&self) {
        self.translations_cache
            .write()
            .expect("catalog cache lock poisoned")
            .clear();
    }

    /// Locales that have a compiled catalog in any translation directory.
    ///
    /// Deduplicated and sorted. Falls back to the default locale when no
    /// catalog exists anywhere.
    pub fn list_translations(&self) -> Vec<String> {
        let (directories, domain) = self.with_config(|config| {
            (
                config.translation_directories.clone(),
                config.domain.clone(),
            )
        });

        let mut locales: Vec<String> = directories
            .iter()
            .flat_map(|dir| catalog::scan_locales(dir, &domain))
            .collect();
        locales.sort();
        locales.dedup();

        if locales.is_empty() {
            locales.push(self.default_locale());
        }
        locales
    }

    // =========================================================================
    // Request Contexts
    // =========================================================================

    /// Create a context for one in-flight request.
    pub fn context(&self) -> RequestContext<'_> {
        RequestContext::new(self, None)
    }

    /// Create a context carrying request data the selectors can downcast
    /// via [`RequestContext::data`].
    pub fn context_with<T: Any + Send + Sync>(&self, data: T) -> RequestContext<'_> {
        RequestContext::new(self, Some(Box::new(data)))
    }
}
