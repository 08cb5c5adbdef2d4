//! Gettext-style translation entry points.
//!
//! Each function resolves the active catalog for the request, looks the
//! message up, and substitutes named arguments into the result. Missing
//! translations are never errors: the source message serves as its own
//! fallback. The only errors that can surface here come from resolution
//! (a failing selector callback).

use std::collections::HashMap;

use crate::context::RequestContext;
use crate::error::Error;
use crate::lazy::LazyString;
use crate::template;
use crate::value::Value;

/// Named substitution arguments for translated messages. Build with the
/// [`vars!`](crate::vars) macro.
pub type Vars = HashMap<String, Value>;

/// Translate a message for the request's locale.
///
/// The message is looked up in the resolved catalog; absent entries return
/// the message unchanged. When `vars` is non-empty, `%(name)s` placeholders
/// are substituted into the result after translation.
///
/// # Example
///
/// ```
/// use reqloc::{I18n, I18nConfig, gettext, vars};
///
/// let i18n = I18n::new(I18nConfig::default());
/// let ctx = i18n.context();
///
/// let text = gettext("Value: %(value)s", &ctx, vars! { "value" => 42 }).unwrap();
/// assert_eq!(text, "Value: 42");
/// ```
pub fn gettext(message: &str, ctx: &RequestContext<'_>, vars: Vars) -> Result<String, Error> {
    let translations = ctx.translations()?;
    let translated = translations.gettext(message);
    Ok(template::interpolate(translated, &vars))
}

/// Translate with singular/plural dispatch on `num`.
///
/// The catalog's own plural rule picks the form; untranslated messages fall
/// back to the CLDR category of the resolved locale. `num` is available to
/// placeholders as `%(num)s` (or `%(num)d`) unless `vars` already binds it.
///
/// # Example
///
/// ```
/// use reqloc::{I18n, I18nConfig, ngettext, vars};
///
/// let i18n = I18n::new(I18nConfig::default());
/// let ctx = i18n.context();
///
/// let one = ngettext("%(num)s Apple", "%(num)s Apples", 1, &ctx, vars! {}).unwrap();
/// let five = ngettext("%(num)s Apple", "%(num)s Apples", 5, &ctx, vars! {}).unwrap();
/// assert_eq!(one, "1 Apple");
/// assert_eq!(five, "5 Apples");
/// ```
pub fn ngettext(
    singular: &str,
    plural: &str,
    num: i64,
    ctx: &RequestContext<'_>,
    mut vars: Vars,
) -> Result<String, Error> {
    vars.entry("num".to_string())
        .or_insert_with(|| Value::Number(num));
    let translations = ctx.translations()?;
    let translated = translations.ngettext(singular, plural, num);
    Ok(template::interpolate(translated, &vars))
}

/// Like [`gettext`] but disambiguated by a message context string.
///
/// Each `(context, message)` pair has an independent translation slot, so
/// "File" the menu entry and "File" the verb can translate differently.
pub fn pgettext(
    context: &str,
    message: &str,
    ctx: &RequestContext<'_>,
    vars: Vars,
) -> Result<String, Error> {
    let translations = ctx.translations()?;
    let translated = translations.pgettext(context, message);
    Ok(template::interpolate(translated, &vars))
}

/// Like [`ngettext`] but disambiguated by a message context string.
pub fn npgettext(
    context: &str,
    singular: &str,
    plural: &str,
    num: i64,
    ctx: &RequestContext<'_>,
    mut vars: Vars,
) -> Result<String, Error> {
    vars.entry("num".to_string())
        .or_insert_with(|| Value::Number(num));
    let translations = ctx.translations()?;
    let translated = translations.npgettext(context, singular, plural, num);
    Ok(template::interpolate(translated, &vars))
}

// =============================================================================
// Lazy Variants
// =============================================================================

/// Like [`gettext`] but deferred: no lookup happens until the returned value
/// is resolved with a request context.
///
/// Useful for module-level message constants that are declared before any
/// request exists:
///
/// ```
/// use reqloc::{I18n, I18nConfig, lazy_gettext, vars};
///
/// let hello = lazy_gettext("Hello World", vars! {});
///
/// // ... later, inside a request:
/// let i18n = I18n::new(I18nConfig::default());
/// let ctx = i18n.context();
/// assert_eq!(hello.resolve(&ctx).unwrap(), "Hello World");
/// ```
pub fn lazy_gettext(message: &str, vars: Vars) -> LazyString {
    LazyString::simple(message, vars)
}

/// Like [`ngettext`] but deferred.
pub fn lazy_ngettext(singular: &str, plural: &str, num: i64, vars: Vars) -> LazyString {
    LazyString::plural(singular, plural, num, vars)
}

/// Like [`pgettext`] but deferred.
pub fn lazy_pgettext(context: &str, message: &str, vars: Vars) -> LazyString {
    LazyString::with_context(context, message, vars)
}

/// Like [`npgettext`] but deferred.
pub fn lazy_npgettext(
    context: &str,
    singular: &str,
    plural: &str,
    num: i64,
    vars: Vars,
) -> LazyString {
    LazyString::with_context_plural(context, singular, plural, num, vars)
}
