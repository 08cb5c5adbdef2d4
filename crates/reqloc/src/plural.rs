//! CLDR plural category resolution.
//!
//! Used when a message has no catalog entry: the plural category of the
//! resolved locale decides which source form serves as the fallback. English
//! has "one" and "other", Russian has "one", "few", "many", and "other", and
//! Arabic uses all six categories.
//!
//! Plural rules are cached per thread per locale to avoid re-creating
//! `PluralRules` instances on every call.

use std::cell::RefCell;

use icu_locale_core::Locale;
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};

thread_local! {
    /// Per-thread cache of `PluralRules` keyed by locale string.
    static PLURAL_RULES_CACHE: RefCell<Vec<(String, PluralRules)>> = const { RefCell::new(Vec::new()) };
}

/// Build `PluralRules` for a locale string, falling back to root rules when
/// the locale does not parse or has no data.
fn build_rules(locale: &str) -> PluralRules {
    let parsed = Locale::try_from_str(&locale.replace('_', "-")).unwrap_or(Locale::UNKNOWN);
    PluralRules::try_new(parsed.into(), PluralRuleType::Cardinal.into())
        .or_else(|_| {
            PluralRules::try_new(Locale::UNKNOWN.into(), PluralRuleType::Cardinal.into())
        })
        .expect("root plural rules should be available")
}

/// Translate a `PluralCategory` enum to its string representation.
fn category_str(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}

/// Get the CLDR plural category for a number in a given locale.
///
/// Returns one of: "zero", "one", "two", "few", "many", "other". Rules are
/// cached per thread per locale, so repeated calls with the same locale reuse
/// the previously constructed `PluralRules`. Accepts both `de_DE` and `de-DE`
/// spellings.
///
/// # Examples
///
/// ```
/// use reqloc::plural_category;
///
/// // English: 1 = "one", everything else = "other"
/// assert_eq!(plural_category("en", 1), "one");
/// assert_eq!(plural_category("en", 2), "other");
///
/// // Russian: complex rules for "one", "few", "many", "other"
/// assert_eq!(plural_category("ru", 1), "one");
/// assert_eq!(plural_category("ru", 2), "few");
/// assert_eq!(plural_category("ru", 5), "many");
/// ```
pub fn plural_category(locale: &str, n: i64) -> &'static str {
    PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
        if let Some(entry) = cache.iter().find(|(code, _)| code == locale) {
            return category_str(entry.1.category_for(n));
        }
        let rules = build_rules(locale);
        let category = category_str(rules.category_for(n));
        cache.push((locale.to_string(), rules));
        category
    })
}
