//! Message catalog loading and lookup.
//!
//! Catalogs are standard compiled gettext files laid out as
//! `<dir>/<locale>/LC_MESSAGES/<domain>.mo`. Parsing and `Plural-Forms`
//! evaluation are delegated to the `gettext` crate; this module only decides
//! which files to load and how lookups degrade when they are absent.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

use gettext::Catalog;
use tracing::{debug, warn};

use crate::plural::plural_category;

/// Compiled translations for one resolved locale.
///
/// Holds zero or more catalogs, one per translation directory that provides
/// the locale; later directories take precedence. With no catalogs every
/// lookup passes the source message through unchanged, so a missing
/// translation tree degrades instead of failing the request.
pub struct Translations {
    locale: String,
    catalogs: Vec<Catalog>,
}

impl Debug for Translations {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Translations")
            .field("locale", &self.locale)
            .field("catalogs", &self.catalogs.len())
            .finish()
    }
}

impl Translations {
    /// Load every catalog for `locale` from `directories`, in order.
    ///
    /// For each directory the full locale is tried first, then the bare
    /// language (`de_AT` falls back to `de`). Unreadable or malformed files
    /// are skipped with a warning; they must never fail the request that
    /// triggered the load.
    pub fn load(directories: &[PathBuf], locale: &str, domain: &str) -> Translations {
        let mut catalogs = Vec::new();

        for dir in directories {
            let Some((path, file)) = open_catalog(dir, locale, domain) else {
                continue;
            };
            match Catalog::parse(file) {
                Ok(catalog) => {
                    debug!(path = %path.display(), locale, "loaded message catalog");
                    catalogs.push(catalog);
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping malformed message catalog");
                }
            }
        }

        if catalogs.is_empty() {
            debug!(locale, "no message catalogs found, translations pass through");
        }

        Translations {
            locale: locale.to_string(),
            catalogs,
        }
    }

    /// The locale this set of catalogs was loaded for (directory form, e.g.
    /// `de_AT`).
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// True when no catalog was found and every lookup passes through.
    pub fn is_null(&self) -> bool {
        self.catalogs.is_empty()
    }

    /// The bare language code, used for plural-rule fallback.
    fn language(&self) -> &str {
        self.locale
            .split(['_', '-'])
            .next()
            .unwrap_or(&self.locale)
    }

    /// Translate `message`, returning it unchanged when no catalog has it.
    pub fn gettext<'a>(&'a self, message: &'a str) -> &'a str {
        for catalog in self.catalogs.iter().rev() {
            let translated = catalog.gettext(message);
            if translated != message {
                return translated;
            }
        }
        message
    }

    /// Translate with plural selection.
    ///
    /// A matching catalog applies its own `Plural-Forms` rule. Untranslated
    /// messages fall back to the CLDR cardinal category of the locale: the
    /// "one" category serves the singular source form, everything else the
    /// plural form.
    pub fn ngettext<'a>(&'a self, singular: &'a str, plural: &'a str, num: i64) -> &'a str {
        let n = num.unsigned_abs();
        for catalog in self.catalogs.iter().rev() {
            let translated = catalog.ngettext(singular, plural, n);
            let missed = if n == 1 {
                translated == singular
            } else {
                translated == plural
            };
            if !missed {
                return translated;
            }
        }

        if plural_category(self.language(), num) == "one" {
            singular
        } else {
            plural
        }
    }

    /// Translate `message` within `context`, returning the message unchanged
    /// when no catalog has the pair.
    pub fn pgettext<'a>(&'a self, context: &'a str, message: &'a str) -> &'a str {
        for catalog in self.catalogs.iter().rev() {
            let translated = catalog.pgettext(context, message);
            if translated != message {
                return translated;
            }
        }
        message
    }

    /// Translate with plural selection within `context`.
    pub fn npgettext<'a>(
        &'a self,
        context: &'a str,
        singular: &'a str,
        plural: &'a str,
        num: i64,
    ) -> &'a str {
        let n = num.unsigned_abs();
        for catalog in self.catalogs.iter().rev() {
            let translated = catalog.npgettext(context, singular, plural, n);
            let missed = if n == 1 {
                translated == singular
            } else {
                translated == plural
            };
            if !missed {
                return translated;
            }
        }

        if plural_category(self.language(), num) == "one" {
            singular
        } else {
            plural
        }
    }
}

/// Open the catalog file for `locale` under `dir`, trying the full locale
/// first and then the bare language.
fn open_catalog(dir: &Path, locale: &str, domain: &str) -> Option<(PathBuf, File)> {
    for candidate in locale_candidates(locale) {
        let path = dir
            .join(candidate)
            .join("LC_MESSAGES")
            .join(format!("{domain}.mo"));
        if let Ok(file) = File::open(&path) {
            return Some((path, file));
        }
    }
    None
}

/// Lookup candidates for a locale, most specific first.
fn locale_candidates(locale: &str) -> Vec<String> {
    let mut candidates = vec![locale.to_string()];
    if let Some((language, _)) = locale.split_once('_') {
        candidates.push(language.to_string());
    }
    candidates
}

/// Scan one directory for locales that have a compiled catalog.
///
/// Returns the sorted subdirectory names containing
/// `LC_MESSAGES/<domain>.mo`.
pub fn scan_locales(dir: &Path, domain: &str) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut locales: Vec<String> = entries
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let name = entry.file_name().into_string().ok()?;
            let catalog = dir
                .join(&name)
                .join("LC_MESSAGES")
                .join(format!("{domain}.mo"));
            catalog.is_file().then_some(name)
        })
        .collect();

    locales.sort();
    locales
}
