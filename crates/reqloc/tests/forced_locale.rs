//! Integration tests for scoped locale overrides.

mod common;

use std::panic::{AssertUnwindSafe, catch_unwind};

use common::{MoMessage, install_catalog};
use reqloc::{Error, I18n, I18nConfig, gettext, vars};
use tempfile::TempDir;

/// Catalogs for three locales translating the same message differently.
fn app_with_catalogs(dir: &TempDir) -> I18n {
    install_catalog(dir.path(), "de", &[MoMessage::simple("Yes", "Ja")]);
    install_catalog(dir.path(), "es", &[MoMessage::simple("Yes", "Sí")]);
    install_catalog(dir.path(), "fr", &[MoMessage::simple("Yes", "Oui")]);

    I18n::new(
        I18nConfig::builder()
            .translation_directories(vec![dir.path().to_path_buf()])
            .build(),
    )
}

#[test]
fn override_applies_within_scope_and_reverts() {
    let dir = TempDir::new().unwrap();
    let i18n = app_with_catalogs(&dir);
    let ctx = i18n.context();

    assert_eq!(gettext("Yes", &ctx, vars! {}).unwrap(), "Yes");

    {
        let _scope = ctx.force_locale("de").unwrap();
        assert_eq!(ctx.locale().unwrap().to_string(), "de");
        assert_eq!(gettext("Yes", &ctx, vars! {}).unwrap(), "Ja");
    }

    assert_eq!(ctx.locale().unwrap().to_string(), "en");
    assert_eq!(gettext("Yes", &ctx, vars! {}).unwrap(), "Yes");
}

#[test]
fn override_beats_registered_selector() {
    let dir = TempDir::new().unwrap();
    let i18n = app_with_catalogs(&dir);
    i18n.set_locale_selector(|_ctx| Ok(Some("fr".to_string())));
    let ctx = i18n.context();

    assert_eq!(gettext("Yes", &ctx, vars! {}).unwrap(), "Oui");

    {
        let _scope = ctx.force_locale("es").unwrap();
        assert_eq!(gettext("Yes", &ctx, vars! {}).unwrap(), "Sí");
    }

    assert_eq!(gettext("Yes", &ctx, vars! {}).unwrap(), "Oui");
}

#[test]
fn nested_overrides_restore_outer_then_original() {
    let dir = TempDir::new().unwrap();
    let i18n = app_with_catalogs(&dir);
    let ctx = i18n.context();

    let outer = ctx.force_locale("de").unwrap();
    assert_eq!(gettext("Yes", &ctx, vars! {}).unwrap(), "Ja");

    {
        let _inner = ctx.force_locale("es").unwrap();
        assert_eq!(gettext("Yes", &ctx, vars! {}).unwrap(), "Sí");
    }

    // Exiting the inner scope restores the outer override, not the default.
    assert_eq!(gettext("Yes", &ctx, vars! {}).unwrap(), "Ja");

    drop(outer);
    assert_eq!(gettext("Yes", &ctx, vars! {}).unwrap(), "Yes");
}

#[test]
fn override_survives_refresh() {
    let dir = TempDir::new().unwrap();
    let i18n = app_with_catalogs(&dir);
    let ctx = i18n.context();

    let _scope = ctx.force_locale("de").unwrap();
    ctx.refresh();
    assert_eq!(gettext("Yes", &ctx, vars! {}).unwrap(), "Ja");
}

#[test]
fn override_restored_on_unwind() {
    let dir = TempDir::new().unwrap();
    let i18n = app_with_catalogs(&dir);
    let ctx = i18n.context();

    let result = catch_unwind(AssertUnwindSafe(|| {
        let _scope = ctx.force_locale("de").unwrap();
        assert_eq!(gettext("Yes", &ctx, vars! {}).unwrap(), "Ja");
        panic!("handler blew up");
    }));
    assert!(result.is_err());

    assert_eq!(gettext("Yes", &ctx, vars! {}).unwrap(), "Yes");
}

#[test]
fn invalid_override_locale_is_an_error() {
    let dir = TempDir::new().unwrap();
    let i18n = app_with_catalogs(&dir);
    let ctx = i18n.context();

    assert!(matches!(
        ctx.force_locale("not a locale!").unwrap_err(),
        Error::InvalidLocale { .. }
    ));
}
