//! Integration tests for deferred translation values.

mod common;

use common::{MoMessage, install_catalog};
use reqloc::{
    I18n, I18nConfig, lazy_gettext, lazy_ngettext, lazy_npgettext, lazy_pgettext, vars,
};
use tempfile::TempDir;

fn app_with_catalogs(dir: &TempDir) -> I18n {
    install_catalog(
        dir.path(),
        "de",
        &[
            MoMessage::simple("Hello %(name)s", "Hallo %(name)s"),
            MoMessage::plural("%(num)s item", "%(num)s items", &["%(num)s Stück", "%(num)s Stücke"]),
            MoMessage::with_context("nav", "Back", "Zurück"),
            MoMessage::context_plural(
                "cart",
                "%(num)s order",
                "%(num)s orders",
                &["%(num)s Bestellung", "%(num)s Bestellungen"],
            ),
        ],
    );

    let i18n = I18n::new(
        I18nConfig::builder()
            .translation_directories(vec![dir.path().to_path_buf()])
            .build(),
    );
    // Locale comes from the request data attached to each context.
    i18n.set_locale_selector(|ctx| Ok(ctx.data::<String>().cloned()));
    i18n
}

#[test]
fn lazy_value_resolves_against_a_context() {
    let dir = TempDir::new().unwrap();

    // Declared before any request exists.
    let hello = lazy_gettext("Hello %(name)s", vars! { "name" => "World" });

    let i18n = app_with_catalogs(&dir);
    let ctx = i18n.context();
    assert_eq!(hello.resolve(&ctx).unwrap(), "Hello World");
}

#[test]
fn one_lazy_value_renders_per_context_locale() {
    let dir = TempDir::new().unwrap();
    let i18n = app_with_catalogs(&dir);

    let hello = lazy_gettext("Hello %(name)s", vars! { "name" => "World" });

    let english = i18n.context_with("en".to_string());
    let german = i18n.context_with("de".to_string());

    assert_eq!(hello.resolve(&english).unwrap(), "Hello World");
    assert_eq!(hello.resolve(&german).unwrap(), "Hallo World");

    // Resolution is idempotent for a given context.
    assert_eq!(hello.resolve(&german).unwrap(), "Hallo World");
}

#[test]
fn lazy_plural_dispatches_on_count() {
    let dir = TempDir::new().unwrap();
    let i18n = app_with_catalogs(&dir);
    let german = i18n.context_with("de".to_string());

    let one = lazy_ngettext("%(num)s item", "%(num)s items", 1, vars! {});
    let many = lazy_ngettext("%(num)s item", "%(num)s items", 7, vars! {});

    assert_eq!(one.resolve(&german).unwrap(), "1 Stück");
    assert_eq!(many.resolve(&german).unwrap(), "7 Stücke");
}

#[test]
fn lazy_context_variants_resolve() {
    let dir = TempDir::new().unwrap();
    let i18n = app_with_catalogs(&dir);
    let german = i18n.context_with("de".to_string());

    let back = lazy_pgettext("nav", "Back", vars! {});
    assert_eq!(back.resolve(&german).unwrap(), "Zurück");

    let orders = lazy_npgettext("cart", "%(num)s order", "%(num)s orders", 2, vars! {});
    assert_eq!(orders.resolve(&german).unwrap(), "2 Bestellungen");
}

#[test]
fn lazy_values_compare_by_captured_request() {
    let greeting = lazy_gettext("Foo", vars! {});
    assert_eq!(greeting, greeting.clone());

    let other_message = lazy_gettext("Bar", vars! {});
    assert_ne!(greeting, other_message);

    let other_vars = lazy_gettext("Foo", vars! { "x" => 1 });
    assert_ne!(greeting, other_vars);
}
