//! Integration tests for the resolution pipeline

use lingo_common::test_utils::init_test_logging;
use lingo_common::test_utils::locale_fixtures::{chinese_translations, english_translations};
use lingo_i18n::{
    I18nError, LocaleId, LocaleRegistry, MapSource, MessageResolver, PlainMarkup, TranslationMap,
};
use std::sync::Arc;

/// Registry with English and Chinese loaded, English current
fn create_test_registry() -> Arc<LocaleRegistry> {
    init_test_logging();

    let source = MapSource::new()
        .with_locale("en_US", english_translations())
        .with_locale("zh_CN", chinese_translations());

    let registry = LocaleRegistry::new("en_US");
    registry.load(&LocaleId::new("en_US"), &source).unwrap();
    registry.load(&LocaleId::new("zh_CN"), &source).unwrap();
    Arc::new(registry)
}

const NO_PARAMS: &[&str] = &[];

#[test]
fn test_greeting_scenario() {
    let mut translations = TranslationMap::new();
    translations.insert("greet.hello".to_string(), "Hello, {0}!".to_string());
    let registry = Arc::new(LocaleRegistry::new("en_US"));
    registry.load_map("en_US", translations);

    let resolver = MessageResolver::new(registry);
    assert_eq!(
        resolver.render("(greet.hello)", &["World"]).as_deref(),
        Some("Hello, World!")
    );
}

#[test]
fn test_suppressed_messages() {
    let resolver = MessageResolver::new(create_test_registry());
    assert_eq!(resolver.resolve("", NO_PARAMS), None);
    assert_eq!(resolver.resolve("none", NO_PARAMS), None);
    assert_eq!(resolver.resolve("none", &["x"]), None);
    assert!(resolver.resolve("none.", NO_PARAMS).is_some());
}

#[test]
fn test_custom_sentinel() {
    let resolver = MessageResolver::new(create_test_registry()).with_sentinel("-");
    assert_eq!(resolver.resolve("-", NO_PARAMS), None);
    assert_eq!(resolver.resolve("none", NO_PARAMS).as_deref(), Some("none"));
}

#[test]
fn test_missing_key_falls_back_to_literal() {
    let resolver = MessageResolver::new(create_test_registry());
    assert_eq!(
        resolver
            .resolve("Welcome (missing.key) traveler", NO_PARAMS)
            .as_deref(),
        Some("Welcome (missing.key) traveler")
    );
}

#[test]
fn test_keys_between_literal_text() {
    let resolver = MessageResolver::new(create_test_registry()).with_markup(Arc::new(PlainMarkup));
    assert_eq!(
        resolver.expand_keys("[(greet.bye)] then (status.online)!"),
        "[Goodbye.] then &aonline!"
    );
}

#[test]
fn test_markup_applied_to_resolved_text() {
    let resolver = MessageResolver::new(create_test_registry());
    assert_eq!(
        resolver.resolve("&7Server is (status.online)", NO_PARAMS).as_deref(),
        Some("\u{a7}7Server is \u{a7}aonline")
    );
}

#[test]
fn test_markup_applied_to_interpolated_arguments() {
    let resolver = MessageResolver::new(create_test_registry());
    assert_eq!(
        resolver.resolve("(greet.hello)", &["&bSteve"]).as_deref(),
        Some("Hello, \u{a7}bSteve!")
    );
}

#[test]
fn test_placeholders_untouched_without_params() {
    let resolver = MessageResolver::new(create_test_registry());
    assert_eq!(
        resolver.resolve("(greet.hello) {0}", NO_PARAMS).as_deref(),
        Some("Hello, {0}! {0}")
    );
}

#[test]
fn test_message_level_interpolation() {
    let resolver = MessageResolver::new(create_test_registry());
    assert_eq!(
        resolver
            .resolve("{0} joined. (status.players)", &["Alex", "20"])
            .as_deref(),
        Some("Alex joined. Alex of 20 players online")
    );
}

#[test]
fn test_unclosed_parenthesis_is_literal() {
    let resolver = MessageResolver::new(create_test_registry());
    assert_eq!(
        resolver.resolve("smile :( (greet.bye)", NO_PARAMS).as_deref(),
        Some("smile :( (greet.bye)")
    );
    assert_eq!(
        resolver.resolve("(greet.bye) (oops", NO_PARAMS).as_deref(),
        Some("Goodbye. (oops")
    );
}

#[test]
fn test_switching_locale_changes_resolution() {
    let registry = create_test_registry();
    let resolver = MessageResolver::new(registry.clone());

    registry.set_current("zh_CN");
    assert_eq!(
        resolver.resolve("(greet.hello)", &["世界"]).as_deref(),
        Some("你好，世界！")
    );
    assert_eq!(
        resolver.resolve("(status.players)", NO_PARAMS).as_deref(),
        Some("(status.players)")
    );
}

#[test]
fn test_unloaded_locale_falls_back_to_literal() {
    let registry = create_test_registry();
    registry.set_current("fr_FR");
    let resolver = MessageResolver::new(registry);
    assert_eq!(
        resolver.resolve("(greet.bye)", NO_PARAMS).as_deref(),
        Some("(greet.bye)")
    );
}

#[test]
fn test_resolve_key_is_strict() {
    let resolver = MessageResolver::new(create_test_registry());

    assert_eq!(
        resolver.resolve_key("status.online", NO_PARAMS).unwrap(),
        "\u{a7}aonline"
    );
    assert!(matches!(
        resolver.resolve_key("missing.key", NO_PARAMS),
        Err(I18nError::KeyNotFound { .. })
    ));
    assert!(matches!(
        resolver.resolve_key("greet.hello", NO_PARAMS),
        Err(I18nError::MissingParameters { .. })
    ));
}

#[test]
fn test_registry_shared_across_threads() {
    let registry = create_test_registry();
    let resolver = MessageResolver::new(registry.clone());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let resolver = resolver.clone();
            std::thread::spawn(move || {
                resolver
                    .resolve("(greet.hello)", &[format!("player{i}")])
                    .unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("Hello, player{i}!"));
    }
}

#[test]
fn test_clear_and_reload() {
    let registry = create_test_registry();
    registry.clear();
    assert!(registry.loaded_locales().is_empty());

    registry.load_map("en_US", english_translations());
    assert_eq!(registry.loaded_locales(), vec![LocaleId::new("en_US")]);
    assert_eq!(registry.translate("greet.bye").unwrap(), "Goodbye.");
}
