//! Translation function bound to one request's locale.

use crate::i18n::{CatalogStore, Locale};
use regex::{Captures, Regex};
use std::sync::{Arc, OnceLock};

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Matches `{name}` placeholders; group 1 is the name.
pub(crate) fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX
        .get_or_init(|| Regex::new(r"\{([a-zA-Z0-9_]+)\}").expect("placeholder regex is valid"))
}

/// A `t(key)` function bound to a locale and, optionally, a key namespace.
///
/// Cheap to clone; the catalogs are shared.
#[derive(Debug, Clone)]
pub struct Translator {
    store: Arc<CatalogStore>,
    locale: Locale,
    namespace: Option<String>,
}

impl Translator {
    pub fn new(store: Arc<CatalogStore>, locale: Locale) -> Self {
        Self {
            store,
            locale,
            namespace: None,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Scope this translator to a nested namespace, so that
    /// `translator.namespace("nav").t("home")` reads `nav.home`.
    pub fn namespace(&self, namespace: &str) -> Translator {
        Translator {
            store: Arc::clone(&self.store),
            locale: self.locale,
            namespace: Some(self.qualify(namespace)),
        }
    }

    fn qualify(&self, key: &str) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}.{key}"),
            None => key.to_string(),
        }
    }

    /// Translate a key. Missing keys come back as the fully qualified key.
    pub fn t(&self, key: &str) -> String {
        self.store.translate(self.locale, &self.qualify(key))
    }

    /// Translate a key and substitute `{name}` placeholders.
    ///
    /// # Example
    /// ```ignore
    /// let greeting = translator.t_fmt("counseling.bookingWith", &[("name", "Dr. Lin")]);
    /// ```
    pub fn t_fmt(&self, key: &str, args: &[(&str, &str)]) -> String {
        let template = self.t(key);

        placeholder_regex()
            .replace_all(&template, |caps: &Captures| {
                let name = &caps[1];
                args.iter()
                    .find(|(arg, _)| *arg == name)
                    .map(|(_, value)| value.to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Whether the key resolves in this locale or the default one.
    pub fn has(&self, key: &str) -> bool {
        self.store.lookup(self.locale, &self.qualify(key)).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::MessageCatalog;

    fn test_store() -> Arc<CatalogStore> {
        let en = MessageCatalog::from_json(
            Locale::EN,
            r#"{
                "nav": {"home": "Home", "menu": {"open": "Open menu"}},
                "counseling": {"bookingWith": "Booking with {name} on {date}"}
            }"#,
        )
        .unwrap();
        let zh_tw = MessageCatalog::from_json(
            Locale::ZH_TW,
            r#"{"counseling": {"bookingWith": "預約 {name}，日期 {date}"}}"#,
        )
        .unwrap();
        Arc::new(CatalogStore::from_catalogs(vec![en, zh_tw]).unwrap())
    }

    #[test]
    fn test_t_with_fallback() {
        let translator = test_store().resolve_catalog(Locale::ZH_TW);
        assert_eq!(translator.t("nav.home"), "Home");
        assert_eq!(translator.locale(), Locale::ZH_TW);
    }

    #[test]
    fn test_namespace() {
        let nav = test_store().resolve_catalog(Locale::EN).namespace("nav");
        assert_eq!(nav.t("home"), "Home");
        assert_eq!(nav.namespace("menu").t("open"), "Open menu");
    }

    #[test]
    fn test_namespace_missing_key_returns_qualified_key() {
        let nav = test_store().resolve_catalog(Locale::EN).namespace("nav");
        assert_eq!(nav.t("logout"), "nav.logout");
    }

    #[test]
    fn test_t_fmt_substitutes_placeholders() {
        let translator = test_store().resolve_catalog(Locale::ZH_TW);
        let text = translator.t_fmt(
            "counseling.bookingWith",
            &[("name", "林醫師"), ("date", "5/1")],
        );
        assert_eq!(text, "預約 林醫師，日期 5/1");
    }

    #[test]
    fn test_t_fmt_leaves_unknown_placeholders() {
        let translator = test_store().resolve_catalog(Locale::EN);
        let text = translator.t_fmt("counseling.bookingWith", &[("name", "Dr. Lin")]);
        assert_eq!(text, "Booking with Dr. Lin on {date}");
    }

    #[test]
    fn test_t_fmt_does_not_expand_argument_values() {
        let translator = test_store().resolve_catalog(Locale::EN);
        let text = translator.t_fmt(
            "counseling.bookingWith",
            &[("name", "{date}"), ("date", "5/1")],
        );
        assert_eq!(text, "Booking with {date} on 5/1");

        let text = translator.t_fmt("counseling.bookingWith", &[("date", "{name}"), ("name", "Lin")]);
        assert_eq!(text, "Booking with Lin on {name}");
    }

    #[test]
    fn test_has() {
        let translator = test_store().resolve_catalog(Locale::ZH_TW);
        assert!(translator.has("nav.home"));
        assert!(!translator.has("nav.missing"));
        assert!(!translator.has("nav"));
    }
}
