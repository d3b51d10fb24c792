//! Message catalogs: per-locale trees of translation strings.
//!
//! Catalogs are JSON documents of nested objects whose leaves are strings,
//! addressed with dotted keys (`"home.title"`). They are loaded once at
//! startup, either from the copies embedded in the binary or from a
//! directory of `{locale}.json` files, and are immutable afterwards.
//!
//! Lookup policy: requested locale, then the default locale, then the key
//! itself. The last case is logged and counted but never fails.

use crate::i18n::{I18nError, Locale, TranslationMetrics, Translator};
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

const EN_MESSAGES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/messages/en.json"));
const ZH_CN_MESSAGES: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/messages/zh-CN.json"));
const ZH_TW_MESSAGES: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/messages/zh-TW.json"));

/// Catalog source compiled into the binary for a locale, if any.
fn embedded_source(locale: Locale) -> Option<&'static str> {
    match locale.code() {
        "en" => Some(EN_MESSAGES),
        "zh-CN" => Some(ZH_CN_MESSAGES),
        "zh-TW" => Some(ZH_TW_MESSAGES),
        _ => None,
    }
}

/// The translation strings for a single locale.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    locale: Locale,
    root: Map<String, Value>,
}

impl MessageCatalog {
    /// Parse a catalog from its JSON source.
    ///
    /// The document must be an object; every value must be either a string
    /// or a nested object. Namespace segments must not contain dots.
    pub fn from_json(locale: Locale, raw: &str) -> Result<Self, I18nError> {
        let value: Value = serde_json::from_str(raw).map_err(|source| I18nError::CatalogParse {
            locale: locale.code(),
            source,
        })?;

        let Value::Object(root) = value else {
            return Err(I18nError::InvalidCatalog {
                locale: locale.code(),
                reason: "top level must be an object".to_string(),
            });
        };

        validate_tree(locale, &root, "")?;

        Ok(Self { locale, root })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Look up a dotted key.
    ///
    /// Returns `None` when any namespace along the way is missing, or when
    /// the key names a namespace rather than a string.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let mut segments = key.split('.');
        let mut node = self.root.get(segments.next()?)?;

        for segment in segments {
            node = node.as_object()?.get(segment)?;
        }

        node.as_str()
    }

    /// All string keys in dotted form, sorted.
    pub fn keys(&self) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        collect_keys(&self.root, "", &mut keys);
        keys
    }

    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn join_key(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

fn validate_tree(locale: Locale, map: &Map<String, Value>, prefix: &str) -> Result<(), I18nError> {
    for (segment, value) in map {
        let key = join_key(prefix, segment);
        if segment.is_empty() || segment.contains('.') {
            return Err(I18nError::InvalidCatalog {
                locale: locale.code(),
                reason: format!("invalid key segment in '{key}'"),
            });
        }
        match value {
            Value::String(_) => {}
            Value::Object(nested) => validate_tree(locale, nested, &key)?,
            _ => {
                return Err(I18nError::InvalidCatalog {
                    locale: locale.code(),
                    reason: format!("'{key}' must be a string or an object"),
                })
            }
        }
    }
    Ok(())
}

fn collect_keys(map: &Map<String, Value>, prefix: &str, keys: &mut BTreeSet<String>) {
    for (segment, value) in map {
        let key = join_key(prefix, segment);
        match value {
            Value::Object(nested) => collect_keys(nested, &key, keys),
            _ => {
                keys.insert(key);
            }
        }
    }
}

/// All loaded catalogs, keyed by locale.
///
/// The default locale's catalog is always present.
#[derive(Debug)]
pub struct CatalogStore {
    catalogs: HashMap<Locale, MessageCatalog>,
    default_locale: Locale,
}

impl CatalogStore {
    /// Build a store from already parsed catalogs.
    ///
    /// # Errors
    /// `MissingDefaultCatalog` if no catalog for the default locale is given.
    /// Other locales may be absent; their lookups go straight to the default.
    pub fn from_catalogs(catalogs: Vec<MessageCatalog>) -> Result<Self, I18nError> {
        let default_locale = Locale::default_locale();
        let catalogs: HashMap<_, _> = catalogs
            .into_iter()
            .map(|catalog| (catalog.locale(), catalog))
            .collect();

        if !catalogs.contains_key(&default_locale) {
            return Err(I18nError::MissingDefaultCatalog(default_locale.code()));
        }

        Ok(Self {
            catalogs,
            default_locale,
        })
    }

    /// Load the catalogs compiled into the binary.
    pub fn embedded() -> Result<Self, I18nError> {
        let mut catalogs = Vec::new();
        for locale in Locale::all() {
            let raw = embedded_source(locale).ok_or_else(|| I18nError::InvalidCatalog {
                locale: locale.code(),
                reason: "no embedded catalog".to_string(),
            })?;
            catalogs.push(MessageCatalog::from_json(locale, raw)?);
        }

        info!("Loaded {} embedded message catalogs", catalogs.len());
        Self::from_catalogs(catalogs)
    }

    /// Load `{code}.json` for every enabled locale from `dir`.
    ///
    /// Any unreadable or malformed file is an error: a partially loaded
    /// store must never serve traffic.
    pub fn load_from_dir(dir: &Path) -> Result<Self, I18nError> {
        let mut catalogs = Vec::new();
        for locale in Locale::all() {
            let path = dir.join(format!("{}.json", locale.code()));
            let raw = std::fs::read_to_string(&path).map_err(|source| I18nError::CatalogIo {
                locale: locale.code(),
                path: path.clone(),
                source,
            })?;
            let catalog = MessageCatalog::from_json(locale, &raw)?;
            debug!("Loaded {} keys for '{}' from {}", catalog.len(), locale, path.display());
            catalogs.push(catalog);
        }

        info!("Loaded {} message catalogs from {}", catalogs.len(), dir.display());
        Self::from_catalogs(catalogs)
    }

    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }

    pub fn default_catalog(&self) -> &MessageCatalog {
        &self.catalogs[&self.default_locale]
    }

    /// The catalog loaded for `locale`, if any.
    pub fn get(&self, locale: Locale) -> Option<&MessageCatalog> {
        self.catalogs.get(&locale)
    }

    /// Loaded catalogs in registry order.
    pub fn catalogs(&self) -> Vec<&MessageCatalog> {
        Locale::all()
            .into_iter()
            .filter_map(|locale| self.catalogs.get(&locale))
            .collect()
    }

    /// Look up a key with default-locale fallback, without recording
    /// anything.
    pub fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        self.get(locale)
            .and_then(|catalog| catalog.lookup(key))
            .or_else(|| self.default_catalog().lookup(key))
    }

    /// Translate a key for a locale.
    ///
    /// Falls back to the default catalog, then to the key itself. A key that
    /// is missing everywhere is logged as a `MissingTranslationKey` and
    /// counted, never raised.
    pub fn translate(&self, locale: Locale, key: &str) -> String {
        let metrics = TranslationMetrics::global();
        metrics.record_lookup();

        if let Some(text) = self.get(locale).and_then(|catalog| catalog.lookup(key)) {
            return text.to_string();
        }

        if let Some(text) = self.default_catalog().lookup(key) {
            if locale != self.default_locale {
                metrics.record_default_fallback();
                debug!(locale = %locale, key, "Translation served from default catalog");
            }
            return text.to_string();
        }

        metrics.record_missing_key();
        warn!(locale = %locale, key, "MissingTranslationKey");
        key.to_string()
    }

    /// Bind a translator to a locale.
    pub fn resolve_catalog(self: &Arc<Self>, locale: Locale) -> Translator {
        Translator::new(Arc::clone(self), locale)
    }
}
