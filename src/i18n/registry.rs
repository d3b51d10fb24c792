//! Locale registry: Single source of truth for all supported locales.
//!
//! The set of locales is closed and known at build time. The registry is a
//! lazily initialized singleton (`OnceLock`) and is immutable thereafter.

use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// BCP-47 style tag as it appears in URLs (e.g., "en", "zh-CN")
    pub code: &'static str,

    /// English name of the locale (e.g., "Chinese (Traditional)")
    pub name: &'static str,

    /// Name of the locale in its own script, shown in the language switcher
    pub native_name: &'static str,

    /// Flag shown next to the native name in the language switcher
    pub flag: &'static str,

    /// Whether this is the default locale (exactly one must be true)
    pub is_default: bool,

    /// Whether this locale is served
    pub enabled: bool,
}

/// Global locale registry singleton.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its exact code.
    ///
    /// # Arguments
    /// * `code` - The locale code (e.g., "en", "zh-TW")
    ///
    /// # Returns
    /// * `Some(&LocaleConfig)` if the locale exists
    /// * `None` if the locale is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// Get a locale configuration by code, ignoring ASCII case.
    ///
    /// Used to recognize `/zh-cn/...` as a miscased `/zh-CN/...`.
    pub fn find_ignore_case(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales
            .iter()
            .find(|locale| locale.code.eq_ignore_ascii_case(code))
    }

    /// Get all enabled locales, in declaration order.
    pub fn list_enabled(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().filter(|locale| locale.enabled).collect()
    }

    /// Get all locales (including disabled ones).
    pub fn list_all(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().collect()
    }

    /// Get the default locale configuration.
    ///
    /// # Panics
    /// Panics if no default locale is found or if multiple default locales
    /// are defined (this indicates a configuration error).
    pub fn default_locale(&self) -> &LocaleConfig {
        let defaults: Vec<_> = self
            .locales
            .iter()
            .filter(|locale| locale.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default locale found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default locales found in registry"),
        }
    }

    /// Check if a locale code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|locale| locale.enabled)
            .unwrap_or(false)
    }
}

/// Default locale configurations: English (default), Simplified Chinese and
/// Traditional Chinese.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "en",
            name: "English",
            native_name: "English",
            flag: "🇺🇸",
            is_default: true,
            enabled: true,
        },
        LocaleConfig {
            code: "zh-CN",
            name: "Chinese (Simplified)",
            native_name: "简体中文",
            flag: "🇨🇳",
            is_default: false,
            enabled: true,
        },
        LocaleConfig {
            code: "zh-TW",
            name: "Chinese (Traditional)",
            native_name: "繁體中文",
            flag: "🇹🇼",
            is_default: false,
            enabled: true,
        },
    ]
}
