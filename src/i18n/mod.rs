//! Internationalization (i18n) module.
//!
//! Everything that knows which locales exist and what strings they carry
//! lives here. URL handling built on top of it lives in `routing`.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported locales
//! - `locale`: `Locale`, a value that can only hold a registered locale
//! - `negotiate`: `Accept-Language` parsing and matching
//! - `catalog`: Message catalogs with default-locale fallback
//! - `translator`: `t(key)` bound to a locale
//! - `validator`: Catalog completeness checks run at startup
//! - `metrics`: Lookup, fallback and redirect counters
//!
//! # Example
//!
//! ```rust,ignore
//! use know_you_better::i18n::{CatalogStore, Locale};
//! use std::sync::Arc;
//!
//! let store = Arc::new(CatalogStore::embedded()?);
//! let t = store.resolve_catalog(Locale::from_code("zh-TW")?);
//! let title = t.t("knowledge.title");
//! ```

mod catalog;
mod error;
mod locale;
mod metrics;
mod negotiate;
mod registry;
mod translator;
mod validator;

pub use catalog::{CatalogStore, MessageCatalog};
pub use error::I18nError;
pub use locale::Locale;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use negotiate::{match_tag, negotiate, parse_accept_language, LanguageRange};
pub use registry::{LocaleConfig, LocaleRegistry};
pub use translator::Translator;
pub use validator::{CatalogValidator, ValidationReport};
