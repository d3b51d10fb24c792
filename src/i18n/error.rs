//! Error type shared by the locale registry, catalogs and navigation helpers.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the i18n layer.
#[derive(Debug, Error)]
pub enum I18nError {
    /// A locale code that is not part of the registry (or is disabled).
    #[error("Unsupported locale: '{0}'")]
    UnsupportedLocale(String),

    #[error("Failed to read catalog for '{locale}' from {}: {source}", path.display())]
    CatalogIo {
        locale: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog for '{locale}': {source}")]
    CatalogParse {
        locale: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The catalog parsed as JSON but does not have the expected shape.
    #[error("Catalog for '{locale}' is invalid: {reason}")]
    InvalidCatalog { locale: &'static str, reason: String },

    #[error("No catalog loaded for default locale '{0}'")]
    MissingDefaultCatalog(&'static str),

    #[error("Invalid pathname '{path}': {reason}")]
    InvalidPathname { path: String, reason: String },
}
