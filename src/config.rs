use crate::routing::{
    UnknownPrefixPolicy, DEFAULT_COOKIE_MAX_AGE, DEFAULT_COOKIE_NAME, DEFAULT_EXCLUSIONS,
    DEFAULT_KNOWN_ROUTES,
};
use anyhow::{anyhow, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // Catalogs
    pub messages_dir: Option<PathBuf>,
    pub pathnames_file: Option<PathBuf>,

    // Preference cookie
    pub cookie_name: String,
    pub cookie_max_age: u64,

    // Resolution
    pub unknown_prefix_policy: UnknownPrefixPolicy,
    pub exclude_patterns: Vec<String>,
    pub known_routes: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a config from any variable source.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            // Server
            port: var("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),

            // Catalogs - unset means the catalogs compiled into the binary
            messages_dir: var("MESSAGES_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            pathnames_file: var("PATHNAMES_FILE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),

            // Preference cookie
            cookie_name: var("LOCALE_COOKIE_NAME")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.cookie_name),
            cookie_max_age: var("LOCALE_COOKIE_MAX_AGE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cookie_max_age),

            // Resolution
            unknown_prefix_policy: match var("UNKNOWN_PREFIX_POLICY") {
                Some(v) => v.parse::<UnknownPrefixPolicy>().map_err(|e| anyhow!(e))?,
                None => defaults.unknown_prefix_policy,
            },
            exclude_patterns: var("LOCALE_EXCLUDE")
                .map(|v| split_list(&v))
                .filter(|list| !list.is_empty())
                .unwrap_or(defaults.exclude_patterns),
            known_routes: var("KNOWN_ROUTES")
                .map(|v| split_list(&v))
                .filter(|list| !list.is_empty())
                .unwrap_or(defaults.known_routes),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            messages_dir: None,
            pathnames_file: None,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            cookie_max_age: DEFAULT_COOKIE_MAX_AGE,
            unknown_prefix_policy: UnknownPrefixPolicy::default(),
            exclude_patterns: DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
            known_routes: DEFAULT_KNOWN_ROUTES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
