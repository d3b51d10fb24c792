//! Locale routing and translation for the Know You Better web application.
//!
//! - `i18n`: supported locales, message catalogs and translators
//! - `routing`: locale-prefixed URLs, per-request resolution, Axum middleware
//! - `server`: shared state and router
//! - `pages`: translated HTML shell for the app sections

pub mod config;
pub mod i18n;
pub mod pages;
pub mod routing;
pub mod server;
