//! Translation metrics and observability module.
//!
//! Tracks catalog lookups, fallbacks to the default catalog, missing keys and
//! locale redirects issued by the resolver.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Global translation metrics singleton.
pub struct TranslationMetrics {
    /// Number of translation lookups
    lookups: AtomicUsize,

    /// Number of lookups answered by the default catalog instead of the
    /// requested locale's catalog
    default_fallbacks: AtomicUsize,

    /// Number of lookups that found no string at all
    missing_keys: AtomicUsize,

    /// Number of locale redirects issued
    redirects: AtomicUsize,
}

/// Global metrics instance (initialized lazily)
static METRICS: OnceLock<TranslationMetrics> = OnceLock::new();

impl TranslationMetrics {
    /// Get the global translation metrics instance.
    pub fn global() -> &'static TranslationMetrics {
        METRICS.get_or_init(TranslationMetrics::new)
    }

    fn new() -> Self {
        Self {
            lookups: AtomicUsize::new(0),
            default_fallbacks: AtomicUsize::new(0),
            missing_keys: AtomicUsize::new(0),
            redirects: AtomicUsize::new(0),
        }
    }

    pub fn record_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_default_fallback(&self) {
        self.default_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_missing_key(&self) {
        self.missing_keys.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_redirect(&self) {
        self.redirects.fetch_add(1, Ordering::Relaxed);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    pub fn default_fallbacks(&self) -> usize {
        self.default_fallbacks.load(Ordering::Relaxed)
    }

    pub fn missing_keys(&self) -> usize {
        self.missing_keys.load(Ordering::Relaxed)
    }

    pub fn redirects(&self) -> usize {
        self.redirects.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let lookups = self.lookups();
        let fallbacks = self.default_fallbacks();
        let missing = self.missing_keys();

        let rate = |count: usize| {
            if lookups > 0 {
                (count as f64 / lookups as f64) * 100.0
            } else {
                0.0
            }
        };

        MetricsReport {
            lookups,
            default_fallbacks: fallbacks,
            default_fallback_rate: rate(fallbacks),
            missing_keys: missing,
            missing_key_rate: rate(missing),
            redirects: self.redirects(),
        }
    }
}

/// Metrics report containing current translation statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub lookups: usize,

    pub default_fallbacks: usize,

    /// Default-catalog fallbacks as a percentage of lookups (0-100)
    pub default_fallback_rate: f64,

    pub missing_keys: usize,

    /// Missing keys as a percentage of lookups (0-100)
    pub missing_key_rate: f64,

    pub redirects: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_record_counters() {
        let metrics = TranslationMetrics::new();

        metrics.record_lookup();
        metrics.record_lookup();
        metrics.record_default_fallback();
        metrics.record_missing_key();
        metrics.record_redirect();

        assert_eq!(metrics.lookups(), 2);
        assert_eq!(metrics.default_fallbacks(), 1);
        assert_eq!(metrics.missing_keys(), 1);
        assert_eq!(metrics.redirects(), 1);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = TranslationMetrics::new().report();

        assert_eq!(report.lookups, 0);
        assert_eq!(report.default_fallback_rate, 0.0);
        assert_eq!(report.missing_key_rate, 0.0);
    }

    #[test]
    fn test_report_rates() {
        let metrics = TranslationMetrics::new();

        // 4 lookups, 1 fallback, 2 missing
        for _ in 0..4 {
            metrics.record_lookup();
        }
        metrics.record_default_fallback();
        metrics.record_missing_key();
        metrics.record_missing_key();

        let report = metrics.report();
        assert_eq!(report.default_fallback_rate, 25.0);
        assert_eq!(report.missing_key_rate, 50.0);
    }

    #[test]
    fn test_global_returns_same_instance() {
        let metrics1 = TranslationMetrics::global();
        let metrics2 = TranslationMetrics::global();

        assert!(std::ptr::eq(metrics1, metrics2));
    }
}
