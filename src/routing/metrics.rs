//! Routing metrics and observability.
//!
//! Process-wide counters for reverse-index lookups, root rewrites, language
//! switches and which detection strategy decided each request's locale.

use crate::routing::DetectionSource;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Routing counters. Use `global()` in the application.
#[derive(Debug, Default)]
pub struct RoutingMetrics {
    /// Reverse-index lookups that found a route
    index_hits: AtomicUsize,

    /// Reverse-index lookups that found nothing
    index_misses: AtomicUsize,

    /// Root requests served as a locale home
    root_rewrites: AtomicUsize,

    /// Explicit language switches
    language_switches: AtomicUsize,

    detected_by_path: AtomicUsize,
    detected_by_cookie: AtomicUsize,
    detected_by_header: AtomicUsize,
    detected_by_default: AtomicUsize,
}

static METRICS: OnceLock<RoutingMetrics> = OnceLock::new();

impl RoutingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the global routing metrics instance.
    pub fn global() -> &'static RoutingMetrics {
        METRICS.get_or_init(RoutingMetrics::new)
    }

    pub fn record_index_hit(&self) {
        self.index_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_index_miss(&self) {
        self.index_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_root_rewrite(&self) {
        self.root_rewrites.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_language_switch(&self) {
        self.language_switches.fetch_add(1, Ordering::Relaxed);
    }

    /// Record which strategy decided a request's locale.
    pub fn record_detection(&self, source: DetectionSource) {
        let counter = match source {
            DetectionSource::PathSegment => &self.detected_by_path,
            DetectionSource::Cookie => &self.detected_by_cookie,
            DetectionSource::AcceptLanguage => &self.detected_by_header,
            DetectionSource::Default => &self.detected_by_default,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn index_hits(&self) -> usize {
        self.index_hits.load(Ordering::Relaxed)
    }

    pub fn index_misses(&self) -> usize {
        self.index_misses.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.index_hits();
        let misses = self.index_misses();
        let lookups = hits + misses;
        let index_hit_rate = if lookups > 0 {
            (hits as f64 / lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            index_hits: hits,
            index_misses: misses,
            index_hit_rate,
            root_rewrites: self.root_rewrites.load(Ordering::Relaxed),
            language_switches: self.language_switches.load(Ordering::Relaxed),
            detections: DetectionCounts {
                path_segment: self.detected_by_path.load(Ordering::Relaxed),
                cookie: self.detected_by_cookie.load(Ordering::Relaxed),
                accept_language: self.detected_by_header.load(Ordering::Relaxed),
                default: self.detected_by_default.load(Ordering::Relaxed),
            },
        }
    }
}

/// Snapshot of the routing counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub index_hits: usize,
    pub index_misses: usize,

    /// Hit rate as a percentage (0-100)
    pub index_hit_rate: f64,

    pub root_rewrites: usize,
    pub language_switches: usize,
    pub detections: DetectionCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetectionCounts {
    pub path_segment: usize,
    pub cookie: usize,
    pub accept_language: usize,
    pub default: usize,
}
