//! Locale detection for incoming requests.
//!
//! Precedence is data, not control flow: a `LocaleDetector` holds an ordered
//! list of strategies and the first one that yields a supported locale wins.
//! The default chain is path segment, then cookie, then `Accept-Language`,
//! then the default locale. Detection never fails.

use crate::i18n::{Locale, DEFAULT_LOCALE};
use crate::routing::cookie::{read_cookie, LocaleCookie, LOCALE_COOKIE_NAME};
use crate::routing::resolver::split_locale_prefix;
use crate::routing::RoutingMetrics;
use serde::Serialize;
use tracing::debug;

/// The request signals detection looks at.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleRequest<'a> {
    pub path: &'a str,
    pub cookie_header: Option<&'a str>,
    pub accept_language: Option<&'a str>,
}

impl<'a> LocaleRequest<'a> {
    pub fn new(path: &'a str) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }

    pub fn with_cookie_header(mut self, header: &'a str) -> Self {
        self.cookie_header = Some(header);
        self
    }

    pub fn with_accept_language(mut self, header: &'a str) -> Self {
        self.accept_language = Some(header);
        self
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty() || self.path == "/"
    }
}

/// Which signal decided the locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    PathSegment,
    Cookie,
    AcceptLanguage,
    Default,
}

/// One way of inferring a locale from a request.
pub trait DetectionStrategy: Send + Sync {
    fn source(&self) -> DetectionSource;

    fn detect(&self, request: &LocaleRequest<'_>) -> Option<Locale>;
}

/// Explicit leading locale segment: `/en/...`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathSegmentStrategy;

impl DetectionStrategy for PathSegmentStrategy {
    fn source(&self) -> DetectionSource {
        DetectionSource::PathSegment
    }

    fn detect(&self, request: &LocaleRequest<'_>) -> Option<Locale> {
        split_locale_prefix(request.path).map(|(locale, _)| locale)
    }
}

/// Persisted preference cookie.
#[derive(Debug, Clone)]
pub struct CookieStrategy {
    name: String,
}

impl CookieStrategy {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for CookieStrategy {
    fn default() -> Self {
        Self::new(LOCALE_COOKIE_NAME)
    }
}

impl DetectionStrategy for CookieStrategy {
    fn source(&self) -> DetectionSource {
        DetectionSource::Cookie
    }

    fn detect(&self, request: &LocaleRequest<'_>) -> Option<Locale> {
        let value = read_cookie(request.cookie_header?, &self.name)?;
        Locale::parse_lenient(value)
    }
}

/// `Accept-Language` header, primary subtag of the first entry only.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptLanguageStrategy;

impl DetectionStrategy for AcceptLanguageStrategy {
    fn source(&self) -> DetectionSource {
        DetectionSource::AcceptLanguage
    }

    fn detect(&self, request: &LocaleRequest<'_>) -> Option<Locale> {
        primary_language(request.accept_language?).and_then(Locale::parse_lenient)
    }
}

/// `"en-US,fr;q=0.8"` → `"en"`. Quality values and later entries are ignored.
pub fn primary_language(header: &str) -> Option<&str> {
    let first = header.split([',', ';']).next()?;
    let primary = first.split(['-', '_']).next()?.trim();
    (!primary.is_empty()).then_some(primary)
}

/// The standard chain: path segment, cookie, `Accept-Language`.
pub fn default_strategies() -> Vec<Box<dyn DetectionStrategy>> {
    vec![
        Box::new(PathSegmentStrategy),
        Box::new(CookieStrategy::default()),
        Box::new(AcceptLanguageStrategy),
    ]
}

/// Per-request locale context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocaleDetection {
    pub locale: Locale,
    pub source: DetectionSource,
}

/// Outcome of a root request: which locale home to serve and what to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootRewrite {
    pub detection: LocaleDetection,
    /// Internal locale home, e.g. `/fr`
    pub rewrite: String,
    pub cookie: LocaleCookie,
}

pub struct LocaleDetector {
    strategies: Vec<Box<dyn DetectionStrategy>>,
    default_locale: Locale,
}

impl LocaleDetector {
    pub fn new() -> Self {
        Self::with_strategies(default_strategies())
    }

    pub fn with_strategies(strategies: Vec<Box<dyn DetectionStrategy>>) -> Self {
        Self {
            strategies,
            default_locale: DEFAULT_LOCALE,
        }
    }

    /// Sources in precedence order, not counting the final default.
    pub fn precedence(&self) -> Vec<DetectionSource> {
        self.strategies.iter().map(|s| s.source()).collect()
    }

    /// First strategy with an answer wins; otherwise the default locale.
    pub fn detect(&self, request: &LocaleRequest<'_>) -> LocaleDetection {
        let detection = self
            .strategies
            .iter()
            .find_map(|strategy| {
                strategy.detect(request).map(|locale| LocaleDetection {
                    locale,
                    source: strategy.source(),
                })
            })
            .unwrap_or(LocaleDetection {
                locale: self.default_locale,
                source: DetectionSource::Default,
            });

        RoutingMetrics::global().record_detection(detection.source);
        debug!(
            "Detected locale '{}' from {:?} for '{}'",
            detection.locale, detection.source, request.path
        );
        detection
    }

    /// Detection for a bare root request, which must persist its choice.
    ///
    /// Returns `None` for any other path; those requests never write the cookie.
    pub fn detect_root(&self, request: &LocaleRequest<'_>) -> Option<RootRewrite> {
        if !request.is_root() {
            return None;
        }

        let detection = self.detect(request);
        Some(RootRewrite {
            detection,
            rewrite: format!("/{}", detection.locale),
            cookie: LocaleCookie::new(detection.locale),
        })
    }
}

impl Default for LocaleDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LocaleDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleDetector")
            .field("strategies", &self.precedence())
            .field("default_locale", &self.default_locale)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(request: LocaleRequest<'_>) -> LocaleDetection {
        LocaleDetector::new().detect(&request)
    }

    // ==================== Precedence Tests ====================

    #[test]
    fn test_path_segment_wins_over_everything() {
        let request = LocaleRequest::new("/en/tours")
            .with_cookie_header("NEXT_LOCALE=de")
            .with_accept_language("es-ES");
        assert_eq!(
            detect(request),
            LocaleDetection {
                locale: Locale::En,
                source: DetectionSource::PathSegment
            }
        );
    }

    #[test]
    fn test_cookie_beats_header() {
        let request = LocaleRequest::new("/tours")
            .with_cookie_header("NEXT_LOCALE=de")
            .with_accept_language("en-US");
        let detection = detect(request);
        assert_eq!(detection.locale, Locale::De);
        assert_eq!(detection.source, DetectionSource::Cookie);
    }

    #[test]
    fn test_header_without_cookie() {
        let detection = detect(LocaleRequest::new("/").with_accept_language("es-ES"));
        assert_eq!(detection.locale, Locale::Es);
        assert_eq!(detection.source, DetectionSource::AcceptLanguage);
    }

    #[test]
    fn test_unsupported_header_falls_back_to_default() {
        let detection = detect(LocaleRequest::new("/").with_accept_language("ja-JP"));
        assert_eq!(detection.locale, Locale::Fr);
        assert_eq!(detection.source, DetectionSource::Default);
    }

    #[test]
    fn test_no_signals_is_default() {
        assert_eq!(detect(LocaleRequest::new("/")).locale, Locale::Fr);
        assert_eq!(detect(LocaleRequest::new("")).locale, Locale::Fr);
    }

    #[test]
    fn test_invalid_cookie_falls_through_to_header() {
        let request = LocaleRequest::new("/")
            .with_cookie_header("NEXT_LOCALE=xx")
            .with_accept_language("nl-BE,nl;q=0.9");
        assert_eq!(detect(request).locale, Locale::Nl);
    }

    #[test]
    fn test_unknown_path_segment_falls_through() {
        let request = LocaleRequest::new("/ja/tours").with_cookie_header("NEXT_LOCALE=es");
        assert_eq!(detect(request).source, DetectionSource::Cookie);
    }

    #[test]
    fn test_localized_slug_is_not_a_path_signal() {
        let detection = detect(LocaleRequest::new("/guided-bike-tour-paris"));
        assert_eq!(detection.source, DetectionSource::Default);
    }

    // ==================== Strategy Tests ====================

    #[test]
    fn test_cookie_strategy_custom_name() {
        let strategy = CookieStrategy::new("lang");
        let request = LocaleRequest::new("/").with_cookie_header("lang=EN");
        assert_eq!(strategy.detect(&request), Some(Locale::En));
    }

    #[test]
    fn test_accept_language_is_case_insensitive() {
        let request = LocaleRequest::new("/").with_accept_language("DE-at");
        assert_eq!(AcceptLanguageStrategy.detect(&request), Some(Locale::De));
    }

    #[test]
    fn test_accept_language_only_first_entry() {
        // Only the first entry is consulted, even if a later one is supported
        let request = LocaleRequest::new("/").with_accept_language("ja-JP,en;q=0.8");
        assert_eq!(AcceptLanguageStrategy.detect(&request), None);
    }

    #[test]
    fn test_primary_language() {
        assert_eq!(primary_language("en-US"), Some("en"));
        assert_eq!(primary_language("fr;q=0.9"), Some("fr"));
        assert_eq!(primary_language("nl,en"), Some("nl"));
        assert_eq!(primary_language(" es "), Some("es"));
        assert_eq!(primary_language(""), None);
        assert_eq!(primary_language(";q=1"), None);
    }

    #[test]
    fn test_custom_chain_order() {
        let detector = LocaleDetector::with_strategies(vec![
            Box::new(AcceptLanguageStrategy),
            Box::new(CookieStrategy::default()),
        ]);
        let request = LocaleRequest::new("/")
            .with_cookie_header("NEXT_LOCALE=de")
            .with_accept_language("en-US");
        assert_eq!(detector.detect(&request).locale, Locale::En);
        assert_eq!(
            detector.precedence(),
            vec![DetectionSource::AcceptLanguage, DetectionSource::Cookie]
        );
    }

    #[test]
    fn test_default_precedence() {
        assert_eq!(
            LocaleDetector::new().precedence(),
            vec![
                DetectionSource::PathSegment,
                DetectionSource::Cookie,
                DetectionSource::AcceptLanguage
            ]
        );
    }

    // ==================== Root Tests ====================

    #[test]
    fn test_detect_root_persists_choice() {
        let request = LocaleRequest::new("/").with_accept_language("en-GB");
        let root = LocaleDetector::new().detect_root(&request).unwrap();

        assert_eq!(root.rewrite, "/en");
        assert_eq!(root.cookie, LocaleCookie::new(Locale::En));
        assert_eq!(root.detection.source, DetectionSource::AcceptLanguage);
    }

    #[test]
    fn test_detect_root_defaults_to_french() {
        let root = LocaleDetector::new()
            .detect_root(&LocaleRequest::new("/"))
            .unwrap();
        assert_eq!(root.rewrite, "/fr");
        assert_eq!(root.cookie.locale, Locale::Fr);
    }

    #[test]
    fn test_detect_root_ignores_other_paths() {
        let request = LocaleRequest::new("/blog").with_cookie_header("NEXT_LOCALE=de");
        assert!(LocaleDetector::new().detect_root(&request).is_none());
    }
}
