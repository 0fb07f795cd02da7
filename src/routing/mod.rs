//! Locale-aware routing.
//!
//! # Architecture
//!
//! - `table`: Route keys and their per-locale slugs, validated at construction
//! - `resolver`: Reverse index and path → (route, locale, template) resolution
//! - `detector`: Ordered locale detection strategies
//! - `cookie`: The `NEXT_LOCALE` preference cookie
//! - `navigation`: Links, language switching and hreflang alternates
//! - `metrics`: Resolution counters
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use paris_bike_routes::i18n::Locale;
//! use paris_bike_routes::routing::{Navigator, PathResolver, RouteKey, RouteTable};
//!
//! let table = Arc::new(RouteTable::site().unwrap());
//! let resolver = Arc::new(PathResolver::new(table));
//!
//! let nav = Navigator::new(resolver, None, "/visite-guidee-de-paris-a-velo");
//! assert_eq!(nav.locale(), Locale::Fr);
//! assert_eq!(nav.language_switch_url(Locale::En), "/guided-bike-tour-paris");
//! assert_eq!(nav.create_link(RouteKey::About), "/a-propos");
//! ```

pub mod cookie;
mod detector;
mod metrics;
mod navigation;
mod resolver;
mod table;

pub use self::cookie::{LocaleCookie, LOCALE_COOKIE_MAX_AGE, LOCALE_COOKIE_NAME};
pub use detector::{
    default_strategies, primary_language, AcceptLanguageStrategy, CookieStrategy,
    DetectionSource, DetectionStrategy, LocaleDetection, LocaleDetector, LocaleRequest,
    PathSegmentStrategy, RootRewrite,
};
pub use metrics::{DetectionCounts, MetricsReport, RoutingMetrics};
pub use navigation::{
    alternate_language_url, alternate_links_for, AlternateLink, LanguageSwitch, Navigator,
};
pub use resolver::{
    create_path_to_locale_map, internal_path, normalize_request_path, split_locale_prefix,
    PathMatch, PathResolution, PathResolver,
};
pub use table::{LocalizedPaths, RouteEntry, RouteKey, RouteTable, SITE_ROUTES};
