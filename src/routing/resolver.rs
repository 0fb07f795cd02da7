//! Path ⇄ route resolution.
//!
//! The forward direction (key + locale → path) lives on `RouteTable`. This
//! module handles the reverse: which route and locale a request path names,
//! and which template should render it.

use crate::error::RoutingError;
use crate::i18n::{Locale, DEFAULT_LOCALE};
use crate::routing::{RouteKey, RouteTable, RoutingMetrics};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One reverse-index entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PathMatch {
    pub route_key: RouteKey,
    pub locale: Locale,
    /// The path is used by this route in more than one locale, so `locale`
    /// is only a representative and must not be relied on.
    pub shared: bool,
}

/// Result of resolving a request path. A miss is `{default, None, None}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PathResolution {
    pub locale: Locale,
    pub route_key: Option<RouteKey>,
    pub file_path: Option<&'static str>,
}

impl PathResolution {
    pub fn miss() -> Self {
        Self {
            locale: DEFAULT_LOCALE,
            route_key: None,
            file_path: None,
        }
    }

    pub fn is_match(&self) -> bool {
        self.route_key.is_some()
    }

    /// Internal path the page layer renders, e.g. `/en/tours`.
    pub fn rewrite_target(&self) -> Option<String> {
        self.file_path
            .map(|file_path| internal_path(self.locale, file_path))
    }
}

/// Locale-prefixed template path: `/{locale}{file_path}`, or `/{locale}` for home.
pub fn internal_path(locale: Locale, file_path: &str) -> String {
    if file_path == "/" {
        format!("/{}", locale)
    } else {
        format!("/{}{}", locale, file_path)
    }
}

/// Build the reverse index `path → (route, locale)` from a table.
///
/// Paths shared by one route across several locales (home, `/blog`) collapse
/// to a single entry marked `shared`. That entry names the default locale if
/// the default uses the path, else the first locale in registry order. A path
/// claimed by two different routes in different locales keeps the first
/// route and logs a warning.
pub fn create_path_to_locale_map(table: &RouteTable) -> BTreeMap<&'static str, PathMatch> {
    table
        .entries()
        .iter()
        .flat_map(|entry| {
            entry
                .paths
                .iter()
                .map(move |(locale, path)| (path, entry.key, locale))
        })
        .fold(
            BTreeMap::<&'static str, PathMatch>::new(),
            |mut index, (path, route_key, locale)| {
                match index.get_mut(path) {
                    None => {
                        index.insert(
                            path,
                            PathMatch {
                                route_key,
                                locale,
                                shared: false,
                            },
                        );
                    }
                    Some(existing) if existing.route_key == route_key => {
                        existing.shared = true;
                        if locale == DEFAULT_LOCALE {
                            existing.locale = locale;
                        }
                    }
                    Some(existing) => {
                        warn!(
                            "Path '{}' ({}) already maps to route '{}', ignoring route '{}'",
                            path, locale, existing.route_key, route_key
                        );
                    }
                }
                index
            },
        )
}

/// Normalize a raw request path before resolution.
///
/// Drops the query string and fragment, then trailing slashes (except for
/// the root itself).
pub fn normalize_request_path(raw: &str) -> String {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let trimmed = raw[..end].trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Split a leading locale segment: `/en/tours` → `(en, "/tours")`, `/en` → `(en, "/")`.
pub fn split_locale_prefix(path: &str) -> Option<(Locale, &str)> {
    let rest = path.strip_prefix('/')?;
    let (segment, remainder) = match rest.find('/') {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, "/"),
    };
    let locale = Locale::from_code(segment).ok()?;
    Some((locale, remainder))
}

/// True for a two-letter first segment, i.e. something that claims to be a locale.
fn looks_like_locale_segment(segment: &str) -> bool {
    segment.len() == 2 && segment.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Resolves request paths against an immutable route table.
///
/// The reverse index is built eagerly in `new` and never mutated.
#[derive(Debug, Clone)]
pub struct PathResolver {
    table: Arc<RouteTable>,
    index: BTreeMap<&'static str, PathMatch>,
}

impl PathResolver {
    pub fn new(table: Arc<RouteTable>) -> Self {
        let index = create_path_to_locale_map(&table);
        info!("Reverse path index built: {} paths", index.len());
        Self { table, index }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn index(&self) -> &BTreeMap<&'static str, PathMatch> {
        &self.index
    }

    /// Rebuild the reverse index from the table. Pure: equal on every call.
    pub fn create_path_to_locale_map(&self) -> BTreeMap<&'static str, PathMatch> {
        create_path_to_locale_map(&self.table)
    }

    /// Which route a localized path names, in any locale.
    ///
    /// One leading slash is optional (`"blog"` and `"/blog"` are the same).
    /// Query strings and trailing slashes are not tolerated; run
    /// `normalize_request_path` first.
    pub fn route_key_from_path(&self, path: &str) -> Option<RouteKey> {
        let normalized = path.strip_prefix('/').unwrap_or(path);

        self.table.entries().iter().find_map(|entry| {
            entry
                .paths
                .iter()
                .any(|(_, candidate)| candidate.strip_prefix('/').unwrap_or(candidate) == normalized)
                .then_some(entry.key)
        })
    }

    /// Locale, route and template for a localized path, via the reverse index.
    pub fn locale_from_path(&self, path: &str) -> PathResolution {
        match self.index.get(path) {
            Some(found) => {
                RoutingMetrics::global().record_index_hit();
                PathResolution {
                    locale: found.locale,
                    route_key: Some(found.route_key),
                    file_path: Some(self.table.file_path(found.route_key)),
                }
            }
            None => {
                RoutingMetrics::global().record_index_miss();
                debug!("No route for path '{}'", path);
                PathResolution::miss()
            }
        }
    }

    /// Strict guard for page-level locale segments.
    pub fn require_locale(&self, segment: &str) -> Result<Locale, RoutingError> {
        Locale::from_code(segment)
            .map_err(|_| RoutingError::not_found(format!("Unknown locale '{}'", segment)))
    }

    /// Resolve an internal `/{locale}{file_path}` path, or `/{locale}{slug}`
    /// where the slug is that locale's own path for the page.
    ///
    /// Returns `Ok(None)` when the first segment does not look like a locale at
    /// all, and `NotFound` when it does but is unsupported or the remainder
    /// names no template.
    pub fn resolve_prefixed(&self, path: &str) -> Result<Option<PathResolution>, RoutingError> {
        let Some(rest) = path.strip_prefix('/') else {
            return Ok(None);
        };
        let segment = rest.split('/').next().unwrap_or("");
        if !looks_like_locale_segment(segment) {
            return Ok(None);
        }

        let locale = self.require_locale(segment)?;
        let remainder = &rest[segment.len()..];
        let file_path = if remainder.is_empty() { "/" } else { remainder };

        let route_key = self
            .table
            .route_key_for_file_path(file_path)
            .or_else(|| {
                RouteKey::ALL
                    .into_iter()
                    .find(|&key| self.table.localized_path(key, locale) == file_path)
            })
            .ok_or_else(|| RoutingError::not_found(format!("No page at '{}'", file_path)))?;

        Ok(Some(PathResolution {
            locale,
            route_key: Some(route_key),
            file_path: Some(self.table.file_path(route_key)),
        }))
    }
}
