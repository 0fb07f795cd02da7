//! Navigation and language-switch facade.
//!
//! This is the surface page components use: the current locale, the link for
//! a route, and the equivalent of the current page in another language.

use crate::i18n::{Locale, DEFAULT_LOCALE};
use crate::routing::cookie::LocaleCookie;
use crate::routing::resolver::{internal_path, split_locale_prefix, PathResolver};
use crate::routing::{RouteKey, RoutingMetrics};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Where a language switch lands, plus the preference to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSwitch {
    pub href: &'static str,
    pub cookie: LocaleCookie,
}

/// One `<link rel="alternate" hreflang=...>` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternateLink {
    pub hreflang: String,
    pub href: String,
}

/// Per-render navigation context.
#[derive(Debug, Clone)]
pub struct Navigator {
    resolver: Arc<PathResolver>,
    locale: Locale,
    pathname: String,
}

impl Navigator {
    /// Build the context for one page view.
    ///
    /// The locale comes from the explicit route parameter if it is valid, else
    /// from the pathname (locale prefix, then a locale-specific slug), else the
    /// default.
    pub fn new(resolver: Arc<PathResolver>, route_param: Option<&str>, pathname: &str) -> Self {
        let locale = route_param
            .and_then(Locale::parse_lenient)
            .or_else(|| split_locale_prefix(pathname).map(|(locale, _)| locale))
            .or_else(|| {
                resolver
                    .index()
                    .get(pathname)
                    .filter(|found| !found.shared)
                    .map(|found| found.locale)
            })
            .unwrap_or(DEFAULT_LOCALE);

        Self {
            resolver,
            locale,
            pathname: pathname.to_string(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    /// Every route's link in the current locale.
    pub fn routes(&self) -> BTreeMap<RouteKey, &'static str> {
        self.resolver.table().all_localized_paths(self.locale)
    }

    pub fn create_link(&self, key: RouteKey) -> &'static str {
        self.resolver.table().localized_path(key, self.locale)
    }

    /// The route the current pathname shows, in slug or locale-prefixed form.
    pub fn current_route(&self) -> Option<RouteKey> {
        self.resolver
            .resolve_prefixed(&self.pathname)
            .ok()
            .flatten()
            .and_then(|resolution| resolution.route_key)
            .or_else(|| self.resolver.route_key_from_path(&self.pathname))
    }

    /// The current page in `target`; the target home if the page is unknown.
    pub fn language_switch_url(&self, target: Locale) -> &'static str {
        let key = self.current_route().unwrap_or_else(|| {
            debug!("No route for '{}', switching to home", self.pathname);
            RouteKey::Home
        });
        self.resolver.table().localized_path(key, target)
    }

    /// An explicit switch, which also persists the new preference.
    pub fn switch_language(&self, target: Locale) -> LanguageSwitch {
        RoutingMetrics::global().record_language_switch();
        LanguageSwitch {
            href: self.language_switch_url(target),
            cookie: LocaleCookie::new(target),
        }
    }

    /// hreflang alternates for the current page; empty if the page is unknown.
    pub fn alternate_links(&self, base_url: &str) -> Vec<AlternateLink> {
        match self.current_route() {
            Some(key) => alternate_links_for(&self.resolver, key, base_url),
            None => Vec::new(),
        }
    }
}

/// `path`, read as a `from` page, in locale `to`.
///
/// The route is looked up among `from`'s slugs first, then in any locale.
/// Unknown paths land on `to`'s home.
pub fn alternate_language_url(
    resolver: &PathResolver,
    path: &str,
    from: Locale,
    to: Locale,
) -> &'static str {
    let normalized = path.strip_prefix('/').unwrap_or(path);
    let table = resolver.table();

    let key = table
        .entries()
        .iter()
        .find(|entry| entry.paths.get(from).strip_prefix('/') == Some(normalized))
        .map(|entry| entry.key)
        .or_else(|| resolver.route_key_from_path(path))
        .unwrap_or(RouteKey::Home);

    table.localized_path(key, to)
}

/// One absolute hreflang link per locale plus `x-default`.
///
/// A slug that several locales share cannot tell them apart, so those locales
/// get the locale-prefixed form (`/en/blog`) instead.
pub fn alternate_links_for(
    resolver: &PathResolver,
    key: RouteKey,
    base_url: &str,
) -> Vec<AlternateLink> {
    let base = base_url.trim_end_matches('/');
    let table = resolver.table();

    let href_for = |locale: Locale| {
        let path = table.localized_path(key, locale);
        let shared = resolver.index().get(path).map_or(false, |found| found.shared);
        if shared {
            format!("{}{}", base, internal_path(locale, table.file_path(key)))
        } else {
            format!("{}{}", base, path)
        }
    };

    let mut links: Vec<AlternateLink> = Locale::ALL
        .into_iter()
        .map(|locale| AlternateLink {
            hreflang: locale.code().to_string(),
            href: href_for(locale),
        })
        .collect();

    links.push(AlternateLink {
        hreflang: "x-default".to_string(),
        href: href_for(DEFAULT_LOCALE),
    });

    links
}
