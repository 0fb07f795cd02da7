//! Route table: logical pages and their per-locale URL slugs.
//!
//! Each `RouteEntry` carries a slug for every locale plus a locale-independent
//! file path naming the template that renders the page. A `RouteTable` is
//! validated once when it is built and is read-only afterwards.

use crate::error::{RouteTableError, UnknownRouteKey};
use crate::i18n::{Locale, DEFAULT_LOCALE};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::debug;

/// Logical page identifier, stable across locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKey {
    Home,
    Tours,
    Rent,
    Blog,
    About,
    Contact,
    Faq,
    Terms,
    Privacy,
}

impl RouteKey {
    pub const COUNT: usize = 9;

    pub const ALL: [RouteKey; RouteKey::COUNT] = [
        RouteKey::Home,
        RouteKey::Tours,
        RouteKey::Rent,
        RouteKey::Blog,
        RouteKey::About,
        RouteKey::Contact,
        RouteKey::Faq,
        RouteKey::Terms,
        RouteKey::Privacy,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            RouteKey::Home => "home",
            RouteKey::Tours => "tours",
            RouteKey::Rent => "rent",
            RouteKey::Blog => "blog",
            RouteKey::About => "about",
            RouteKey::Contact => "contact",
            RouteKey::Faq => "faq",
            RouteKey::Terms => "terms",
            RouteKey::Privacy => "privacy",
        }
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteKey {
    type Err = UnknownRouteKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RouteKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownRouteKey(s.to_string()))
    }
}

/// One URL path per locale. A missing locale does not compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalizedPaths {
    pub en: &'static str,
    pub fr: &'static str,
    pub de: &'static str,
    pub nl: &'static str,
    pub es: &'static str,
}

impl LocalizedPaths {
    /// The same path in every locale (e.g. `/blog`).
    pub const fn uniform(path: &'static str) -> Self {
        Self {
            en: path,
            fr: path,
            de: path,
            nl: path,
            es: path,
        }
    }

    pub fn get(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.en,
            Locale::Fr => self.fr,
            Locale::De => self.de,
            Locale::Nl => self.nl,
            Locale::Es => self.es,
        }
    }

    /// `(locale, path)` pairs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (Locale, &'static str)> + '_ {
        Locale::ALL
            .into_iter()
            .map(move |locale| (locale, self.get(locale)))
    }
}

/// One row of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub key: RouteKey,
    pub paths: LocalizedPaths,
    /// Locale-independent template identifier, e.g. `/tours`
    pub file_path: &'static str,
}

/// Routes of the Paris bike rental and tour site.
pub const SITE_ROUTES: [RouteEntry; RouteKey::COUNT] = [
    RouteEntry {
        key: RouteKey::Home,
        paths: LocalizedPaths::uniform("/"),
        file_path: "/",
    },
    RouteEntry {
        key: RouteKey::Tours,
        paths: LocalizedPaths {
            en: "/guided-bike-tour-paris",
            fr: "/visite-guidee-de-paris-a-velo",
            de: "/gefuhrte-fahrradtour-paris",
            nl: "/begeleide-fietstour-parijs",
            es: "/tour-guiado-en-bicicleta-paris",
        },
        file_path: "/tours",
    },
    RouteEntry {
        key: RouteKey::Rent,
        paths: LocalizedPaths {
            en: "/bike-rental-paris",
            fr: "/location-velo-paris",
            de: "/fahrradverleih-paris",
            nl: "/fietsverhuur-parijs",
            es: "/alquiler-de-bicicletas-paris",
        },
        file_path: "/rent",
    },
    RouteEntry {
        key: RouteKey::Blog,
        paths: LocalizedPaths::uniform("/blog"),
        file_path: "/blog",
    },
    RouteEntry {
        key: RouteKey::About,
        paths: LocalizedPaths {
            en: "/about-us",
            fr: "/a-propos",
            de: "/uber-uns",
            nl: "/over-ons",
            es: "/sobre-nosotros",
        },
        file_path: "/about",
    },
    RouteEntry {
        key: RouteKey::Contact,
        paths: LocalizedPaths {
            en: "/contact",
            fr: "/contact",
            de: "/kontakt",
            nl: "/contact",
            es: "/contacto",
        },
        file_path: "/contact",
    },
    RouteEntry {
        key: RouteKey::Faq,
        paths: LocalizedPaths {
            en: "/faq",
            fr: "/faq",
            de: "/haufige-fragen",
            nl: "/veelgestelde-vragen",
            es: "/preguntas-frecuentes",
        },
        file_path: "/faq",
    },
    RouteEntry {
        key: RouteKey::Terms,
        paths: LocalizedPaths {
            en: "/terms-and-conditions",
            fr: "/conditions-generales",
            de: "/allgemeine-geschaftsbedingungen",
            nl: "/algemene-voorwaarden",
            es: "/terminos-y-condiciones",
        },
        file_path: "/terms",
    },
    RouteEntry {
        key: RouteKey::Privacy,
        paths: LocalizedPaths {
            en: "/privacy-policy",
            fr: "/politique-de-confidentialite",
            de: "/datenschutz",
            nl: "/privacybeleid",
            es: "/politica-de-privacidad",
        },
        file_path: "/privacy",
    },
];

static SLUG_REGEX: OnceLock<Regex> = OnceLock::new();

fn slug_regex() -> &'static Regex {
    SLUG_REGEX.get_or_init(|| {
        Regex::new(r"^/(?:[a-z0-9]+(?:-[a-z0-9]+)*(?:/[a-z0-9]+(?:-[a-z0-9]+)*)*)?$")
            .expect("slug regex is valid")
    })
}

/// Validated, immutable route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    // Sorted by key, so `entries[key as usize]` is the entry for `key`
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Build a table, checking every integrity rule.
    ///
    /// Every `RouteKey` must appear exactly once.
    pub fn new(entries: impl IntoIterator<Item = RouteEntry>) -> Result<Self, RouteTableError> {
        let mut entries: Vec<RouteEntry> = entries.into_iter().collect();
        entries.sort_by_key(|entry| entry.key);

        validate(&entries)?;

        debug!("Route table validated: {} routes", entries.len());
        Ok(Self { entries })
    }

    /// The site's built-in table.
    pub fn site() -> Result<Self, RouteTableError> {
        Self::new(SITE_ROUTES)
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn entry(&self, key: RouteKey) -> &RouteEntry {
        &self.entries[key as usize]
    }

    /// The configured path for `key` in `locale`, verbatim.
    pub fn localized_path(&self, key: RouteKey, locale: Locale) -> &'static str {
        self.entry(key).paths.get(locale)
    }

    /// `localized_path` in the default locale.
    pub fn localized_path_default(&self, key: RouteKey) -> &'static str {
        self.localized_path(key, DEFAULT_LOCALE)
    }

    /// Every route's path in one locale, for building a whole nav bar at once.
    pub fn all_localized_paths(&self, locale: Locale) -> BTreeMap<RouteKey, &'static str> {
        self.entries
            .iter()
            .map(|entry| (entry.key, entry.paths.get(locale)))
            .collect()
    }

    pub fn file_path(&self, key: RouteKey) -> &'static str {
        self.entry(key).file_path
    }

    /// Which route renders a given file path, for locale-prefixed requests.
    pub fn route_key_for_file_path(&self, file_path: &str) -> Option<RouteKey> {
        self.entries
            .iter()
            .find(|entry| entry.file_path == file_path)
            .map(|entry| entry.key)
    }
}

fn validate(entries: &[RouteEntry]) -> Result<(), RouteTableError> {
    for (index, key) in RouteKey::ALL.into_iter().enumerate() {
        match entries.get(index) {
            Some(entry) if entry.key == key => {}
            Some(entry) if index > 0 && entries[index - 1].key == entry.key => {
                return Err(RouteTableError::DuplicateRoute {
                    route: entry.key.to_string(),
                });
            }
            _ => {
                return Err(RouteTableError::MissingRoute {
                    route: key.to_string(),
                })
            }
        }
    }
    if let Some(extra) = entries.get(RouteKey::COUNT) {
        return Err(RouteTableError::DuplicateRoute {
            route: extra.key.to_string(),
        });
    }

    for entry in entries {
        for (locale, path) in entry.paths.iter() {
            if path.is_empty() {
                return Err(RouteTableError::EmptyPath {
                    route: entry.key.to_string(),
                    locale: locale.to_string(),
                });
            }
            if !slug_regex().is_match(path) {
                return Err(RouteTableError::InvalidPath {
                    route: entry.key.to_string(),
                    locale: locale.to_string(),
                    path: path.to_string(),
                });
            }
            if entry.key == RouteKey::Home && path != "/" {
                return Err(RouteTableError::HomeNotRoot {
                    locale: locale.to_string(),
                    path: path.to_string(),
                });
            }
        }
        if !slug_regex().is_match(entry.file_path) {
            return Err(RouteTableError::InvalidPath {
                route: entry.key.to_string(),
                locale: "*".to_string(),
                path: entry.file_path.to_string(),
            });
        }
    }

    let mut file_paths: HashMap<&str, RouteKey> = HashMap::new();
    for entry in entries {
        if let Some(first) = file_paths.insert(entry.file_path, entry.key) {
            return Err(RouteTableError::DuplicateFilePath {
                file_path: entry.file_path.to_string(),
                first: first.to_string(),
                second: entry.key.to_string(),
            });
        }
    }

    for locale in Locale::ALL {
        let mut seen: HashMap<&str, RouteKey> = HashMap::new();
        for entry in entries {
            let path = entry.paths.get(locale);
            if let Some(first) = seen.insert(path, entry.key) {
                return Err(RouteTableError::DuplicatePath {
                    path: path.to_string(),
                    locale: locale.to_string(),
                    first: first.to_string(),
                    second: entry.key.to_string(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> RouteTable {
        RouteTable::site().expect("site table is valid")
    }

    fn with_replaced(key: RouteKey, replace: impl FnOnce(&mut RouteEntry)) -> Vec<RouteEntry> {
        let mut entries = SITE_ROUTES.to_vec();
        let entry = entries
            .iter_mut()
            .find(|entry| entry.key == key)
            .unwrap();
        replace(entry);
        entries
    }

    // ==================== RouteKey Tests ====================

    #[test]
    fn test_route_key_string_roundtrip() {
        for key in RouteKey::ALL {
            assert_eq!(key.as_str().parse::<RouteKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_route_key_unknown() {
        let err = "shop".parse::<RouteKey>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown route key: 'shop'");
    }

    #[test]
    fn test_route_key_all_matches_discriminants() {
        for (index, key) in RouteKey::ALL.into_iter().enumerate() {
            assert_eq!(key as usize, index);
        }
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn test_tours_in_french() {
        assert_eq!(
            site().localized_path(RouteKey::Tours, Locale::Fr),
            "/visite-guidee-de-paris-a-velo"
        );
    }

    #[test]
    fn test_tours_in_english() {
        assert_eq!(
            site().localized_path(RouteKey::Tours, Locale::En),
            "/guided-bike-tour-paris"
        );
    }

    #[test]
    fn test_about_in_german_and_dutch() {
        let table = site();
        assert_eq!(table.localized_path(RouteKey::About, Locale::De), "/uber-uns");
        assert_eq!(table.localized_path(RouteKey::About, Locale::Nl), "/over-ons");
    }

    #[test]
    fn test_default_locale_lookup() {
        assert_eq!(site().localized_path_default(RouteKey::Rent), "/location-velo-paris");
    }

    #[test]
    fn test_completeness() {
        let table = site();
        for key in RouteKey::ALL {
            for locale in Locale::ALL {
                assert!(!table.localized_path(key, locale).is_empty());
            }
        }
    }

    #[test]
    fn test_home_is_root_everywhere() {
        let table = site();
        for locale in Locale::ALL {
            assert_eq!(table.localized_path(RouteKey::Home, locale), "/");
        }
    }

    #[test]
    fn test_all_localized_paths_has_every_key() {
        let paths = site().all_localized_paths(Locale::Es);
        assert_eq!(paths.len(), RouteKey::COUNT);
        assert_eq!(paths[&RouteKey::Contact], "/contacto");
        assert_eq!(paths[&RouteKey::Home], "/");
    }

    #[test]
    fn test_file_path_lookup() {
        let table = site();
        assert_eq!(table.file_path(RouteKey::Tours), "/tours");
        assert_eq!(table.route_key_for_file_path("/about"), Some(RouteKey::About));
        assert_eq!(table.route_key_for_file_path("/"), Some(RouteKey::Home));
        assert_eq!(table.route_key_for_file_path("/shop"), None);
    }

    #[test]
    fn test_entries_are_sorted_by_key() {
        let mut shuffled = SITE_ROUTES.to_vec();
        shuffled.reverse();
        let table = RouteTable::new(shuffled).unwrap();
        for key in RouteKey::ALL {
            assert_eq!(table.entry(key).key, key);
        }
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_site_table_is_valid() {
        assert!(RouteTable::site().is_ok());
    }

    #[test]
    fn test_file_paths_are_unique() {
        let table = site();
        let mut file_paths: Vec<_> = table.entries().iter().map(|e| e.file_path).collect();
        file_paths.sort();
        file_paths.dedup();
        assert_eq!(file_paths.len(), RouteKey::COUNT);
    }

    #[test]
    fn test_rejects_missing_route() {
        let entries: Vec<_> = SITE_ROUTES
            .into_iter()
            .filter(|entry| entry.key != RouteKey::Faq)
            .collect();
        assert_eq!(
            RouteTable::new(entries).unwrap_err(),
            RouteTableError::MissingRoute {
                route: "faq".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_duplicate_route() {
        let mut entries = SITE_ROUTES.to_vec();
        entries.push(SITE_ROUTES[2]);
        assert!(matches!(
            RouteTable::new(entries),
            Err(RouteTableError::DuplicateRoute { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_path() {
        let entries = with_replaced(RouteKey::Rent, |entry| entry.paths.nl = "");
        assert_eq!(
            RouteTable::new(entries).unwrap_err(),
            RouteTableError::EmptyPath {
                route: "rent".to_string(),
                locale: "nl".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_decorated_path() {
        for bad in ["blog", "/blog/", "/Blog", "/blog?x=1", "/über-uns"] {
            let entries = with_replaced(RouteKey::Blog, |entry| entry.paths.de = bad);
            assert!(
                matches!(
                    RouteTable::new(entries),
                    Err(RouteTableError::InvalidPath { .. })
                ),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_rejects_home_not_root() {
        let entries = with_replaced(RouteKey::Home, |entry| entry.paths.es = "/inicio");
        assert_eq!(
            RouteTable::new(entries).unwrap_err(),
            RouteTableError::HomeNotRoot {
                locale: "es".to_string(),
                path: "/inicio".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_duplicate_file_path() {
        let entries = with_replaced(RouteKey::Privacy, |entry| entry.file_path = "/terms");
        assert!(matches!(
            RouteTable::new(entries),
            Err(RouteTableError::DuplicateFilePath { .. })
        ));
    }

    #[test]
    fn test_rejects_same_locale_collision() {
        let entries = with_replaced(RouteKey::Faq, |entry| entry.paths.en = "/contact");
        assert_eq!(
            RouteTable::new(entries).unwrap_err(),
            RouteTableError::DuplicatePath {
                path: "/contact".to_string(),
                locale: "en".to_string(),
                first: "contact".to_string(),
                second: "faq".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_collision_with_home() {
        let entries = with_replaced(RouteKey::Blog, |entry| entry.paths.fr = "/");
        assert!(matches!(
            RouteTable::new(entries),
            Err(RouteTableError::DuplicatePath { .. })
        ));
    }

    #[test]
    fn test_allows_shared_slug_across_locales() {
        // Same key, same slug in several locales is fine
        let entries = with_replaced(RouteKey::Terms, |entry| {
            entry.paths = LocalizedPaths::uniform("/terms")
        });
        assert!(RouteTable::new(entries).is_ok());
    }
}
