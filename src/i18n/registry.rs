//! Locale registry: Single source of truth for all supported locales.
//!
//! The registry holds the display metadata for every `Locale` variant. It is
//! built once on first access via `OnceLock` and stays immutable afterwards.

use crate::i18n::Locale;
use std::sync::OnceLock;

/// The locale used whenever no other signal is available.
pub const DEFAULT_LOCALE: Locale = Locale::Fr;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    pub locale: Locale,

    /// ISO 639-1 code (e.g., "en", "fr")
    pub code: &'static str,

    /// English name of the language (e.g., "French", "Dutch")
    pub name: &'static str,

    /// Native name of the language (e.g., "Français", "Nederlands")
    pub native_name: &'static str,

    /// Whether this is the default locale (exactly one is)
    pub is_default: bool,
}

/// Global locale registry singleton.
pub struct LocaleRegistry {
    // Indexed by `Locale as usize`
    locales: [LocaleConfig; Locale::COUNT],
}

static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    ///
    /// This method initializes the registry on first call and returns a reference
    /// to the singleton instance on subsequent calls.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: Locale::ALL.map(locale_config),
        })
    }

    /// Configuration for a locale. Total, since every variant is registered.
    pub fn config(&self, locale: Locale) -> &LocaleConfig {
        &self.locales[locale as usize]
    }

    /// Get a locale configuration by its exact code.
    ///
    /// # Returns
    /// * `Some(&LocaleConfig)` if the code is supported
    /// * `None` otherwise
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|config| config.code == code)
    }

    /// All locales in registry order.
    pub fn list_all(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().collect()
    }

    /// The default locale configuration.
    pub fn default_config(&self) -> &LocaleConfig {
        self.config(DEFAULT_LOCALE)
    }

    /// Check if a code names a supported locale.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }

    /// English display name for an arbitrary code.
    ///
    /// Unknown codes fall back to the code itself, so rendering paths never fail.
    pub fn display_name_for_code<'a>(&self, code: &'a str) -> &'a str {
        match self.get_by_code(code) {
            Some(config) => config.name,
            None => code,
        }
    }

    /// Native display name for an arbitrary code, with the same fallback.
    pub fn native_name_for_code<'a>(&self, code: &'a str) -> &'a str {
        match self.get_by_code(code) {
            Some(config) => config.native_name,
            None => code,
        }
    }
}

fn locale_config(locale: Locale) -> LocaleConfig {
    let (name, native_name) = match locale {
        Locale::En => ("English", "English"),
        Locale::Fr => ("French", "Français"),
        Locale::De => ("German", "Deutsch"),
        Locale::Nl => ("Dutch", "Nederlands"),
        Locale::Es => ("Spanish", "Español"),
    };

    LocaleConfig {
        locale,
        code: locale.code(),
        name,
        native_name,
        is_default: locale == DEFAULT_LOCALE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LocaleRegistry::get();
        let registry2 = LocaleRegistry::get();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_config_is_indexed_by_variant() {
        let registry = LocaleRegistry::get();
        for locale in Locale::ALL {
            assert_eq!(registry.config(locale).locale, locale);
            assert_eq!(registry.config(locale).code, locale.code());
        }
    }

    #[test]
    fn test_get_by_code_french() {
        let config = LocaleRegistry::get().get_by_code("fr").unwrap();

        assert_eq!(config.locale, Locale::Fr);
        assert_eq!(config.name, "French");
        assert_eq!(config.native_name, "Français");
        assert!(config.is_default);
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LocaleRegistry::get().get_by_code("ja").is_none());
        assert!(LocaleRegistry::get().get_by_code("").is_none());
    }

    #[test]
    fn test_get_by_code_is_exact() {
        // Case folding is the parser's job, not the registry's
        assert!(LocaleRegistry::get().get_by_code("FR").is_none());
    }

    #[test]
    fn test_list_all_in_declaration_order() {
        let codes: Vec<_> = LocaleRegistry::get()
            .list_all()
            .iter()
            .map(|config| config.code)
            .collect();
        assert_eq!(codes, vec!["en", "fr", "de", "nl", "es"]);
    }

    #[test]
    fn test_exactly_one_default() {
        let defaults: Vec<_> = LocaleRegistry::get()
            .list_all()
            .into_iter()
            .filter(|config| config.is_default)
            .collect();

        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].locale, DEFAULT_LOCALE);
        assert_eq!(LocaleRegistry::get().default_config().code, "fr");
    }

    #[test]
    fn test_is_supported() {
        let registry = LocaleRegistry::get();
        assert!(registry.is_supported("nl"));
        assert!(!registry.is_supported("it"));
    }

    #[test]
    fn test_display_name_fallbacks() {
        let registry = LocaleRegistry::get();
        assert_eq!(registry.display_name_for_code("de"), "German");
        assert_eq!(registry.native_name_for_code("es"), "Español");
        assert_eq!(registry.display_name_for_code("xx"), "xx");
        assert_eq!(registry.native_name_for_code("xx"), "xx");
    }
}
