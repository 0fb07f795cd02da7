//! Locale type: the closed set of languages the site is published in.
//!
//! Every place that branches on a locale matches on this enum, so adding or
//! removing a language is a compile-checked change.

use crate::error::LocaleError;
use crate::i18n::{LocaleConfig, LocaleRegistry, DEFAULT_LOCALE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Fr,
    De,
    Nl,
    Es,
}

impl Locale {
    pub const COUNT: usize = 5;

    /// Every locale, in registry order.
    pub const ALL: [Locale; Locale::COUNT] =
        [Locale::En, Locale::Fr, Locale::De, Locale::Nl, Locale::Es];

    /// ISO 639-1 code (e.g., "en", "fr").
    pub const fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
            Locale::De => "de",
            Locale::Nl => "nl",
            Locale::Es => "es",
        }
    }

    /// Strict parse of an exact, lowercase code.
    ///
    /// # Example
    /// ```
    /// use paris_bike_routes::i18n::Locale;
    ///
    /// assert_eq!(Locale::from_code("nl").unwrap(), Locale::Nl);
    /// assert!(Locale::from_code("ja").is_err());
    /// ```
    pub fn from_code(code: &str) -> Result<Locale, LocaleError> {
        LocaleRegistry::get()
            .get_by_code(code)
            .map(|config| config.locale)
            .ok_or_else(|| LocaleError::Unknown(code.to_string()))
    }

    /// Lenient parse for untrusted input: trims and ignores ASCII case.
    pub fn parse_lenient(code: &str) -> Option<Locale> {
        let code = code.trim();
        Locale::ALL
            .into_iter()
            .find(|locale| locale.code().eq_ignore_ascii_case(code))
    }

    /// Normalize an untrusted code, falling back to the default locale.
    pub fn from_code_or_default(code: &str) -> Locale {
        Locale::parse_lenient(code).unwrap_or(DEFAULT_LOCALE)
    }

    pub fn config(self) -> &'static LocaleConfig {
        LocaleRegistry::get().config(self)
    }

    /// English name of the language (e.g., "French").
    pub fn display_name(self) -> &'static str {
        self.config().name
    }

    /// Native name of the language (e.g., "Français").
    pub fn native_name(self) -> &'static str {
        self.config().native_name
    }

    pub fn is_default(self) -> bool {
        self == DEFAULT_LOCALE
    }
}

impl Default for Locale {
    fn default() -> Self {
        DEFAULT_LOCALE
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::from_code(s)
    }
}

/// True iff `code` is exactly one of the supported locale codes.
pub fn is_valid_locale(code: &str) -> bool {
    LocaleRegistry::get().is_supported(code)
}
