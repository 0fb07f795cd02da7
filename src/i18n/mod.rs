//! Internationalization (i18n) module.
//!
//! Holds the closed set of supported locales and their display metadata.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for locale metadata and the default locale
//! - `locale`: Type-safe `Locale` enum used everywhere a language is passed around
//!
//! # Example
//!
//! ```
//! use paris_bike_routes::i18n::{Locale, LocaleRegistry, DEFAULT_LOCALE};
//!
//! assert_eq!(DEFAULT_LOCALE, Locale::Fr);
//! assert_eq!(Locale::from_code_or_default("xx"), Locale::Fr);
//! assert_eq!(LocaleRegistry::get().list_all().len(), 5);
//! ```

mod locale;
mod registry;

pub use locale::{is_valid_locale, Locale};
pub use registry::{LocaleConfig, LocaleRegistry, DEFAULT_LOCALE};
