//! Locale-aware routing and URL localization for the Paris bike rental and
//! tour site.
//!
//! - `i18n`: supported locales and their metadata
//! - `routing`: route table, path resolution, locale detection, navigation
//! - `server`: the HTTP rewrite layer in front of the page renderer

pub mod config;
pub mod error;
pub mod i18n;
pub mod routing;
pub mod server;
