//! Route table binary - validates the site's route table and prints it
//!
//! Usage:
//!   cargo run --bin routes                   # All locales
//!   cargo run --bin routes -- --locale de    # One locale
//!
//! Exits with an error if the table breaks an integrity rule (missing route,
//! duplicate slug within a locale, duplicate file path, malformed slug).

use anyhow::{bail, Context, Result};
use paris_bike_routes::i18n::Locale;
use paris_bike_routes::routing::{PathResolver, RouteTable};
use std::sync::Arc;
use tracing::info;

fn parse_locale_arg() -> Result<Option<Locale>> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        None => Ok(None),
        Some("--locale") => {
            let code = args.next().context("--locale needs a value")?;
            Ok(Some(Locale::from_code(&code)?))
        }
        Some(other) => bail!("Unknown argument: {}", other),
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("paris_bike_routes=warn".parse()?)
                .add_directive("routes=info".parse()?),
        )
        .init();

    let only = parse_locale_arg()?;

    let table = Arc::new(RouteTable::site().context("Route table is invalid")?);
    let resolver = PathResolver::new(table.clone());
    info!(
        "✓ Route table valid: {} routes, {} distinct paths",
        table.entries().len(),
        resolver.index().len()
    );

    let locales: Vec<Locale> = match only {
        Some(locale) => vec![locale],
        None => Locale::ALL.to_vec(),
    };

    for locale in locales {
        println!("\n─── {} ({}) ───", locale.native_name(), locale);
        for entry in table.entries() {
            let path = entry.paths.get(locale);
            let shared = resolver
                .index()
                .get(path)
                .map_or(false, |found| found.shared);
            println!(
                "  {:<10} {:<36} -> {}{}",
                entry.key.as_str(),
                path,
                entry.file_path,
                if shared { "  (shared)" } else { "" }
            );
        }
    }

    Ok(())
}
