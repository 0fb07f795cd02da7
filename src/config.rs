use anyhow::{bail, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,

    // Absolute origin used for hreflang alternates
    pub public_base_url: String,

    // Mark the locale cookie `Secure` (enable behind HTTPS)
    pub locale_cookie_secure: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),

            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),

            locale_cookie_secure: std::env::var("LOCALE_COOKIE_SECURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        };

        if !config.public_base_url.starts_with("http://")
            && !config.public_base_url.starts_with("https://")
        {
            bail!(
                "PUBLIC_BASE_URL must be an http(s) origin, got '{}'",
                config.public_base_url
            );
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
