//! The locale preference cookie.
//!
//! Reading is an explicit parameter (the request's `Cookie` header) and
//! writing is an explicit instruction (`LocaleCookie`) attached to one
//! response. Nothing here touches shared state.

use crate::i18n::Locale;
use cookie::time::Duration;
use cookie::{Cookie, SameSite};

pub const LOCALE_COOKIE_NAME: &str = "NEXT_LOCALE";

/// One year, in seconds.
pub const LOCALE_COOKIE_MAX_AGE: i64 = 31_536_000;

/// Instruction to persist a locale preference on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleCookie {
    pub locale: Locale,
    pub secure: bool,
}

impl LocaleCookie {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            secure: false,
        }
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn to_cookie(&self) -> Cookie<'static> {
        Cookie::build((LOCALE_COOKIE_NAME, self.locale.code()))
            .path("/")
            .max_age(Duration::seconds(LOCALE_COOKIE_MAX_AGE))
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build()
    }

    /// Value for a `Set-Cookie` header.
    pub fn header_value(&self) -> String {
        self.to_cookie().to_string()
    }
}

/// Find a cookie's value in a `Cookie` request header.
pub fn read_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key.trim() == name).then(|| value.trim())
    })
}
