//! Cookie slot registrar
//!
//! Decouples the codec from any specific web framework: the core logic
//! declares and clears named cookies through this trait, and the host
//! supplies an implementation over its own response type.

use crate::config::SessionCookieConfig;
use axum::http::{header::SET_COOKIE, HeaderMap, HeaderValue};

/// Declares and clears named physical cookies on an outgoing response.
pub trait CookieSlotRegistrar {
    /// Emit a Set-Cookie for `name` with the configured attributes.
    fn declare_slot(&mut self, name: &str, value: &str);

    /// Emit a Set-Cookie that expires `name` immediately.
    fn clear_slot(&mut self, name: &str);
}

/// Registrar writing Set-Cookie headers into an `axum` header map.
pub struct HeaderMapRegistrar<'a> {
    headers: &'a mut HeaderMap,
    config: &'a SessionCookieConfig,
}

impl<'a> HeaderMapRegistrar<'a> {
    pub fn new(headers: &'a mut HeaderMap, config: &'a SessionCookieConfig) -> Self {
        Self { headers, config }
    }

    fn append(&mut self, cookie: &str) {
        if let Ok(value) = HeaderValue::from_str(cookie) {
            self.headers.append(SET_COOKIE, value);
        }
    }
}

impl CookieSlotRegistrar for HeaderMapRegistrar<'_> {
    fn declare_slot(&mut self, name: &str, value: &str) {
        let cookie = format_cookie(self.config, name, value, self.config.ttl_seconds);
        self.append(&cookie);
    }

    fn clear_slot(&mut self, name: &str) {
        let cookie = format_cookie(self.config, name, "", 0);
        self.append(&cookie);
    }
}

/// Render one Set-Cookie value with the configured attributes.
#[must_use]
pub fn format_cookie(
    config: &SessionCookieConfig,
    name: &str,
    value: &str,
    max_age: i64,
) -> String {
    let secure_flag = if config.secure { "; Secure" } else { "" };
    let domain = match &config.domain {
        Some(d) => format!("; Domain={d}"),
        None => String::new(),
    };
    format!(
        "{name}={value}; HttpOnly{secure_flag}; SameSite={}{domain}; Path={}; Max-Age={max_age}",
        config.same_site.as_str(),
        config.path,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SameSite;

    fn test_config() -> SessionCookieConfig {
        SessionCookieConfig::default()
    }

    #[test]
    fn test_format_cookie_secure() {
        let cookie = format_cookie(&test_config(), "authrelay_session_1", "abc", 3600);
        assert!(cookie.starts_with("authrelay_session_1=abc"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=3600"));
    }

    #[test]
    fn test_format_cookie_not_secure() {
        let mut config = test_config();
        config.secure = false;
        let cookie = format_cookie(&config, "c", "v", 60);
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_format_cookie_with_domain_and_path() {
        let mut config = test_config();
        config.domain = Some("app.example.com".to_string());
        config.path = "/app".to_string();
        config.same_site = SameSite::Strict;
        let cookie = format_cookie(&config, "c", "v", 60);
        assert!(cookie.contains("Domain=app.example.com"));
        assert!(cookie.contains("Path=/app"));
        assert!(cookie.contains("SameSite=Strict"));
    }

    #[test]
    fn test_declare_and_clear_slot() {
        let config = test_config();
        let mut headers = HeaderMap::new();
        let mut registrar = HeaderMapRegistrar::new(&mut headers, &config);
        registrar.declare_slot("authrelay_session_1", "fragment");
        registrar.clear_slot("authrelay_session_2");

        let cookies: Vec<&str> = headers
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(cookies.len(), 2);
        assert!(cookies[0].starts_with("authrelay_session_1=fragment"));
        assert!(cookies[1].starts_with("authrelay_session_2="));
        assert!(cookies[1].contains("Max-Age=0"));
    }
}
