//! Configuration surface for the session cookie subsystem
//!
//! Pure data: every attribute the codec needs to name, write, and clear
//! cookies lives here. Loading these values from the environment or a
//! config file is the host application's concern.

/// Default core cookie name.
pub const DEFAULT_COOKIE_NAME: &str = "authrelay_session";

/// Default cookie name of the prior (incompatible) session format,
/// cleared whenever an unauthenticated page request is redirected.
pub const DEFAULT_LEGACY_COOKIE_NAME: &str = "authrelay_session_v1";

/// Default session TTL (8 hours).
pub const DEFAULT_TTL_SECONDS: i64 = 8 * 3600;

/// Default number of overflow slots.
pub const DEFAULT_SLOT_COUNT: usize = 2;

/// Default per-slot capacity in characters of encoded text, chosen to stay
/// under common browser/CDN per-cookie limits (4 KB including attributes).
pub const DEFAULT_SLOT_CAPACITY: usize = 3500;

/// Default byte budget for storing a credential inline in the core cookie.
pub const DEFAULT_INLINE_MAX_BYTES: usize = 2048;

/// `SameSite` cookie policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Configuration for the session cookie codec.
///
/// `slot_count` is fixed at write and read time; it is never derived from
/// the credential, so a credential that does not fit is rejected at login
/// rather than discovered truncated on a later request.
#[derive(Debug, Clone)]
pub struct SessionCookieConfig {
    /// Core session cookie name; overflow slots are named `{name}_1..K`.
    pub cookie_name: String,
    /// Cookie name of the previous session format, cleared on redirect.
    pub legacy_cookie_name: String,
    /// Number of overflow slots (K).
    pub slot_count: usize,
    /// Maximum characters of encoded text per overflow slot.
    pub slot_capacity: usize,
    /// Credentials up to this many bytes are stored inline, bypassing
    /// compression and splitting entirely.
    pub inline_max_bytes: usize,
    /// Session lifetime in seconds.
    pub ttl_seconds: i64,
    /// Add the `Secure` attribute (true in production).
    pub secure: bool,
    /// `SameSite` policy for every cookie this subsystem writes.
    pub same_site: SameSite,
    /// Optional `Domain` attribute.
    pub domain: Option<String>,
    /// `Path` attribute, mirroring the application's base path.
    pub path: String,
    /// Capture endpoint unauthenticated page requests are redirected to.
    pub capture_path: String,
    /// Fallback post-login destination when the original path is unknown.
    pub landing_path: String,
}

impl Default for SessionCookieConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            legacy_cookie_name: DEFAULT_LEGACY_COOKIE_NAME.to_string(),
            slot_count: DEFAULT_SLOT_COUNT,
            slot_capacity: DEFAULT_SLOT_CAPACITY,
            inline_max_bytes: DEFAULT_INLINE_MAX_BYTES,
            ttl_seconds: DEFAULT_TTL_SECONDS,
            secure: true,
            same_site: SameSite::Lax,
            domain: None,
            path: "/".to_string(),
            capture_path: "/auth/capture".to_string(),
            landing_path: "/".to_string(),
        }
    }
}

impl SessionCookieConfig {
    /// Names of all K overflow slots in write order.
    #[must_use]
    pub fn slot_names(&self) -> Vec<String> {
        (1..=self.slot_count)
            .map(|i| crate::slots::slot_name(&self.cookie_name, i))
            .collect()
    }
}
