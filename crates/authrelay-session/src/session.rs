//! Session cookie model and validity check
//!
//! The canonical in-memory representation of a session, independent of how
//! the credential is physically stored. The credential is an explicit
//! tagged enum so "exactly one representation is populated" holds
//! structurally instead of by convention.

use crate::error::{CodecResult, SessionCodecError};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Authentication scheme a session belongs to. Distinguishes sessions of
/// this subsystem from other schemes sharing the same cookie storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthType {
    Saml,
    Oidc,
}

/// How a session's credential is physically stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    /// Small credential carried inline in the core cookie.
    Inline,
    /// Oversized credential compressed and split across overflow slots.
    Overflow,
}

/// Credential representation. The overflow variant does not carry the
/// compressed bytes themselves (those live in the slot cookies); it
/// records how many fragments were written so the reader knows how many
/// slots to expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Credentials {
    Inline { header_value: String },
    Overflow { fragment_count: usize },
}

/// The canonical session record: identity, credential reference, scheme
/// tag, and absolute expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCookie {
    pub username: String,
    pub credentials: Credentials,
    pub auth_type: AuthType,
    pub expiry_time: DateTime<Utc>,
}

impl SessionCookie {
    /// Create a session whose credential fits inline in the core cookie.
    #[must_use]
    pub fn inline(username: impl Into<String>, header_value: impl Into<String>, ttl_seconds: i64) -> Self {
        Self {
            username: username.into(),
            credentials: Credentials::Inline {
                header_value: header_value.into(),
            },
            auth_type: AuthType::Saml,
            expiry_time: Utc::now() + Duration::seconds(ttl_seconds),
        }
    }

    /// Create a session whose credential was split across `fragment_count`
    /// overflow slots.
    #[must_use]
    pub fn overflow(username: impl Into<String>, fragment_count: usize, ttl_seconds: i64) -> Self {
        Self {
            username: username.into(),
            credentials: Credentials::Overflow { fragment_count },
            auth_type: AuthType::Saml,
            expiry_time: Utc::now() + Duration::seconds(ttl_seconds),
        }
    }

    /// Which credential representation this session uses. Drives whether
    /// the writer invokes the splitter at all.
    #[must_use]
    pub fn classify(&self) -> CredentialKind {
        match self.credentials {
            Credentials::Inline { .. } => CredentialKind::Inline,
            Credentials::Overflow { .. } => CredentialKind::Overflow,
        }
    }

    /// Whether this session is usable: scheme tag matches, identity is
    /// present, a credential representation is populated, and the expiry
    /// has not elapsed. Never errors; a structurally present but invalid
    /// cookie is simply "no session".
    #[must_use]
    pub fn is_valid(&self, scheme: AuthType) -> bool {
        if self.auth_type != scheme {
            return false;
        }
        if self.username.is_empty() {
            return false;
        }
        match &self.credentials {
            Credentials::Inline { header_value } if header_value.is_empty() => return false,
            Credentials::Overflow { fragment_count } if *fragment_count == 0 => return false,
            _ => {}
        }
        Utc::now() < self.expiry_time
    }

    /// Encode the core cookie value (JSON + URL-safe base64). The host
    /// framework is expected to encrypt/sign the resulting opaque string.
    pub fn encode_value(&self) -> CodecResult<String> {
        let json = serde_json::to_vec(self)
            .map_err(|e| SessionCodecError::Encode(format!("session serialization failed: {e}")))?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    /// Decode a core cookie value produced by [`encode_value`].
    pub fn decode_value(text: &str) -> CodecResult<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(text)
            .map_err(|e| SessionCodecError::Decode(format!("session cookie base64 failed: {e}")))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| SessionCodecError::Decode(format!("session deserialization failed: {e}")))
    }
}
