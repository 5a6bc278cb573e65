//! Session-cookie codec for a federated (SAML-style) authentication flow.
//!
//! The credential obtained at login — an assertion-derived authorization
//! header — can exceed what a single browser cookie holds. This crate
//! compresses such a credential, splits it across a bounded set of
//! fixed-size overflow cookie slots, and losslessly reconstructs it on
//! later requests, together with the session-validity and
//! unauthenticated-request decision logic that consumes it.
//!
//! # Modules
//!
//! - [`codec`] - Lossless deflate compression of the raw credential
//! - [`slots`] - Splitting/joining the encoded blob across cookie slots
//! - [`session`] - The canonical session record and validity check
//! - [`config`] - Cookie names, attributes, TTL, and slot geometry
//! - [`registrar`] - Framework-decoupled Set-Cookie emission
//! - [`middleware`] - Write path, read path, and the unauthenticated
//!   request handler
//!
//! # Failure policy
//!
//! Reconstruction failures (missing, truncated, or corrupted overflow
//! slots) fail open to anonymous: the request continues without an
//! authorization header instead of failing the pipeline. Only the write
//! path surfaces an error, when a credential cannot fit the configured
//! slots at all.
//!
//! # Example
//!
//! ```
//! use authrelay_session::{on_unauthenticated, RequestKind, SessionCookieConfig};
//!
//! let config = SessionCookieConfig::default();
//!
//! // Programmatic calls without a session are rejected outright.
//! let response = on_unauthenticated(RequestKind::Api, None, &config);
//! assert_eq!(response.status(), axum::http::StatusCode::UNAUTHORIZED);
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod middleware;
pub mod registrar;
pub mod session;
pub mod slots;

pub use config::{SameSite, SessionCookieConfig};
pub use error::{CodecResult, SessionCodecError};
pub use middleware::{
    build_auth_header, clear_session, cookie_value, extract_slots, on_unauthenticated,
    read_session, store_session, RequestKind,
};
pub use registrar::{CookieSlotRegistrar, HeaderMapRegistrar};
pub use session::{AuthType, CredentialKind, Credentials, SessionCookie};
