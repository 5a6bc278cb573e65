//! Request-time session handling
//!
//! The write path (persisting a fresh login into cookies), the read path
//! (reconstructing the authorization header from cookies), and the
//! decision logic for requests arriving without a usable session.
//!
//! Reconstruction failures never fail the pipeline: a corrupted or
//! truncated overflow cookie degrades the request to unauthenticated,
//! which for a page request means a redirect back through the capture
//! flow and for an API request a 401.

use crate::codec;
use crate::config::SessionCookieConfig;
use crate::error::{CodecResult, SessionCodecError};
use crate::registrar::{format_cookie, CookieSlotRegistrar};
use crate::session::{Credentials, SessionCookie};
use crate::slots;
use axum::http::header::{AUTHORIZATION, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};

/// Classification of an inbound request without a usable session,
/// provided by an external collaborator (content negotiation, route
/// metadata, or similar).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Interactive page load; the user can be bounced through the
    /// capture flow.
    Page,
    /// Programmatic call; a redirect would be meaningless.
    Api,
}

/// Value of the cookie `name` on the request, if present.
#[must_use]
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let Ok(cookie_str) = header.to_str() else {
            continue;
        };
        for part in cookie_str.split(';') {
            let part = part.trim();
            if let Some(value) = part.strip_prefix(name) {
                if let Some(value) = value.strip_prefix('=') {
                    return Some(value.trim().to_string());
                }
            }
        }
    }
    None
}

/// Read the K overflow slot values from the request, in slot order,
/// independent of the order cookies appear on the wire.
#[must_use]
pub fn extract_slots(headers: &HeaderMap, config: &SessionCookieConfig) -> Vec<Option<String>> {
    config
        .slot_names()
        .iter()
        .map(|name| cookie_value(headers, name))
        .collect()
}

/// Read and decode the core session cookie from the request, if present
/// and well-formed. A malformed core cookie is treated as absent.
#[must_use]
pub fn read_session(headers: &HeaderMap, config: &SessionCookieConfig) -> Option<SessionCookie> {
    let value = cookie_value(headers, &config.cookie_name)?;
    match SessionCookie::decode_value(&value) {
        Ok(session) => Some(session),
        Err(err) => {
            tracing::debug!(error = %err, "discarding undecodable core session cookie");
            None
        }
    }
}

/// Persist a fresh login.
///
/// A credential within the core cookie's byte budget is stored inline and
/// the splitter is bypassed entirely; anything larger is compressed and
/// split across the overflow slots. Slots the credential does not use are
/// cleared so no residue from an earlier session survives.
///
/// A credential that does not fit the configured slots fails the login
/// with [`SessionCodecError::SlotCapacityExceeded`] rather than being
/// silently truncated.
pub fn store_session<R: CookieSlotRegistrar>(
    username: &str,
    raw_credential: &str,
    config: &SessionCookieConfig,
    registrar: &mut R,
) -> CodecResult<SessionCookie> {
    let session = if raw_credential.len() <= config.inline_max_bytes {
        for name in config.slot_names() {
            registrar.clear_slot(&name);
        }
        SessionCookie::inline(username, raw_credential, config.ttl_seconds)
    } else {
        let compressed = codec::compress(raw_credential.as_bytes())?;
        let fragments = slots::split(&compressed, config.slot_count, config.slot_capacity)?;
        let mut fragment_count = 0;
        for (i, fragment) in fragments.iter().enumerate() {
            let name = slots::slot_name(&config.cookie_name, i + 1);
            if fragment.is_empty() {
                registrar.clear_slot(&name);
            } else {
                registrar.declare_slot(&name, fragment);
                fragment_count += 1;
            }
        }
        SessionCookie::overflow(username, fragment_count, config.ttl_seconds)
    };

    registrar.declare_slot(&config.cookie_name, &session.encode_value()?);
    Ok(session)
}

/// Build the outbound authorization header for an authenticated request.
///
/// For an overflow session the credential is reassembled from the slot
/// cookies present on the request and decompressed; any failure along
/// that path is logged and yields an EMPTY header map, so the request
/// proceeds unauthenticated instead of failing the pipeline.
#[must_use]
pub fn build_auth_header(
    session: &SessionCookie,
    request_headers: &HeaderMap,
    config: &SessionCookieConfig,
) -> HeaderMap {
    let header_value = match &session.credentials {
        Credentials::Inline { header_value } => header_value.clone(),
        Credentials::Overflow { fragment_count } => {
            match reconstruct_credential(request_headers, config, *fragment_count) {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(
                        username = %session.username,
                        error = %err,
                        "failed to reconstruct credential from overflow slots; continuing unauthenticated"
                    );
                    return HeaderMap::new();
                }
            }
        }
    };

    let mut headers = HeaderMap::new();
    match HeaderValue::from_str(&header_value) {
        Ok(value) => {
            headers.insert(AUTHORIZATION, value);
        }
        Err(err) => {
            tracing::warn!(
                username = %session.username,
                error = %err,
                "reconstructed credential is not a valid header value; continuing unauthenticated"
            );
        }
    }
    headers
}

/// Join, decode, and decompress the overflow slots on a request.
fn reconstruct_credential(
    request_headers: &HeaderMap,
    config: &SessionCookieConfig,
    expected_fragments: usize,
) -> CodecResult<String> {
    let fragments = extract_slots(request_headers, config);
    let present = fragments
        .iter()
        .filter(|f| f.as_deref().is_some_and(|v| !v.is_empty()))
        .count();

    let borrowed: Vec<Option<&str>> = fragments.iter().map(|f| f.as_deref()).collect();
    let joined = slots::join(&borrowed)?;

    if present != expected_fragments {
        return Err(SessionCodecError::Decode(format!(
            "expected {expected_fragments} overflow fragments, found {present}"
        )));
    }
    if joined.is_empty() {
        return Err(SessionCodecError::Decode(
            "no overflow fragments present on request".to_string(),
        ));
    }

    let compressed = codec::decode_base64(&joined)?;
    let raw = codec::decompress(&compressed)?;
    String::from_utf8(raw)
        .map_err(|e| SessionCodecError::Decode(format!("credential is not valid UTF-8: {e}")))
}

/// Invalidate a session: expire the core cookie, every overflow slot, and
/// the legacy cookie together. Partial clearing leaves undecodable
/// residue, so all of them go in one call.
pub fn clear_session<R: CookieSlotRegistrar>(config: &SessionCookieConfig, registrar: &mut R) {
    registrar.clear_slot(&config.cookie_name);
    for name in config.slot_names() {
        registrar.clear_slot(&name);
    }
    registrar.clear_slot(&config.legacy_cookie_name);
}

/// Respond to a request arriving without a usable session.
///
/// Page requests are redirected to the capture flow with the desired
/// post-login destination as an escaped `target` parameter (falling back
/// to the landing path), and any cookie left over from the previous
/// incompatible session format is cleared. API requests get a bare 401.
#[must_use]
pub fn on_unauthenticated(
    kind: RequestKind,
    original_path: Option<&str>,
    config: &SessionCookieConfig,
) -> Response {
    match kind {
        RequestKind::Api => StatusCode::UNAUTHORIZED.into_response(),
        RequestKind::Page => {
            let target = original_path
                .filter(|p| !p.is_empty())
                .unwrap_or(config.landing_path.as_str());
            let location = format!(
                "{}?target={}",
                config.capture_path,
                urlencoding::encode(target)
            );
            let mut response = Redirect::temporary(&location).into_response();
            let clear = format_cookie(config, &config.legacy_cookie_name, "", 0);
            if let Ok(value) = HeaderValue::from_str(&clear) {
                response.headers_mut().append(SET_COOKIE, value);
            }
            response
        }
    }
}
