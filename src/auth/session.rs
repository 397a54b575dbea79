//! Session and CSRF token issuance.
//!
//! A session token is `{identifier}.{signature}`: a random identifier
//! signed with HMAC-SHA256. The identifier is URL-safe base64 and the
//! signature is hex, so the `.` delimiter occurs in neither part.
//! The CSRF token is an independent random value delivered in a
//! script-readable cookie and echoed back in a request header
//! (double-submit pattern — no binding to the session is required).

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use base64::Engine;

use crate::auth::signing;

/// Session cookie name (HTTP-only).
pub const SESSION_COOKIE: &str = "formfill_session";
/// CSRF cookie name (readable by the frontend script).
pub const CSRF_COOKIE: &str = "formfill_csrf";
/// Header the frontend echoes the CSRF cookie value in.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Delimiter between session identifier and signature.
const TOKEN_DELIMITER: char = '.';

/// Generate a random opaque token (URL-safe base64, 32 bytes of entropy).
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Mint a fresh signed session token.
pub fn mint_session_token(secret: &str) -> String {
    let identifier = generate_token();
    let signature = signing::sign(secret, &identifier);
    format!("{identifier}{TOKEN_DELIMITER}{signature}")
}

/// Verify a session token: it must split into exactly two parts on the
/// delimiter and the signature must recompute from the secret.
pub fn verify_session_token(secret: &str, token: &str) -> bool {
    let mut parts = token.split(TOKEN_DELIMITER);
    let (Some(identifier), Some(signature), None) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    signing::verify(secret, identifier, signature)
}

/// Attach fresh session + CSRF cookies to an outgoing response.
///
/// `secure` should reflect the request's effective origin scheme.
/// Calling this again issues fresh, unrelated tokens; earlier tokens
/// still verify (the scheme is stateless) but the browser overwrites
/// its cookies.
pub fn issue_cookies(headers: &mut HeaderMap, secret: &str, secure: bool) {
    let session = mint_session_token(secret);
    let csrf = generate_token();

    if let Ok(val) = HeaderValue::from_str(&cookie(SESSION_COOKIE, &session, true, secure)) {
        headers.append(SET_COOKIE, val);
    }
    if let Ok(val) = HeaderValue::from_str(&cookie(CSRF_COOKIE, &csrf, false, secure)) {
        headers.append(SET_COOKIE, val);
    }
}

fn cookie(name: &str, value: &str, http_only: bool, secure: bool) -> String {
    let mut out = format!("{name}={value}; Path=/; SameSite=Lax");
    if http_only {
        out.push_str("; HttpOnly");
    }
    if secure {
        out.push_str("; Secure");
    }
    out
}

/// Extract a named cookie value from the `Cookie` request header.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}
