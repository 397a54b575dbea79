//! Same-origin + session + CSRF gate for the protected API routes.
//!
//! Two independent checks run before any handler:
//! 1. If the request carries an `Origin` (or, failing that, `Referer`)
//!    header, its host must match the service's effective origin.
//!    Requests with neither header pass this check and rely on the
//!    session + CSRF checks.
//! 2. The session cookie must carry a valid signature; state-changing
//!    verbs additionally need the CSRF cookie echoed in the
//!    `X-CSRF-Token` header.
//!
//! Every rejection is the same generic 403 — which sub-check failed is
//! logged, never returned.

use axum::http::header::{ORIGIN, REFERER};
use axum::http::{Method, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::auth::{origin, session, signing};

/// Gate invoked on every protected route.
///
/// Accesses `ApiContext` from request extensions (injected by the
/// Extension layer).
pub async fn require_same_origin_session(
    req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    match check(&req) {
        Ok(()) => next.run(req).await,
        Err(err) => err.into_response(),
    }
}

fn check(req: &Request<axum::body::Body>) -> Result<(), ApiError> {
    let ctx = req
        .extensions()
        .get::<ApiContext>()
        .ok_or(ApiError::Internal("missing API context".into()))?;
    let secret = &ctx.config.session_secret;
    let headers = req.headers();

    // 1. Same-origin check against the effective origin.
    let effective = origin::effective_origin(headers);
    let claimed = headers.get(ORIGIN).or_else(|| headers.get(REFERER));
    if let Some(value) = claimed {
        // Unparseable header values fail closed.
        let claimed_host = value.to_str().ok().and_then(origin::header_host);
        if claimed_host.as_deref() != Some(effective.host.as_str()) {
            tracing::warn!(
                claimed = ?value,
                expected = %effective.host,
                "cross-origin request rejected"
            );
            return Err(ApiError::Forbidden);
        }
    }

    // 2. Session signature.
    let token =
        session::cookie_value(headers, session::SESSION_COOKIE).ok_or(ApiError::Forbidden)?;
    if !session::verify_session_token(secret, token) {
        tracing::warn!("session token missing or invalid");
        return Err(ApiError::Forbidden);
    }

    // 3. Double-submit CSRF for state-changing verbs.
    let method = req.method();
    if method == Method::POST
        || method == Method::PUT
        || method == Method::PATCH
        || method == Method::DELETE
    {
        let cookie =
            session::cookie_value(headers, session::CSRF_COOKIE).ok_or(ApiError::Forbidden)?;
        let header = headers
            .get(session::CSRF_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Forbidden)?;
        if !signing::tokens_equal(cookie, header) {
            tracing::warn!("CSRF token mismatch");
            return Err(ApiError::Forbidden);
        }
    }

    Ok(())
}
