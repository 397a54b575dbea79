//! Effective-origin computation and host normalization.
//!
//! The service may sit behind a reverse proxy, so the origin the browser
//! sees is reconstructed from `X-Forwarded-Proto` / `X-Forwarded-Host`,
//! falling back to the request's own `Host` header and plain http.

use axum::http::header::HOST;
use axum::http::HeaderMap;

/// Scheme and normalized host the service is reachable at, as seen by
/// the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveOrigin {
    pub scheme: String,
    pub host: String,
}

impl EffectiveOrigin {
    pub fn is_https(&self) -> bool {
        self.scheme == "https"
    }
}

/// Compute the effective origin from forwarded headers.
pub fn effective_origin(headers: &HeaderMap) -> EffectiveOrigin {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .map(first_forwarded_value)
        .unwrap_or_else(|| "http".into());

    let host = headers
        .get("x-forwarded-host")
        .or_else(|| headers.get(HOST))
        .and_then(|v| v.to_str().ok())
        .map(first_forwarded_value)
        .unwrap_or_default();

    let host = normalize_host(&host, &scheme);
    EffectiveOrigin { scheme, host }
}

/// Proxies may append to forwarded headers; the first entry is the
/// client-facing one.
fn first_forwarded_value(value: &str) -> String {
    value
        .split(',')
        .next()
        .unwrap_or(value)
        .trim()
        .to_ascii_lowercase()
}

/// Lowercase a host and strip the default port for the scheme.
pub fn normalize_host(host: &str, scheme: &str) -> String {
    let host = host.trim().to_ascii_lowercase();
    let default_port = if scheme == "https" { ":443" } else { ":80" };
    match host.strip_suffix(default_port) {
        Some(stripped) => stripped.to_string(),
        None => host,
    }
}

/// Extract the normalized host from an `Origin` or `Referer` header
/// value (`scheme://host[:port][/path]`). Returns `None` for values
/// without a recognizable origin, including the literal `null`.
pub fn header_host(value: &str) -> Option<String> {
    let (scheme, rest) = value.trim().split_once("://")?;
    let host = rest.split(['/', '?', '#']).next().unwrap_or(rest);
    if host.is_empty() {
        return None;
    }
    Some(normalize_host(host, &scheme.to_ascii_lowercase()))
}
