//! Request authentication: HMAC-signed session tokens, double-submit
//! CSRF tokens, and effective-origin computation.
//!
//! Fully stateless — nothing is stored server-side. A session token is
//! valid iff its signature recomputes from the signing secret, so any
//! number of server instances sharing the secret accept the same cookie.

pub mod origin;
pub mod session;
pub mod signing;
