//! HTTP surface: router, server lifecycle, endpoint handlers, and the
//! same-origin/session/CSRF gate middleware.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;
