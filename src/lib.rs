pub mod api; // HTTP surface: router, endpoints, same-origin gate
pub mod auth; // Signed session tokens + CSRF double-submit
pub mod config;
pub mod detect; // Hosted-model field detection + normalization
