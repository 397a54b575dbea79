use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Formfill";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fallback signing secret for local development only.
/// Any real deployment must set `FORMFILL_SESSION_SECRET`.
const DEV_SESSION_SECRET: &str = "formfill-dev-secret-do-not-deploy";

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    "info,formfill=debug".to_string()
}

/// Startup configuration, read from the process environment exactly once
/// and passed by reference into the API layer. Handlers and middleware
/// never touch the environment themselves.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// HMAC key for session token signatures.
    pub session_secret: String,
    /// Vertex AI project for the hosted model endpoint.
    pub gcp_project: String,
    /// Vertex AI location for the hosted model endpoint.
    pub gcp_location: String,
    /// Bearer token for the model endpoint, if one is provided.
    pub gcp_access_token: Option<String>,
    /// Default model for `/api/form/detect` (combined boxes + text).
    pub detect_model: String,
    /// Default model for `/api/form/draw_boxes` (boxes only).
    pub boxes_model: String,
    /// Directory holding static development assets.
    pub asset_dir: PathBuf,
}

impl ServerConfig {
    /// Build configuration from the environment. Called once at startup.
    pub fn from_env() -> Self {
        let session_secret = match env::var("FORMFILL_SESSION_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!(
                    "FORMFILL_SESSION_SECRET not set; using insecure development secret"
                );
                DEV_SESSION_SECRET.to_string()
            }
        };

        let bind_addr = env::var("FORMFILL_BIND")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 5001)));

        Self {
            bind_addr,
            session_secret,
            gcp_project: env::var("GCP_PROJECT").unwrap_or_default(),
            gcp_location: env::var("GCP_LOCATION").unwrap_or_else(|_| "europe-west9".into()),
            gcp_access_token: env::var("GCP_ACCESS_TOKEN").ok().filter(|t| !t.is_empty()),
            detect_model: env::var("FORMFILL_DETECT_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".into()),
            boxes_model: env::var("FORMFILL_BOXES_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash-lite".into()),
            asset_dir: env::var("FORMFILL_ASSET_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Minimal configuration for unit tests — fixed secret, no model access.
    pub fn for_tests(secret: &str) -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            session_secret: secret.to_string(),
            gcp_project: "test-project".into(),
            gcp_location: "europe-west9".into(),
            gcp_access_token: None,
            detect_model: "test-model".into(),
            boxes_model: "test-model-lite".into(),
            asset_dir: PathBuf::from("."),
        }
    }
}
