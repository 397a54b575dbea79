//! Formfill server binary.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use formfill::api::server;
use formfill::api::types::ApiContext;
use formfill::config::{self, ServerConfig};
use formfill::detect::GeminiDetector;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = Arc::new(ServerConfig::from_env());
    let detector = Arc::new(GeminiDetector::new(&config));
    let ctx = ApiContext::new(config.clone(), detector);

    if let Err(e) = server::serve(ctx, config.bind_addr).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
