//! Application router.
//!
//! Protected routes live under `/api` behind the origin/session/CSRF
//! gate; the landing page and its development asset are unprotected
//! (the landing page is what hands out the cookies in the first place).
//!
//! Middleware uses `Extension<ApiContext>` (injected as the outermost
//! layer); endpoint handlers use `State<ApiContext>`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Multipart bodies carry a full-page scan; cap at 25 MB.
const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Build the application router.
pub fn app_router(ctx: ApiContext) -> Router {
    let protected = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/form/detect", post(endpoints::form::detect))
        .route("/form/draw_boxes", post(endpoints::form::draw_boxes))
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(
            middleware::guard::require_same_origin_session,
        ))
        // Extension must be outermost so the guard can extract ApiContext
        .layer(axum::Extension(ctx.clone()));

    let unprotected = Router::new()
        .route("/", get(endpoints::index::root))
        .route("/dev-preload.jpg", get(endpoints::index::preload_image))
        .with_state(ctx);

    Router::new()
        .nest("/api", protected)
        .merge(unprotected)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
