//! Route definitions and router construction.

use std::sync::Arc;

use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use crate::auth::validate_api_key;
use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// All routes under the `/v1` prefix. These are the routes the API-key
/// gate applies to.
///
/// # Path Parameter Syntax
/// Axum 0.8 uses brace syntax for path parameters: `{id}`
fn v1_routes() -> Router<AppState> {
    Router::new()
        .route("/models", get(handlers::system::models))
        .route(
            "/chat/completions",
            post(handlers::completions::chat_completion),
        )
        .route("/completions", post(handlers::completions::completion))
        .route(
            "/chats",
            post(handlers::chats::create).get(handlers::chats::list),
        )
        .route(
            "/chats/{id}",
            get(handlers::chats::get).delete(handlers::chats::remove),
        )
        .route("/chats/{id}/messages", get(handlers::chats::messages))
        .route(
            "/llm-configs",
            post(handlers::llm_configs::create).get(handlers::llm_configs::list),
        )
        .route(
            "/llm-configs/{id}",
            get(handlers::llm_configs::get).delete(handlers::llm_configs::remove),
        )
}

/// Create the main Axum router.
///
/// The root banner and `/health` stay outside the auth gate so probes
/// work without credentials; everything under `/v1` requires the
/// `x-api-key` header when auth is enabled.
pub fn create_router(ctx: AxumContext) -> Router {
    let cors = build_cors_layer(&CorsConfig::from_settings(&ctx.settings));

    let mut api = v1_routes();
    if ctx.settings.enable_auth {
        let expected: Arc<str> = Arc::from(ctx.settings.api_key.as_str());
        api = api.route_layer(middleware::from_fn(move |req: Request, next: Next| {
            let expected = expected.clone();
            async move { validate_api_key(expected, req, next).await }
        }));
    }

    let state: AppState = Arc::new(ctx);

    Router::new()
        .route("/", get(handlers::system::root))
        .route("/health", get(handlers::system::health))
        .nest("/v1", api)
        .layer(cors)
        .with_state(state)
}
