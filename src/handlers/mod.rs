pub mod protected;
pub mod public;

use axum::{
    http::{HeaderValue, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config;
use crate::database::manager::DatabaseManager;
use crate::middleware::jwt_auth_middleware;

/// Build the full application router.
pub fn app() -> Router {
    let mut router = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes())
        .merge(api_routes());

    if config::config().server.enable_cors {
        router = router.layer(cors_layer());
    }

    router.layer(TraceLayer::new_for_http())
}

fn auth_public_routes() -> Router {
    use public::auth;

    Router::new().route("/auth/login", post(auth::login))
}

/// Everything under /api sits behind the session-token middleware.
fn api_routes() -> Router {
    use axum::routing::delete;
    use protected::{auth, deals, screenings};

    Router::new()
        .route("/api/auth/whoami", get(auth::whoami))
        .route("/api/deals", get(deals::deals_get).post(deals::deals_post))
        .route("/api/deals/bulk", post(deals::deals_bulk_post))
        .route("/api/deals/screened", get(deals::screened_get))
        .route(
            "/api/deals/:id",
            get(deals::deal_get)
                .put(deals::deal_put)
                .delete(deals::deal_delete),
        )
        .route("/api/deals/:id/screenings", get(screenings::screenings_get))
        .route(
            "/api/deals/:id/screenings/:screening_id",
            put(screenings::screening_put).delete(screenings::screening_delete),
        )
        .layer(middleware::from_fn(jwt_auth_middleware))
}

fn cors_layer() -> CorsLayer {
    let origins = &config::config().server.cors_origins;

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "DealDesk API",
            "version": version,
            "description": "Deal browsing, filtering, and screening backend",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "login": "/auth/login (public - session token acquisition)",
                "whoami": "/api/auth/whoami (protected)",
                "deals": "/api/deals[/:id] (protected; mutations admin only)",
                "screened": "/api/deals/screened (protected)",
                "screenings": "/api/deals/:id/screenings[/:screening_id] (protected)",
            }
        }
    }))
}

async fn health() -> impl IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
