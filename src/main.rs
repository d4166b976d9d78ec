use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use condo_api_rust::auth::rate_limit::{InMemoryRateLimitStore, RateLimitStore};
use condo_api_rust::config;
use condo_api_rust::database::manager::DatabaseManager;
use condo_api_rust::handlers;
use condo_api_rust::middleware::auth::jwt_auth_middleware;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let app_config = config::config();
    tracing::info!("Starting Condo API in {:?} mode", app_config.environment);

    // Best effort at startup; the health endpoint reports degraded state if
    // the database is unreachable, and pools connect lazily afterwards.
    if app_config.database.run_migrations && std::env::var("DATABASE_URL").is_ok() {
        if let Err(e) = DatabaseManager::run_migrations().await {
            tracing::warn!("Skipping migrations: {}", e);
        }
    }

    // Single-instance deployments use the in-process counter; swap the store
    // here to share login rate limits across instances.
    let rate_limit: Arc<dyn RateLimitStore> = Arc::new(InMemoryRateLimitStore::from_config());

    let app = app(rate_limit);

    // Allow tests or deployments to override port via env
    let port = std::env::var("CONDO_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Condo API server listening on http://{}", bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("server");
}

fn app(rate_limit: Arc<dyn RateLimitStore>) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth routes
        .merge(auth_public_routes())
        // Protected API behind JWT middleware
        .merge(api_routes())
        // Global middleware
        .layer(Extension(rate_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn auth_public_routes() -> Router {
    use axum::routing::post;
    use handlers::public::auth;

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/verify", post(auth::verify_email))
        .route("/auth/password/forgot", post(auth::forgot_password))
        .route("/auth/password/reset", post(auth::reset_password))
        .route("/auth/google/callback", get(auth::google_callback))
}

fn api_routes() -> Router {
    use axum::routing::{post, put};
    use handlers::protected::{account, condominiums, financial_entries, residents, units, users};

    Router::new()
        // Account
        .route("/api/auth/whoami", get(account::whoami))
        .route("/api/auth/onboarding", post(account::complete_onboarding))
        .route("/api/auth/link/google", post(account::link_google))
        // Condominiums
        .route(
            "/api/condominiums",
            get(condominiums::list).post(condominiums::create),
        )
        .route(
            "/api/condominiums/:id",
            get(condominiums::get)
                .put(condominiums::update)
                .delete(condominiums::delete),
        )
        // Units (scoped under their condominium)
        .route(
            "/api/condominiums/:id/units",
            get(units::list).post(units::create),
        )
        .route("/api/units/:id", put(units::update).delete(units::delete))
        // Residents (scoped under their unit)
        .route(
            "/api/units/:id/residents",
            get(residents::list).post(residents::create),
        )
        .route(
            "/api/residents/:id",
            put(residents::update).delete(residents::delete),
        )
        // Financial entries (scoped under their condominium)
        .route(
            "/api/condominiums/:id/entries",
            get(financial_entries::list).post(financial_entries::create),
        )
        .route(
            "/api/entries/:id",
            put(financial_entries::update).delete(financial_entries::delete),
        )
        // Tenant user management
        .route("/api/users", get(users::list).post(users::create))
        .route_layer(axum::middleware::from_fn(jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Condo API (Rust)",
            "version": version,
            "description": "Multi-tenant condominium management backend built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/auth/register, /auth/login, /auth/verify, /auth/password/*, /auth/google/callback (public)",
                "account": "/api/auth/* (protected)",
                "condominiums": "/api/condominiums[/:id] (protected)",
                "units": "/api/condominiums/:id/units, /api/units/:id (protected)",
                "residents": "/api/units/:id/residents, /api/residents/:id (protected)",
                "entries": "/api/condominiums/:id/entries, /api/entries/:id (protected)",
                "users": "/api/users (protected)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
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
