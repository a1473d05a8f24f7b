/// Application state and router builder
///
/// Defines the shared application state and builds the Axum router with
/// all routes and middleware.
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                              # Health check (public)
/// └── /v1/                                 # Authenticated (Bearer token)
///     ├── GET    /permissions              # Permission catalog
///     ├── GET    /me/permissions           # Caller's effective set
///     ├── GET    /roles                    # Role definitions
///     ├── POST   /roles                    # Create custom role
///     ├── PUT    /roles/:name/permissions  # Replace a role's permission set
///     ├── POST   /users/:id/roles/:role    # Grant a role
///     ├── DELETE /users/:id/roles/:role    # Revoke a role
///     ├── PUT    /employees/:id/role       # Legacy role field (runs the sync rule)
///     ├── GET    /cases, /cases/:id        # Row-filtered reads
///     ├── GET    /documents, /documents/:id
///     ├── GET    /tasks, /tasks/:id
///     └── GET    /hearings, /hearings/:id
/// ```
///
/// # Middleware Stack
///
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Identity (Bearer-token validation, /v1 only)
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use docket_shared::auth::middleware::create_identity_middleware;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Config;

/// Shared application state
///
/// Cloned into each handler via Axum's `State` extractor; `Arc` keeps the
/// clone cheap.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Everything under /v1 requires an identity token
    let v1_routes = Router::new()
        .route("/permissions", get(routes::permissions::list_permissions))
        .route("/me/permissions", get(routes::access::my_permissions))
        .route("/roles", get(routes::roles::list_roles))
        .route("/roles", post(routes::roles::create_role))
        .route(
            "/roles/:name/permissions",
            put(routes::roles::update_role_permissions),
        )
        .route(
            "/users/:user_id/roles/:role",
            post(routes::roles::grant_role).delete(routes::roles::revoke_role),
        )
        .route(
            "/employees/:user_id/role",
            put(routes::employees::update_employee_role),
        )
        .route("/cases", get(routes::cases::list_cases))
        .route("/cases/:id", get(routes::cases::get_case))
        .route("/documents", get(routes::records::list_documents))
        .route("/documents/:id", get(routes::records::get_document))
        .route("/tasks", get(routes::records::list_tasks))
        .route("/tasks/:id", get(routes::records::get_task))
        .route("/hearings", get(routes::records::list_hearings))
        .route("/hearings/:id", get(routes::records::get_hearing))
        .layer(middleware::from_fn(create_identity_middleware(
            state.config.jwt.secret.clone(),
        )));

    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
