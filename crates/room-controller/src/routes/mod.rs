//! HTTP routes for the Room Controller.
//!
//! Defines the Axum router and application state. The store instance is
//! constructed once at process start and injected here; nothing reaches it
//! except through `AppState`.

use crate::auth::TokenService;
use crate::config::Config;
use crate::handlers;
use crate::middleware::{require_auth, AuthState};
use crate::observability::metrics::track_metrics;
use crate::store::{SessionStore, UserDirectory};
use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across all handlers.
pub struct AppState {
    /// Service configuration.
    pub config: Config,

    /// Authoritative meeting table.
    pub store: SessionStore,

    /// Account registry.
    pub users: UserDirectory,

    /// Access-token service.
    pub tokens: TokenService,
}

impl AppState {
    /// Build fresh application state from configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let tokens = TokenService::new(&config.jwt_secret);
        Self {
            config,
            store: SessionStore::new(),
            users: UserDirectory::new(),
            tokens,
        }
    }
}

/// Build the application routes.
///
/// Public routes: health check, register, login. Everything under
/// `/v1/meetings` sits behind the bearer-token middleware.
///
/// Layer order (bottom-to-top execution): timeout, trace, metrics.
pub fn build_routes(state: Arc<AppState>) -> Router {
    let auth_state = Arc::new(AuthState {
        tokens: state.tokens.clone(),
    });

    let public_routes = Router::new()
        .route("/v1/health", get(handlers::health_check))
        .route("/v1/auth/register", post(handlers::register))
        .route("/v1/auth/login", post(handlers::login));

    let protected_routes = Router::new()
        .route(
            "/v1/meetings",
            post(handlers::create_meeting).get(handlers::list_meetings),
        )
        .route(
            "/v1/meetings/:meeting_id/exists",
            get(handlers::check_meeting_exists),
        )
        .route("/v1/meetings/:meeting_id/join", post(handlers::join_meeting))
        .route(
            "/v1/meetings/:meeting_id/leave",
            post(handlers::leave_meeting),
        )
        .route(
            "/v1/meetings/:meeting_id/recording/toggle",
            post(handlers::toggle_recording),
        )
        .route(
            "/v1/meetings/:meeting_id/participants/:participant_id/consent",
            patch(handlers::set_participant_consent),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            auth_state,
            require_auth,
        ));

    let timeout = Duration::from_secs(state.config.request_timeout_seconds);

    public_routes
        .merge(protected_routes)
        .with_state(state)
        .layer(axum_middleware::from_fn(track_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(timeout))
}
