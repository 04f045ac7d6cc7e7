use std::time::Duration;

use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer, services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::auth::AuthMiddleware;
use crate::error::AppError;
use crate::routes::{auth, matches, users};
use crate::state::AppState;

/// Build the Axum router: public register/login, token-guarded API,
/// static serving for uploaded photos.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route(
            "/api/users",
            get(users::list_users).post(users::create_user),
        )
        .route(
            "/api/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/api/users/:id/stats", get(users::user_stats))
        .route(
            "/api/matches",
            get(matches::list_matches).post(matches::record_match),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            AuthMiddleware::jwt_auth,
        ));

    Router::new()
        // Simple liveness check; also proves DB connectivity.
        .route("/health", get(health))
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login))
        .merge(protected)
        .nest_service("/uploads", ServeDir::new(state.uploads_dir().clone()))
        .with_state(state)
        // Useful default middlewares
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CorsLayer::permissive())
}

/// Liveness + quick DB probe.
async fn health(State(state): State<AppState>) -> Result<&'static str, AppError> {
    infra::db::ping(&state.db).await?;
    Ok("ok")
}
