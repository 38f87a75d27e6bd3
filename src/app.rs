use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, patch, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/streaks/:id/toggle", post(handlers::toggle_form))
        .route("/streaks/:id/reset", post(handlers::reset_form))
        .route(
            "/api/streaks",
            get(handlers::list_streaks).post(handlers::create_streak),
        )
        .route("/api/streaks/reorder", post(handlers::reorder_streaks))
        .route(
            "/api/streaks/:id",
            patch(handlers::edit_streak).delete(handlers::delete_streak),
        )
        .route("/api/streaks/:id/toggle", post(handlers::toggle_streak))
        .route("/api/streaks/:id/reset", post(handlers::reset_streak))
        .route("/api/summary", get(handlers::get_summary))
        .with_state(state)
}
