use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/habits", post(handlers::create_habit))
        .route("/habits/:id/toggle", post(handlers::toggle_habit))
        .route("/habits/:id/delete", post(handlers::delete_habit))
        .route("/filter", post(handlers::set_filter))
        .route("/theme", post(handlers::toggle_theme))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .with_state(state)
}
