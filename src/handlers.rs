use crate::errors::{AppError, HabitError};
use crate::models::{Dashboard, Draft, FilterForm, HabitId, ToggleForm};
use crate::state::AppState;
use crate::tracker::{Reload, Tracker};
use crate::ui::render_index;
use crate::view::Filter;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use tracing::debug;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let mut tracker = state.tracker.lock().await;
    if let Err(err) = tracker.reload().await {
        debug!("rendering last snapshot after failed reload: {err}");
    }
    Html(render_index(&tracker.render_once()))
}

pub async fn get_dashboard(State(state): State<AppState>) -> Result<Json<Dashboard>, Response> {
    let mut tracker = state.tracker.lock().await;
    let reloaded = tracker.reload().await.map(|_| ());
    match reloaded {
        Ok(()) => Ok(Json(tracker.dashboard())),
        Err(err) => {
            // the error is the response body; it must not linger for the html page
            tracker.dismiss_notice();
            Err((err.status_code(), err.to_string()).into_response())
        }
    }
}

pub async fn create_habit(State(state): State<AppState>, Form(draft): Form<Draft>) -> Response {
    let mut tracker = state.tracker.lock().await;
    let outcome = tracker.create(draft).await;
    respond(&mut tracker, outcome)
}

pub async fn toggle_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ToggleForm>,
) -> Response {
    let mut tracker = state.tracker.lock().await;
    let outcome = tracker.toggle(&HabitId::from(id), form.completed).await;
    respond(&mut tracker, outcome)
}

pub async fn delete_habit(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let mut tracker = state.tracker.lock().await;
    let outcome = tracker.delete(&HabitId::from(id)).await;
    respond(&mut tracker, outcome)
}

pub async fn set_filter(
    State(state): State<AppState>,
    Form(form): Form<FilterForm>,
) -> Result<Redirect, AppError> {
    let filter = Filter::parse(&form.category).ok_or_else(|| {
        AppError::bad_request(format!("unknown category filter '{}'", form.category))
    })?;

    state.tracker.lock().await.set_filter(filter);
    Ok(Redirect::to("/"))
}

pub async fn toggle_theme(State(state): State<AppState>) -> Redirect {
    state.tracker.lock().await.toggle_theme();
    Redirect::to("/")
}

/// Immediate reloads go through `GET /`; a deferred one shows the
/// placeholder page, which refreshes itself. Failures re-render the
/// unchanged snapshot with the notice.
fn respond(tracker: &mut Tracker, outcome: Result<Reload, HabitError>) -> Response {
    match outcome {
        Ok(Reload::Now) => Redirect::to("/").into_response(),
        Ok(Reload::After(_)) => Html(render_index(&tracker.render_once())).into_response(),
        Err(err) => (err.status_code(), Html(render_index(&tracker.render_once()))).into_response(),
    }
}
