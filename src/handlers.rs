use crate::errors::AppError;
use crate::models::{NewStreak, ReorderRequest, StreakEdit, StreakView, SummaryResponse};
use crate::state::AppState;
use crate::stats::build_summary;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Redirect},
    Json,
};
use chrono::Local;
use serde_json::{json, Value};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let now = Local::now();
    let data = state.data.lock().await;
    Html(render_index(
        &now.date_naive().to_string(),
        &data.views_at(&now),
    ))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_streaks(State(state): State<AppState>) -> Json<Vec<StreakView>> {
    let now = Local::now();
    let data = state.data.lock().await;
    Json(data.views_at(&now))
}

pub async fn get_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let data = state.data.lock().await;
    Json(build_summary(&data))
}

pub async fn create_streak(
    State(state): State<AppState>,
    Json(payload): Json<NewStreak>,
) -> Result<(StatusCode, Json<StreakView>), AppError> {
    let now = Local::now();
    let streak = state.mutate(|data| data.create(payload, &now)).await?;
    info!(streak_id = %streak.id, repeat = ?streak.repeat_type, "created streak");
    Ok((StatusCode::CREATED, Json(StreakView::at(&streak, &now))))
}

pub async fn edit_streak(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StreakEdit>,
) -> Result<Json<StreakView>, AppError> {
    let streak = state.mutate(|data| data.edit(&id, payload)).await?;
    info!(streak_id = %id, count = streak.count, "edited streak");
    Ok(Json(StreakView::at(&streak, &Local::now())))
}

pub async fn delete_streak(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.mutate(|data| data.remove(&id)).await?;
    info!(streak_id = %id, "deleted streak");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reorder_streaks(
    State(state): State<AppState>,
    Json(payload): Json<ReorderRequest>,
) -> Result<Json<Vec<StreakView>>, AppError> {
    let now = Local::now();
    let views = state
        .mutate(|data| {
            data.reorder(&payload.ids)?;
            Ok(data.views_at(&now))
        })
        .await?;
    Ok(Json(views))
}

pub async fn toggle_streak(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StreakView>, AppError> {
    Ok(Json(apply_toggle(&state, &id).await?))
}

pub async fn reset_streak(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StreakView>, AppError> {
    Ok(Json(apply_reset(&state, &id).await?))
}

pub async fn toggle_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    apply_toggle(&state, &id).await?;
    Ok(Redirect::to("/"))
}

pub async fn reset_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    apply_reset(&state, &id).await?;
    Ok(Redirect::to("/"))
}

async fn apply_toggle(state: &AppState, id: &str) -> Result<StreakView, AppError> {
    let now = Local::now();
    let streak = state.mutate(|data| data.toggle(id, &now)).await?;
    let view = StreakView::at(&streak, &now);
    info!(
        streak_id = %id,
        count = streak.count,
        completed = view.completed_today,
        "toggled streak"
    );
    Ok(view)
}

async fn apply_reset(state: &AppState, id: &str) -> Result<StreakView, AppError> {
    let now = Local::now();
    let streak = state.mutate(|data| data.reset(id, &now)).await?;
    info!(streak_id = %id, "reset streak");
    Ok(StreakView::at(&streak, &now))
}
