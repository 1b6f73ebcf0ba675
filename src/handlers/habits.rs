use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{CategoryOption, CreateHabitRequest, UpdateHabitRequest};
use crate::error::{AppError, AppResult};
use crate::models::habit::{Habit, HabitCategory};
use crate::AppState;

pub async fn list_habits(State(state): State<AppState>) -> Json<Vec<Habit>> {
    Json(state.habits.list().await)
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(body): Json<CreateHabitRequest>,
) -> AppResult<Json<Habit>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    body.validate_title().map_err(AppError::Validation)?;

    let habit = state.habits.create(body).await?;
    Ok(Json(habit))
}

pub async fn get_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<Uuid>,
) -> AppResult<Json<Habit>> {
    let habit = state.habits.get(habit_id).await?;
    Ok(Json(habit))
}

pub async fn update_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<Uuid>,
    Json(body): Json<UpdateHabitRequest>,
) -> AppResult<Json<Habit>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    body.validate_title().map_err(AppError::Validation)?;

    let habit = state.habits.update(habit_id, body).await?;
    Ok(Json(habit))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    state.habits.delete(habit_id).await?;
    Ok(Json(json!({ "deleted": true })))
}

/// Flip today's completion. Completing bumps the streak; un-completing keeps
/// it and only clears the completion timestamp.
pub async fn toggle_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<Uuid>,
) -> AppResult<Json<Habit>> {
    let habit = state.habits.toggle_completion(habit_id).await?;
    Ok(Json(habit))
}

/// Category picker catalog. Static, same order clients show in the add form.
pub async fn list_categories() -> Json<Vec<CategoryOption>> {
    let options = HabitCategory::ALL
        .into_iter()
        .map(|category| CategoryOption {
            icon: category.icon(),
            value: category,
        })
        .collect();
    Json(options)
}
