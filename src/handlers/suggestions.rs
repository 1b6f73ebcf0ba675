use axum::{extract::State, Json};
use validator::Validate;

use crate::dto::{CreateHabitRequest, SuggestRequest};
use crate::error::{AppError, AppResult};
use crate::models::habit::Habit;
use crate::models::suggestion::{AiSuggestion, QuickSuggestion, QUICK_SUGGESTIONS};
use crate::AppState;

/// Ask the model for one habit idea matching the goal.
pub async fn suggest(
    State(state): State<AppState>,
    Json(body): Json<SuggestRequest>,
) -> AppResult<Json<AiSuggestion>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    body.validate_goal().map_err(AppError::Validation)?;

    let suggestion = state.ai.suggest_habit(&body.goal).await?;
    Ok(Json(suggestion))
}

/// Serve the static suggestion catalog, no network involved.
pub async fn quick_suggestions() -> Json<Vec<QuickSuggestion>> {
    Json(QUICK_SUGGESTIONS.to_vec())
}

/// Turn a picked suggestion card into a real habit.
pub async fn accept_suggestion(
    State(state): State<AppState>,
    Json(suggestion): Json<AiSuggestion>,
) -> AppResult<Json<Habit>> {
    let body = CreateHabitRequest::from(suggestion);
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    body.validate_title().map_err(AppError::Validation)?;

    let habit = state.habits.create(body).await?;
    Ok(Json(habit))
}
