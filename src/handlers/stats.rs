//! Derived read models over the habit list. Everything here is computed from
//! the in-memory store snapshot; no handler touches the database.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::dto::{StatsOverviewResponse, TopHabitsQuery};
use crate::models::habit::Habit;
use crate::models::stats::{CategoryStat, DayData};
use crate::AppState;

pub async fn overview(State(state): State<AppState>) -> Json<StatsOverviewResponse> {
    Json(state.habits.overview().await)
}

pub async fn category_breakdown(State(state): State<AppState>) -> Json<Vec<CategoryStat>> {
    Json(state.habits.category_breakdown().await)
}

/// Last seven days, today last. Past days are estimated from current streak
/// lengths rather than a stored history.
pub async fn weekly_series(State(state): State<AppState>) -> Json<Vec<DayData>> {
    Json(state.habits.weekly_series().await)
}

pub async fn top_habits(
    State(state): State<AppState>,
    Query(query): Query<TopHabitsQuery>,
) -> Json<Vec<Habit>> {
    Json(state.habits.top_habits(query.limit()).await)
}

/// Habits not yet completed today, for the nudge list.
pub async fn needs_attention(State(state): State<AppState>) -> Json<Vec<Habit>> {
    Json(state.habits.habits_needing_attention().await)
}
