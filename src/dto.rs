//! # HabitHero Request/Response DTOs
//!
//! All API contract types in one module. Each struct maps 1:1 to a JSON
//! shape served under `/api`.
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body or query params
//! - `*Response` → serialized to client JSON
//! - Simple bounds are expressed via `validator` derive macros; rules the
//!   derives cannot express (trimmed-length checks) live in helper methods

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::habit::{HabitCategory, HabitFrequency};
use crate::models::suggestion::AiSuggestion;

// ============================================================================
// Habits
// ============================================================================

/// POST /api/habits
#[derive(Debug, Deserialize, Validate)]
pub struct CreateHabitRequest {
    pub title: String,

    /// Defaults to `other` when omitted
    pub category: Option<HabitCategory>,

    /// Defaults to `daily` when omitted
    pub frequency: Option<HabitFrequency>,

    /// Local time of day for the reminder, e.g. "07:30:00"
    pub reminder_time: Option<NaiveTime>,

    #[validate(length(max = 500, message = "Notes must be less than 500 characters"))]
    pub notes: Option<String>,
}

/// PUT /api/habits/:id
///
/// Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateHabitRequest {
    pub title: Option<String>,
    pub category: Option<HabitCategory>,
    pub frequency: Option<HabitFrequency>,
    pub reminder_time: Option<NaiveTime>,

    /// A blank string clears the notes
    #[validate(length(max = 500, message = "Notes must be less than 500 characters"))]
    pub notes: Option<String>,
}

impl CreateHabitRequest {
    /// Length limits apply to the trimmed title, which the derive cannot see
    pub fn validate_title(&self) -> Result<(), String> {
        check_title(&self.title)
    }
}

impl UpdateHabitRequest {
    pub fn validate_title(&self) -> Result<(), String> {
        match &self.title {
            Some(title) => check_title(title),
            None => Ok(()),
        }
    }
}

fn check_title(title: &str) -> Result<(), String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err("Habit name is required".into());
    }
    if trimmed.chars().count() < 3 {
        return Err("Habit name must be at least 3 characters".into());
    }
    if trimmed.chars().count() > 50 {
        return Err("Habit name must be less than 50 characters".into());
    }
    Ok(())
}

/// GET /api/categories
///
/// One picker entry per category, in a fixed order.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryOption {
    pub value: HabitCategory,
    pub icon: &'static str,
}

// ============================================================================
// Stats
// ============================================================================

/// GET /api/stats/overview
#[derive(Debug, Serialize)]
pub struct StatsOverviewResponse {
    pub total_habits: usize,
    pub completed_today: usize,
    pub completion_rate_percent: i32,
    pub best_streak: i32,
    pub current_streak: i32,
    pub total_completions: i64,
}

/// GET /api/stats/top?limit=N
#[derive(Debug, Deserialize)]
pub struct TopHabitsQuery {
    pub limit: Option<usize>,
}

impl TopHabitsQuery {
    /// Requested ranking size, defaulting to 5 and capped at 50
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(5).min(50)
    }
}

// ============================================================================
// Suggestions
// ============================================================================

/// POST /api/suggestions
#[derive(Debug, Deserialize, Validate)]
pub struct SuggestRequest {
    #[validate(length(max = 200, message = "Goal must be less than 200 characters"))]
    pub goal: String,
}

impl SuggestRequest {
    /// A goal of only whitespace would produce a useless prompt
    pub fn validate_goal(&self) -> Result<(), String> {
        if self.goal.trim().is_empty() {
            return Err("Goal is required".into());
        }
        Ok(())
    }
}

// POST /api/suggestions/accept takes the picked suggestion card and turns it
// into an ordinary habit draft.
impl From<AiSuggestion> for CreateHabitRequest {
    fn from(suggestion: AiSuggestion) -> Self {
        Self {
            title: suggestion.habit_name,
            category: Some(suggestion.category),
            frequency: Some(suggestion.frequency),
            reminder_time: None,
            notes: Some(suggestion.benefits),
        }
    }
}
