use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One trackable routine. Mutations never change `id`; they produce a new
/// value with the same id that replaces the old one in the store.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Habit {
    pub id: Uuid,
    pub title: String,
    pub category: HabitCategory,
    pub frequency: HabitFrequency,
    pub reminder_time: Option<NaiveTime>,
    pub notes: Option<String>,
    pub streak: i32,
    pub last_completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub is_completed: bool,
}

impl Habit {
    pub fn new(title: impl Into<String>, category: HabitCategory, frequency: HabitFrequency) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            category,
            frequency,
            reminder_time: None,
            notes: None,
            streak: 0,
            last_completed_at: None,
            created_at: Utc::now(),
            is_completed: false,
        }
    }

    /// Completion transition. Completing increments the streak and stamps the
    /// completion time; un-completing clears the stamp but keeps the streak.
    pub fn toggled(&self, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        if self.is_completed {
            next.is_completed = false;
            next.last_completed_at = None;
        } else {
            next.is_completed = true;
            next.streak = self.streak + 1;
            next.last_completed_at = Some(now);
        }
        next
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HabitCategory {
    Health,
    Fitness,
    Productivity,
    Learning,
    Mindfulness,
    Social,
    Creativity,
    Other,
}

impl HabitCategory {
    pub const ALL: [HabitCategory; 8] = [
        HabitCategory::Health,
        HabitCategory::Fitness,
        HabitCategory::Productivity,
        HabitCategory::Learning,
        HabitCategory::Mindfulness,
        HabitCategory::Social,
        HabitCategory::Creativity,
        HabitCategory::Other,
    ];

    /// Display glyph used by clients when a habit has no inferred icon.
    pub fn icon(&self) -> &'static str {
        match self {
            HabitCategory::Health => "heart.fill",
            HabitCategory::Fitness => "figure.run",
            HabitCategory::Productivity => "checkmark.circle.fill",
            HabitCategory::Learning => "book.fill",
            HabitCategory::Mindfulness => "leaf.fill",
            HabitCategory::Social => "person.2.fill",
            HabitCategory::Creativity => "paintbrush.fill",
            HabitCategory::Other => "star.fill",
        }
    }
}

impl Default for HabitCategory {
    fn default() -> Self {
        Self::Other
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::Type, PartialEq)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HabitFrequency {
    Daily,
    Weekly,
    Custom,
}

impl Default for HabitFrequency {
    fn default() -> Self {
        Self::Daily
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggled_completes_and_uncompletes() {
        let habit = Habit::new("Evening stretch", HabitCategory::Fitness, HabitFrequency::Daily);
        let now = Utc::now();

        let done = habit.toggled(now);
        assert!(done.is_completed);
        assert_eq!(done.streak, 1);
        assert_eq!(done.last_completed_at, Some(now));
        assert_eq!(done.id, habit.id);

        let undone = done.toggled(Utc::now());
        assert!(!undone.is_completed);
        assert_eq!(undone.streak, 1, "un-completing keeps the streak");
        assert_eq!(undone.last_completed_at, None);
    }

    #[test]
    fn category_icons_are_stable() {
        assert_eq!(HabitCategory::Health.icon(), "heart.fill");
        assert_eq!(HabitCategory::Creativity.icon(), "paintbrush.fill");
        assert_eq!(HabitCategory::Other.icon(), "star.fill");
    }
}
