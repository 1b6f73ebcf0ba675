use serde::{Deserialize, Serialize};

use super::habit::{HabitCategory, HabitFrequency};

/// Structured habit suggestion parsed from a raw model completion.
/// Ephemeral: shown to the user, then either accepted into a habit draft or
/// discarded. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiSuggestion {
    pub habit_name: String,
    pub frequency: HabitFrequency,
    pub duration: Option<String>,
    pub benefits: String,
    pub category: HabitCategory,
    /// Glyph name, either inferred from keywords or the generic "sparkles".
    pub icon: String,
}

/// Static habit template offered as a zero-cost alternative to AI suggestions.
#[derive(Debug, Clone, Serialize)]
pub struct QuickSuggestion {
    pub title: &'static str,
    pub category: HabitCategory,
    pub icon: &'static str,
    pub description: &'static str,
}

pub const QUICK_SUGGESTIONS: [QuickSuggestion; 6] = [
    QuickSuggestion {
        title: "Morning Walk",
        category: HabitCategory::Fitness,
        icon: "figure.walk",
        description: "Start your day with a 20-minute walk",
    },
    QuickSuggestion {
        title: "Read 20 Pages",
        category: HabitCategory::Learning,
        icon: "book.fill",
        description: "Develop a daily reading habit",
    },
    QuickSuggestion {
        title: "Meditate",
        category: HabitCategory::Mindfulness,
        icon: "leaf.fill",
        description: "Practice mindfulness for 10 minutes",
    },
    QuickSuggestion {
        title: "Drink Water",
        category: HabitCategory::Health,
        icon: "drop.fill",
        description: "Stay hydrated throughout the day",
    },
    QuickSuggestion {
        title: "Journal",
        category: HabitCategory::Creativity,
        icon: "pencil",
        description: "Write your thoughts daily",
    },
    QuickSuggestion {
        title: "Exercise",
        category: HabitCategory::Fitness,
        icon: "figure.run",
        description: "30 minutes of physical activity",
    },
];
