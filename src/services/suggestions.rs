//! Turns raw model completions into structured suggestions.
//!
//! The completion format is requested but never guaranteed, so parsing is
//! lenient: labeled lines are preferred, and anything unlabeled degrades to a
//! heuristic fallback instead of an error. Only a fully blank response fails.

use crate::error::AiError;
use crate::models::habit::{HabitCategory, HabitFrequency};
use crate::models::suggestion::AiSuggestion;

pub const DEFAULT_BENEFITS: &str = "Build a positive habit to improve your life.";
const FALLBACK_ICON: &str = "sparkles";

/// Keyword sets checked in priority order; the first category with a hit wins.
const CATEGORY_KEYWORDS: [(HabitCategory, &[&str]); 7] = [
    (
        HabitCategory::Fitness,
        &["exercise", "workout", "run", "gym", "fitness", "walk"],
    ),
    (
        HabitCategory::Mindfulness,
        &["meditat", "mindful", "breath", "calm", "relax"],
    ),
    (
        HabitCategory::Learning,
        &["read", "learn", "study", "book", "course"],
    ),
    (
        HabitCategory::Health,
        &["health", "water", "sleep", "diet", "eat", "vitamin"],
    ),
    (
        HabitCategory::Productivity,
        &["work", "task", "productiv", "focus", "goal"],
    ),
    (
        HabitCategory::Social,
        &["friend", "family", "social", "call", "connect"],
    ),
    (
        HabitCategory::Creativity,
        &["write", "art", "creative", "paint", "music", "journal"],
    ),
];

const ICON_KEYWORDS: [(&[&str], &str); 12] = [
    (&["walk"], "figure.walk"),
    (&["run"], "figure.run"),
    (&["exercise", "workout"], "dumbbell.fill"),
    (&["meditat"], "leaf.fill"),
    (&["read", "book"], "book.fill"),
    (&["water", "drink"], "drop.fill"),
    (&["sleep"], "moon.fill"),
    (&["write", "journal"], "pencil"),
    (&["learn", "study"], "graduationcap.fill"),
    (&["music"], "music.note"),
    (&["cook", "eat"], "fork.knife"),
    (&["stretch", "yoga"], "figure.yoga"),
];

/// Parse one completion into a structured suggestion.
///
/// Labels (`habit:`, `frequency:`, `duration:`, `benefits:`/`benefit:`) are
/// matched case-insensitively anywhere in a line; the first line carrying a
/// label wins and later duplicates are ignored. When no usable habit name is
/// labeled, the first non-blank line becomes the name, the whole text becomes
/// the benefits, and category is inferred from the goal alone with a generic
/// icon. A blank `text` is the only input that fails.
pub fn parse_suggestion(text: &str, goal: &str) -> Result<AiSuggestion, AiError> {
    let first_line = match text.lines().find(|l| !l.trim().is_empty()) {
        Some(line) => line.trim(),
        None => return Err(AiError::NoSuggestion),
    };

    let mut habit_name: Option<String> = None;
    let mut frequency: Option<HabitFrequency> = None;
    let mut duration: Option<String> = None;
    let mut benefits: Option<String> = None;

    for line in text.lines() {
        let lower = line.to_ascii_lowercase();

        if lower.contains("habit:") {
            if habit_name.is_none() {
                habit_name = extract_value(line, "habit:");
            }
        } else if lower.contains("frequency:") {
            if frequency.is_none() {
                let value = extract_value(line, "frequency:")
                    .unwrap_or_default()
                    .to_ascii_lowercase();
                frequency = Some(if value.contains("weekly") {
                    HabitFrequency::Weekly
                } else if value.contains("custom") {
                    HabitFrequency::Custom
                } else {
                    HabitFrequency::Daily
                });
            }
        } else if lower.contains("duration:") {
            if duration.is_none() {
                duration = extract_value(line, "duration:");
            }
        } else if lower.contains("benefits:") || lower.contains("benefit:") {
            if benefits.is_none() {
                let label = if lower.contains("benefits:") {
                    "benefits:"
                } else {
                    "benefit:"
                };
                benefits = extract_value(line, label);
            }
        }
    }

    let name = match habit_name {
        Some(name) if !name.is_empty() => name,
        // Fallback: no usable name was labeled. Category comes from the goal
        // only and the icon stays generic; the name inference already used up
        // the response text, so it is a weaker signal here.
        _ => {
            return Ok(AiSuggestion {
                habit_name: first_line.to_string(),
                frequency: HabitFrequency::Daily,
                duration: None,
                benefits: text.to_string(),
                category: infer_category(goal),
                icon: FALLBACK_ICON.to_string(),
            })
        }
    };

    let scope = format!("{goal} {name}");
    Ok(AiSuggestion {
        habit_name: name,
        frequency: frequency.unwrap_or_default(),
        duration,
        benefits: benefits.unwrap_or_else(|| DEFAULT_BENEFITS.to_string()),
        category: infer_category(&scope),
        icon: infer_icon(&scope).to_string(),
    })
}

/// Substring after the label, trimmed, with markdown bold markers removed.
/// ASCII lowercasing keeps byte offsets aligned with the original line, so
/// slicing at the matched position is safe for any input.
fn extract_value(line: &str, label: &str) -> Option<String> {
    let lower = line.to_ascii_lowercase();
    let start = lower.find(label)? + label.len();
    let value = line[start..].trim();
    Some(value.replace("**", "").trim().to_string())
}

pub fn infer_category(text: &str) -> HabitCategory {
    let lower = text.to_lowercase();
    for (category, keywords) in CATEGORY_KEYWORDS.iter() {
        if keywords.iter().any(|k| lower.contains(k)) {
            return category.clone();
        }
    }
    HabitCategory::Other
}

pub fn infer_icon(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    for (keywords, icon) in ICON_KEYWORDS.iter() {
        if keywords.iter().any(|k| lower.contains(k)) {
            return icon;
        }
    }
    FALLBACK_ICON
}
