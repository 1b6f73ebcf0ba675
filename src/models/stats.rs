use chrono::NaiveDate;
use serde::Serialize;

use super::habit::HabitCategory;

/// Per-category rollup for the analytics breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryStat {
    pub category: HabitCategory,
    /// Display glyph rendered next to the category row.
    pub icon: &'static str,
    pub total_habits: usize,
    pub completed_today: usize,
    pub total_streak: i32,
    pub completion_rate: f64,
    pub average_streak: f64,
}

impl CategoryStat {
    pub fn new(category: HabitCategory, total_habits: usize, completed_today: usize, total_streak: i32) -> Self {
        let (completion_rate, average_streak) = if total_habits > 0 {
            (
                completed_today as f64 / total_habits as f64,
                f64::from(total_streak) / total_habits as f64,
            )
        } else {
            (0.0, 0.0)
        };
        Self {
            icon: category.icon(),
            category,
            total_habits,
            completed_today,
            total_streak,
            completion_rate,
            average_streak,
        }
    }
}

/// One entry of the 7-day completion chart.
#[derive(Debug, Clone, Serialize)]
pub struct DayData {
    pub date: NaiveDate,
    /// Short weekday name ("Mon".."Sun") for chart axis labels.
    pub day_name: String,
    pub completed_count: usize,
    pub total_count: usize,
    pub completion_rate: f64,
    pub is_today: bool,
}

impl DayData {
    pub fn new(date: NaiveDate, today: NaiveDate, completed_count: usize, total_count: usize) -> Self {
        let completion_rate = if total_count > 0 {
            completed_count as f64 / total_count as f64
        } else {
            0.0
        };
        Self {
            date,
            day_name: date.format("%a").to_string(),
            completed_count,
            total_count,
            completion_rate,
            is_today: date == today,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_stat_derives_rates() {
        let stat = CategoryStat::new(HabitCategory::Fitness, 4, 1, 10);
        assert_eq!(stat.icon, "figure.run");
        assert!((stat.completion_rate - 0.25).abs() < f64::EPSILON);
        assert!((stat.average_streak - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn day_data_labels_weekday() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 17).unwrap(); // a Monday
        let day = DayData::new(date, date, 2, 4);
        assert_eq!(day.day_name, "Mon");
        assert!(day.is_today);
        assert!((day.completion_rate - 0.5).abs() < f64::EPSILON);
    }
}
