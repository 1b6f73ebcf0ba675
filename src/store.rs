//! In-memory habit collection and the derived analytics views over it.
//!
//! The store owns the authoritative ordered list (newest first). All
//! operations are synchronous and pure with respect to the collection;
//! persistence and event publication happen in the service layer.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::habit::Habit;
use crate::models::stats::{CategoryStat, DayData};

#[derive(Debug, Default)]
pub struct HabitStore {
    habits: Vec<Habit>,
}

impl HabitStore {
    pub fn new() -> Self {
        Self { habits: Vec::new() }
    }

    /// Replace the whole collection, e.g. from a persistence load.
    /// Callers are expected to pass habits already in display order.
    pub fn load(&mut self, habits: Vec<Habit>) {
        self.habits = habits;
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn get(&self, id: Uuid) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Insert at the front: the list renders newest-first.
    pub fn add(&mut self, habit: Habit) {
        self.habits.insert(0, habit);
    }

    /// Replace the entry with the same id, keeping its position.
    pub fn replace(&mut self, habit: Habit) -> AppResult<()> {
        match self.habits.iter_mut().find(|h| h.id == habit.id) {
            Some(slot) => {
                *slot = habit;
                Ok(())
            }
            None => Err(AppError::NotFound("Habit not found".into())),
        }
    }

    /// Remove by id. Removing an absent id is deliberately a no-op; callers
    /// that care get `None` back.
    pub fn remove(&mut self, id: Uuid) -> Option<Habit> {
        let index = self.habits.iter().position(|h| h.id == id)?;
        Some(self.habits.remove(index))
    }

    /// Apply the completion transition to the habit with this id and return
    /// the new value. Position in the list is preserved.
    pub fn toggle_completion(&mut self, id: Uuid, now: DateTime<Utc>) -> AppResult<Habit> {
        let slot = self
            .habits
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or(AppError::NotFound("Habit not found".into()))?;
        let toggled = slot.toggled(now);
        *slot = toggled.clone();
        Ok(toggled)
    }

    pub fn total_count(&self) -> usize {
        self.habits.len()
    }

    pub fn completed_today_count(&self) -> usize {
        self.habits.iter().filter(|h| h.is_completed).count()
    }

    /// Today's progress as a whole percentage (0-100), rounded. Zero when the
    /// collection is empty.
    pub fn completion_rate_percent(&self) -> i32 {
        if self.habits.is_empty() {
            return 0;
        }
        let rate = self.completed_today_count() as f64 / self.habits.len() as f64;
        (rate * 100.0).round() as i32
    }

    pub fn best_streak(&self) -> i32 {
        self.habits.iter().map(|h| h.streak).max().unwrap_or(0)
    }

    /// Longest streak among habits completed today.
    pub fn current_streak(&self) -> i32 {
        self.habits
            .iter()
            .filter(|h| h.is_completed)
            .map(|h| h.streak)
            .max()
            .unwrap_or(0)
    }

    /// Lifetime completion count, approximated as the sum of streaks.
    pub fn total_completions(&self) -> i64 {
        self.habits.iter().map(|h| i64::from(h.streak)).sum()
    }

    /// Per-category rollup, ordered by habit count descending. Ties keep the
    /// order categories first appear in the collection.
    pub fn category_breakdown(&self) -> Vec<CategoryStat> {
        let mut groups: Vec<(crate::models::habit::HabitCategory, usize, usize, i32)> = Vec::new();

        for habit in &self.habits {
            let completed = usize::from(habit.is_completed);
            match groups.iter_mut().find(|(cat, ..)| *cat == habit.category) {
                Some((_, total, done, streak)) => {
                    *total += 1;
                    *done += completed;
                    *streak += habit.streak;
                }
                None => groups.push((habit.category.clone(), 1, completed, habit.streak)),
            }
        }

        let mut stats: Vec<CategoryStat> = groups
            .into_iter()
            .map(|(cat, total, done, streak)| CategoryStat::new(cat, total, done, streak))
            .collect();
        stats.sort_by(|a, b| b.total_habits.cmp(&a.total_habits));
        stats
    }

    /// Seven-day completion chart, oldest day first, today last.
    ///
    /// Past days have no recorded history, so their counts are estimated from
    /// current streak lengths: a habit counts as done `d` days ago when its
    /// streak is longer than `d`. Today uses the real completion flags. The
    /// denominator is clamped to at least 1 so empty charts still render.
    pub fn weekly_series(&self, today: NaiveDate) -> Vec<DayData> {
        let total = self.habits.len().max(1);

        (0..7)
            .rev()
            .map(|days_ago| {
                let date = today - Duration::days(days_ago);
                let completed = if days_ago == 0 {
                    self.completed_today_count()
                } else {
                    self.habits
                        .iter()
                        .filter(|h| i64::from(h.streak) > days_ago)
                        .count()
                };
                DayData::new(date, today, completed, total)
            })
            .collect()
    }

    /// Best-performing habits by streak, longest first, capped at `n`.
    /// Equal streaks keep their collection order.
    pub fn top_habits(&self, n: usize) -> Vec<Habit> {
        let mut sorted = self.habits.clone();
        sorted.sort_by(|a, b| b.streak.cmp(&a.streak));
        sorted.truncate(n);
        sorted
    }

    /// Habits not yet completed today.
    pub fn habits_needing_attention(&self) -> Vec<Habit> {
        self.habits
            .iter()
            .filter(|h| !h.is_completed)
            .cloned()
            .collect()
    }
}
