//! CRUD over the habits table. The in-memory store is authoritative at
//! runtime; this layer keeps SQLite in step so restarts see the same list.

use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::habit::{Habit, HabitCategory, HabitFrequency};

#[derive(Clone)]
pub struct HabitRepository {
    pool: SqlitePool,
}

impl HabitRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All habits, newest first (the display order the store expects).
    pub async fn fetch_all(&self) -> AppResult<Vec<Habit>> {
        let habits = sqlx::query_as::<_, Habit>(
            r#"
            SELECT * FROM habits
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(habits)
    }

    /// Like `fetch_all`, but an empty table is populated with the first-run
    /// sample set so new installs have something to show.
    pub async fn fetch_all_or_seed(&self) -> AppResult<Vec<Habit>> {
        let habits = self.fetch_all().await?;
        if !habits.is_empty() {
            return Ok(habits);
        }

        tracing::info!("No habits found, seeding first-run sample data");
        for habit in sample_habits() {
            self.insert(&habit).await?;
        }
        self.fetch_all().await
    }

    pub async fn insert(&self, habit: &Habit) -> AppResult<Habit> {
        let inserted = sqlx::query_as::<_, Habit>(
            r#"
            INSERT INTO habits (id, title, category, frequency, reminder_time, notes, streak, last_completed_at, created_at, is_completed)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(habit.id)
        .bind(&habit.title)
        .bind(&habit.category)
        .bind(&habit.frequency)
        .bind(habit.reminder_time)
        .bind(&habit.notes)
        .bind(habit.streak)
        .bind(habit.last_completed_at)
        .bind(habit.created_at)
        .bind(habit.is_completed)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(habit_id = %habit.id, "Habit inserted");
        Ok(inserted)
    }

    /// Write the full current value of an existing habit. `created_at` is
    /// immutable and left untouched.
    pub async fn update(&self, habit: &Habit) -> AppResult<()> {
        let rows = sqlx::query(
            r#"
            UPDATE habits SET
                title = ?,
                category = ?,
                frequency = ?,
                reminder_time = ?,
                notes = ?,
                streak = ?,
                last_completed_at = ?,
                is_completed = ?
            WHERE id = ?
            "#,
        )
        .bind(&habit.title)
        .bind(&habit.category)
        .bind(&habit.frequency)
        .bind(habit.reminder_time)
        .bind(&habit.notes)
        .bind(habit.streak)
        .bind(habit.last_completed_at)
        .bind(habit.is_completed)
        .bind(habit.id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows == 0 {
            return Err(AppError::NotFound("Habit not found".into()));
        }

        tracing::debug!(habit_id = %habit.id, "Habit updated");
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let rows = sqlx::query("DELETE FROM habits WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(AppError::NotFound("Habit not found".into()));
        }

        tracing::debug!(habit_id = %id, "Habit deleted");
        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM habits")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// First-run demo habits. Creation times are staggered so the newest-first
/// ordering shows them in catalog order; completed entries also carry a
/// completion timestamp.
fn sample_habits() -> Vec<Habit> {
    let now = Utc::now();
    let samples: [(&str, HabitCategory, i32, bool); 4] = [
        ("Morning Walk 🏃‍♂️", HabitCategory::Fitness, 5, false),
        ("Read 20 Pages 📚", HabitCategory::Learning, 3, true),
        ("Meditate 🧘‍♂️", HabitCategory::Mindfulness, 10, false),
        ("Drink Water 💧", HabitCategory::Health, 7, true),
    ];

    samples
        .into_iter()
        .enumerate()
        .map(|(i, (title, category, streak, completed))| {
            let mut habit = Habit::new(title, category, HabitFrequency::Daily);
            habit.streak = streak;
            habit.is_completed = completed;
            habit.created_at = now - Duration::minutes(i as i64);
            if completed {
                habit.last_completed_at = Some(now);
            }
            habit
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn test_repo() -> (TempDir, HabitRepository) {
        let dir = tempfile::tempdir().unwrap();
        let pool = crate::db::create_pool(&dir.path().join("test.db")).await;
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        (dir, HabitRepository::new(pool))
    }

    #[tokio::test]
    async fn insert_and_fetch_round_trip() {
        let (_dir, repo) = test_repo().await;

        let mut habit = Habit::new("Evening Walk", HabitCategory::Fitness, HabitFrequency::Weekly);
        habit.reminder_time = chrono::NaiveTime::from_hms_opt(18, 30, 0);
        habit.notes = Some("around the park".into());

        let inserted = repo.insert(&habit).await.unwrap();
        assert_eq!(inserted.id, habit.id);
        assert_eq!(inserted.category, HabitCategory::Fitness);
        assert_eq!(inserted.frequency, HabitFrequency::Weekly);
        assert_eq!(inserted.reminder_time, habit.reminder_time);

        let all = repo.fetch_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Evening Walk");
        assert_eq!(all[0].notes.as_deref(), Some("around the park"));
        assert!(all[0].last_completed_at.is_none());
    }

    #[tokio::test]
    async fn fetch_all_orders_newest_first() {
        let (_dir, repo) = test_repo().await;

        let mut older = Habit::new("Older", HabitCategory::Other, HabitFrequency::Daily);
        older.created_at = Utc::now() - Duration::hours(2);
        let newer = Habit::new("Newer", HabitCategory::Other, HabitFrequency::Daily);

        repo.insert(&older).await.unwrap();
        repo.insert(&newer).await.unwrap();

        let all = repo.fetch_all().await.unwrap();
        assert_eq!(all[0].title, "Newer");
        assert_eq!(all[1].title, "Older");
    }

    #[tokio::test]
    async fn update_rewrites_the_row() {
        let (_dir, repo) = test_repo().await;

        let habit = Habit::new("Journal", HabitCategory::Creativity, HabitFrequency::Daily);
        repo.insert(&habit).await.unwrap();

        let updated_value = habit.toggled(Utc::now());
        repo.update(&updated_value).await.unwrap();

        let all = repo.fetch_all().await.unwrap();
        assert!(all[0].is_completed);
        assert_eq!(all[0].streak, 1);
        assert!(all[0].last_completed_at.is_some());
    }

    #[tokio::test]
    async fn update_missing_habit_is_not_found() {
        let (_dir, repo) = test_repo().await;
        let habit = Habit::new("Ghost", HabitCategory::Other, HabitFrequency::Daily);
        let err = repo.update(&habit).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_and_reports_missing() {
        let (_dir, repo) = test_repo().await;

        let habit = Habit::new("Stretch", HabitCategory::Fitness, HabitFrequency::Daily);
        repo.insert(&habit).await.unwrap();

        repo.delete(habit.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);

        let err = repo.delete(habit.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn empty_table_is_seeded_once() {
        let (_dir, repo) = test_repo().await;

        let seeded = repo.fetch_all_or_seed().await.unwrap();
        assert_eq!(seeded.len(), 4);
        assert_eq!(seeded[0].title, "Morning Walk 🏃‍♂️");
        assert_eq!(seeded[3].title, "Drink Water 💧");

        // completed samples carry a completion timestamp
        for habit in seeded.iter().filter(|h| h.is_completed) {
            assert!(habit.last_completed_at.is_some());
        }

        // a second load must not duplicate the seeds
        let again = repo.fetch_all_or_seed().await.unwrap();
        assert_eq!(again.len(), 4);
        assert_eq!(repo.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn non_empty_table_is_never_seeded() {
        let (_dir, repo) = test_repo().await;

        let habit = Habit::new("Only One", HabitCategory::Other, HabitFrequency::Daily);
        repo.insert(&habit).await.unwrap();

        let all = repo.fetch_all_or_seed().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Only One");
    }
}
