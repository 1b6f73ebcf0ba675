//! Orchestration over the habit collection: the in-memory store holds the
//! authoritative list, SQLite mirrors it for durability, and every successful
//! mutation is announced on the event bus and reflected in the reminder
//! scheduler.
//!
//! Mirroring policy: create and update are confirmed writes (the row is
//! persisted before memory changes, so a failure leaves memory untouched).
//! Completion toggles and deletes mutate memory first and treat a failed
//! write-behind as a logged degradation.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::HabitRepository;
use crate::dto::{CreateHabitRequest, StatsOverviewResponse, UpdateHabitRequest};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, HabitEvent};
use crate::models::habit::Habit;
use crate::models::stats::{CategoryStat, DayData};
use crate::services::reminders::ReminderScheduler;
use crate::store::HabitStore;

#[derive(Clone)]
pub struct HabitService {
    store: Arc<RwLock<HabitStore>>,
    repo: HabitRepository,
    events: EventBus,
    reminders: ReminderScheduler,
}

impl HabitService {
    pub fn new(repo: HabitRepository, events: EventBus, reminders: ReminderScheduler) -> Self {
        Self {
            store: Arc::new(RwLock::new(HabitStore::new())),
            repo,
            events,
            reminders,
        }
    }

    /// Populate the store from disk (seeding first-run sample data) and
    /// register reminders for every habit that carries one.
    pub async fn load(&self) -> AppResult<()> {
        let habits = self.repo.fetch_all_or_seed().await?;
        for habit in &habits {
            self.reminders.schedule(habit).await;
        }
        let count = habits.len();
        self.store.write().await.load(habits);
        tracing::info!(count, "Habit store loaded");
        Ok(())
    }

    pub async fn list(&self) -> Vec<Habit> {
        self.store.read().await.habits().to_vec()
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Habit> {
        self.store
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(AppError::NotFound("Habit not found".into()))
    }

    pub async fn create(&self, body: CreateHabitRequest) -> AppResult<Habit> {
        let mut habit = Habit::new(
            body.title.trim(),
            body.category.unwrap_or_default(),
            body.frequency.unwrap_or_default(),
        );
        habit.reminder_time = body.reminder_time;
        habit.notes = body
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let habit = self.repo.insert(&habit).await?;
        self.store.write().await.add(habit.clone());
        self.reminders.schedule(&habit).await;
        self.events.publish(HabitEvent::HabitAdded { habit_id: habit.id });
        Ok(habit)
    }

    /// Merge the provided fields into the stored habit. Absent fields are
    /// unchanged; a blank `notes` string clears the notes.
    pub async fn update(&self, id: Uuid, body: UpdateHabitRequest) -> AppResult<Habit> {
        let mut updated = self.get(id).await?;

        if let Some(title) = body.title {
            updated.title = title.trim().to_string();
        }
        if let Some(category) = body.category {
            updated.category = category;
        }
        if let Some(frequency) = body.frequency {
            updated.frequency = frequency;
        }
        if let Some(time) = body.reminder_time {
            updated.reminder_time = Some(time);
        }
        if let Some(notes) = body.notes {
            let notes = notes.trim();
            updated.notes = if notes.is_empty() {
                None
            } else {
                Some(notes.to_string())
            };
        }

        self.repo.update(&updated).await?;
        self.store.write().await.replace(updated.clone())?;
        self.reminders.schedule(&updated).await;
        self.events.publish(HabitEvent::HabitUpdated { habit_id: id });
        Ok(updated)
    }

    /// Flip completion for today. The streak transition lives in the store;
    /// the write-behind failure path keeps the in-memory result.
    pub async fn toggle_completion(&self, id: Uuid) -> AppResult<Habit> {
        let habit = self
            .store
            .write()
            .await
            .toggle_completion(id, Utc::now())?;

        if let Err(e) = self.repo.update(&habit).await {
            tracing::warn!(error = %e, habit_id = %id, "Failed to persist completion toggle");
        }
        self.events.publish(HabitEvent::HabitUpdated { habit_id: id });
        Ok(habit)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let removed = self.store.write().await.remove(id);
        let Some(habit) = removed else {
            return Err(AppError::NotFound("Habit not found".into()));
        };

        if let Err(e) = self.repo.delete(habit.id).await {
            tracing::warn!(error = %e, habit_id = %id, "Failed to delete persisted habit");
        }
        self.reminders.cancel(id).await;
        self.events.publish(HabitEvent::HabitDeleted { habit_id: id });
        Ok(())
    }

    // Derived read models. Each takes a snapshot under the read lock.

    pub async fn overview(&self) -> StatsOverviewResponse {
        let store = self.store.read().await;
        StatsOverviewResponse {
            total_habits: store.total_count(),
            completed_today: store.completed_today_count(),
            completion_rate_percent: store.completion_rate_percent(),
            best_streak: store.best_streak(),
            current_streak: store.current_streak(),
            total_completions: store.total_completions(),
        }
    }

    pub async fn category_breakdown(&self) -> Vec<CategoryStat> {
        self.store.read().await.category_breakdown()
    }

    pub async fn weekly_series(&self) -> Vec<DayData> {
        self.store.read().await.weekly_series(Utc::now().date_naive())
    }

    pub async fn top_habits(&self, limit: usize) -> Vec<Habit> {
        self.store.read().await.top_habits(limit)
    }

    pub async fn habits_needing_attention(&self) -> Vec<Habit> {
        self.store.read().await.habits_needing_attention()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::habit::{HabitCategory, HabitFrequency};
    use tempfile::TempDir;

    async fn test_service() -> (TempDir, HabitService) {
        let dir = tempfile::tempdir().unwrap();
        let pool = crate::db::create_pool(&dir.path().join("test.db")).await;
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();

        let events = EventBus::new(16);
        let reminders = ReminderScheduler::new(events.clone());
        let service = HabitService::new(HabitRepository::new(pool), events, reminders);
        (dir, service)
    }

    fn create_body(title: &str) -> CreateHabitRequest {
        CreateHabitRequest {
            title: title.to_string(),
            category: Some(HabitCategory::Fitness),
            frequency: None,
            reminder_time: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn load_seeds_and_schedules() {
        let (_dir, service) = test_service().await;
        service.load().await.unwrap();

        let habits = service.list().await;
        assert_eq!(habits.len(), 4);
        assert_eq!(habits[0].title, "Morning Walk 🏃‍♂️");

        let overview = service.overview().await;
        assert_eq!(overview.total_habits, 4);
        assert_eq!(overview.completed_today, 2);
        assert_eq!(overview.completion_rate_percent, 50);
        assert_eq!(overview.best_streak, 10);
    }

    #[tokio::test]
    async fn create_prepends_and_persists() {
        let (_dir, service) = test_service().await;
        service.load().await.unwrap();

        let habit = service.create(create_body("Cold Shower")).await.unwrap();
        assert_eq!(habit.category, HabitCategory::Fitness);
        assert_eq!(habit.frequency, HabitFrequency::Daily);

        let habits = service.list().await;
        assert_eq!(habits.len(), 5);
        assert_eq!(habits[0].title, "Cold Shower");

        // survives a fresh load from disk
        service.load().await.unwrap();
        assert_eq!(service.list().await.len(), 5);
    }

    #[tokio::test]
    async fn notes_are_trimmed_and_blank_notes_dropped() {
        let (_dir, service) = test_service().await;
        service.load().await.unwrap();

        let mut body = create_body("Journal");
        body.notes = Some("   ".into());
        let habit = service.create(body).await.unwrap();
        assert_eq!(habit.notes, None);

        let padded = UpdateHabitRequest {
            notes: Some("  ten minutes before bed  ".into()),
            ..Default::default()
        };
        let habit = service.update(habit.id, padded).await.unwrap();
        assert_eq!(habit.notes.as_deref(), Some("ten minutes before bed"));

        let blank = UpdateHabitRequest {
            notes: Some("  \t ".into()),
            ..Default::default()
        };
        let habit = service.update(habit.id, blank).await.unwrap();
        assert_eq!(habit.notes, None);
    }

    #[tokio::test]
    async fn create_publishes_added_event() {
        let (_dir, service) = test_service().await;
        let mut rx = service.events.subscribe();

        let habit = service.create(create_body("Stretch")).await.unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event, HabitEvent::HabitAdded { habit_id: habit.id });
    }

    #[tokio::test]
    async fn update_merges_partial_fields() {
        let (_dir, service) = test_service().await;
        let habit = service.create(create_body("Read")).await.unwrap();

        let updated = service
            .update(
                habit.id,
                UpdateHabitRequest {
                    title: Some("  Read Fiction  ".into()),
                    category: None,
                    frequency: Some(HabitFrequency::Weekly),
                    reminder_time: None,
                    notes: Some("before bed".into()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Read Fiction");
        assert_eq!(updated.category, HabitCategory::Fitness);
        assert_eq!(updated.frequency, HabitFrequency::Weekly);
        assert_eq!(updated.notes.as_deref(), Some("before bed"));
        assert_eq!(updated.id, habit.id);
    }

    #[tokio::test]
    async fn update_missing_habit_is_not_found() {
        let (_dir, service) = test_service().await;
        let err = service
            .update(Uuid::new_v4(), UpdateHabitRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn toggle_round_trip_keeps_streak() {
        let (_dir, service) = test_service().await;
        let habit = service.create(create_body("Pushups")).await.unwrap();

        let done = service.toggle_completion(habit.id).await.unwrap();
        assert!(done.is_completed);
        assert_eq!(done.streak, 1);

        let undone = service.toggle_completion(habit.id).await.unwrap();
        assert!(!undone.is_completed);
        assert_eq!(undone.streak, 1);
        assert!(undone.last_completed_at.is_none());
    }

    #[tokio::test]
    async fn delete_missing_habit_is_not_found() {
        let (_dir, service) = test_service().await;
        let err = service.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_everywhere() {
        let (_dir, service) = test_service().await;
        let habit = service.create(create_body("Ephemeral")).await.unwrap();
        let mut rx = service.events.subscribe();

        service.delete(habit.id).await.unwrap();
        assert!(service.list().await.is_empty());

        let event = rx.recv().await.unwrap();
        assert_eq!(event, HabitEvent::HabitDeleted { habit_id: habit.id });

        let err = service.get(habit.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
