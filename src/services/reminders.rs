use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::events::{EventBus, HabitEvent};
use crate::models::habit::Habit;

/// In-process reminder scheduling keyed by habit id. A background tick scans
/// for due entries once a minute and publishes `ReminderDue` events; delivery
/// to an actual device is a client concern.
#[derive(Clone)]
pub struct ReminderScheduler {
    entries: Arc<Mutex<HashMap<Uuid, ReminderEntry>>>,
    events: EventBus,
}

struct ReminderEntry {
    title: String,
    time: NaiveTime,
    last_fired: Option<NaiveDate>,
}

impl ReminderScheduler {
    pub fn new(events: EventBus) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            events,
        }
    }

    /// Upsert the reminder for this habit, or drop it when the habit has no
    /// reminder time. A time that already passed today first fires tomorrow.
    pub async fn schedule(&self, habit: &Habit) {
        self.schedule_at(habit, Utc::now()).await;
    }

    pub async fn cancel(&self, habit_id: Uuid) {
        let mut entries = self.entries.lock().await;
        if entries.remove(&habit_id).is_some() {
            tracing::debug!(habit_id = %habit_id, "Reminder cancelled");
        }
    }

    /// Run the minute tick until the task is aborted.
    pub fn spawn(&self) -> tokio::task::JoinHandle<()> {
        let scheduler = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(60));
            loop {
                ticker.tick().await;
                scheduler.run_once(Utc::now()).await;
            }
        })
    }

    async fn schedule_at(&self, habit: &Habit, now: DateTime<Utc>) {
        let mut entries = self.entries.lock().await;
        match habit.reminder_time {
            Some(time) => {
                let last_fired = if now.time() >= time {
                    Some(now.date_naive())
                } else {
                    None
                };
                entries.insert(
                    habit.id,
                    ReminderEntry {
                        title: habit.title.clone(),
                        time,
                        last_fired,
                    },
                );
                tracing::debug!(habit_id = %habit.id, time = %time, "Reminder scheduled");
            }
            None => {
                entries.remove(&habit.id);
            }
        }
    }

    async fn run_once(&self, now: DateTime<Utc>) {
        for (habit_id, title) in self.fire_due(now).await {
            tracing::info!(habit_id = %habit_id, title = %title, "Reminder due");
            self.events.publish(HabitEvent::ReminderDue { habit_id, title });
        }
    }

    /// Collect entries whose time-of-day has arrived and mark them fired, at
    /// most once per entry per day.
    async fn fire_due(&self, now: DateTime<Utc>) -> Vec<(Uuid, String)> {
        let today = now.date_naive();
        let mut entries = self.entries.lock().await;

        let mut due = Vec::new();
        for (id, entry) in entries.iter_mut() {
            if now.time() >= entry.time && entry.last_fired != Some(today) {
                entry.last_fired = Some(today);
                due.push((*id, entry.title.clone()));
            }
        }
        due
    }
}
