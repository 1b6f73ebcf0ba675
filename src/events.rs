use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Typed change notification published after every successful mutation.
/// WebSocket clients receive these as JSON text frames.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HabitEvent {
    HabitAdded { habit_id: Uuid },
    HabitUpdated { habit_id: Uuid },
    HabitDeleted { habit_id: Uuid },
    ReminderDue { habit_id: Uuid, title: String },
}

impl HabitEvent {
    pub fn habit_id(&self) -> Uuid {
        match self {
            HabitEvent::HabitAdded { habit_id }
            | HabitEvent::HabitUpdated { habit_id }
            | HabitEvent::HabitDeleted { habit_id }
            | HabitEvent::ReminderDue { habit_id, .. } => *habit_id,
        }
    }
}

/// Broadcast fan-out for habit changes. Cheap to clone; subscribers that lag
/// behind the channel capacity miss events rather than blocking publishers.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<HabitEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Send to all current subscribers. A send with no subscribers is not an
    /// error; mutations must succeed whether or not anyone is listening.
    pub fn publish(&self, event: HabitEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HabitEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
