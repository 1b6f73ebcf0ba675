pub mod ai;
pub mod habits;
pub mod reminders;
pub mod suggestions;
