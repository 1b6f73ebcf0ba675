pub mod habits;
pub mod health;
pub mod stats;
pub mod suggestions;
pub mod ws;
