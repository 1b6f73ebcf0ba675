pub mod habit;
pub mod stats;
pub mod suggestion;
