pub mod pool;
pub mod repository;

pub use pool::create_pool;
pub use repository::HabitRepository;
