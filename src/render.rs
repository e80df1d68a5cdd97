pub mod compositor;
pub mod scheduler;
