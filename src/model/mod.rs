pub mod dates;
pub mod store;
pub mod task;

pub use store::TaskStore;
pub use task::{Task, TaskEdit};
