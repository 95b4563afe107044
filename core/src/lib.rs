pub mod model;
pub mod repository;
pub mod service;

pub use model::filter::Filter;
pub use model::task::Task;
pub use repository::{DocumentError, FileTaskRepository, MemoryTaskRepository, TaskRepository};
pub use service::task_store::{LoadStatus, TaskStore};
