pub mod document;
pub mod file;
pub mod memory;
pub mod traits;

// Re-export
pub use document::{Decoded, DocumentError};
pub use file::FileTaskRepository;
pub use memory::MemoryTaskRepository;
pub use traits::TaskRepository;
