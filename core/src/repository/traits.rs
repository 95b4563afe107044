use anyhow::Result;

/// Persistence port for the single task document.
///
/// Implementations only move bytes in and out of storage; decoding and
/// validation live in [`crate::repository::document`].
pub trait TaskRepository {
    /// Returns `None` when nothing has been stored yet.
    fn read(&self) -> Result<Option<Vec<u8>>>;
    fn write(&self, document: &str) -> Result<()>;

    /// Called with the raw document when it could not be decoded and is
    /// about to be replaced by an empty list.
    fn preserve_corrupt(&self, _document: &[u8]) -> Result<()> {
        Ok(())
    }

    /// Called when `read` failed. The stored document must be moved out of
    /// the way so the next `write` cannot replace it.
    fn set_aside(&self) -> Result<()> {
        Ok(())
    }
}
