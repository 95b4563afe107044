use std::cell::{Cell, RefCell};

use anyhow::{anyhow, Result};

use crate::repository::traits::TaskRepository;

/// In-process repository. Single-threaded, like the store that owns it.
#[derive(Debug, Default)]
pub struct MemoryTaskRepository {
    document: RefCell<Option<Vec<u8>>>,
    preserved: RefCell<Vec<Vec<u8>>>,
    writes: Cell<usize>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
    fail_preserve: Cell<bool>,
}

impl MemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: impl Into<Vec<u8>>) -> Self {
        let repo = Self::default();
        *repo.document.borrow_mut() = Some(document.into());
        repo
    }

    /// The stored document, if any and if it is UTF-8.
    pub fn document(&self) -> Option<String> {
        self.document
            .borrow()
            .as_ref()
            .and_then(|raw| String::from_utf8(raw.clone()).ok())
    }

    /// Documents handed to `preserve_corrupt` or moved by `set_aside`.
    pub fn preserved(&self) -> Vec<Vec<u8>> {
        self.preserved.borrow().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// While set, every `read` fails.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// While set, every `write` fails and the stored document is untouched.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl MemoryTaskRepository {
    /// While set, `preserve_corrupt` and `set_aside` fail and keep nothing.
    pub fn set_fail_preserve(&self, fail: bool) {
        self.fail_preserve.set(fail);
    }
}

impl TaskRepository for MemoryTaskRepository {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        if self.fail_reads.get() {
            return Err(anyhow!("storage unreadable"));
        }
        Ok(self.document.borrow().clone())
    }

    fn write(&self, document: &str) -> Result<()> {
        if self.fail_writes.get() {
            return Err(anyhow!("storage unavailable"));
        }
        *self.document.borrow_mut() = Some(document.as_bytes().to_vec());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn preserve_corrupt(&self, document: &[u8]) -> Result<()> {
        if self.fail_preserve.get() {
            return Err(anyhow!("nowhere to keep the document"));
        }
        self.preserved.borrow_mut().push(document.to_vec());
        Ok(())
    }

    fn set_aside(&self) -> Result<()> {
        if self.fail_preserve.get() {
            return Err(anyhow!("nowhere to keep the document"));
        }
        if let Some(raw) = self.document.borrow_mut().take() {
            self.preserved.borrow_mut().push(raw);
        }
        Ok(())
    }
}
