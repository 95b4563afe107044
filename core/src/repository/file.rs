use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use log::{debug, warn};

use crate::repository::traits::TaskRepository;

/// Name of the single persisted record.
pub const RECORD_NAME: &str = "todos";
const DEFAULT_DIR_NAME: &str = ".tasklist";
const CORRUPT_SUFFIX: &str = "corrupt";

#[derive(Clone, Debug)]
pub struct FileTaskRepository {
    file_path: PathBuf,
}

impl FileTaskRepository {
    /// Opens the repository under `base_dir`, or `~/.tasklist` when `None`.
    /// The directory is created; the document itself is only written on the
    /// first save.
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let dir = match base_dir {
            Some(dir) => dir,
            None => Self::default_dir()?,
        };
        fs::create_dir_all(&dir)
            .with_context(|| format!("Could not create data directory {}", dir.display()))?;

        Ok(FileTaskRepository {
            file_path: dir.join(format!("{}.json", RECORD_NAME)),
        })
    }

    pub fn default_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Ok(home_dir.join(DEFAULT_DIR_NAME))
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Preserved copies (`todos.json.corrupt.<timestamp>`), oldest first.
    pub fn corrupt_copies(&self) -> Result<Vec<PathBuf>> {
        let prefix = self.corrupt_prefix();
        let mut copies = Vec::new();
        if let Some(dir) = self.file_path.parent() {
            for entry in fs::read_dir(dir)? {
                let path = entry?.path();
                let is_copy = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&prefix));
                if is_copy {
                    copies.push(path);
                }
            }
        }
        copies.sort();
        Ok(copies)
    }

    fn corrupt_prefix(&self) -> String {
        format!("{}.json.{}.", RECORD_NAME, CORRUPT_SUFFIX)
    }

    /// A fresh path for a preserved copy. Never returns an existing path, so
    /// earlier copies are kept.
    fn next_corrupt_path(&self) -> PathBuf {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
        let base = format!("{}{}", self.corrupt_prefix(), stamp);
        let mut path = self.file_path.with_file_name(&base);
        let mut n = 1;
        while path.exists() {
            path = self.file_path.with_file_name(format!("{}-{}", base, n));
            n += 1;
        }
        path
    }

    fn temp_path(&self) -> PathBuf {
        self.file_path.with_extension("json.tmp")
    }
}

impl TaskRepository for FileTaskRepository {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.file_path) {
            // An empty file counts as "nothing stored".
            Ok(content) if content.iter().all(u8::is_ascii_whitespace) => Ok(None),
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Could not read {}", self.file_path.display())),
        }
    }

    fn write(&self, document: &str) -> Result<()> {
        let temp = self.temp_path();
        {
            let file = File::create(&temp)
                .with_context(|| format!("Could not create {}", temp.display()))?;
            let mut writer = BufWriter::new(file);
            writer.write_all(document.as_bytes())?;
            writer.flush()?;
        }
        fs::rename(&temp, &self.file_path)
            .with_context(|| format!("Could not replace {}", self.file_path.display()))?;
        debug!("Wrote {} bytes to {}", document.len(), self.file_path.display());
        Ok(())
    }

    fn preserve_corrupt(&self, document: &[u8]) -> Result<()> {
        let path = self.next_corrupt_path();
        fs::write(&path, document).with_context(|| format!("Could not write {}", path.display()))?;
        warn!("Kept unreadable task document at {}", path.display());
        Ok(())
    }

    fn set_aside(&self) -> Result<()> {
        if fs::symlink_metadata(&self.file_path).is_err() {
            return Ok(());
        }
        let path = self.next_corrupt_path();
        fs::rename(&self.file_path, &path)
            .with_context(|| format!("Could not move {} aside", self.file_path.display()))?;
        warn!("Moved unreadable task document to {}", path.display());
        Ok(())
    }
}
