use anyhow::{anyhow, Result};
use log::{debug, warn};
use uuid::Uuid;

use crate::model::filter::Filter;
use crate::model::task::Task;
use crate::repository::document::{self, Decoded};
use crate::repository::TaskRepository;

/// What happened when the persisted document was read.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    /// Nothing was stored yet.
    Fresh,
    Restored { count: usize },
    /// Read from the unversioned legacy shape; rewritten on the next save.
    Upgraded { count: usize },
    /// Stored data could not be read or decoded and was replaced by an
    /// empty list.
    Discarded { reason: String },
}

impl LoadStatus {
    pub fn is_discarded(&self) -> bool {
        matches!(self, LoadStatus::Discarded { .. })
    }
}

/// Owns the ordered task list and the active filter.
///
/// Every mutation is followed by a full save through the repository. None of
/// the operations fail: bad input and unknown ids are ignored, unreadable
/// data loads as an empty list, and a failed save is logged and kept in
/// [`TaskStore::last_save_error`] while the in-memory list stays
/// authoritative.
pub struct TaskStore<R: TaskRepository> {
    repo: R,
    tasks: Vec<Task>,
    filter: Filter,
    load_status: LoadStatus,
    last_save_error: Option<String>,
    write_blocked: Option<String>,
}

impl<R: TaskRepository> TaskStore<R> {
    pub fn open(repo: R) -> Self {
        let mut store = Self {
            repo,
            tasks: Vec::new(),
            filter: Filter::default(),
            load_status: LoadStatus::Fresh,
            last_save_error: None,
            write_blocked: None,
        };
        store.load();
        store
    }

    /// Replaces the in-memory list with the persisted one.
    ///
    /// Whatever cannot be loaded is handed back to the repository to keep
    /// before anything is written over it. If that fails too, saving stays
    /// blocked for the life of this store.
    pub fn load(&mut self) -> &[Task] {
        self.write_blocked = None;
        let (tasks, status) = match self.repo.read() {
            Ok(None) => (Vec::new(), LoadStatus::Fresh),
            Ok(Some(raw)) => match document::decode(&raw) {
                Ok(decoded) => {
                    let legacy = matches!(decoded, Decoded::Legacy(_));
                    let tasks = decoded.into_tasks();
                    let count = tasks.len();
                    let status = if legacy {
                        LoadStatus::Upgraded { count }
                    } else {
                        LoadStatus::Restored { count }
                    };
                    (tasks, status)
                }
                Err(e) => {
                    warn!("Discarding unreadable task document: {}", e);
                    if let Err(err) = self.repo.preserve_corrupt(&raw) {
                        self.block_writes(err);
                    }
                    (Vec::new(), LoadStatus::Discarded { reason: e.to_string() })
                }
            },
            Err(e) => {
                warn!("Could not read task document: {:#}", e);
                if let Err(err) = self.repo.set_aside() {
                    self.block_writes(err);
                }
                (Vec::new(), LoadStatus::Discarded { reason: format!("{:#}", e) })
            }
        };

        debug!("Loaded {} tasks ({:?})", tasks.len(), status);
        self.tasks = tasks;
        self.load_status = status;
        &self.tasks
    }

    fn block_writes(&mut self, err: anyhow::Error) {
        warn!("Could not preserve discarded document, saving is disabled: {:#}", err);
        self.write_blocked = Some(format!("discarded document could not be preserved ({:#})", err));
    }

    pub fn save(&mut self) {
        if let Some(reason) = &self.write_blocked {
            warn!("Not saving tasks: {}", reason);
            self.last_save_error = Some(reason.clone());
            return;
        }

        let result = document::encode(&self.tasks)
            .map_err(anyhow::Error::from)
            .and_then(|doc| self.repo.write(&doc));

        match result {
            Ok(()) => {
                debug!("Saved {} tasks", self.tasks.len());
                self.last_save_error = None;
            }
            Err(e) => {
                warn!("Failed to save tasks: {:#}", e);
                self.last_save_error = Some(format!("{:#}", e));
            }
        }
    }

    /// Appends a task unless `text` is blank. The text is kept as entered.
    pub fn add(&mut self, text: &str) -> &[Task] {
        if text.trim().is_empty() {
            return &self.tasks;
        }
        let task = Task::new(text.to_string());
        debug!("Adding task {}", task.id);
        self.tasks.push(task);
        self.save();
        &self.tasks
    }

    pub fn toggle(&mut self, id: &Uuid) -> &[Task] {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == *id) {
            task.toggle();
        }
        self.save();
        &self.tasks
    }

    pub fn delete(&mut self, id: &Uuid) -> &[Task] {
        self.tasks.retain(|t| t.id != *id);
        self.save();
        &self.tasks
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn visible_tasks(&self) -> impl Iterator<Item = &Task> + '_ {
        let filter = self.filter;
        self.tasks.iter().filter(move |t| filter.matches(t))
    }

    pub fn remaining_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    pub fn remaining_label(&self) -> String {
        let count = self.remaining_count();
        format!("{} {} left", count, if count == 1 { "item" } else { "items" })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == *id)
    }

    /// Resolves a full id or a unique id prefix.
    pub fn resolve_id(&self, query: &str) -> Result<Uuid> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Err(anyhow!("Task ID is required"));
        }

        let matches: Vec<Uuid> = self
            .tasks
            .iter()
            .map(|t| t.id)
            .filter(|id| id.to_string().starts_with(&query))
            .collect();

        match matches.as_slice() {
            [] => Err(anyhow!("No task matches '{}'", query)),
            [id] => Ok(*id),
            many => Err(anyhow!("'{}' is ambiguous ({} tasks match)", query, many.len())),
        }
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }
}
