use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::storage::Storage;
use crate::task::Task;

/// In-memory task list, newest first, mirrored to storage on every mutation.
pub struct TaskStore {
    tasks: Vec<Task>,
    storage: Storage,
}

impl TaskStore {
    /// Loads whatever the storage holds; corrupt or missing data starts the
    /// session with an empty list.
    pub fn load(storage: Storage) -> Self {
        let tasks = storage.load_tasks();
        Self { tasks, storage }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Millisecond timestamp, bumped past the current maximum so two
    /// creations in the same millisecond still get distinct ids.
    pub fn allocate_id(&self, now: DateTime<Utc>) -> i64 {
        let candidate = now.timestamp_millis();
        match self.tasks.iter().map(|t| t.id).max() {
            Some(max) if candidate <= max => max + 1,
            _ => candidate,
        }
    }

    pub fn insert(&mut self, task: Task) -> Result<()> {
        self.tasks.insert(0, task);
        self.persist()
    }

    pub fn find_by_id(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Returns the new completion state, or None when no task matches.
    pub fn toggle_completed(&mut self, id: i64) -> Result<Option<bool>> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        task.completed = !task.completed;
        let state = task.completed;
        self.persist()?;
        Ok(Some(state))
    }

    /// Removing an unknown id is a no-op; returns whether anything was removed.
    pub fn remove(&mut self, id: i64) -> Result<bool> {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            return Ok(false);
        };
        self.tasks.remove(pos);
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> Result<()> {
        self.storage.save_tasks(&self.tasks)
    }
}
