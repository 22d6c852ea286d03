use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use crate::task::Task;

const TASKS_KEY: &str = "sma-tasks";
const DARK_MODE_KEY: &str = "dark-mode";

/// Key-value store backed by SQLite. The task list lives under one key as a
/// JSON array; the theme flag under another as the literal "true"/"false".
pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {}", path.display()))?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )
        .context("failed to create the kv table")?;
        Ok(Self { conn })
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .with_context(|| format!("failed to write key {key}"))?;
        Ok(())
    }

    /// Absent or unparsable task data reads as an empty list, never an error.
    pub fn load_tasks(&self) -> Vec<Task> {
        self.get(TASKS_KEY)
            .ok()
            .flatten()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        let raw = serde_json::to_string(tasks).context("failed to serialize tasks")?;
        self.set(TASKS_KEY, &raw)
    }

    /// Anything other than the stored literal "true" reads as light mode.
    pub fn load_dark_mode(&self) -> bool {
        matches!(
            self.get(DARK_MODE_KEY).ok().flatten().as_deref(),
            Some("true")
        )
    }

    pub fn save_dark_mode(&self, dark: bool) -> Result<()> {
        self.set(DARK_MODE_KEY, if dark { "true" } else { "false" })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::task::{Category, Priority};

    fn task(id: i64) -> Task {
        Task::new(
            id,
            format!("Task {id}"),
            String::new(),
            Category::Pelajaran,
            Priority::Medium,
            NaiveDate::from_ymd_opt(2026, 8, 20).unwrap(),
            String::new(),
            Utc::now(),
        )
    }

    #[test]
    fn missing_key_reads_as_empty() {
        let storage = Storage::open_in_memory().unwrap();
        assert!(storage.load_tasks().is_empty());
    }

    #[test]
    fn corrupt_task_data_reads_as_empty() {
        let storage = Storage::open_in_memory().unwrap();
        storage.set(TASKS_KEY, "not json at all {{{").unwrap();
        assert!(storage.load_tasks().is_empty());
    }

    #[test]
    fn tasks_round_trip() {
        let storage = Storage::open_in_memory().unwrap();
        let tasks = vec![task(2), task(1)];
        storage.save_tasks(&tasks).unwrap();
        assert_eq!(storage.load_tasks(), tasks);
    }

    #[test]
    fn dark_mode_defaults_to_false() {
        let storage = Storage::open_in_memory().unwrap();
        assert!(!storage.load_dark_mode());
    }

    #[test]
    fn dark_mode_ignores_unexpected_values() {
        let storage = Storage::open_in_memory().unwrap();
        storage.set(DARK_MODE_KEY, "yes").unwrap();
        assert!(!storage.load_dark_mode());
    }

    #[test]
    fn dark_mode_round_trips() {
        let storage = Storage::open_in_memory().unwrap();
        storage.save_dark_mode(true).unwrap();
        assert!(storage.load_dark_mode());
        storage.save_dark_mode(false).unwrap();
        assert!(!storage.load_dark_mode());
    }
}
