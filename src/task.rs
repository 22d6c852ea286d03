use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Pelajaran,
    Ujian,
    Tugas,
    Ekstrakurikuler,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Pelajaran,
        Category::Ujian,
        Category::Tugas,
        Category::Ekstrakurikuler,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Pelajaran => "pelajaran",
            Category::Ujian => "ujian",
            Category::Tugas => "tugas",
            Category::Ekstrakurikuler => "ekstrakurikuler",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Pelajaran => "📖",
            Category::Ujian => "📝",
            Category::Tugas => "📚",
            Category::Ekstrakurikuler => "🎨",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

/// A single trackable to-do item. The serialized field names (`createdAt`
/// and friends) are the on-disk contract, so renames here change the
/// stored format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub subject: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        title: String,
        description: String,
        category: Category,
        priority: Priority,
        deadline: NaiveDate,
        subject: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            category,
            priority,
            deadline,
            subject,
            completed: false,
            created_at,
        }
    }
}
