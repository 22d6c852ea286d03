use chrono::NaiveDate;

use crate::filter::FilterMode;
use crate::stats::Stats;
use crate::task::{Priority, Task};

/// Per-task display record. Everything the presentation layer shows about a
/// task is computed here, so rendering stays a dumb projection.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskCard {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category_icon: &'static str,
    pub category_name: &'static str,
    pub subject: Option<String>,
    pub deadline_label: String,
    pub overdue: bool,
    pub priority: Priority,
    pub priority_label: &'static str,
    pub completed: bool,
    pub toggle_label: &'static str,
    pub delete_label: &'static str,
}

pub fn build_card(task: &Task, today: NaiveDate) -> TaskCard {
    TaskCard {
        id: task.id,
        title: task.title.clone(),
        description: (!task.description.is_empty()).then(|| task.description.clone()),
        category_icon: task.category.icon(),
        category_name: task.category.name(),
        subject: (!task.subject.is_empty()).then(|| task.subject.clone()),
        deadline_label: deadline_label(task.deadline, today),
        overdue: task.deadline < today,
        priority: task.priority,
        priority_label: task.priority.label(),
        completed: task.completed,
        toggle_label: if task.completed { "Undo" } else { "Complete" },
        delete_label: "Delete",
    }
}

pub fn build_cards(tasks: &[&Task], today: NaiveDate) -> Vec<TaskCard> {
    tasks.iter().map(|task| build_card(task, today)).collect()
}

/// Whole-day distance between the deadline and today, both at midnight.
pub fn deadline_label(deadline: NaiveDate, today: NaiveDate) -> String {
    let days = deadline.signed_duration_since(today).num_days();
    if days < 0 {
        format!("Overdue by {} days", -days)
    } else if days == 0 {
        "Today".to_string()
    } else if days == 1 {
        "Tomorrow".to_string()
    } else {
        format!("{days} days left")
    }
}

/// Headline and body for an empty filtered list. The body tells the user to
/// add a task only when no filter is hiding anything.
pub fn empty_state(filter: FilterMode) -> (&'static str, &'static str) {
    let body = if filter == FilterMode::All {
        "Add a new task to get started"
    } else {
        "No tasks match this filter"
    };
    ("🎉 No tasks!", body)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsView {
    pub total: String,
    pub completed: String,
    pub pending: String,
    pub rate: String,
}

pub fn stats_view(stats: Stats) -> StatsView {
    StatsView {
        total: stats.total.to_string(),
        completed: stats.completed.to_string(),
        pending: stats.pending.to_string(),
        rate: format!("{}%", stats.rate),
    }
}
