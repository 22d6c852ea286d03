use crate::task::{Priority, Task};

/// Active subsetting rule for the task list. Display-only: stats always run
/// over the unfiltered store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    All,
    Completed,
    Pending,
    High,
}

impl FilterMode {
    pub const MODES: [FilterMode; 4] = [
        FilterMode::All,
        FilterMode::Completed,
        FilterMode::Pending,
        FilterMode::High,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilterMode::All => "All",
            FilterMode::Completed => "Completed",
            FilterMode::Pending => "Pending",
            FilterMode::High => "High Priority",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FilterMode::All => FilterMode::Completed,
            FilterMode::Completed => FilterMode::Pending,
            FilterMode::Pending => FilterMode::High,
            FilterMode::High => FilterMode::All,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FilterMode::All => FilterMode::High,
            FilterMode::Completed => FilterMode::All,
            FilterMode::Pending => FilterMode::Completed,
            FilterMode::High => FilterMode::Pending,
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Completed => task.completed,
            FilterMode::Pending => !task.completed,
            // Priority-only: a completed high-priority task still matches.
            FilterMode::High => task.priority == Priority::High,
        }
    }

    /// Subsets without reordering.
    pub fn apply(self, tasks: &[Task]) -> Vec<&Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::task::Category;

    fn task(id: i64, priority: Priority, completed: bool) -> Task {
        let mut task = Task::new(
            id,
            format!("Task {id}"),
            String::new(),
            Category::Pelajaran,
            priority,
            NaiveDate::from_ymd_opt(2026, 8, 20).unwrap(),
            String::new(),
            Utc::now(),
        );
        task.completed = completed;
        task
    }

    fn sample() -> Vec<Task> {
        vec![
            task(1, Priority::High, true),
            task(2, Priority::Low, false),
            task(3, Priority::High, false),
            task(4, Priority::Medium, true),
        ]
    }

    #[test]
    fn all_is_the_identity() {
        let tasks = sample();
        let ids: Vec<i64> = FilterMode::All.apply(&tasks).iter().map(|t| t.id).collect();
        assert_eq!(ids, [1, 2, 3, 4]);
    }

    #[test]
    fn completed_and_pending_partition_the_list() {
        let tasks = sample();
        let completed: Vec<i64> = FilterMode::Completed
            .apply(&tasks)
            .iter()
            .map(|t| t.id)
            .collect();
        let pending: Vec<i64> = FilterMode::Pending
            .apply(&tasks)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(completed, [1, 4]);
        assert_eq!(pending, [2, 3]);
        assert_eq!(completed.len() + pending.len(), tasks.len());
        assert!(completed.iter().all(|id| !pending.contains(id)));
    }

    #[test]
    fn high_ignores_completion_state() {
        let tasks = sample();
        let ids: Vec<i64> = FilterMode::High.apply(&tasks).iter().map(|t| t.id).collect();
        assert_eq!(ids, [1, 3]);
    }

    #[test]
    fn filtering_preserves_relative_order() {
        let tasks = sample();
        let ids: Vec<i64> = FilterMode::Pending
            .apply(&tasks)
            .iter()
            .map(|t| t.id)
            .collect();
        let mut sorted = ids.clone();
        sorted.sort_by_key(|id| tasks.iter().position(|t| t.id == *id));
        assert_eq!(ids, sorted);
    }

    #[test]
    fn modes_cycle_in_a_ring() {
        let mut mode = FilterMode::All;
        for _ in 0..FilterMode::MODES.len() {
            mode = mode.next();
        }
        assert_eq!(mode, FilterMode::All);
        assert_eq!(FilterMode::All.prev(), FilterMode::High);
    }
}
