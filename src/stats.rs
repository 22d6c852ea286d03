use crate::task::Task;

/// Derived counters over the full, unfiltered store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Completion percentage, rounded to the nearest whole number. Zero for
    /// an empty store.
    pub rate: u8,
}

impl Stats {
    pub fn compute(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        let pending = total - completed;
        let rate = if total > 0 {
            (completed as f64 / total as f64 * 100.0).round() as u8
        } else {
            0
        };
        Self {
            total,
            completed,
            pending,
            rate,
        }
    }
}
