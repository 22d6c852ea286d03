use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{Local, NaiveDate, Utc};
use crossterm::event::{KeyCode, KeyEvent};

use crate::filter::FilterMode;
use crate::stats::Stats;
use crate::storage::Storage;
use crate::store::TaskStore;
use crate::task::{Category, Priority, Task};

const NOTIFICATION_VISIBLE: Duration = Duration::from_millis(3000);
const NOTIFICATION_EXIT: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Adding,
    ConfirmingDelete(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Category,
    Priority,
    Deadline,
    Subject,
}

impl FormField {
    pub const ORDER: [FormField; 6] = [
        FormField::Title,
        FormField::Description,
        FormField::Category,
        FormField::Priority,
        FormField::Deadline,
        FormField::Subject,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Category => "Category",
            FormField::Priority => "Priority",
            FormField::Deadline => "Deadline (YYYY-MM-DD)",
            FormField::Subject => "Subject",
        }
    }

    fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Input state for the new-task form. Values survive closing the form and
/// are only cleared by a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub deadline: String,
    pub subject: String,
    pub focus: FormField,
    pub error: Option<&'static str>,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: Category::Pelajaran,
            priority: Priority::Medium,
            deadline: String::new(),
            subject: String::new(),
            focus: FormField::Title,
            error: None,
        }
    }
}

impl TaskForm {
    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Deadline => Some(&mut self.deadline),
            FormField::Subject => Some(&mut self.subject),
            FormField::Category | FormField::Priority => None,
        }
    }

    fn cycle(&mut self, step: i32) {
        match self.focus {
            FormField::Category => self.category = cycled(&Category::ALL, self.category, step),
            FormField::Priority => self.priority = cycled(&Priority::ALL, self.priority, step),
            _ => {}
        }
    }

    /// Input-layer constraints: a title is required and the deadline must be
    /// a date that is today or later. Existing records are never
    /// re-validated against these.
    fn validate(&self, today: NaiveDate) -> Result<NaiveDate, &'static str> {
        if self.title.is_empty() {
            return Err("Title is required");
        }
        let deadline = self
            .deadline
            .trim()
            .parse::<NaiveDate>()
            .map_err(|_| "Deadline must be a YYYY-MM-DD date")?;
        if deadline < today {
            return Err("Deadline must be today or later");
        }
        Ok(deadline)
    }
}

fn cycled<T: Copy + PartialEq>(all: &[T], current: T, step: i32) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0) as i32;
    let len = all.len() as i32;
    all[(idx + step).rem_euclid(len) as usize]
}

/// A transient toast. Fully visible for three seconds, then rendered dimmed
/// for a short exit phase, then dropped on the next tick. Toasts stack and
/// expire independently; there is no cancellation path.
#[derive(Debug)]
pub struct Notification {
    pub message: String,
    created: Instant,
}

impl Notification {
    fn new(message: String) -> Self {
        Self {
            message,
            created: Instant::now(),
        }
    }

    pub fn fading(&self) -> bool {
        self.created.elapsed() >= NOTIFICATION_VISIBLE
    }

    fn expired(&self) -> bool {
        self.created.elapsed() >= NOTIFICATION_VISIBLE + NOTIFICATION_EXIT
    }
}

pub struct App {
    pub store: TaskStore,
    /// Volatile: every launch starts back on All.
    pub filter: FilterMode,
    pub dark_mode: bool,
    pub mode: Mode,
    pub form: TaskForm,
    pub notifications: Vec<Notification>,
    pub selected: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(storage: Storage) -> Self {
        let dark_mode = storage.load_dark_mode();
        Self {
            store: TaskStore::load(storage),
            filter: FilterMode::All,
            dark_mode,
            mode: Mode::Normal,
            form: TaskForm::default(),
            notifications: Vec::new(),
            selected: 0,
            should_quit: false,
        }
    }

    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.filter.apply(self.store.tasks())
    }

    pub fn selected_task_id(&self) -> Option<i64> {
        self.visible_tasks().get(self.selected).map(|t| t.id)
    }

    pub fn stats(&self) -> Stats {
        Stats::compute(self.store.tasks())
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notifications.push(Notification::new(message.into()));
    }

    /// Drops toasts that have finished their exit phase.
    pub fn tick(&mut self) {
        self.notifications.retain(|n| !n.expired());
    }

    pub fn toggle_theme(&mut self) -> Result<()> {
        self.dark_mode = !self.dark_mode;
        self.store.storage().save_dark_mode(self.dark_mode)
    }

    pub fn theme_toggle_label(&self) -> &'static str {
        if self.dark_mode {
            "☀️ Light Mode"
        } else {
            "🌙 Dark Mode"
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Adding => self.handle_form_key(key),
            Mode::ConfirmingDelete(id) => self.handle_confirm_key(key, id),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('a') => self.open_form(),
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_previous(),
            KeyCode::Char('f') | KeyCode::Tab => self.set_filter(self.filter.next()),
            KeyCode::BackTab => self.set_filter(self.filter.prev()),
            KeyCode::Char('1') => self.set_filter(FilterMode::All),
            KeyCode::Char('2') => self.set_filter(FilterMode::Completed),
            KeyCode::Char('3') => self.set_filter(FilterMode::Pending),
            KeyCode::Char('4') => self.set_filter(FilterMode::High),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected()?,
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_task_id() {
                    self.mode = Mode::ConfirmingDelete(id);
                }
            }
            KeyCode::Char('t') => self.toggle_theme()?,
            _ => {}
        }
        Ok(())
    }

    /// Opening the form always puts the cursor on the title field.
    fn open_form(&mut self) {
        self.form.focus = FormField::Title;
        self.form.error = None;
        self.mode = Mode::Adding;
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Tab | KeyCode::Down => self.form.focus = self.form.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus = self.form.focus.prev(),
            KeyCode::Left => self.form.cycle(-1),
            KeyCode::Right => self.form.cycle(1),
            KeyCode::Enter => self.submit_form()?,
            KeyCode::Backspace => {
                if let Some(text) = self.form.focused_text() {
                    text.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.form.focused_text() {
                    text.push(c);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn submit_form(&mut self) -> Result<()> {
        let today = self.today();
        match self.form.validate(today) {
            Err(message) => self.form.error = Some(message),
            Ok(deadline) => {
                let now = Utc::now();
                let task = Task::new(
                    self.store.allocate_id(now),
                    self.form.title.clone(),
                    self.form.description.clone(),
                    self.form.category,
                    self.form.priority,
                    deadline,
                    self.form.subject.clone(),
                    now,
                );
                self.store.insert(task)?;
                self.form = TaskForm::default();
                self.mode = Mode::Normal;
                self.selected = 0;
                self.notify("Task added! 🎉");
            }
        }
        Ok(())
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, id: i64) -> Result<()> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.mode = Mode::Normal;
                if self.store.remove(id)? {
                    self.notify("Task deleted! 🗑️");
                }
                self.clamp_selection();
            }
            // Declined: nothing changes and nothing is announced.
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.mode = Mode::Normal,
            _ => {}
        }
        Ok(())
    }

    fn set_filter(&mut self, filter: FilterMode) {
        self.filter = filter;
        self.selected = 0;
    }

    fn toggle_selected(&mut self) -> Result<()> {
        let Some(id) = self.selected_task_id() else {
            return Ok(());
        };
        if self.store.toggle_completed(id)? == Some(true) {
            self.notify("Task completed! 🎊");
        }
        self.clamp_selection();
        Ok(())
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_tasks().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn select_next(&mut self) {
        let len = self.visible_tasks().len();
        if len == 0 {
            return;
        }
        self.selected = if self.selected + 1 >= len {
            0
        } else {
            self.selected + 1
        };
    }

    fn select_previous(&mut self) {
        let len = self.visible_tasks().len();
        if len == 0 {
            return;
        }
        self.selected = if self.selected == 0 {
            len - 1
        } else {
            self.selected - 1
        };
    }
}
