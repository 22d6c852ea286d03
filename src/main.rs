use std::io::{self, Stdout, Write, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use crossterm::{
    ExecutableCommand,
    event::{self, Event},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    tty::IsTty,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use tugasku::app::App;
use tugasku::filter::FilterMode;
use tugasku::stats::Stats;
use tugasku::storage::Storage;
use tugasku::store::TaskStore;
use tugasku::task::{Category, Priority, Task};
use tugasku::{config, ui, view};

#[derive(Parser)]
#[command(name = "tugasku")]
#[command(about = "A school task tracker with TUI and CLI interfaces")]
struct Cli {
    /// Use a different database file
    #[arg(long, value_name = "PATH")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task title
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Task category
        #[arg(short, long, value_enum)]
        category: Category,
        /// Priority level
        #[arg(short, long, value_enum, default_value = "medium")]
        priority: Priority,
        /// Deadline (YYYY-MM-DD, today or later)
        #[arg(long)]
        deadline: NaiveDate,
        #[arg(short, long, default_value = "")]
        subject: String,
    },
    /// List tasks
    List {
        /// Show only completed tasks
        #[arg(long)]
        completed: bool,
        /// Show only pending tasks
        #[arg(long)]
        pending: bool,
        /// Show only high-priority tasks
        #[arg(long)]
        high: bool,
    },
    /// Toggle a task between pending and completed
    Toggle {
        /// Task id
        id: i64,
    },
    /// Delete a task
    Delete {
        /// Task id
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show task statistics
    Stats,
    /// Switch between dark and light mode
    Theme,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let database_path = match cli.database {
        Some(path) => path,
        None => config::load()?.database_path,
    };
    let storage = Storage::open(&database_path)?;

    // With a subcommand, act and exit; without one, run the interactive TUI.
    if let Some(command) = cli.command {
        return run_cli(storage, command);
    }

    if !io::stdout().is_tty() {
        anyhow::bail!("interactive mode needs a terminal; run with --help to see subcommands");
    }

    let mut app = App::new(storage);
    run_tui(&mut app)
}

fn run_tui(app: &mut App) -> Result<()> {
    stdout().execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // The poll timeout doubles as the tick that retires notifications.
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key)?;
            }
        }
        app.tick();
    }
    Ok(())
}

fn run_cli(storage: Storage, command: Commands) -> Result<()> {
    let mut store = TaskStore::load(storage);
    let today = Local::now().date_naive();

    match command {
        Commands::Add {
            title,
            description,
            category,
            priority,
            deadline,
            subject,
        } => {
            if deadline < today {
                anyhow::bail!("deadline must be today or later");
            }
            let now = Utc::now();
            let task = Task::new(
                store.allocate_id(now),
                title,
                description,
                category,
                priority,
                deadline,
                subject,
                now,
            );
            store.insert(task)?;
            println!("Task added! 🎉");
        }
        Commands::List {
            completed,
            pending,
            high,
        } => {
            let filter = if completed {
                FilterMode::Completed
            } else if pending {
                FilterMode::Pending
            } else if high {
                FilterMode::High
            } else {
                FilterMode::All
            };

            let cards = view::build_cards(&filter.apply(store.tasks()), today);
            if cards.is_empty() {
                let (headline, body) = view::empty_state(filter);
                println!("{headline} {body}");
            }
            for card in cards {
                let status = if card.completed { "✓" } else { "○" };
                let mut line = format!(
                    "{status} [{}] {} {}",
                    card.id, card.category_icon, card.title
                );
                if let Some(subject) = &card.subject {
                    line.push_str(&format!(" — {subject}"));
                }
                line.push_str(&format!(
                    " · {} · {}",
                    card.deadline_label, card.priority_label
                ));
                println!("{line}");
            }
        }
        Commands::Toggle { id } => match store.toggle_completed(id)? {
            Some(true) => println!("Task completed! 🎊"),
            Some(false) => println!("Task moved back to pending."),
            None => println!("No task with id {id}."),
        },
        Commands::Delete { id, yes } => {
            if !yes && !confirm_delete()? {
                // Declined: no mutation, nothing to report.
                return Ok(());
            }
            if store.remove(id)? {
                println!("Task deleted! 🗑️");
            } else {
                println!("No task with id {id}.");
            }
        }
        Commands::Stats => {
            let stats = view::stats_view(Stats::compute(store.tasks()));
            println!("Total:      {}", stats.total);
            println!("Completed:  {}", stats.completed);
            println!("Pending:    {}", stats.pending);
            println!("Completion: {}", stats.rate);
        }
        Commands::Theme => {
            let dark = !store.storage().load_dark_mode();
            store.storage().save_dark_mode(dark)?;
            println!(
                "{}",
                if dark {
                    "Dark mode on 🌙"
                } else {
                    "Dark mode off ☀️"
                }
            );
        }
    }

    Ok(())
}

fn confirm_delete() -> Result<bool> {
    print!("Delete this task? This cannot be undone. [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y"))
}
