use chrono::{Duration, Local, Utc};
use tempfile::tempdir;

use tugasku::app::App;
use tugasku::filter::FilterMode;
use tugasku::stats::Stats;
use tugasku::storage::Storage;
use tugasku::store::TaskStore;
use tugasku::task::{Category, Priority, Task};
use tugasku::view;

fn new_task(store: &TaskStore, title: &str, priority: Priority) -> Task {
    let now = Utc::now();
    Task::new(
        store.allocate_id(now),
        title.to_string(),
        String::new(),
        Category::Tugas,
        priority,
        Local::now().date_naive(),
        "Mathematics".to_string(),
        now,
    )
}

#[test]
fn store_contents_survive_a_reopen_after_every_kind_of_mutation() {
    let temp = tempdir().expect("tempdir");
    let db = temp.path().join("storage.db");

    let snapshot = {
        let mut store = TaskStore::load(Storage::open(&db).expect("open storage"));
        let a = new_task(&store, "Read chapter 3", Priority::Low);
        store.insert(a).expect("insert");
        let b = new_task(&store, "Physics lab report", Priority::High);
        let b_id = b.id;
        store.insert(b).expect("insert");
        let c = new_task(&store, "Club signup", Priority::Medium);
        let c_id = c.id;
        store.insert(c).expect("insert");

        store.toggle_completed(b_id).expect("toggle");
        store.remove(c_id).expect("remove");
        store.tasks().to_vec()
    };

    let reopened = TaskStore::load(Storage::open(&db).expect("reopen storage"));
    assert_eq!(reopened.tasks(), snapshot.as_slice());
    assert_eq!(reopened.tasks().len(), 2);
    assert!(reopened.tasks().iter().any(|t| t.completed));
}

#[test]
fn inserting_then_completing_moves_the_stats_and_filters_together() {
    let temp = tempdir().expect("tempdir");
    let db = temp.path().join("storage.db");
    let mut store = TaskStore::load(Storage::open(&db).expect("open storage"));

    let task = new_task(&store, "Math HW", Priority::High);
    let id = task.id;
    let today = Local::now().date_naive();
    store.insert(task).expect("insert");

    let cards = view::build_cards(&FilterMode::All.apply(store.tasks()), today);
    assert_eq!(cards[0].deadline_label, "Today");

    let stats = Stats::compute(store.tasks());
    assert_eq!((stats.total, stats.completed, stats.pending), (1, 0, 1));
    assert_eq!(view::stats_view(stats).rate, "0%");

    store.toggle_completed(id).expect("toggle");
    let stats = Stats::compute(store.tasks());
    assert_eq!((stats.total, stats.completed, stats.pending), (1, 1, 0));
    assert_eq!(view::stats_view(stats).rate, "100%");

    assert!(FilterMode::Pending.apply(store.tasks()).is_empty());
    assert_eq!(FilterMode::All.apply(store.tasks()).len(), 1);
}

#[test]
fn deadline_labels_for_future_and_overdue_tasks() {
    let temp = tempdir().expect("tempdir");
    let db = temp.path().join("storage.db");
    let mut store = TaskStore::load(Storage::open(&db).expect("open storage"));
    let today = Local::now().date_naive();

    let mut soon = new_task(&store, "Essay draft", Priority::Medium);
    soon.deadline = today + Duration::days(3);
    store.insert(soon).expect("insert");

    let mut late = new_task(&store, "Permission slip", Priority::Low);
    late.deadline = today - Duration::days(1);
    store.insert(late).expect("insert");

    let cards = view::build_cards(&FilterMode::All.apply(store.tasks()), today);
    assert_eq!(cards[0].deadline_label, "Overdue by 1 days");
    assert!(cards[0].overdue);
    assert_eq!(cards[1].deadline_label, "3 days left");
}

#[test]
fn deleting_the_only_task_resets_store_stats_and_persisted_state() {
    let temp = tempdir().expect("tempdir");
    let db = temp.path().join("storage.db");

    {
        let mut store = TaskStore::load(Storage::open(&db).expect("open storage"));
        let task = new_task(&store, "One and only", Priority::Medium);
        let id = task.id;
        store.insert(task).expect("insert");
        assert!(store.remove(id).expect("remove"));

        assert!(store.tasks().is_empty());
        assert_eq!(Stats::compute(store.tasks()), Stats::default());
        assert_eq!(view::stats_view(Stats::default()).rate, "0%");
    }

    let reopened = TaskStore::load(Storage::open(&db).expect("reopen storage"));
    assert!(reopened.tasks().is_empty());
}

#[test]
fn dark_mode_flag_survives_reopen_after_each_flip() {
    let temp = tempdir().expect("tempdir");
    let db = temp.path().join("storage.db");

    {
        let storage = Storage::open(&db).expect("open storage");
        assert!(!storage.load_dark_mode());
        storage.save_dark_mode(true).expect("save");
    }
    assert!(Storage::open(&db).expect("reopen").load_dark_mode());

    {
        let storage = Storage::open(&db).expect("reopen");
        storage.save_dark_mode(false).expect("save");
    }
    assert!(!Storage::open(&db).expect("reopen").load_dark_mode());
}

#[test]
fn filter_mode_is_volatile_while_the_theme_flag_is_not() {
    let temp = tempdir().expect("tempdir");
    let db = temp.path().join("storage.db");

    {
        let mut app = App::new(Storage::open(&db).expect("open storage"));
        app.filter = FilterMode::High;
        app.toggle_theme().expect("toggle theme");
    }

    let app = App::new(Storage::open(&db).expect("reopen"));
    assert_eq!(app.filter, FilterMode::All);
    assert!(app.dark_mode);
}
