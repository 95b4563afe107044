use chrono::{DateTime, Local};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tasklist_core::{Task, TaskRepository, TaskStore};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Done")]
    done: &'static str,
    #[tabled(rename = "Task")]
    text: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        let created: DateTime<Local> = DateTime::from(task.created_at);
        TaskRow {
            id: task.short_id(),
            done: if task.completed { "[x]" } else { "[ ]" },
            text: task.text.clone(),
            created: created.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

pub fn show_tasks<R: TaskRepository>(store: &TaskStore<R>) {
    let rows: Vec<TaskRow> = store.visible_tasks().map(TaskRow::from).collect();

    if rows.is_empty() {
        println!("{}", store.filter().empty_message());
    } else {
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{}", table);
    }
    println!("{}", store.remaining_label());
}
