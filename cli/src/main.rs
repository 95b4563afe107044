mod list;
mod logging;
mod tui;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use tasklist_core::{FileTaskRepository, Filter, LoadStatus, TaskRepository, TaskStore};

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "A small to-do list for the terminal", long_about = None)]
struct Cli {
    /// Directory holding todos.json (default: ~/.tasklist)
    #[arg(long, env = "TASKLIST_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add a new task (usage: add Buy milk)
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// List tasks
    List {
        /// all, active or completed
        #[arg(short, long, default_value = "all")]
        filter: Filter,
    },
    /// Mark a task done, or undone if it already is
    Toggle {
        /// Task ID or unique ID prefix
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID or unique ID prefix
        id: String,
    },
    /// Open the Terminal User Interface
    Tui,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, None | Some(Commands::Tui));

    let repo = FileTaskRepository::new(cli.data_dir)?;
    logging::init(repo.file_path().parent(), interactive);
    let mut store = TaskStore::open(repo);

    if !interactive {
        if let LoadStatus::Discarded { reason } = store.load_status() {
            eprintln!("Warning: stored tasks could not be read and were set aside ({})", reason);
        }
    }

    match cli.command {
        Some(Commands::Add { text }) => {
            let text = text.join(" ");
            let before = store.tasks().len();
            store.add(&text);
            check_saved(&store)?;

            match store.tasks().get(before) {
                Some(task) => println!("Task added: {} (ID: {})", task.text, task.short_id()),
                None => println!("Nothing to add: task text is empty."),
            }
        }
        Some(Commands::List { filter }) => {
            store.set_filter(filter);
            list::show_tasks(&store);
        }
        Some(Commands::Toggle { id }) => {
            let id = store.resolve_id(&id)?;
            store.toggle(&id);
            check_saved(&store)?;
            if let Some(task) = store.get(&id) {
                let state = if task.completed { "completed" } else { "active" };
                println!("Task {} is now {}: {}", task.short_id(), state, task.text);
            }
        }
        Some(Commands::Delete { id }) => {
            let id = store.resolve_id(&id)?;
            let text = store.get(&id).map(|t| t.text.clone()).unwrap_or_default();
            store.delete(&id);
            check_saved(&store)?;
            println!("Task deleted: {}", text);
        }
        Some(Commands::Tui) | None => {
            tui::run(store)?;
        }
    }
    Ok(())
}

/// One-shot commands exit non-zero when their change did not reach disk.
fn check_saved<R: TaskRepository>(store: &TaskStore<R>) -> Result<()> {
    match store.last_save_error() {
        Some(err) => Err(anyhow!("Could not save tasks: {}", err)),
        None => Ok(()),
    }
}
