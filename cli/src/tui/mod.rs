pub mod app;
pub mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::error;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tasklist_core::{Filter, TaskRepository, TaskStore};

use crate::tui::app::{App, InputMode};

pub fn run<R: TaskRepository>(store: TaskStore<R>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("TUI loop failed: {:?}", err);
        println!("{:?}", err);
    }

    Ok(())
}

fn run_app<B: Backend, R: TaskRepository>(terminal: &mut Terminal<B>, app: &mut App<R>) -> io::Result<()> {
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if !handle_key(app, key.code) {
                    return Ok(());
                }
            }
        }
    }
}

/// Applies one key press. Returns `false` when the user asked to quit.
fn handle_key<R: TaskRepository>(app: &mut App<R>, code: KeyCode) -> bool {
    match app.input_mode {
        InputMode::Normal => match code {
            KeyCode::Char('q') => return false,
            KeyCode::Down | KeyCode::Char('j') => app.next(),
            KeyCode::Up | KeyCode::Char('k') => app.previous(),
            KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected(),
            KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
            KeyCode::Char('a') => app.enter_add_mode(),
            KeyCode::Tab | KeyCode::Right => app.next_filter(),
            KeyCode::BackTab | KeyCode::Left => app.previous_filter(),
            KeyCode::Char('1') => app.set_filter(Filter::All),
            KeyCode::Char('2') => app.set_filter(Filter::Active),
            KeyCode::Char('3') => app.set_filter(Filter::Completed),
            _ => {}
        },
        InputMode::Adding => match code {
            KeyCode::Enter => app.submit_add(),
            KeyCode::Esc => app.exit_input_mode(),
            KeyCode::Char(c) => app.input_char(c),
            KeyCode::Backspace => app.delete_char(),
            KeyCode::Left => app.move_cursor_left(),
            KeyCode::Right => app.move_cursor_right(),
            _ => {}
        },
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklist_core::MemoryTaskRepository;

    #[test]
    fn keys_drive_add_toggle_and_filter() {
        let mut app = App::new(TaskStore::open(MemoryTaskRepository::new()));

        assert!(handle_key(&mut app, KeyCode::Char('a')));
        for c in "Buy milk".chars() {
            handle_key(&mut app, KeyCode::Char(c));
        }
        handle_key(&mut app, KeyCode::Enter);
        assert_eq!(app.store.tasks().len(), 1);

        handle_key(&mut app, KeyCode::Char(' '));
        assert!(app.store.tasks()[0].completed);

        handle_key(&mut app, KeyCode::Char('2'));
        assert_eq!(app.store.filter(), Filter::Active);
        assert_eq!(app.visible_ids().len(), 0);

        handle_key(&mut app, KeyCode::Tab);
        assert_eq!(app.store.filter(), Filter::Completed);
        assert_eq!(app.visible_ids().len(), 1);

        handle_key(&mut app, KeyCode::Char('d'));
        assert!(app.store.tasks().is_empty());
    }

    #[test]
    fn q_quits_only_outside_input() {
        let mut app = App::new(TaskStore::open(MemoryTaskRepository::new()));
        handle_key(&mut app, KeyCode::Char('a'));
        assert!(handle_key(&mut app, KeyCode::Char('q')));
        assert_eq!(app.input, "q");
        handle_key(&mut app, KeyCode::Esc);
        assert!(!handle_key(&mut app, KeyCode::Char('q')));
    }
}
