use ratatui::widgets::TableState;
use tasklist_core::{Filter, LoadStatus, TaskRepository, TaskStore};
use unicode_width::UnicodeWidthStr;
use uuid::Uuid;

pub enum InputMode {
    Normal,
    Adding,
}

pub struct App<R: TaskRepository> {
    pub store: TaskStore<R>,
    pub state: TableState,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
}

impl<R: TaskRepository> App<R> {
    pub fn new(store: TaskStore<R>) -> App<R> {
        let mut app = App {
            store,
            state: TableState::default(),
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
        };
        app.clamp_selection();
        app
    }

    /// Ids of the rows currently on screen, in display order.
    pub fn visible_ids(&self) -> Vec<Uuid> {
        self.store.visible_tasks().map(|t| t.id).collect()
    }

    pub fn selected_id(&self) -> Option<Uuid> {
        let i = self.state.selected()?;
        self.store.visible_tasks().nth(i).map(|t| t.id)
    }

    pub fn next(&mut self) {
        let len = self.store.visible_tasks().count();
        if len == 0 { return; }

        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.store.visible_tasks().count();
        if len == 0 { return; }

        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.store.toggle(&id);
            // Under Active/Completed the row may have just left the view.
            self.clamp_selection();
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.store.delete(&id);
            self.clamp_selection();
        }
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.store.set_filter(filter);
        self.state.select(None);
        self.clamp_selection();
    }

    pub fn next_filter(&mut self) {
        self.set_filter(self.store.filter().next());
    }

    pub fn previous_filter(&mut self) {
        self.set_filter(self.store.filter().previous());
    }

    /// Keeps the selection inside the visible rows, selecting the first row
    /// when there is something to select.
    fn clamp_selection(&mut self) {
        let len = self.store.visible_tasks().count();
        if len == 0 {
            self.state.select(None);
        } else {
            let i = self.state.selected().unwrap_or(0).min(len - 1);
            self.state.select(Some(i));
        }
    }

    pub fn enter_add_mode(&mut self) {
        self.input_mode = InputMode::Adding;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.byte_index(self.cursor_position);
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index = self.byte_index(self.cursor_position - 1);
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    /// Display column of the cursor, counting wide characters as two.
    pub fn cursor_column(&self) -> u16 {
        let prefix = &self.input[..self.byte_index(self.cursor_position)];
        u16::try_from(UnicodeWidthStr::width(prefix)).unwrap_or(u16::MAX)
    }

    fn byte_index(&self, char_position: usize) -> usize {
        self.input.chars().take(char_position).map(|c| c.len_utf8()).sum()
    }

    /// Adds the typed text and selects the new row if the current filter
    /// shows it. Blank input just closes the prompt.
    pub fn submit_add(&mut self) {
        let before = self.store.tasks().len();
        self.store.add(&self.input);

        if let Some(task) = self.store.tasks().get(before) {
            let id = task.id;
            if let Some(pos) = self.visible_ids().iter().position(|v| *v == id) {
                self.state.select(Some(pos));
            }
        }
        self.clamp_selection();

        self.input.clear();
        self.cursor_position = 0;
        self.exit_input_mode();
    }

    /// Warning shown above the footer, if any.
    pub fn status_message(&self) -> Option<String> {
        if let Some(err) = self.store.last_save_error() {
            return Some(format!("Changes not saved: {}", err));
        }
        match self.store.load_status() {
            LoadStatus::Discarded { reason } => {
                Some(format!("Stored tasks could not be read and were set aside: {}", reason))
            }
            _ => None,
        }
    }
}
