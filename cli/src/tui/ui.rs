use chrono::{DateTime, Local};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table, Tabs},
    Frame,
};
use tasklist_core::{Filter, TaskRepository};

use crate::tui::app::{App, InputMode};

pub fn draw<R: TaskRepository>(f: &mut Frame, app: &mut App<R>) {
    let size = f.area();
    let adding = matches!(app.input_mode, InputMode::Adding);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3),                          // Header
            Constraint::Length(3),                          // Filter tabs
            Constraint::Min(1),                             // Tasks
            Constraint::Length(if adding { 3 } else { 0 }), // Input
            Constraint::Length(1),                          // Status line
            Constraint::Length(1),                          // Footer/Help
        ])
        .split(size);

    let header = Paragraph::new("TASKLIST")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, chunks[0]);

    draw_filter_tabs(f, app, chunks[1]);
    draw_task_list(f, app, chunks[2]);
    if adding {
        draw_input(f, app, chunks[3]);
    }
    draw_status(f, app, chunks[4]);

    let help = match app.input_mode {
        InputMode::Normal => "a: Add | space: Toggle | d: Delete | tab/1-3: Filter | j/k: Navigate | q: Quit",
        InputMode::Adding => "enter: Save | esc: Cancel",
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, chunks[5]);
}

fn draw_filter_tabs<R: TaskRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let titles: Vec<Line> = Filter::ALL.iter().map(|filter| Line::from(filter.label())).collect();
    let tabs = Tabs::new(titles)
        .select(app.store.filter().index())
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .divider("|");
    f.render_widget(tabs, area);
}

fn draw_task_list<R: TaskRepository>(f: &mut Frame, app: &mut App<R>, area: Rect) {
    let block = Block::default()
        .title(format!(" Tasks ({}) ", app.store.filter()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let rows: Vec<Row> = app.store.visible_tasks().map(|task| {
        let (status_icon, text_style) = if task.completed {
            ("✔", Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT))
        } else {
            ("☐", Style::default().add_modifier(Modifier::BOLD))
        };
        let created: DateTime<Local> = DateTime::from(task.created_at);

        Row::new(vec![
            Span::raw(status_icon),
            Span::styled(task.text.clone(), text_style),
            Span::styled(created.format("%m-%d %H:%M").to_string(), Style::default().fg(Color::DarkGray)),
        ])
    }).collect();

    if rows.is_empty() {
        let empty = Paragraph::new(app.store.filter().empty_message())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),  // Status
            Constraint::Min(10),    // Text
            Constraint::Length(11), // Created
        ]
    )
    .header(Row::new(vec!["", "Task", "Created"]).style(Style::default().fg(Color::Yellow)))
    .block(block)
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_input<R: TaskRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let input = Paragraph::new(app.input.as_str())
        .block(Block::default().title(" Add a new task... ").borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(input, area);
    let max_column = area.width.saturating_sub(2);
    let column = app.cursor_column().min(max_column);
    f.set_cursor_position((area.x.saturating_add(1).saturating_add(column), area.y + 1));
}

fn draw_status<R: TaskRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let line = match app.status_message() {
        Some(message) => Line::from(Span::styled(message, Style::default().fg(Color::Red))),
        None => Line::from(Span::styled(app.store.remaining_label(), Style::default().fg(Color::Cyan))),
    };
    f.render_widget(Paragraph::new(line), area);
}
