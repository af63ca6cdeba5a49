use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;
use task_core::{Field, NoticeLevel, SortOrder, TaskApi, STATUS_FILTERS};

use crate::app::{App, Mode};

pub fn draw<A: TaskApi>(f: &mut Frame<'_>, app: &App<A>) {
    let banner_height = if app.view.error().is_some() { 4 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(banner_height),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(f.area());

    draw_header(f, chunks[0], app);
    if let Some(error) = app.view.error() {
        draw_error_banner(f, chunks[1], error);
    }
    draw_table(f, chunks[2], app);
    draw_footer(f, chunks[3], app);

    match app.mode() {
        Mode::Form => draw_modal(f, app),
        Mode::Confirm => draw_confirm(f, app),
        Mode::Table => {}
    }
}

fn draw_header<A: TaskApi>(f: &mut Frame<'_>, area: Rect, app: &App<A>) {
    let line = Line::from(vec![
        Span::styled("Task Manager", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(app.source.clone(), Style::default().fg(Color::Gray)),
        Span::raw("    [n] Create Task"),
    ]);
    let header = Paragraph::new(line).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, area);
}

fn draw_error_banner(f: &mut Frame<'_>, area: Rect, error: &str) {
    let banner = Paragraph::new(error.to_string())
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title("Connection Error  [x] dismiss")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(banner, area);
}

fn draw_table<A: TaskApi>(f: &mut Frame<'_>, area: Rect, app: &App<A>) {
    if app.view.is_loading() {
        let spinner = Paragraph::new("Loading Tasks...")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(spinner, area);
        return;
    }

    let id_header = match app.view.table().sort() {
        Some(SortOrder::Ascending) => "ID ▲",
        Some(SortOrder::Descending) => "ID ▼",
        None => "ID",
    };
    let header = Row::new(vec![id_header, "Title", "Description", "Status", "Actions"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app
        .view
        .visible_rows()
        .into_iter()
        .map(|task| {
            Row::new(vec![
                task.id.to_string(),
                task.title.clone(),
                task.description.clone(),
                task.status.clone(),
                "[e] Edit  [d] Delete".to_string(),
            ])
            .style(status_style(&task.status))
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(25),
        Constraint::Percentage(35),
        Constraint::Length(15),
        Constraint::Length(20),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL))
        .row_highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_footer<A: TaskApi>(f: &mut Frame<'_>, area: Rect, app: &App<A>) {
    let table = app.view.table();
    let filters = if table.status_filters().is_empty() {
        "all".to_string()
    } else {
        table.status_filters().join(", ")
    };
    let shortcuts = STATUS_FILTERS
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}:{s}", i + 1))
        .collect::<Vec<_>>()
        .join(" ");
    let status_line = Line::from(format!(
        "Page {}/{}  Filter: {filters} ({shortcuts} 0:clear)  s:sort r:reload q:quit",
        table.page() + 1,
        table.page_count(app.view.tasks()),
    ));

    let notice_line = match app.notice() {
        Some(notice) => {
            let color = match notice.level {
                NoticeLevel::Success => Color::Green,
                NoticeLevel::Warning => Color::Yellow,
                NoticeLevel::Error => Color::Red,
            };
            Line::from(Span::styled(notice.text.clone(), Style::default().fg(color)))
        }
        None => Line::default(),
    };

    f.render_widget(Paragraph::new(vec![status_line, notice_line]), area);
}

fn draw_modal<A: TaskApi>(f: &mut Frame<'_>, app: &App<A>) {
    let Some(modal) = app.view.modal() else {
        return;
    };
    let area = centered_rect(60, 14, f.area());
    f.render_widget(Clear, area);

    let mut lines = Vec::new();
    for field in Field::ALL {
        let focused = field == app.focus;
        let label_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let cursor = if focused { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<12}", field.label()), label_style),
            Span::raw(format!("{}{cursor}", modal.form.value(field))),
        ]));
        match modal.errors.iter().find(|e| e.field == field) {
            Some(err) => lines.push(Line::from(Span::styled(
                format!("{:<12}{}", "", err.message),
                Style::default().fg(Color::Red),
            ))),
            None => lines.push(Line::default()),
        }
    }

    let submit_label = match (app.view.is_submitting(), modal.editing().is_some()) {
        (true, _) => "Saving...",
        (false, true) => "[Enter] Update",
        (false, false) => "[Enter] Create",
    };
    lines.push(Line::default());
    lines.push(Line::from(format!("[Esc] Cancel   {submit_label}")).alignment(Alignment::Right));

    let widget = Paragraph::new(lines).block(
        Block::default()
            .title(modal.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(widget, area);
}

fn draw_confirm<A: TaskApi>(f: &mut Frame<'_>, app: &App<A>) {
    let Some(id) = app.view.pending_delete() else {
        return;
    };
    let area = centered_rect(50, 5, f.area());
    f.render_widget(Clear, area);
    let widget = Paragraph::new(vec![
        Line::from(format!("Are you sure you want to delete task {id}?")),
        Line::from("[y] Yes, delete   [n] Cancel"),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    f.render_widget(widget, area);
}

fn status_style(status: &str) -> Style {
    let status = status.to_lowercase();
    if status.contains("completed") {
        Style::default().fg(Color::Green)
    } else if status.contains("in-progress") {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

/// A `width`% wide, `height` rows tall rectangle centered in `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = (u32::from(area.width) * u32::from(width.min(100)) / 100) as u16;
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}
