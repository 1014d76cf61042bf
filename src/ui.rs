//! Rendering for the list and form pages.

use tuirealm::Frame;
use tuirealm::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Page};
use crate::form::{FOCUS_ORDER, FormField, FormMode, FormPage};
use crate::list::ListPage;

pub fn render(frame: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);

    match app.page() {
        Page::List(page) => {
            render_list(frame, chunks[1], page);
            render_status(frame, chunks[2], page.status.as_deref());
            render_footer(
                frame,
                chunks[3],
                " Up/Down: move  Enter: select  e: view/edit  a: add  r: reload  q: quit ",
            );
        }
        Page::Form(page) => {
            render_form(frame, chunks[1], page);
            render_status(frame, chunks[2], page.status.as_deref());
            let hints = match page.mode() {
                FormMode::Add => " Tab: next field  Enter: activate  Esc: back ",
                FormMode::Edit => {
                    " Tab: next field  Enter: activate  PgUp/PgDn: prev/next check  Esc: back "
                }
            };
            render_footer(frame, chunks[3], hints);
        }
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let title = Block::default()
        .borders(Borders::TOP)
        .title(" checkboard ")
        .title_alignment(Alignment::Left);
    let server = Block::default()
        .borders(Borders::TOP)
        .title(format!(" {} ", app.settings.server_url))
        .title_alignment(Alignment::Right);
    frame.render_widget(title, area);
    frame.render_widget(server, area);
}

fn render_status(frame: &mut Frame<'_>, area: Rect, status: Option<&str>) {
    let Some(message) = status else {
        return;
    };
    let line = Line::from(Span::styled(
        format!(" {message} "),
        Style::default().fg(Color::Red),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, hints: &str) {
    let footer = Block::default()
        .borders(Borders::BOTTOM)
        .title(hints.to_string())
        .title_alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, page: &ListPage) {
    let block = Block::default().borders(Borders::ALL).title(" Checks ");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let mut lines = vec![Line::from(Span::styled(
        format!(
            "   {:>5}  {:<28} {:<14} {:<8} {:<14}",
            "ID", "Name", "Server", "Type", "Category"
        ),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    if page.rows.is_empty() {
        lines.push(Line::from("   no checks"));
    }

    for (index, row) in page.rows.iter().enumerate() {
        let marker = if index == page.cursor { ">" } else { " " };
        let text = format!(
            " {marker} {:>5}  {:<28} {:<14} {:<8} {:<14}",
            row.id, row.name, row.server, row.check_type, row.check_category
        );
        let style = if page.active_row == Some(index) {
            // The selected-row marker.
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else if index == page.cursor {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, page: &FormPage) {
    let title = match page.mode() {
        FormMode::Add => " Add Check ".to_string(),
        FormMode::Edit => format!(" Edit Check {} ", page.draft.id),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let mut lines = Vec::new();
    for field in FOCUS_ORDER {
        if field.is_action() || page.visibility.is_hidden(*field) {
            continue;
        }
        lines.push(field_line(page, *field));
    }
    lines.push(Line::default());
    lines.push(actions_line(page));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn field_line(page: &FormPage, field: FormField) -> Line<'static> {
    let focused = page.focused == field;
    let marker = if focused { ">" } else { " " };
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let value = crate::form::draft_value(&page.draft, field).unwrap_or_default();
    let rendered = if field.is_selector() {
        let shown = if value.is_empty() { "-" } else { value };
        format!("< {shown} >")
    } else {
        value.to_string()
    };

    Line::from(vec![
        Span::styled(format!("{marker} {}: ", field.label()), style),
        Span::styled(rendered, style),
    ])
}

fn actions_line(page: &FormPage) -> Line<'static> {
    let save_label = if page.saving { "[ Saving... ]" } else { "[ Save ]" };
    let save_style = if page.focused == FormField::Save {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default()
    };
    let back_style = if page.focused == FormField::Back {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::raw("  "),
        Span::styled(save_label.to_string(), save_style),
        Span::raw("  "),
        Span::styled("[ Back ]", back_style),
    ])
}
