//! Rendering for the Creative Studio TUI.

use ratatui::prelude::*;
use ratatui::widgets::*;
use studio::catalog::Filter;
use studio::log::{LogLevel, LogLine};
use studio::session::SessionSnapshot;

use crate::app::{App, InputMode};

// ── Public Utilities ──────────────────────────────────────────────────

/// Truncate a string to at most `max` characters, appending "..." if truncated.
pub fn truncate_str(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", s.get(..idx).unwrap_or(s)),
        None => s.to_string(),
    }
}

/// Map a log level to a ratatui [`Style`].
pub fn log_level_style(level: LogLevel) -> Style {
    match level {
        LogLevel::Trace => Style::default().fg(Color::DarkGray),
        LogLevel::Debug => Style::default().fg(Color::Cyan),
        LogLevel::Info => Style::default().fg(Color::Green),
        LogLevel::Warn => Style::default().fg(Color::Yellow),
        LogLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

// ── Root Render ───────────────────────────────────────────────────────

/// Draw one frame from a session snapshot.
///
/// The snapshot is taken by the caller, so no session lock is held here.
pub(crate) fn render(frame: &mut Frame, snap: &SessionSnapshot, app: &App) {
    let area = frame.area();

    // [3] title | [flex] prompt (+ logs) | [3] hints | [1] status.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    render_title(frame, chunks[0], snap, app);

    if app.show_logs {
        let mid = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        render_prompt(frame, mid[0], snap);
        render_logs(frame, mid[1], &app.logs, app);
    } else {
        render_prompt(frame, chunks[1], snap);
    }

    render_hints(frame, chunks[2], snap);
    render_status(frame, chunks[3], app);

    if app.input_mode == InputMode::FilterMenu {
        render_filter_menu(frame, area, snap, app);
    }
}

// ── Title ─────────────────────────────────────────────────────────────

fn render_title(frame: &mut Frame, area: Rect, snap: &SessionSnapshot, app: &App) {
    let mut spans = vec![Span::styled(
        app.product_name.clone(),
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )];
    // Only a narrowed filter is called out.
    if snap.filter != Filter::All {
        spans.push(Span::styled(
            format!("  {} prompts", snap.filter.label()),
            Style::default().fg(Color::Cyan),
        ));
    }
    if snap.favorite_count > 0 {
        spans.push(Span::styled(
            format!("  \u{2665} {}", snap.favorite_count),
            Style::default().fg(Color::Red),
        ));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

// ── Prompt ────────────────────────────────────────────────────────────

fn render_prompt(frame: &mut Frame, area: Rect, snap: &SessionSnapshot) {
    let Some(ref prompt) = snap.current_prompt else {
        return;
    };

    let style = if snap.busy {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    } else {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![Line::from(Span::styled(format!("\"{prompt}\""), style))];
    if let Some(category) = snap.category {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            category.label(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    // Vertically center the block of text.
    let top = area.height.saturating_sub(lines.len() as u16 + 1) / 2;
    let inner = Rect {
        y: area.y + top,
        height: area.height.saturating_sub(top),
        ..area
    };

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

// ── Hints ─────────────────────────────────────────────────────────────

fn render_hints(frame: &mut Frame, area: Rect, snap: &SessionSnapshot) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);

    let primary = if snap.busy {
        Line::from(Span::styled(
            "Channeling...",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(vec![
            Span::styled("[space] ", key_style),
            Span::raw("Get Creative Prompt"),
        ])
    };

    let mut secondary = Vec::new();
    if snap.current_prompt.is_some() {
        let heart = if snap.is_favorite {
            "\u{2665}"
        } else {
            "\u{2661}"
        };
        secondary.extend([
            Span::styled("[c] ", key_style),
            Span::styled("copy  ", dim),
            Span::styled("[h] ", key_style),
            Span::styled(format!("{heart} favorite  "), dim),
            Span::styled("[s] ", key_style),
            Span::styled("share  ", dim),
        ]);
    }
    secondary.extend([
        Span::styled("[f] ", key_style),
        Span::styled("filter  ", dim),
        Span::styled("[,] ", key_style),
        Span::styled("logs  ", dim),
        Span::styled("[q] ", key_style),
        Span::styled("quit", dim),
    ]);

    let paragraph =
        Paragraph::new(vec![primary, Line::from(""), Line::from(secondary)]).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

// ── Status Line ───────────────────────────────────────────────────────

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let Some(ref msg) = app.status_message else {
        return;
    };
    let text = truncate_str(msg, area.width.saturating_sub(4) as usize);
    let paragraph = Paragraph::new(Span::styled(text, Style::default().fg(Color::Green)))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

// ── Log Pane ──────────────────────────────────────────────────────────

fn render_logs(frame: &mut Frame, area: Rect, logs: &[LogLine], app: &App) {
    let inner_height = area.height.saturating_sub(2) as usize;

    let lines: Vec<Line> = logs
        .iter()
        // Trace output is too noisy for the pane.
        .filter(|log| log.level != LogLevel::Trace)
        .map(|log| {
            Line::from(vec![
                Span::styled(
                    format!("{} ", log.time),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{} ", log.level.label()),
                    log_level_style(log.level),
                ),
                Span::raw(log.message.as_str()),
            ])
        })
        .collect();

    let total = lines.len();
    let scroll = total
        .saturating_sub(inner_height)
        .saturating_sub(app.log_scroll);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Log ");

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll as u16, 0))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ── Filter Menu ───────────────────────────────────────────────────────

fn render_filter_menu(frame: &mut Frame, area: Rect, snap: &SessionSnapshot, app: &App) {
    let width = 28.min(area.width);
    let height = (app.filters.len() as u16 + 2).min(area.height);
    let popup = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    let items: Vec<ListItem> = app
        .filters
        .iter()
        .enumerate()
        .map(|(i, filter)| {
            let marker = if *filter == snap.filter { "\u{2022} " } else { "  " };
            let style = if i == app.filter_cursor {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(
                format!("{marker}{}", filter.label()),
                style,
            )))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Filter "),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(list, popup);
}

// ── Tests ─────────────────────────────────────────────────────────────
