use chrono::{DateTime, Utc};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::types::{RepoEntry, RepositorySummary};
use crate::ui::layout;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Active Repos ({}) ", app.cards.len()));

    if app.cards.is_empty() {
        let message = if app.loading {
            "Loading repositories..."
        } else if app.entries.is_empty() {
            "No repositories loaded"
        } else {
            "No repositories updated recently"
        };
        let empty = Paragraph::new(message)
            .block(block)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, area);
        return;
    }

    let now = Utc::now();
    let items: Vec<ListItem> = app
        .cards
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let selected = i == app.cursor;
            let expanded = app.active_card == Some(i);
            ListItem::new(card_lines(entry, selected, expanded, now))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Black));

    let offset = layout::card_offset(
        &app.card_heights(),
        app.cursor,
        area.height.saturating_sub(2),
    );
    let mut state = ListState::default()
        .with_offset(offset)
        .with_selected(Some(app.cursor));

    frame.render_stateful_widget(list, area, &mut state);
}

fn card_lines(
    entry: &RepoEntry,
    selected: bool,
    expanded: bool,
    now: DateTime<Utc>,
) -> Vec<Line<'static>> {
    let marker = if selected { "▌ " } else { "  " };
    let mut lines = match entry {
        RepoEntry::Loaded(summary) => summary_lines(summary, marker, selected, expanded, now),
        RepoEntry::Failed { source, reason } => vec![
            Line::from(vec![
                Span::raw(marker),
                Span::styled(
                    source.clone(),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled("  failed to load", Style::default().fg(Color::Red)),
            ]),
            Line::from(vec![
                Span::raw("  "),
                Span::styled(reason.clone(), Style::default().fg(Color::Gray)),
            ]),
        ],
    };
    lines.push(Line::from(""));
    lines
}

fn summary_lines(
    summary: &RepositorySummary,
    marker: &'static str,
    selected: bool,
    expanded: bool,
    now: DateTime<Utc>,
) -> Vec<Line<'static>> {
    let name_style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    };
    let dim = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(vec![
            Span::raw(marker),
            Span::styled(summary.full_name.clone(), name_style),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("★ {}", summary.stars), Style::default().fg(Color::Yellow)),
            Span::raw("  "),
            Span::styled(format!("⑂ {}", summary.forks), Style::default().fg(Color::Magenta)),
            Span::raw("  "),
            Span::styled(
                format!("● {}", summary.language.as_deref().unwrap_or("-")),
                Style::default().fg(Color::Green),
            ),
            Span::raw("  "),
            Span::styled(
                format!("{} open issues", summary.open_issues),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(vec![Span::raw("  "), Span::styled(summary.issues_url.clone(), dim)]),
    ];

    if expanded {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!(
                    "updated {} ({})",
                    format_age(now, summary.updated_at),
                    summary.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
                ),
                Style::default().fg(Color::Gray),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{}/issues", summary.html_url), dim),
        ]));
    }

    lines
}

/// Compact age like `3d`, `5h`, `12m`. Timestamps ahead of `now` read `in 2h`.
pub fn format_age(now: DateTime<Utc>, dt: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(dt);
    let (future, duration) = if duration < chrono::Duration::zero() {
        (true, -duration)
    } else {
        (false, duration)
    };

    let age = if duration.num_days() > 0 {
        format!("{}d", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m", duration.num_minutes())
    } else {
        return "just now".to_string();
    };

    if future {
        format!("in {}", age)
    } else {
        age
    }
}
