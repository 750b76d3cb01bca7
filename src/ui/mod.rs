mod cards;
pub mod layout;
mod sort_menu;

use chrono::Utc;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let [header, body, status] = layout::screen_chunks(area);

    render_header(frame, app, header);
    cards::render(frame, app, body);
    render_status_bar(frame, app, status);

    if app.dropdown.is_open() {
        sort_menu::render(frame, app, layout::sort_menu(area));
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "active-repos",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" - Active Repos List", Style::default().fg(Color::Gray)),
    ]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(title, area);

    let button_style = if app.dropdown.is_open() {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow).bg(Color::DarkGray)
    };
    let button = Paragraph::new(Line::from(Span::styled(
        format!(" ⇅ {} ", app.sort_mode),
        button_style,
    )))
    .alignment(ratatui::layout::Alignment::Right)
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(button, layout::sort_button(area));
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = if let Some(error) = &app.error {
        Line::from(vec![Span::styled(
            format!("Error: {}", error),
            Style::default().fg(Color::Red),
        )])
    } else if app.loading {
        Line::from(vec![Span::styled(
            "Loading...",
            Style::default().fg(Color::Yellow),
        )])
    } else if let Some(notice) = &app.notice {
        Line::from(vec![Span::styled(
            notice.as_str(),
            Style::default().fg(Color::Green),
        )])
    } else {
        let help = if app.dropdown.is_open() {
            "j/k: highlight | Enter: sort | Esc: close"
        } else {
            "j/k/g/G: nav | Enter: expand | s: sort | 1-5: sort mode | o: open | y: yank | r: reload | q: quit"
        };
        let mut spans = vec![Span::styled(help, Style::default().fg(Color::Gray))];
        if let Some(fetched_at) = app.fetched_at {
            spans.push(Span::styled(
                format!("  (fetched {} ago)", cards::format_age(Utc::now(), fetched_at)),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    };

    let status_bar = Paragraph::new(status).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status_bar, area);
}
