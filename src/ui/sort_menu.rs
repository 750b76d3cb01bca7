use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState};
use ratatui::Frame;

use crate::app::App;
use crate::types::SortMode;

/// Render the open sort menu into `area` (see `layout::sort_menu`).
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    frame.render_widget(Clear, area);

    let highlighted = app.dropdown.highlighted();
    let items: Vec<ListItem> = SortMode::ALL
        .iter()
        .enumerate()
        .map(|(i, mode)| {
            let style = if i == highlighted {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if *mode == app.sort_mode {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            let prefix = if i == highlighted { "> " } else { "  " };
            ListItem::new(Line::from(Span::styled(
                format!("{}{}", prefix, mode.label()),
                style,
            )))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    let mut state = ListState::default();
    state.select(Some(highlighted));
    frame.render_stateful_widget(list, area, &mut state);
}
