use std::sync::Arc;

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::action::Action;
use crate::activity::active_entries;
use crate::cache::{self, CachedLoad};
use crate::config::Config;
use crate::dropdown::{Dropdown, DropdownInput};
use crate::error::ActiveReposError;
use crate::event::Event;
use crate::sort::sort_entries;
use crate::source::{load_entries, RepoSource};
use crate::types::{RepoEntry, SortMode};
use crate::ui::layout::{self, MenuHit};

/// What to load and how long a load stays fresh.
#[derive(Debug, Clone)]
pub struct LoadSettings {
    pub repos: Vec<String>,
    pub revalidate: std::time::Duration,
    pub active_window: chrono::Duration,
}

impl From<&Config> for LoadSettings {
    fn from(config: &Config) -> Self {
        Self {
            repos: config.repos.clone(),
            revalidate: config.revalidate_window(),
            active_window: config.active_window(),
        }
    }
}

/// Reuse a fresh cached load unless `force` is set; otherwise fetch every
/// repository and cache the result.
pub async fn load_or_fetch(
    source: &dyn RepoSource,
    settings: &LoadSettings,
    force: bool,
) -> CachedLoad {
    if !force {
        if let Some(cached) = cache::read_summaries() {
            if cached.is_fresh(&settings.repos, Utc::now(), settings.revalidate) {
                tracing::info!(fetched_at = %cached.fetched_at, "using cached repositories");
                return cached;
            }
        }
    }

    let fetched_at = Utc::now();
    let entries = load_entries(source, &settings.repos).await;
    let load = CachedLoad {
        fetched_at,
        repos: settings.repos.clone(),
        entries,
    };
    cache::write_summaries(&load);
    load
}

pub struct App {
    /// The load as fetched, in configuration order. Never reordered.
    pub entries: Vec<RepoEntry>,
    /// `entries` ordered by `sort_mode`.
    pub sorted: Vec<RepoEntry>,
    /// `sorted` restricted to the active window; one card each.
    pub cards: Vec<RepoEntry>,
    pub sort_mode: SortMode,
    pub dropdown: Dropdown,
    /// Expanded card, if any.
    pub active_card: Option<usize>,
    pub cursor: usize,
    pub viewport: Rect,
    pub fetched_at: Option<DateTime<Utc>>,
    pub loading: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub should_quit: bool,
    settings: LoadSettings,
    load_id: u64,
    source: Arc<dyn RepoSource>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl App {
    pub fn new(
        source: Arc<dyn RepoSource>,
        settings: LoadSettings,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            entries: Vec::new(),
            sorted: Vec::new(),
            cards: Vec::new(),
            sort_mode: SortMode::default(),
            dropdown: Dropdown::default(),
            active_card: None,
            cursor: 0,
            viewport: Rect::default(),
            fetched_at: None,
            loading: false,
            error: None,
            notice: None,
            should_quit: false,
            settings,
            load_id: 0,
            source,
            action_tx,
        }
    }

    pub fn handle_event(&self, event: Event) -> Action {
        match event {
            Event::Init => Action::Load { force: false },
            Event::Tick => Action::Tick,
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => Action::Resize(width, height),
            Event::Render => Action::None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Action {
        if self.dropdown.is_open() {
            return match key.code {
                KeyCode::Char('j') | KeyCode::Down => Action::Dropdown(DropdownInput::HighlightNext),
                KeyCode::Char('k') | KeyCode::Up => Action::Dropdown(DropdownInput::HighlightPrev),
                KeyCode::Enter => Action::Dropdown(DropdownInput::Confirm),
                KeyCode::Char('s') => Action::Dropdown(DropdownInput::Toggle),
                KeyCode::Esc => Action::Dropdown(DropdownInput::Dismiss),
                KeyCode::Char('q') => Action::Quit,
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::Char('g') | KeyCode::Home => Action::GoToTop,
            KeyCode::Char('G') | KeyCode::End => Action::GoToBottom,
            KeyCode::Enter => Action::ToggleCard,
            KeyCode::Char('s') => Action::Dropdown(DropdownInput::Toggle),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                Action::Dropdown(DropdownInput::Select(SortMode::ALL[index]))
            }
            KeyCode::Char('o') => Action::OpenInBrowser,
            KeyCode::Char('y') => Action::YankUrl,
            KeyCode::Char('r') => Action::Load { force: true },
            _ => Action::None,
        }
    }

    fn handle_mouse(&self, mouse: MouseEvent) -> Action {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                match layout::hit_test(self.viewport, self.dropdown.is_open(), mouse.column, mouse.row) {
                    MenuHit::Button => Action::Dropdown(DropdownInput::Toggle),
                    MenuHit::Option(mode) => Action::Dropdown(DropdownInput::Select(mode)),
                    MenuHit::Menu => Action::None,
                    MenuHit::Outside if self.dropdown.is_open() => {
                        Action::Dropdown(DropdownInput::Dismiss)
                    }
                    MenuHit::Outside => match self.card_at(mouse.column, mouse.row) {
                        Some(index) => Action::ClickCard(index),
                        None => Action::None,
                    },
                }
            }
            MouseEventKind::ScrollDown if !self.dropdown.is_open() => Action::ScrollDown,
            MouseEventKind::ScrollUp if !self.dropdown.is_open() => Action::ScrollUp,
            _ => Action::None,
        }
    }

    pub fn update(&mut self, action: Action) {
        if is_user_action(&action) {
            self.error = None;
            self.notice = None;
        }

        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::ScrollUp => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            Action::ScrollDown => {
                if self.cursor + 1 < self.cards.len() {
                    self.cursor += 1;
                }
            }
            Action::GoToTop => {
                self.cursor = 0;
            }
            Action::GoToBottom => {
                self.cursor = self.cards.len().saturating_sub(1);
            }
            Action::ClickCard(index) => {
                if index < self.cards.len() {
                    self.cursor = index;
                    self.update(Action::ToggleCard);
                }
            }
            Action::ToggleCard => {
                if !self.cards.is_empty() {
                    self.active_card = match self.active_card {
                        Some(i) if i == self.cursor => None,
                        _ => Some(self.cursor),
                    };
                }
            }
            Action::Tick => {
                let now = Utc::now();
                self.refresh_cards(now);
                if !self.loading && self.is_stale(now) {
                    tracing::info!("revalidation window elapsed; reloading");
                    self.start_load(true);
                }
            }
            Action::Resize(width, height) => {
                self.viewport = Rect::new(0, 0, width, height);
            }
            Action::Load { force } => {
                self.start_load(force);
            }
            Action::Loaded {
                entries,
                fetched_at,
                load_id,
            } => {
                if load_id != self.load_id {
                    tracing::debug!(load_id, current = self.load_id, "dropping superseded load");
                    return;
                }
                self.loading = false;
                self.fetched_at = Some(fetched_at);
                self.entries = entries;
                self.sorted = sort_entries(&self.entries, self.sort_mode);
                self.refresh_cards(Utc::now());

                let failed = self.entries.iter().filter(|e| e.is_failed()).count();
                if failed > 0 {
                    self.error = Some(format!(
                        "{} of {} repositories failed to load",
                        failed,
                        self.entries.len()
                    ));
                }
            }
            Action::Dropdown(input) => {
                if let Some(mode) = self.dropdown.apply(input, self.sort_mode) {
                    self.select_sort(mode);
                }
            }
            Action::OpenInBrowser => {
                if let Some(summary) = self.selected().and_then(RepoEntry::summary) {
                    let url = format!("{}/issues", summary.html_url);
                    if let Err(e) = open::that(&url) {
                        tracing::warn!(url = %url, error = %e, "failed to open browser");
                        self.update(ActiveReposError::Io(e).into());
                    }
                }
            }
            Action::YankUrl => {
                if let Some(summary) = self.selected().and_then(RepoEntry::summary) {
                    let url = summary.issues_url.clone();
                    match arboard::Clipboard::new().and_then(|mut c| c.set_text(url.clone())) {
                        Ok(()) => self.notice = Some(format!("Copied {}", url)),
                        Err(e) => self.error = Some(format!("Clipboard error: {}", e)),
                    }
                }
            }
            Action::Error(msg) => {
                self.loading = false;
                self.error = Some(msg);
            }
            Action::None => {}
        }
    }

    /// Card under the cursor.
    pub fn selected(&self) -> Option<&RepoEntry> {
        self.cards.get(self.cursor)
    }

    /// Rendered height of every card, in order.
    pub fn card_heights(&self) -> Vec<u16> {
        self.cards
            .iter()
            .enumerate()
            .map(|(i, entry)| layout::card_height(entry, self.active_card == Some(i)))
            .collect()
    }

    /// Index of the card drawn at a screen position, if any.
    fn card_at(&self, column: u16, row: u16) -> Option<usize> {
        let list = layout::card_list(self.viewport);
        let heights = self.card_heights();
        let offset = layout::card_offset(&heights, self.cursor, list.height);
        layout::card_at(&heights, offset, list, column, row)
    }

    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        match self.fetched_at {
            Some(fetched_at) => now
                .signed_duration_since(fetched_at)
                .to_std()
                .is_ok_and(|age| age >= self.settings.revalidate),
            None => false,
        }
    }

    /// Re-sort from the unsorted load. Selecting the current mode again
    /// yields the same order.
    fn select_sort(&mut self, mode: SortMode) {
        self.sort_mode = mode;
        self.sorted = sort_entries(&self.entries, mode);
        self.active_card = None;
        self.cursor = 0;
        self.refresh_cards(Utc::now());
    }

    fn refresh_cards(&mut self, now: DateTime<Utc>) {
        let cards = active_entries(&self.sorted, now, self.settings.active_window);
        // The expanded card is a position; it means nothing once the list changes.
        if cards != self.cards {
            self.active_card = None;
        }
        self.cards = cards;
        if self.cursor >= self.cards.len() {
            self.cursor = self.cards.len().saturating_sub(1);
        }
    }

    fn start_load(&mut self, force: bool) {
        self.load_id += 1;
        self.loading = true;
        self.spawn_load(force, self.load_id);
    }

    fn spawn_load(&self, force: bool, load_id: u64) {
        let tx = self.action_tx.clone();
        let source = Arc::clone(&self.source);
        let settings = self.settings.clone();
        tokio::spawn(async move {
            let load = load_or_fetch(source.as_ref(), &settings, force).await;
            tx.send(Action::Loaded {
                entries: load.entries,
                fetched_at: load.fetched_at,
                load_id,
            })
            .ok();
        });
    }
}

/// Actions that come from the user and should clear a stale message.
fn is_user_action(action: &Action) -> bool {
    !matches!(
        action,
        Action::Tick | Action::Resize(..) | Action::Loaded { .. } | Action::Error(_) | Action::None
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::tests::FakeSource;
    use crate::types::RepositorySummary;
    use crossterm::event::KeyModifiers;

    fn settings() -> LoadSettings {
        LoadSettings {
            repos: vec![
                "https://github.com/a/one".to_string(),
                "https://github.com/a/two".to_string(),
            ],
            revalidate: std::time::Duration::from_secs(600),
            active_window: chrono::Duration::days(3),
        }
    }

    fn app() -> (App, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut app = App::new(Arc::new(FakeSource::default()), settings(), tx);
        app.update(Action::Resize(80, 24));
        (app, rx)
    }

    fn repo(name: &str, stars: u64, forks: u64, age: chrono::Duration) -> RepoEntry {
        RepoEntry::Loaded(RepositorySummary {
            full_name: name.to_string(),
            updated_at: Utc::now() - age,
            stars,
            forks,
            language: None,
            open_issues: 0,
            issues_url: format!("https://api.github.com/repos/{}/issues", name),
            html_url: format!("https://github.com/{}", name),
        })
    }

    fn loaded(app: &mut App, entries: Vec<RepoEntry>) {
        app.update(Action::Loaded {
            entries,
            fetched_at: Utc::now(),
            load_id: 0,
        });
    }

    fn sample() -> Vec<RepoEntry> {
        let hour = chrono::Duration::hours(1);
        vec![
            repo("a/one", 10, 5, hour),
            repo("a/two", 30, 1, hour),
            repo("a/stale", 99, 99, chrono::Duration::days(4)),
            repo("a/three", 20, 9, hour),
        ]
    }

    fn card_names(app: &App) -> Vec<&str> {
        app.cards.iter().map(|c| c.label()).collect()
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn dispatch(app: &mut App, event: Event) {
        let action = app.handle_event(event);
        app.update(action);
    }

    #[test]
    fn initial_state() {
        let (app, _rx) = app();
        assert_eq!(app.sort_mode, SortMode::BestMatch);
        assert!(!app.dropdown.is_open());
        assert_eq!(app.active_card, None);
        assert!(app.cards.is_empty());
    }

    #[test]
    fn init_requests_cached_load() {
        let (app, _rx) = app();
        assert!(matches!(app.handle_event(Event::Init), Action::Load { force: false }));
    }

    #[test]
    fn loaded_entries_filtered_to_active_window_in_input_order() {
        let (mut app, _rx) = app();
        loaded(&mut app, sample());
        assert_eq!(card_names(&app), vec!["a/one", "a/two", "a/three"]);
        assert_eq!(app.entries.len(), 4);
    }

    #[test]
    fn selecting_sort_closes_dropdown_from_either_state() {
        let (mut app, _rx) = app();
        loaded(&mut app, sample());

        app.update(Action::Dropdown(DropdownInput::Toggle));
        assert!(app.dropdown.is_open());
        app.update(Action::Dropdown(DropdownInput::Select(SortMode::MostStars)));
        assert!(!app.dropdown.is_open());

        app.update(Action::Dropdown(DropdownInput::Select(SortMode::LeastForks)));
        assert!(!app.dropdown.is_open());
        assert_eq!(app.sort_mode, SortMode::LeastForks);
    }

    #[test]
    fn sorts_never_compound() {
        let (mut app, _rx) = app();
        loaded(&mut app, sample());

        app.update(Action::Dropdown(DropdownInput::Select(SortMode::MostStars)));
        let first = card_names(&app).join(",");
        app.update(Action::Dropdown(DropdownInput::Select(SortMode::MostStars)));
        assert_eq!(card_names(&app).join(","), first);
        assert_eq!(first, "a/two,a/three,a/one");

        app.update(Action::Dropdown(DropdownInput::Select(SortMode::BestMatch)));
        assert_eq!(card_names(&app), vec!["a/one", "a/two", "a/three"]);
        assert_eq!(app.sorted, app.entries);
    }

    #[test]
    fn click_outside_closes_open_dropdown() {
        let (mut app, _rx) = app();
        dispatch(&mut app, key(KeyCode::Char('s')));
        assert!(app.dropdown.is_open());

        dispatch(&mut app, click(5, 10));
        assert!(!app.dropdown.is_open());

        dispatch(&mut app, click(5, 10));
        assert!(!app.dropdown.is_open());
    }

    #[test]
    fn click_button_toggles_and_click_option_selects() {
        let (mut app, _rx) = app();
        loaded(&mut app, sample());
        let button = layout::sort_button(app.viewport);
        let menu = layout::sort_menu(app.viewport);

        dispatch(&mut app, click(button.x, button.y));
        assert!(app.dropdown.is_open());

        // Second option row: Most Stars.
        dispatch(&mut app, click(menu.x + 2, menu.y + 2));
        assert!(!app.dropdown.is_open());
        assert_eq!(app.sort_mode, SortMode::MostStars);
    }

    #[test]
    fn click_on_menu_border_keeps_it_open() {
        let (mut app, _rx) = app();
        dispatch(&mut app, key(KeyCode::Char('s')));
        let menu = layout::sort_menu(app.viewport);
        dispatch(&mut app, click(menu.x + 2, menu.y));
        assert!(app.dropdown.is_open());
    }

    #[test]
    fn keyboard_menu_navigation() {
        let (mut app, _rx) = app();
        loaded(&mut app, sample());
        dispatch(&mut app, key(KeyCode::Char('s')));
        dispatch(&mut app, key(KeyCode::Char('j')));
        dispatch(&mut app, key(KeyCode::Char('j')));
        dispatch(&mut app, key(KeyCode::Enter));
        assert_eq!(app.sort_mode, SortMode::LeastStars);
        assert!(!app.dropdown.is_open());
        assert_eq!(card_names(&app), vec!["a/one", "a/three", "a/two"]);
    }

    #[test]
    fn esc_dismisses_menu_before_quitting() {
        let (mut app, _rx) = app();
        dispatch(&mut app, key(KeyCode::Char('s')));
        dispatch(&mut app, key(KeyCode::Esc));
        assert!(!app.dropdown.is_open());
        assert!(!app.should_quit);
        dispatch(&mut app, key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn number_keys_pick_sort_mode() {
        let (mut app, _rx) = app();
        loaded(&mut app, sample());
        dispatch(&mut app, key(KeyCode::Char('4')));
        assert_eq!(app.sort_mode, SortMode::MostForks);
        assert_eq!(card_names(&app), vec!["a/three", "a/one", "a/two"]);
    }

    #[test]
    fn enter_expands_and_collapses_card() {
        let (mut app, _rx) = app();
        loaded(&mut app, sample());
        dispatch(&mut app, key(KeyCode::Char('j')));
        dispatch(&mut app, key(KeyCode::Enter));
        assert_eq!(app.active_card, Some(1));
        dispatch(&mut app, key(KeyCode::Enter));
        assert_eq!(app.active_card, None);
    }

    #[test]
    fn resorting_collapses_card() {
        let (mut app, _rx) = app();
        loaded(&mut app, sample());
        app.update(Action::ToggleCard);
        assert_eq!(app.active_card, Some(0));
        app.update(Action::Dropdown(DropdownInput::Select(SortMode::MostForks)));
        assert_eq!(app.active_card, None);
    }

    #[test]
    fn reload_collapses_card_when_list_changes() {
        let (mut app, _rx) = app();
        loaded(&mut app, sample());
        app.update(Action::ScrollDown);
        app.update(Action::ToggleCard);
        assert_eq!(app.active_card, Some(1));

        let hour = chrono::Duration::hours(1);
        loaded(
            &mut app,
            vec![
                repo("a/one", 10, 5, chrono::Duration::days(5)),
                repo("a/two", 30, 1, hour),
                repo("a/three", 20, 9, hour),
            ],
        );
        assert_eq!(card_names(&app), vec!["a/two", "a/three"]);
        assert_eq!(app.active_card, None);
    }

    #[test]
    fn card_leaving_window_collapses() {
        let (mut app, _rx) = app();
        loaded(&mut app, sample());
        app.update(Action::ToggleCard);
        assert_eq!(app.active_card, Some(0));

        app.refresh_cards(Utc::now());
        assert_eq!(app.active_card, Some(0));

        app.refresh_cards(Utc::now() + chrono::Duration::days(5));
        assert!(app.cards.is_empty());
        assert_eq!(app.active_card, None);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn click_card_moves_cursor_and_expands() {
        let (mut app, _rx) = app();
        loaded(&mut app, sample());
        let list = layout::card_list(app.viewport);

        // Cards are four rows tall; the second starts four rows into the list.
        dispatch(&mut app, click(list.x + 4, list.y + 4));
        assert_eq!(app.cursor, 1);
        assert_eq!(app.active_card, Some(1));

        dispatch(&mut app, click(list.x + 4, list.y + 4));
        assert_eq!(app.active_card, None);

        dispatch(&mut app, click(list.x + 4, list.y));
        assert_eq!(app.cursor, 0);
        assert_eq!(app.active_card, Some(0));
    }

    #[test]
    fn click_on_card_with_menu_open_only_closes_menu() {
        let (mut app, _rx) = app();
        loaded(&mut app, sample());
        dispatch(&mut app, key(KeyCode::Char('s')));
        let list = layout::card_list(app.viewport);

        dispatch(&mut app, click(list.x + 4, list.y + 4));
        assert!(!app.dropdown.is_open());
        assert_eq!(app.cursor, 0);
        assert_eq!(app.active_card, None);
    }

    #[test]
    fn click_below_last_card_does_nothing() {
        let (mut app, _rx) = app();
        loaded(&mut app, sample());
        let list = layout::card_list(app.viewport);
        dispatch(&mut app, click(list.x + 4, list.y + 13));
        assert_eq!(app.cursor, 0);
        assert_eq!(app.active_card, None);
    }

    #[test]
    fn cursor_stays_within_cards() {
        let (mut app, _rx) = app();
        loaded(&mut app, sample());
        for _ in 0..10 {
            app.update(Action::ScrollDown);
        }
        assert_eq!(app.cursor, 2);
        app.update(Action::GoToTop);
        app.update(Action::ScrollUp);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn superseded_load_is_dropped() {
        let (mut app, _rx) = app();
        app.update(Action::Loaded {
            entries: sample(),
            fetched_at: Utc::now(),
            load_id: 7,
        });
        assert!(app.entries.is_empty());
    }

    #[test]
    fn failed_entries_render_as_cards() {
        let (mut app, _rx) = app();
        let mut entries = sample();
        entries.insert(
            0,
            RepoEntry::Failed {
                source: "x/gone".to_string(),
                reason: "GitHub API 404 Not Found".to_string(),
            },
        );
        loaded(&mut app, entries);
        assert_eq!(card_names(&app), vec!["x/gone", "a/one", "a/two", "a/three"]);

        app.update(Action::Dropdown(DropdownInput::Select(SortMode::MostStars)));
        assert_eq!(card_names(&app).last(), Some(&"x/gone"));
    }

    #[test]
    fn current_load_reports_failures() {
        let (mut app, _rx) = app();
        let mut entries = sample();
        entries.push(RepoEntry::Failed {
            source: "x/gone".to_string(),
            reason: "GitHub API 404 Not Found".to_string(),
        });
        loaded(&mut app, entries);
        assert_eq!(app.error.as_deref(), Some("1 of 5 repositories failed to load"));
        assert!(!app.loading);
    }

    #[test]
    fn superseded_load_with_failures_leaves_state_alone() {
        let (mut app, _rx) = app();
        app.load_id = 2;
        app.loading = true;
        app.update(Action::Loaded {
            entries: vec![RepoEntry::Failed {
                source: "x/gone".to_string(),
                reason: "timed out".to_string(),
            }],
            fetched_at: Utc::now(),
            load_id: 1,
        });
        assert!(app.loading);
        assert_eq!(app.error, None);
        assert!(app.entries.is_empty());
    }

    #[tokio::test]
    async fn stale_tick_starts_a_single_reload() {
        let (mut app, mut rx) = app();
        loaded(&mut app, sample());
        app.update(Action::Tick);
        assert!(!app.loading);
        assert_eq!(app.load_id, 0);

        app.update(Action::Loaded {
            entries: sample(),
            fetched_at: Utc::now() - chrono::Duration::seconds(601),
            load_id: 0,
        });
        app.update(Action::Tick);
        assert!(app.loading);
        assert_eq!(app.load_id, 1);

        // Already loading: no second reload.
        app.update(Action::Tick);
        assert_eq!(app.load_id, 1);

        let action = rx.recv().await.expect("reload result");
        assert!(matches!(action, Action::Loaded { load_id: 1, .. }));
        app.update(action);
        assert!(!app.loading);
        assert!(!app.is_stale(Utc::now()));
    }

    #[test]
    fn errors_become_status_messages() {
        let (mut app, _rx) = app();
        app.update(ActiveReposError::Config("bad repo list".to_string()).into());
        assert_eq!(app.error.as_deref(), Some("Config error: bad repo list"));
    }

    #[test]
    fn staleness_follows_revalidation_window() {
        let (mut app, _rx) = app();
        let now = Utc::now();
        assert!(!app.is_stale(now));

        app.update(Action::Loaded {
            entries: Vec::new(),
            fetched_at: now - chrono::Duration::seconds(599),
            load_id: 0,
        });
        assert!(!app.is_stale(now));
        assert!(app.is_stale(now + chrono::Duration::seconds(1)));
    }

    #[test]
    fn errors_clear_on_next_user_action() {
        let (mut app, _rx) = app();
        app.update(Action::Error("boom".to_string()));
        app.update(Action::Resize(100, 30));
        assert_eq!(app.error.as_deref(), Some("boom"));
        app.update(Action::ScrollDown);
        assert_eq!(app.error, None);
    }
}
