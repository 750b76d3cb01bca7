use chrono::{DateTime, Utc};

use crate::dropdown::DropdownInput;
use crate::error::ActiveReposError;
use crate::types::RepoEntry;

#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    ScrollUp,
    ScrollDown,
    GoToTop,
    GoToBottom,
    ToggleCard,
    ClickCard(usize),
    Tick,
    Resize(u16, u16),

    // Loading
    Load { force: bool },
    Loaded {
        entries: Vec<RepoEntry>,
        fetched_at: DateTime<Utc>,
        load_id: u64,
    },

    // Sort menu
    Dropdown(DropdownInput),

    // Links
    OpenInBrowser,
    YankUrl,

    Error(String),
    None,
}

impl From<ActiveReposError> for Action {
    fn from(err: ActiveReposError) -> Self {
        Action::Error(err.to_string())
    }
}
