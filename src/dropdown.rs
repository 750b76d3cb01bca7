use crate::types::SortMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropdownState {
    #[default]
    Closed,
    Open,
}

/// Everything that can happen to the sort menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownInput {
    Toggle,
    /// Pointer-down outside the menu's bounds, or Esc.
    Dismiss,
    Select(SortMode),
    HighlightNext,
    HighlightPrev,
    /// Select whatever option is highlighted.
    Confirm,
}

/// Sort menu state. All mutation goes through [`Dropdown::apply`].
#[derive(Debug, Clone, Default)]
pub struct Dropdown {
    state: DropdownState,
    highlighted: usize,
}

impl Dropdown {
    pub fn is_open(&self) -> bool {
        self.state == DropdownState::Open
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Apply one input. Returns the chosen mode when the input selects one;
    /// selecting always leaves the menu closed.
    pub fn apply(&mut self, input: DropdownInput, current: SortMode) -> Option<SortMode> {
        match (self.state, input) {
            (DropdownState::Closed, DropdownInput::Toggle) => {
                self.state = DropdownState::Open;
                self.highlighted = current.index();
                None
            }
            (DropdownState::Open, DropdownInput::Toggle | DropdownInput::Dismiss) => {
                self.state = DropdownState::Closed;
                None
            }
            (_, DropdownInput::Select(mode)) => {
                self.state = DropdownState::Closed;
                self.highlighted = mode.index();
                Some(mode)
            }
            (DropdownState::Open, DropdownInput::HighlightNext) => {
                self.highlighted = (self.highlighted + 1) % SortMode::ALL.len();
                None
            }
            (DropdownState::Open, DropdownInput::HighlightPrev) => {
                self.highlighted = self
                    .highlighted
                    .checked_sub(1)
                    .unwrap_or(SortMode::ALL.len() - 1);
                None
            }
            (DropdownState::Open, DropdownInput::Confirm) => {
                self.state = DropdownState::Closed;
                SortMode::ALL.get(self.highlighted).copied()
            }
            (DropdownState::Closed, _) => None,
        }
    }
}
