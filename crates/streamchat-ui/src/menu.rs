use streamchat_core::{Candidate, MatchSet};

/// Everything the open menu shows. Rebuilt on every query, never patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuState {
    pub displayed: Vec<Candidate>,
    pub selected: usize,
    pub hovering: bool,
    pub more_available: bool,
    pub query: String,
}

#[derive(Debug, Clone, Default)]
pub struct SuggestionMenu {
    state: Option<MenuState>,
}

impl SuggestionMenu {
    /// Replace whatever is shown with `set`. An empty set closes the menu.
    pub fn open(&mut self, set: MatchSet, query: &str) {
        if set.is_empty() {
            self.state = None;
            return;
        }
        self.state = Some(MenuState {
            displayed: set.entries,
            selected: 0,
            hovering: false,
            more_available: set.more_available,
            query: query.to_string(),
        });
    }

    /// Returns whether the menu was open.
    pub fn close(&mut self) -> bool {
        self.state.take().is_some()
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&MenuState> {
        self.state.as_ref()
    }

    pub fn is_hovering(&self) -> bool {
        self.state.as_ref().is_some_and(|state| state.hovering)
    }

    pub fn up(&mut self) {
        if let Some(state) = self.state.as_mut() {
            let len = state.displayed.len();
            state.selected = (state.selected + len - 1) % len;
        }
    }

    pub fn down(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.selected = (state.selected + 1) % state.displayed.len();
        }
    }

    pub fn hover(&mut self, index: usize) {
        if let Some(state) = self.state.as_mut()
            && index < state.displayed.len()
        {
            state.selected = index;
            state.hovering = true;
        }
    }

    pub fn pointer_left(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.hovering = false;
        }
    }

    pub fn selected_candidate(&self) -> Option<&Candidate> {
        self.state
            .as_ref()
            .and_then(|state| state.displayed.get(state.selected))
    }
}
