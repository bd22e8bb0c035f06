//! Category browser for emoji and custom emotes.

use crate::channel::{STATE_SEARCH, SharedChannel};
use crate::input::TextHost;
use crate::keys::Key;
use std::collections::HashSet;
use streamchat_core::word::splice_range;
use streamchat_core::{
    BUILTIN_CATEGORIES, CUSTOM_CATEGORY, Candidate, CandidateKind, ComposerEvent, Snapshot,
};

const CUSTOM_ICON: &str = "✦";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerCategory {
    pub name: String,
    pub icon: String,
    pub entries: Vec<Candidate>,
}

/// Group the index into the built-in taxonomy plus `Custom`. Groups with no
/// members in the index are left out.
pub fn build_categories(candidates: &[Candidate]) -> Vec<PickerCategory> {
    let mut categories = Vec::new();
    for builtin in BUILTIN_CATEGORIES {
        let texts: HashSet<String> = builtin.texts().collect();
        let entries: Vec<Candidate> = candidates
            .iter()
            .filter(|c| c.kind() == CandidateKind::Emoji && texts.contains(c.text()))
            .cloned()
            .collect();
        let Some(first) = entries.first() else {
            continue;
        };
        categories.push(PickerCategory {
            name: builtin.name.to_string(),
            icon: first.preview().to_string(),
            entries,
        });
    }

    let mut custom: Vec<Candidate> = candidates
        .iter()
        .filter(|c| c.kind() == CandidateKind::Emote)
        .cloned()
        .collect();
    if !custom.is_empty() {
        custom.sort_by_key(|c| c.display_text().to_lowercase());
        categories.push(PickerCategory {
            name: CUSTOM_CATEGORY.to_string(),
            icon: CUSTOM_ICON.to_string(),
            entries: custom,
        });
    }
    categories
}

pub struct PickerPanel {
    channel: SharedChannel,
    categories: Vec<PickerCategory>,
    open: bool,
    search: String,
    last_category: usize,
    preferred_category: String,
    cursor: usize,
    columns: usize,
    rows: usize,
    events: Vec<ComposerEvent>,
}

impl PickerPanel {
    pub fn new(channel: SharedChannel, columns: u16, rows: u16) -> Self {
        Self {
            channel,
            categories: Vec::new(),
            open: false,
            search: String::new(),
            last_category: 0,
            preferred_category: String::new(),
            cursor: 0,
            columns: usize::from(columns.max(1)),
            rows: usize::from(rows.max(1)),
            events: Vec::new(),
        }
    }

    /// Category selected until the user picks another one.
    pub fn with_default_category(mut self, name: &str) -> Self {
        self.preferred_category = name.to_string();
        self
    }

    /// Rebuild the categories, keeping the selected one by name.
    pub fn update(&mut self, candidates: Snapshot) {
        let current = self
            .categories
            .get(self.last_category)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| self.preferred_category.clone());
        self.categories = build_categories(&candidates);
        self.last_category = self.position_of(&current).unwrap_or(0);
        self.clamp_cursor();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        if self.open {
            return;
        }
        self.open = true;
        self.cursor = 0;
        self.channel.set_state(STATE_SEARCH);
        self.events.push(ComposerEvent::PickerOpened);
    }

    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.search.clear();
        self.cursor = 0;
        self.channel.release(STATE_SEARCH);
        self.events.push(ComposerEvent::PickerClosed);
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn categories(&self) -> &[PickerCategory] {
        &self.categories
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_searching(&self) -> bool {
        !self.search.is_empty()
    }

    pub fn selected_category(&self) -> Option<&PickerCategory> {
        self.categories.get(self.last_category)
    }

    /// Ignored while a search is active or for unknown names.
    pub fn select_category(&mut self, name: &str) -> bool {
        if self.is_searching() {
            return false;
        }
        let Some(position) = self.position_of(name) else {
            return false;
        };
        self.last_category = position;
        self.cursor = 0;
        true
    }

    pub fn select_category_at(&mut self, index: usize) -> bool {
        match self.categories.get(index).map(|c| c.name.clone()) {
            Some(name) => self.select_category(&name),
            None => false,
        }
    }

    pub fn next_category(&mut self) {
        if self.categories.is_empty() {
            return;
        }
        self.select_category_at((self.last_category + 1) % self.categories.len());
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
        self.cursor = 0;
    }

    pub fn push_search_char(&mut self, ch: char) {
        self.search.push(ch);
        self.cursor = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.search.pop();
        self.cursor = 0;
    }

    /// Entries of the selected category, or every entry matching the search.
    pub fn visible_entries(&self) -> Vec<&Candidate> {
        if self.is_searching() {
            return self
                .categories
                .iter()
                .flat_map(|c| streamchat_core::search(&c.entries, &self.search))
                .collect();
        }
        self.selected_category()
            .map(|c| c.entries.iter().collect())
            .unwrap_or_default()
    }

    /// Every category lights up while searching.
    pub fn highlighted_categories(&self) -> Vec<usize> {
        if self.is_searching() {
            return (0..self.categories.len()).collect();
        }
        if self.categories.is_empty() {
            return Vec::new();
        }
        vec![self.last_category]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// First grid row shown so the cursor stays visible.
    pub fn scroll_row(&self) -> usize {
        (self.cursor / self.columns).saturating_sub(self.rows - 1)
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor += 1;
        self.clamp_cursor();
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.columns);
    }

    pub fn move_down(&mut self) {
        let len = self.visible_entries().len();
        if self.cursor + self.columns < len {
            self.cursor += self.columns;
        }
    }

    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = index;
        self.clamp_cursor();
    }

    /// Insert the `index`-th visible entry at the host caret and close.
    /// Returns whether the host was edited.
    pub fn choose(&mut self, host: &mut dyn TextHost, index: usize) -> bool {
        let Some(chosen) = self.visible_entries().get(index).map(|c| c.text().to_string()) else {
            return false;
        };
        let edited = match host.selection() {
            Some((start, end)) => {
                let (value, caret) = splice_range(host.value(), start, end, &chosen);
                host.set_value(value, caret);
                true
            }
            None => false,
        };
        if edited {
            self.events.push(ComposerEvent::PickerChose { text: chosen });
        }
        self.close();
        edited
    }

    pub fn choose_selected(&mut self, host: &mut dyn TextHost) -> bool {
        self.choose(host, self.cursor)
    }

    /// Keyboard handling while the panel has focus.
    pub fn on_key(&mut self, host: &mut dyn TextHost, key: Key) {
        match key {
            Key::Escape => self.close(),
            Key::Enter => {
                self.choose_selected(host);
            }
            Key::Tab => self.next_category(),
            Key::Left => self.move_left(),
            Key::Right => self.move_right(),
            Key::Up => self.move_up(),
            Key::Down => self.move_down(),
            Key::Backspace => self.pop_search_char(),
            Key::Char(ch) => self.push_search_char(ch),
            Key::Home | Key::End | Key::Delete | Key::Other => {}
        }
    }

    pub fn take_events(&mut self) -> Vec<ComposerEvent> {
        std::mem::take(&mut self.events)
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.name == name)
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_entries().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{STATE_AUTOCOMPLETE, STATE_EMPTY, StateChannel};
    use crate::input::InputBuffer;
    use std::sync::Arc;
    use streamchat_core::CandidateSources;

    fn panel() -> (SharedChannel, PickerPanel) {
        let channel = StateChannel::shared();
        let mut sources = CandidateSources::with_builtins();
        sources.add_emote("Parrot", "https://e/parrot.gif").expect("emote");
        sources.add_emote("catjam", "https://e/catjam.gif").expect("emote");
        let mut panel = PickerPanel::new(channel.clone(), 4, 2);
        panel.update(Arc::from(sources.compose()));
        (channel, panel)
    }

    #[test]
    fn custom_category_is_sorted_and_last() {
        let (_channel, panel) = panel();
        let custom = panel.categories().last().expect("custom");
        assert_eq!(custom.name, CUSTOM_CATEGORY);
        let texts: Vec<&str> = custom.entries.iter().map(Candidate::text).collect();
        assert_eq!(texts, vec![":catjam:", ":Parrot:"]);
        assert_eq!(panel.categories()[0].name, "Smileys & Emotion");
    }

    #[test]
    fn open_and_close_drive_the_channel() {
        let (channel, mut panel) = panel();
        panel.open();
        assert!(channel.is(STATE_SEARCH));
        panel.close();
        assert!(channel.is(STATE_EMPTY));

        panel.open();
        channel.set_state(STATE_AUTOCOMPLETE);
        panel.close();
        assert!(channel.is(STATE_AUTOCOMPLETE));
    }

    #[test]
    fn search_overrides_category_and_clearing_restores_it() {
        let (_channel, mut panel) = panel();
        panel.open();
        assert!(panel.select_category(CUSTOM_CATEGORY));
        assert_eq!(panel.visible_entries().len(), 2);

        panel.set_search("PAR");
        let texts: Vec<&str> = panel.visible_entries().into_iter().map(Candidate::text).collect();
        assert!(texts.contains(&":Parrot:"));
        assert_eq!(panel.highlighted_categories().len(), panel.categories().len());
        assert!(!panel.select_category("Smileys & Emotion"));

        panel.set_search("");
        assert_eq!(
            panel.selected_category().map(|c| c.name.as_str()),
            Some(CUSTOM_CATEGORY)
        );
        let last = panel.categories().len() - 1;
        assert_eq!(panel.highlighted_categories(), vec![last]);
    }

    #[test]
    fn close_clears_search_and_keeps_last_category() {
        let (_channel, mut panel) = panel();
        panel.open();
        panel.select_category(CUSTOM_CATEGORY);
        panel.push_search_char('s');
        panel.close();
        assert_eq!(panel.search(), "");
        panel.open();
        assert_eq!(
            panel.selected_category().map(|c| c.name.as_str()),
            Some(CUSTOM_CATEGORY)
        );
    }

    #[test]
    fn choose_splices_at_host_caret_and_closes() {
        let (channel, mut panel) = panel();
        panel.open();
        panel.select_category(CUSTOM_CATEGORY);
        let mut host = InputBuffer::new("nice  move");
        host.set_caret(5);
        assert!(panel.choose(&mut host, 0));
        assert_eq!(host.value(), "nice :catjam: move");
        assert_eq!(host.caret(), Some(13));
        assert!(!panel.is_open());
        assert!(channel.is(STATE_EMPTY));
        assert!(panel.take_events().contains(&ComposerEvent::PickerChose {
            text: ":catjam:".to_string()
        }));
    }

    #[test]
    fn choose_replaces_host_selection() {
        let (_channel, mut panel) = panel();
        panel.open();
        panel.select_category(CUSTOM_CATEGORY);
        let mut host = InputBuffer::new("hello there");
        host.select(6, 11);
        panel.choose(&mut host, 1);
        assert_eq!(host.value(), "hello :Parrot:");
    }

    #[test]
    fn choose_without_caret_only_closes() {
        let (_channel, mut panel) = panel();
        panel.open();
        let mut host = InputBuffer::without_caret("hey");
        assert!(!panel.choose(&mut host, 0));
        assert_eq!(host.value(), "hey");
        assert!(!panel.is_open());
        assert!(
            !panel
                .take_events()
                .iter()
                .any(|e| matches!(e, ComposerEvent::PickerChose { .. }))
        );
    }

    #[test]
    fn grid_navigation_clamps() {
        let (_channel, mut panel) = panel();
        panel.open();
        let len = panel.visible_entries().len();
        assert!(len > 8);
        panel.move_left();
        panel.move_up();
        assert_eq!(panel.cursor(), 0);
        panel.move_right();
        panel.move_down();
        assert_eq!(panel.cursor(), 5);
        panel.move_down();
        assert_eq!(panel.cursor(), 9);
        assert_eq!(panel.scroll_row(), 1);
        panel.set_cursor(usize::MAX);
        assert_eq!(panel.cursor(), len - 1);
    }

    #[test]
    fn update_keeps_category_by_name() {
        let (_channel, mut panel) = panel();
        panel.select_category(CUSTOM_CATEGORY);
        let mut sources = CandidateSources::with_builtins();
        sources.add_emote("wave2", "https://e/w.gif").expect("emote");
        panel.update(Arc::from(sources.compose()));
        let selected = panel.selected_category().expect("selected");
        assert_eq!(selected.name, CUSTOM_CATEGORY);
        assert_eq!(selected.entries.len(), 1);
    }

    #[test]
    fn default_category_applies_on_first_build() {
        let channel = StateChannel::shared();
        let mut panel = PickerPanel::new(channel, 8, 6).with_default_category("Food & Drink");
        panel.update(Arc::from(CandidateSources::with_builtins().compose()));
        assert_eq!(
            panel.selected_category().map(|c| c.name.as_str()),
            Some("Food & Drink")
        );
    }
}
