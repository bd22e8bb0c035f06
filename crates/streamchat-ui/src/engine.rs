//! Inline `@mention` / `:emoji:` completion driven by key, focus and pointer
//! events on a [`TextHost`].

use crate::channel::{STATE_AUTOCOMPLETE, STATE_EMPTY, STATE_SEARCH, SharedChannel};
use crate::input::TextHost;
use crate::keys::Key;
use crate::menu::{MenuState, SuggestionMenu};
use std::sync::Arc;
use streamchat_core::{
    CloseReason, ComposerEvent, MAX_VISIBLE_SUGGESTIONS, Snapshot, TriggerPolicy, extract_span,
    query, splice,
};

/// Outcome of a key-down, handed to the paired key-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// The menu acted on the key; its default effect is suppressed.
    Consumed,
    /// The key belongs to the host.
    Forward,
}

impl KeyDisposition {
    pub fn is_consumed(self) -> bool {
        self == Self::Consumed
    }
}

pub struct TriggerEngine {
    menu: SuggestionMenu,
    candidates: Snapshot,
    policy: TriggerPolicy,
    limit: usize,
    enabled: bool,
    channel: SharedChannel,
    events: Vec<ComposerEvent>,
}

impl TriggerEngine {
    pub fn new(channel: SharedChannel, policy: TriggerPolicy) -> Self {
        Self {
            menu: SuggestionMenu::default(),
            candidates: Arc::from(Vec::new()),
            policy,
            limit: MAX_VISIBLE_SUGGESTIONS,
            enabled: true,
            channel,
            events: Vec::new(),
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// A disabled engine never opens its menu.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.close(CloseReason::NoMatch);
        }
    }

    /// Swap in a new index snapshot. An open menu keeps its rows until the
    /// next query.
    pub fn update(&mut self, candidates: Snapshot) {
        self.candidates = candidates;
    }

    pub fn policy(&self) -> TriggerPolicy {
        self.policy
    }

    pub fn menu(&self) -> Option<&MenuState> {
        self.menu.state()
    }

    pub fn is_open(&self) -> bool {
        self.menu.is_open()
    }

    pub fn on_key_down(&mut self, host: &mut dyn TextHost, key: Key) -> KeyDisposition {
        if !self.menu.is_open() || host.caret().is_none() {
            return KeyDisposition::Forward;
        }
        match key {
            Key::Escape => self.close(CloseReason::Escape),
            Key::Up => self.menu.up(),
            Key::Down => self.menu.down(),
            Key::Enter | Key::Tab => self.commit(host),
            _ => return KeyDisposition::Forward,
        }
        KeyDisposition::Consumed
    }

    pub fn on_key_up(&mut self, host: &dyn TextHost, prior: KeyDisposition) {
        if prior.is_consumed() {
            return;
        }
        self.refresh(host);
    }

    pub fn on_focus(&mut self, host: &dyn TextHost) {
        self.refresh(host);
    }

    pub fn on_click(&mut self, host: &dyn TextHost) {
        self.refresh(host);
    }

    /// Focus left the host. A pointer resting on the menu keeps it open so the
    /// click that caused the blur can still land.
    pub fn on_blur(&mut self) {
        if self.menu.is_hovering() {
            return;
        }
        self.close(CloseReason::Blur);
    }

    pub fn on_pointer_hover(&mut self, index: usize) {
        self.menu.hover(index);
    }

    pub fn on_pointer_leave(&mut self) {
        self.menu.pointer_left();
    }

    pub fn on_menu_click(&mut self, host: &mut dyn TextHost, index: usize) {
        let Some(state) = self.menu.state() else {
            return;
        };
        if index >= state.displayed.len() {
            return;
        }
        self.menu.hover(index);
        self.commit(host);
    }

    /// Splice the selected entry over the word currently under the caret.
    pub fn commit(&mut self, host: &mut dyn TextHost) {
        let Some(caret) = host.caret() else {
            return;
        };
        let Some(chosen) = self.menu.selected_candidate() else {
            return;
        };
        let insert = chosen.insertion_text().to_string();
        let span = extract_span(host.value(), caret);
        let (value, caret) = splice(host.value(), &span, &insert);
        host.set_value(value, caret);
        self.close(CloseReason::Commit);
        self.events.push(ComposerEvent::Committed { text: insert, caret });
    }

    pub fn close(&mut self, reason: CloseReason) {
        if !self.menu.close() {
            return;
        }
        self.channel.release(STATE_AUTOCOMPLETE);
        self.events.push(ComposerEvent::MenuClosed { reason });
    }

    /// Re-run the lookup for the word under the caret.
    pub fn refresh(&mut self, host: &dyn TextHost) {
        if !self.enabled {
            return;
        }
        let Some(caret) = host.caret() else {
            self.close(CloseReason::NoMatch);
            return;
        };
        if self.channel.is(STATE_SEARCH) {
            self.close(CloseReason::PickerOpened);
            return;
        }
        let Some((span, set)) = query(&self.candidates, host.value(), caret, self.policy, self.limit)
        else {
            self.close(CloseReason::NoMatch);
            return;
        };
        let shown = set.len();
        let more_available = set.more_available;
        self.menu.open(set, &span.text);
        if self.channel.is(STATE_EMPTY) {
            self.channel.set_state(STATE_AUTOCOMPLETE);
        }
        self.events.push(ComposerEvent::MenuOpened {
            query: span.text,
            shown,
            more_available,
        });
    }

    pub fn take_events(&mut self) -> Vec<ComposerEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::StateChannel;
    use crate::input::InputBuffer;
    use streamchat_core::Candidate;

    fn engine(candidates: Vec<Candidate>) -> (SharedChannel, TriggerEngine) {
        let channel = StateChannel::shared();
        let mut engine = TriggerEngine::new(channel.clone(), TriggerPolicy::SigilOnly);
        engine.update(Arc::from(candidates));
        (channel, engine)
    }

    fn roster() -> Vec<Candidate> {
        vec![
            Candidate::mention("alice").expect("mention"),
            Candidate::mention("albert").expect("mention"),
            Candidate::mention("bob").expect("mention"),
            Candidate::emoji("smile", "😄").expect("emoji"),
            Candidate::emoji("smirk", "😏").expect("emoji"),
        ]
    }

    fn type_key(engine: &mut TriggerEngine, host: &mut InputBuffer, key: Key) -> KeyDisposition {
        let disposition = engine.on_key_down(host, key);
        if !disposition.is_consumed() {
            host.apply_edit(key);
        }
        engine.on_key_up(host, disposition);
        disposition
    }

    #[test]
    fn commit_strips_mention_sigil_and_moves_caret() {
        let (_channel, mut engine) = engine(roster());
        let mut host = InputBuffer::new("hi @al");
        engine.on_focus(&host);
        assert!(engine.is_open());

        assert_eq!(engine.on_key_down(&mut host, Key::Enter), KeyDisposition::Consumed);
        assert_eq!(host.value(), "hi alice");
        assert_eq!(host.caret(), Some(8));
        assert!(!engine.is_open());
        assert!(engine.take_events().contains(&ComposerEvent::Committed {
            text: "alice".to_string(),
            caret: 8,
        }));
    }

    #[test]
    fn consumed_keydown_suppresses_requery_on_keyup() {
        let (_channel, mut engine) = engine(roster());
        let mut host = InputBuffer::new("hi @al");
        engine.on_focus(&host);
        engine.take_events();

        let disposition = engine.on_key_down(&mut host, Key::Down);
        assert_eq!(disposition, KeyDisposition::Consumed);
        engine.on_key_up(&host, disposition);
        assert_eq!(engine.menu().map(|m| m.selected), Some(1));
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn typing_a_space_closes_without_commit() {
        let (_channel, mut engine) = engine(roster());
        let mut host = InputBuffer::default();
        for ch in "hi @al".chars() {
            type_key(&mut engine, &mut host, Key::Char(ch));
        }
        assert!(engine.is_open());
        assert_eq!(
            type_key(&mut engine, &mut host, Key::Char(' ')),
            KeyDisposition::Forward
        );
        assert!(!engine.is_open());
        assert_eq!(host.value(), "hi @al ");
        let events = engine.take_events();
        assert!(events.contains(&ComposerEvent::MenuClosed {
            reason: CloseReason::NoMatch
        }));
        assert!(!events.iter().any(|e| matches!(e, ComposerEvent::Committed { .. })));
    }

    #[test]
    fn escape_closes_and_is_consumed() {
        let (channel, mut engine) = engine(roster());
        let mut host = InputBuffer::new(":sm");
        engine.on_click(&host);
        assert!(channel.is(STATE_AUTOCOMPLETE));
        assert_eq!(engine.on_key_down(&mut host, Key::Escape), KeyDisposition::Consumed);
        assert!(!engine.is_open());
        assert!(channel.is(STATE_EMPTY));
        assert_eq!(host.value(), ":sm");
        assert_eq!(engine.on_key_down(&mut host, Key::Escape), KeyDisposition::Forward);
    }

    #[test]
    fn blur_keeps_menu_while_hovering() {
        let (_channel, mut engine) = engine(roster());
        let mut host = InputBuffer::new("@al");
        engine.on_focus(&host);
        engine.on_pointer_hover(1);
        engine.on_blur();
        assert!(engine.is_open());

        engine.on_menu_click(&mut host, 1);
        assert_eq!(host.value(), "albert");
        assert!(!engine.is_open());

        engine.on_focus(&InputBuffer::new("@al"));
        engine.on_pointer_leave();
        engine.on_blur();
        assert!(!engine.is_open());
    }

    #[test]
    fn unsupported_caret_never_opens_or_consumes() {
        let (_channel, mut engine) = engine(roster());
        let mut host = InputBuffer::without_caret("hi @al");
        engine.on_focus(&host);
        assert!(!engine.is_open());
        assert_eq!(engine.on_key_down(&mut host, Key::Enter), KeyDisposition::Forward);
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn losing_the_caret_closes_an_open_menu() {
        let (channel, mut engine) = engine(roster());
        engine.on_focus(&InputBuffer::new("hi @al"));
        assert!(engine.is_open());

        engine.on_key_up(&InputBuffer::without_caret("hi @al"), KeyDisposition::Forward);
        assert!(!engine.is_open());
        assert!(channel.is(STATE_EMPTY));
    }

    #[test]
    fn picker_state_blocks_the_menu() {
        let (channel, mut engine) = engine(roster());
        let host = InputBuffer::new(":sm");
        engine.on_focus(&host);
        assert!(engine.is_open());
        channel.set_state(STATE_SEARCH);
        engine.on_key_up(&host, KeyDisposition::Forward);
        assert!(!engine.is_open());
        assert!(channel.is(STATE_SEARCH));
        assert!(engine.take_events().contains(&ComposerEvent::MenuClosed {
            reason: CloseReason::PickerOpened
        }));
    }

    #[test]
    fn emoji_commit_keeps_colons_and_surrounding_text() {
        let (_channel, mut engine) = engine(roster());
        let mut host = InputBuffer::new("so :mi nice");
        host.set_caret(6);
        engine.on_click(&host);
        let state = engine.menu().expect("open");
        assert_eq!(state.displayed.len(), 2);
        engine.on_key_down(&mut host, Key::Down);
        engine.on_key_down(&mut host, Key::Tab);
        assert_eq!(host.value(), "so :smirk: nice");
        assert_eq!(host.caret(), Some(10));
    }

    #[test]
    fn disabled_engine_stays_closed() {
        let (_channel, mut engine) = engine(roster());
        let host = InputBuffer::new("@al");
        engine.on_focus(&host);
        engine.set_enabled(false);
        assert!(!engine.is_open());
        engine.on_key_up(&host, KeyDisposition::Forward);
        assert!(!engine.is_open());
    }

    #[test]
    fn close_on_closed_menu_emits_nothing() {
        let (_channel, mut engine) = engine(roster());
        engine.close(CloseReason::Escape);
        engine.close(CloseReason::Blur);
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn limit_caps_rows_and_flags_overflow() {
        let names: Vec<Candidate> = (0..15)
            .map(|i| Candidate::mention(&format!("user{i:02}")).expect("mention"))
            .collect();
        let (_channel, mut engine) = engine(names);
        engine.on_focus(&InputBuffer::new("@user"));
        let state = engine.menu().expect("open");
        assert_eq!(state.displayed.len(), 10);
        assert!(state.more_available);
    }
}
