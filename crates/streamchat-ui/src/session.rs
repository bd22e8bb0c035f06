//! One composer instance: the index, both overlays and the input buffer,
//! with every UI event routed through [`ChatSession::handle`].

use crate::channel::{SharedChannel, StateChannel};
use crate::engine::{KeyDisposition, TriggerEngine};
use crate::input::{InputBuffer, TextHost};
use crate::keys::Key;
use crate::layout::{
    MenuGeometry, PickerHit, anchor_above, menu_entry_at, menu_height, picker_height, picker_hit,
};
use crate::picker::PickerPanel;
use ratatui::layout::Rect;
use streamchat_core::{
    AppConfig, CandidateError, CandidateIndex, CandidateSources, ComposerEvent, Snapshot,
};
use streamchat_observe::Observer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Picker,
}

/// UI events after translation from the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    TogglePicker,
    FocusGained,
    FocusLost,
    MouseMove { column: u16, row: u16 },
    MouseDown { column: u16, row: u16 },
    Paste(String),
    Resize(Rect),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Continue,
    Submitted(String),
}

/// Overlay currently on screen and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Menu(Rect),
    Picker(Rect),
}

pub struct ChatSession {
    sources: CandidateSources,
    index: CandidateIndex,
    channel: SharedChannel,
    engine: TriggerEngine,
    picker: PickerPanel,
    input: InputBuffer,
    focus: Focus,
    input_area: Rect,
    viewport: Option<Rect>,
    geometry: MenuGeometry,
    observer: Option<Observer>,
}

impl ChatSession {
    /// `engine` and `picker` must have been built on `channel`.
    pub fn new(
        channel: SharedChannel,
        sources: CandidateSources,
        engine: TriggerEngine,
        picker: PickerPanel,
    ) -> Self {
        let mut session = Self {
            index: CandidateIndex::new(sources.compose()),
            sources,
            channel,
            engine,
            picker,
            input: InputBuffer::default(),
            focus: Focus::Input,
            input_area: Rect::default(),
            viewport: None,
            geometry: MenuGeometry::default(),
            observer: None,
        };
        let snapshot = session.index.snapshot();
        session.engine.update(snapshot.clone());
        session.picker.update(snapshot);
        session
    }

    /// Build a session from settings. Invalid roster names and emote aliases
    /// are skipped and returned.
    pub fn from_config(cfg: &AppConfig) -> (Self, Vec<CandidateError>) {
        let mut sources = if cfg.autocomplete.builtin_emoji {
            CandidateSources::with_builtins()
        } else {
            CandidateSources::empty()
        };
        let mut rejected = sources.set_roster(&cfg.roster);
        for (alias, uri) in &cfg.emotes {
            if let Err(err) = sources.add_emote(alias, uri) {
                rejected.push(err);
            }
        }

        let channel = StateChannel::shared();
        let mut engine = TriggerEngine::new(channel.clone(), cfg.autocomplete.trigger_policy)
            .with_limit(cfg.autocomplete.max_visible);
        engine.set_enabled(cfg.autocomplete.enabled);
        let picker = PickerPanel::new(channel.clone(), cfg.picker.columns, cfg.picker.rows)
            .with_default_category(&cfg.picker.default_category);
        let mut session = Self::new(channel, sources, engine, picker);
        session.geometry = MenuGeometry::from_config(&cfg.ui);
        (session, rejected)
    }

    pub fn with_observer(mut self, observer: Observer) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn observer(&self) -> Option<&Observer> {
        self.observer.as_ref()
    }

    pub fn set_geometry(&mut self, geometry: MenuGeometry) {
        self.geometry = geometry;
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    pub fn engine(&self) -> &TriggerEngine {
        &self.engine
    }

    pub fn picker(&self) -> &PickerPanel {
        &self.picker
    }

    pub fn channel(&self) -> &SharedChannel {
        &self.channel
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn snapshot(&self) -> Snapshot {
        self.index.snapshot()
    }

    pub fn sources(&self) -> &CandidateSources {
        &self.sources
    }

    pub fn set_roster<I, S>(&mut self, usernames: I) -> Vec<CandidateError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rejected = self.sources.set_roster(usernames);
        self.reindex();
        rejected
    }

    pub fn add_emote(&mut self, alias: &str, uri: &str) -> Result<(), CandidateError> {
        self.sources.add_emote(alias, uri)?;
        self.reindex();
        Ok(())
    }

    pub fn remove_emote(&mut self, alias: &str) -> bool {
        let removed = self.sources.remove_emote(alias);
        if removed {
            self.reindex();
        }
        removed
    }

    /// Recompose the index and hand the new snapshot to both overlays.
    fn reindex(&mut self) {
        self.index.update(self.sources.compose());
        let snapshot = self.index.snapshot();
        self.engine.update(snapshot.clone());
        self.picker.update(snapshot);
        self.record(ComposerEvent::IndexUpdated {
            generation: self.index.generation(),
            candidates: self.index.len(),
        });
    }

    /// Where the composer input sits on screen. Never re-queries.
    pub fn relayout(&mut self, input_area: Rect) {
        self.input_area = input_area;
    }

    pub fn input_area(&self) -> Rect {
        self.input_area
    }

    /// Screen region overlays may occupy. Overlays are cut to it, and pointer
    /// hits are tested against the cut rect.
    pub fn set_viewport(&mut self, bounds: Rect) {
        self.viewport = Some(bounds);
    }

    /// The overlay on screen, already cut to what is drawn.
    pub fn overlay(&self) -> Option<Overlay> {
        if self.picker.is_open() {
            let height = picker_height(&self.picker);
            return Some(Overlay::Picker(self.place(height)));
        }
        self.engine
            .menu()
            .map(|state| Overlay::Menu(self.place(menu_height(state))))
    }

    fn place(&self, height: u16) -> Rect {
        let area = anchor_above(self.input_area, height, self.geometry);
        match self.viewport {
            Some(bounds) => area.intersection(bounds),
            None => area,
        }
    }

    pub fn handle(&mut self, event: InputEvent) -> SessionOutcome {
        let outcome = match event {
            InputEvent::Key(key) => match self.focus {
                Focus::Input => self.key_in_input(key),
                Focus::Picker => {
                    self.picker.on_key(&mut self.input, key);
                    self.after_picker();
                    SessionOutcome::Continue
                }
            },
            InputEvent::TogglePicker => {
                self.picker.toggle();
                if self.picker.is_open() {
                    self.focus = Focus::Picker;
                    self.engine.refresh(&self.input);
                } else {
                    self.after_picker();
                }
                SessionOutcome::Continue
            }
            InputEvent::FocusGained => {
                if self.focus == Focus::Input {
                    self.engine.on_focus(&self.input);
                }
                SessionOutcome::Continue
            }
            InputEvent::FocusLost => {
                self.engine.on_blur();
                SessionOutcome::Continue
            }
            InputEvent::MouseMove { column, row } => {
                self.pointer_moved(column, row);
                SessionOutcome::Continue
            }
            InputEvent::MouseDown { column, row } => {
                self.pointer_pressed(column, row);
                SessionOutcome::Continue
            }
            InputEvent::Paste(text) => {
                if self.focus == Focus::Input {
                    self.input.insert_str(&text.replace(['\r', '\n'], " "));
                    self.engine.on_key_up(&self.input, KeyDisposition::Forward);
                } else {
                    let search = format!("{}{text}", self.picker.search());
                    self.picker.set_search(&search);
                }
                SessionOutcome::Continue
            }
            InputEvent::Resize(input_area) => {
                self.relayout(input_area);
                SessionOutcome::Continue
            }
        };
        self.flush_events();
        outcome
    }

    fn key_in_input(&mut self, key: Key) -> SessionOutcome {
        let disposition = self.engine.on_key_down(&mut self.input, key);
        if !disposition.is_consumed() {
            if key == Key::Enter {
                return self.submit();
            }
            self.input.apply_edit(key);
        }
        self.engine.on_key_up(&self.input, disposition);
        SessionOutcome::Continue
    }

    /// Take the buffer as a message. Empty buffers are not sent.
    pub fn submit(&mut self) -> SessionOutcome {
        if self.input.value().trim().is_empty() {
            return SessionOutcome::Continue;
        }
        let text = self.input.take();
        self.record(ComposerEvent::MessageSubmitted {
            chars: text.chars().count(),
        });
        SessionOutcome::Submitted(text)
    }

    fn after_picker(&mut self) {
        if self.picker.is_open() {
            return;
        }
        self.focus = Focus::Input;
        self.engine.on_focus(&self.input);
    }

    fn pointer_moved(&mut self, column: u16, row: u16) {
        match self.overlay() {
            Some(Overlay::Menu(area)) => {
                let hit = self
                    .engine
                    .menu()
                    .and_then(|state| menu_entry_at(area, state, column, row));
                match hit {
                    Some(index) => self.engine.on_pointer_hover(index),
                    None => self.engine.on_pointer_leave(),
                }
            }
            Some(Overlay::Picker(area)) => {
                if let Some(PickerHit::Entry(index)) =
                    picker_hit(area, &self.picker, column, row)
                {
                    self.picker.set_cursor(index);
                }
            }
            None => {}
        }
    }

    fn pointer_pressed(&mut self, column: u16, row: u16) {
        if self.in_input(column, row) {
            if self.picker.is_open() {
                self.picker.close();
                self.after_picker();
            }
            self.click_input(column);
            return;
        }
        match self.overlay() {
            Some(Overlay::Menu(area)) => {
                let hit = self
                    .engine
                    .menu()
                    .and_then(|state| menu_entry_at(area, state, column, row));
                if let Some(index) = hit {
                    self.engine.on_menu_click(&mut self.input, index);
                    return;
                }
            }
            Some(Overlay::Picker(area)) => {
                match picker_hit(area, &self.picker, column, row) {
                    Some(PickerHit::Entry(index)) => {
                        self.picker.choose(&mut self.input, index);
                        self.after_picker();
                    }
                    Some(PickerHit::Category(index)) => {
                        self.picker.select_category_at(index);
                    }
                    Some(PickerHit::Search) | None => {}
                }
                return;
            }
            None => {}
        }
        self.engine.on_blur();
    }

    fn in_input(&self, column: u16, row: u16) -> bool {
        let area = self.input_area;
        column >= area.x
            && column < area.x.saturating_add(area.width)
            && row >= area.y
            && row < area.y.saturating_add(area.height)
    }

    fn click_input(&mut self, column: u16) {
        let caret = self
            .input
            .caret_at_column(column.saturating_sub(self.input_area.x));
        self.input.set_caret(caret);
        self.engine.on_click(&self.input);
    }

    fn flush_events(&mut self) {
        let mut events = self.engine.take_events();
        events.extend(self.picker.take_events());
        for event in events {
            self.record(event);
        }
    }

    fn record(&self, event: ComposerEvent) {
        let Some(observer) = self.observer.as_ref() else {
            return;
        };
        if let Err(err) = observer.record(event) {
            observer.warn_log(&format!("failed to record composer event: {err}"));
        }
    }
}
