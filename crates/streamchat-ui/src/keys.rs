use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Keys the composer and its overlays understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Enter,
    Tab,
    Escape,
    Backspace,
    Delete,
    Char(char),
    Other,
}

impl Key {
    pub fn from_code(code: KeyCode) -> Self {
        match code {
            KeyCode::Up => Self::Up,
            KeyCode::Down => Self::Down,
            KeyCode::Left => Self::Left,
            KeyCode::Right => Self::Right,
            KeyCode::Home => Self::Home,
            KeyCode::End => Self::End,
            KeyCode::Enter => Self::Enter,
            KeyCode::Tab => Self::Tab,
            KeyCode::Esc => Self::Escape,
            KeyCode::Backspace => Self::Backspace,
            KeyCode::Delete => Self::Delete,
            KeyCode::Char(c) => Self::Char(c),
            _ => Self::Other,
        }
    }
}

/// What a terminal key press means to the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerAction {
    Exit,
    TogglePicker,
    Key(Key),
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub exit: KeyEvent,
    pub toggle_picker: KeyEvent,
    pub accept: KeyEvent,
    pub accept_alt: KeyEvent,
    pub dismiss: KeyEvent,
    pub menu_up: KeyEvent,
    pub menu_down: KeyEvent,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct KeyBindingsFile {
    exit: Option<String>,
    toggle_picker: Option<String>,
    accept: Option<String>,
    accept_alt: Option<String>,
    dismiss: Option<String>,
    menu_up: Option<String>,
    menu_down: Option<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            exit: KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            toggle_picker: KeyEvent::new(KeyCode::Char('e'), KeyModifiers::CONTROL),
            accept: KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            accept_alt: KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE),
            dismiss: KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            menu_up: KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            menu_down: KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
        }
    }
}

impl KeyBindings {
    fn apply_overrides(mut self, raw: KeyBindingsFile) -> Result<Self> {
        if let Some(value) = raw.exit {
            self.exit = parse_key_event(&value)?;
        }
        if let Some(value) = raw.toggle_picker {
            self.toggle_picker = parse_key_event(&value)?;
        }
        if let Some(value) = raw.accept {
            self.accept = parse_key_event(&value)?;
        }
        if let Some(value) = raw.accept_alt {
            self.accept_alt = parse_key_event(&value)?;
        }
        if let Some(value) = raw.dismiss {
            self.dismiss = parse_key_event(&value)?;
        }
        if let Some(value) = raw.menu_up {
            self.menu_up = parse_key_event(&value)?;
        }
        if let Some(value) = raw.menu_down {
            self.menu_down = parse_key_event(&value)?;
        }
        Ok(self)
    }

    /// Map a terminal key event onto the composer's vocabulary.
    pub fn translate(&self, event: KeyEvent) -> ComposerAction {
        let event = KeyEvent::new(event.code, event.modifiers);
        if event == self.exit {
            return ComposerAction::Exit;
        }
        if event == self.toggle_picker {
            return ComposerAction::TogglePicker;
        }
        let key = if event == self.accept {
            Key::Enter
        } else if event == self.accept_alt {
            Key::Tab
        } else if event == self.dismiss {
            Key::Escape
        } else if event == self.menu_up {
            Key::Up
        } else if event == self.menu_down {
            Key::Down
        } else if event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            Key::Other
        } else {
            Key::from_code(event.code)
        };
        ComposerAction::Key(key)
    }
}

pub fn load_keybindings(path: &Path) -> Result<KeyBindings> {
    let raw = fs::read_to_string(path)?;
    let parsed: KeyBindingsFile = serde_json::from_str(&raw)?;
    KeyBindings::default().apply_overrides(parsed)
}

fn parse_key_event(value: &str) -> Result<KeyEvent> {
    let mut modifiers = KeyModifiers::NONE;
    let mut key_code: Option<KeyCode> = None;
    for token in value
        .split('+')
        .map(str::trim)
        .filter(|part| !part.is_empty())
    {
        let normalized = token.to_ascii_lowercase();
        match normalized.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" | "option" => modifiers |= KeyModifiers::ALT,
            other => {
                key_code = Some(
                    parse_key_code(other)
                        .ok_or_else(|| anyhow::anyhow!("unsupported keybinding token: {token}"))?,
                );
            }
        }
    }
    let code = key_code.ok_or_else(|| anyhow::anyhow!("missing key code in keybinding"))?;
    Ok(KeyEvent::new(code, modifiers))
}

fn parse_key_code(value: &str) -> Option<KeyCode> {
    match value {
        "enter" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backtab" => Some(KeyCode::BackTab),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "backspace" => Some(KeyCode::Backspace),
        "space" => Some(KeyCode::Char(' ')),
        value if value.chars().count() == 1 => value.chars().next().map(KeyCode::Char),
        _ => None,
    }
}
