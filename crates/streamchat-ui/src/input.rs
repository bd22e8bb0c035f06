use crate::keys::Key;
use streamchat_core::word::{byte_offset, splice_range};
use unicode_width::UnicodeWidthChar;

/// The text control the composer edits.
///
/// Offsets are character offsets. `caret() == None` means the host cannot
/// report a caret, in which case nothing is looked up or spliced.
pub trait TextHost {
    fn value(&self) -> &str;

    fn caret(&self) -> Option<usize>;

    /// Selected range, or the collapsed caret when nothing is selected.
    fn selection(&self) -> Option<(usize, usize)> {
        self.caret().map(|caret| (caret, caret))
    }

    fn set_value(&mut self, value: String, caret: usize);
}

/// Single-line composer buffer.
#[derive(Debug, Clone)]
pub struct InputBuffer {
    value: String,
    caret: usize,
    anchor: Option<usize>,
    caret_supported: bool,
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self {
            value: String::new(),
            caret: 0,
            anchor: None,
            caret_supported: true,
        }
    }
}

impl InputBuffer {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            caret: value.chars().count(),
            ..Self::default()
        }
    }

    /// A buffer whose host reports no caret at all.
    pub fn without_caret(value: &str) -> Self {
        Self {
            caret_supported: false,
            ..Self::new(value)
        }
    }

    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.char_len());
        self.anchor = None;
    }

    /// Select `start..end`; the caret lands on `end`.
    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.char_len();
        self.anchor = Some(start.min(len));
        self.caret = end.min(len);
    }

    /// Apply an editing key. Returns false for keys that do not edit.
    pub fn apply_edit(&mut self, key: Key) -> bool {
        match key {
            Key::Char(ch) => {
                let mut encoded = [0u8; 4];
                self.insert_str(ch.encode_utf8(&mut encoded));
            }
            Key::Backspace => {
                if self.delete_selection() {
                    return true;
                }
                if self.caret == 0 {
                    return false;
                }
                let (value, caret) = splice_range(&self.value, self.caret - 1, self.caret, "");
                self.value = value;
                self.caret = caret;
            }
            Key::Delete => {
                if self.delete_selection() {
                    return true;
                }
                if self.caret >= self.char_len() {
                    return false;
                }
                let (value, _) = splice_range(&self.value, self.caret, self.caret + 1, "");
                self.value = value;
            }
            Key::Left => self.set_caret(self.caret.saturating_sub(1)),
            Key::Right => self.set_caret(self.caret + 1),
            Key::Home => self.set_caret(0),
            Key::End => self.set_caret(self.char_len()),
            _ => return false,
        }
        true
    }

    /// Replace the selection (or insert at the caret) with `text`.
    pub fn insert_str(&mut self, text: &str) {
        let (start, end) = self.selected_range();
        let (value, caret) = splice_range(&self.value, start, end, text);
        self.value = value;
        self.caret = caret;
        self.anchor = None;
    }

    /// Return the buffer and reset it.
    pub fn take(&mut self) -> String {
        self.caret = 0;
        self.anchor = None;
        std::mem::take(&mut self.value)
    }

    /// Display column of the caret.
    pub fn caret_column(&self) -> u16 {
        let head = &self.value[..byte_offset(&self.value, self.caret)];
        let width: usize = head.chars().map(|ch| ch.width().unwrap_or(0)).sum();
        u16::try_from(width).unwrap_or(u16::MAX)
    }

    /// Caret offset nearest to a display column.
    pub fn caret_at_column(&self, column: u16) -> usize {
        let mut used = 0usize;
        for (idx, ch) in self.value.chars().enumerate() {
            let width = ch.width().unwrap_or(0);
            if used + width > usize::from(column) {
                return idx;
            }
            used += width;
        }
        self.char_len()
    }

    fn selected_range(&self) -> (usize, usize) {
        match self.anchor {
            Some(anchor) => (anchor.min(self.caret), anchor.max(self.caret)),
            None => (self.caret, self.caret),
        }
    }

    fn delete_selection(&mut self) -> bool {
        let (start, end) = self.selected_range();
        if start == end {
            self.anchor = None;
            return false;
        }
        self.insert_str("");
        true
    }
}

impl TextHost for InputBuffer {
    fn value(&self) -> &str {
        &self.value
    }

    fn caret(&self) -> Option<usize> {
        self.caret_supported.then_some(self.caret)
    }

    fn selection(&self) -> Option<(usize, usize)> {
        self.caret_supported.then(|| self.selected_range())
    }

    fn set_value(&mut self, value: String, caret: usize) {
        self.value = value;
        self.set_caret(caret);
    }
}
