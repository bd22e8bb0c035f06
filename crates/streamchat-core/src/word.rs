use serde::{Deserialize, Serialize};

/// The whitespace-free run of characters around a caret.
///
/// Offsets are character offsets into the buffer, matching the caret
/// offsets a text host reports. `text == buffer[start..end]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WordSpan {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl WordSpan {
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn char_len(&self) -> usize {
        self.end - self.start
    }
}

/// Byte index of the `chars`-th character, clamped to the end of `text`.
pub fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(idx, _)| idx)
}

/// Extract the word around `caret`.
///
/// Scans left while the previous character is not whitespace and right while
/// the current one is not. Punctuation counts as part of the word. A caret
/// beyond the end of the buffer is treated as sitting at the end.
pub fn extract_span(buffer: &str, caret: usize) -> WordSpan {
    let caret_byte = byte_offset(buffer, caret);
    let caret = buffer[..caret_byte].chars().count();

    let mut start_byte = caret_byte;
    let mut left = 0usize;
    for ch in buffer[..caret_byte].chars().rev() {
        if ch.is_whitespace() {
            break;
        }
        start_byte -= ch.len_utf8();
        left += 1;
    }

    let mut end_byte = caret_byte;
    let mut right = 0usize;
    for ch in buffer[caret_byte..].chars() {
        if ch.is_whitespace() {
            break;
        }
        end_byte += ch.len_utf8();
        right += 1;
    }

    WordSpan {
        start: caret - left,
        end: caret + right,
        text: buffer[start_byte..end_byte].to_string(),
    }
}

/// Replace the characters `start..end` with `insert`.
///
/// Returns the new buffer and the caret placed right after the inserted text.
pub fn splice_range(buffer: &str, start: usize, end: usize, insert: &str) -> (String, usize) {
    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    let start_byte = byte_offset(buffer, start);
    let end_byte = byte_offset(buffer, end);
    let mut out = String::with_capacity(buffer.len() + insert.len());
    out.push_str(&buffer[..start_byte]);
    out.push_str(insert);
    out.push_str(&buffer[end_byte..]);
    let caret = buffer[..start_byte].chars().count() + insert.chars().count();
    (out, caret)
}

/// Replace a word span with `insert`.
pub fn splice(buffer: &str, span: &WordSpan, insert: &str) -> (String, usize) {
    splice_range(buffer, span.start, span.end, insert)
}
