use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a candidate completes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    Mention,
    Emoji,
    Emote,
}

impl CandidateKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Mention => "mention",
            Self::Emoji => "emoji",
            Self::Emote => "emote",
        }
    }

    /// Emoji and emotes share the `:name:` token form.
    pub fn is_emoji_like(self) -> bool {
        matches!(self, Self::Emoji | Self::Emote)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CandidateError {
    #[error("{kind} name must not be empty")]
    Empty { kind: &'static str },
    #[error("{kind} name `{name}` contains whitespace")]
    Whitespace { kind: &'static str, name: String },
    #[error("emote alias `{alias}` contains a stray ':'")]
    StraySigil { alias: String },
}

/// A single completion entry.
///
/// `text` is exactly what a trigger word is compared against: `@name` for
/// mentions and `:name:` for emoji and emotes. `preview` is whatever the host
/// renders next to it (a glyph, a username, an image location).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    text: String,
    kind: CandidateKind,
    preview: String,
}

impl Candidate {
    pub fn mention(username: &str) -> Result<Self, CandidateError> {
        let name = username.strip_prefix('@').unwrap_or(username);
        validate_name("mention", name)?;
        Ok(Self {
            text: format!("@{name}"),
            kind: CandidateKind::Mention,
            preview: name.to_string(),
        })
    }

    /// Built-in emoji. The shortcode may be given bare or already wrapped.
    pub fn emoji(shortcode: &str, glyph: &str) -> Result<Self, CandidateError> {
        let name = unwrap_token(shortcode);
        validate_name("emoji", name)?;
        Ok(Self {
            text: format!(":{name}:"),
            kind: CandidateKind::Emoji,
            preview: glyph.to_string(),
        })
    }

    /// Custom emote; `uri` is kept as the preview.
    pub fn emote(alias: &str, uri: &str) -> Result<Self, CandidateError> {
        let name = unwrap_token(alias);
        validate_name("emote", name)?;
        if name.contains(':') {
            return Err(CandidateError::StraySigil {
                alias: alias.to_string(),
            });
        }
        Ok(Self {
            text: format!(":{name}:"),
            kind: CandidateKind::Emote,
            preview: uri.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> CandidateKind {
        self.kind
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }

    /// True for `:name:` tokens.
    pub fn is_closed_token(&self) -> bool {
        is_closed_token(&self.text)
    }

    /// Text spliced into the buffer on commit. Mentions drop their `@`.
    pub fn insertion_text(&self) -> &str {
        match self.kind {
            CandidateKind::Mention => self.text.strip_prefix('@').unwrap_or(&self.text),
            CandidateKind::Emoji | CandidateKind::Emote => &self.text,
        }
    }

    /// Label shown in a menu row, without the mention sigil.
    pub fn display_text(&self) -> &str {
        self.insertion_text()
    }
}

/// `:x:` with at least one inner character.
pub fn is_closed_token(text: &str) -> bool {
    text.chars().count() >= 3 && text.starts_with(':') && text.ends_with(':')
}

fn unwrap_token(raw: &str) -> &str {
    let trimmed = raw.strip_prefix(':').unwrap_or(raw);
    trimmed.strip_suffix(':').unwrap_or(trimmed)
}

fn validate_name(kind: &'static str, name: &str) -> Result<(), CandidateError> {
    if name.is_empty() {
        return Err(CandidateError::Empty { kind });
    }
    if name.chars().any(char::is_whitespace) {
        return Err(CandidateError::Whitespace {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}
