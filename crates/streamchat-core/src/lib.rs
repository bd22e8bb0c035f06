//! Candidate model, word extraction and ranking for inline `@mention` and
//! `:emoji:` completion.

use std::path::{Path, PathBuf};

pub mod candidate;
pub mod config;
pub mod emoji;
pub mod events;
pub mod index;
pub mod matching;
pub mod trigger;
pub mod word;

pub use candidate::{Candidate, CandidateError, CandidateKind, is_closed_token};
pub use config::{AppConfig, AutocompleteConfig, PickerConfig, ThemeConfig, UiConfig};
pub use emoji::{BUILTIN_CATEGORIES, CUSTOM_CATEGORY, EmojiCategory, builtin_candidates};
pub use events::{CloseReason, ComposerEvent, EventEnvelope};
pub use index::{CandidateIndex, CandidateSources, Snapshot};
pub use matching::{MAX_VISIBLE_SUGGESTIONS, MatchSet, rank, search};
pub use trigger::{Trigger, TriggerPolicy, classify};
pub use word::{WordSpan, extract_span, splice, splice_range};

pub type Result<T> = anyhow::Result<T>;

pub fn runtime_dir(workspace: &Path) -> PathBuf {
    workspace.join(".streamchat")
}

/// Classify the word around `caret` and rank the index against it.
///
/// Returns `None` when the word does not qualify or nothing matches.
pub fn query(
    candidates: &[Candidate],
    buffer: &str,
    caret: usize,
    policy: TriggerPolicy,
    limit: usize,
) -> Option<(WordSpan, MatchSet)> {
    let span = extract_span(buffer, caret);
    let trigger = classify(&span.text, policy)?;
    let set = rank(candidates, &trigger, limit);
    if set.is_empty() {
        return None;
    }
    Some((span, set))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_combines_span_trigger_and_ranking() {
        let index = vec![
            Candidate::mention("alice").expect("mention"),
            Candidate::mention("albert").expect("mention"),
        ];
        let (span, set) = query(&index, "hi @al", 6, TriggerPolicy::SigilOnly, 10)
            .expect("matches");
        assert_eq!(span.text, "@al");
        assert_eq!(set.len(), 2);

        assert!(query(&index, "hi @al ", 7, TriggerPolicy::SigilOnly, 10).is_none());
        assert!(query(&index, "hi @zz", 6, TriggerPolicy::SigilOnly, 10).is_none());
    }
}
