use crate::candidate::Candidate;
use crate::trigger::Trigger;
use serde::{Deserialize, Serialize};

/// Rows shown in the suggestion menu before the overflow marker.
pub const MAX_VISIBLE_SUGGESTIONS: usize = 10;

/// Ranked result of one query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchSet {
    /// Displayed entries: exact-prefix matches first, then partial matches.
    pub entries: Vec<Candidate>,
    /// How many of `entries` came from the exact tier.
    pub exact_len: usize,
    /// More matches existed than were kept.
    pub more_available: bool,
}

impl MatchSet {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn exact(&self) -> &[Candidate] {
        &self.entries[..self.exact_len]
    }

    pub fn partial(&self) -> &[Candidate] {
        &self.entries[self.exact_len..]
    }
}

/// Rank `candidates` for `trigger`, keeping at most `limit` entries.
pub fn rank(candidates: &[Candidate], trigger: &Trigger, limit: usize) -> MatchSet {
    let order = ranked_positions(candidates, trigger);
    let total = order.positions.len();
    let kept = total.min(limit);
    MatchSet {
        entries: order.positions[..kept]
            .iter()
            .map(|&idx| candidates[idx].clone())
            .collect(),
        exact_len: order.exact_len.min(kept),
        more_available: total > limit,
    }
}

struct RankedPositions {
    positions: Vec<usize>,
    exact_len: usize,
}

fn ranked_positions(candidates: &[Candidate], trigger: &Trigger) -> RankedPositions {
    let query = trigger.query();
    let mut in_exact = vec![false; candidates.len()];
    let mut positions = Vec::new();

    for (idx, candidate) in candidates.iter().enumerate() {
        // Free text has no sigil to match against.
        let key = match trigger {
            Trigger::FreeText(_) => candidate.display_text(),
            Trigger::Mention(_) | Trigger::Emoji(_) => candidate.text(),
        };
        if key.to_lowercase().starts_with(query) {
            in_exact[idx] = true;
            positions.push(idx);
        }
    }
    let exact_len = positions.len();

    if trigger.wants_partial_matches() {
        let needle = query.strip_prefix(':').unwrap_or(query);
        for (idx, candidate) in candidates.iter().enumerate() {
            if in_exact[idx] || !candidate.kind().is_emoji_like() || !candidate.is_closed_token()
            {
                continue;
            }
            let text = candidate.text().to_lowercase();
            let inner = &text[1..text.len() - 1];
            if inner.contains(needle) {
                positions.push(idx);
            }
        }
    }

    RankedPositions {
        positions,
        exact_len,
    }
}

/// Case-insensitive substring search over candidate text, in index order.
pub fn search<'a>(candidates: &'a [Candidate], needle: &str) -> Vec<&'a Candidate> {
    let needle = needle.to_lowercase();
    candidates
        .iter()
        .filter(|c| c.text().to_lowercase().contains(&needle))
        .collect()
}
