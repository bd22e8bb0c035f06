use crate::candidate::{Candidate, CandidateError, CandidateKind};
use crate::emoji::builtin_candidates;
use std::sync::Arc;

/// Shared, immutable view of the index.
pub type Snapshot = Arc<[Candidate]>;

/// Ordered candidate collection that is only ever replaced wholesale.
#[derive(Debug, Clone)]
pub struct CandidateIndex {
    snapshot: Snapshot,
    generation: u64,
}

impl Default for CandidateIndex {
    fn default() -> Self {
        Self {
            snapshot: Arc::from(Vec::new()),
            generation: 0,
        }
    }
}

impl CandidateIndex {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            snapshot: Arc::from(candidates),
            generation: 0,
        }
    }

    /// Replace the whole sequence. Holders of an older snapshot keep it.
    pub fn update(&mut self, candidates: Vec<Candidate>) {
        self.snapshot = Arc::from(candidates);
        self.generation += 1;
    }

    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.snapshot)
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.snapshot
    }

    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    /// Number of `update` calls so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The three feeds an index is composed from.
///
/// Composition order is fixed: built-in emoji, then custom emotes in the
/// order they were added, then the live roster.
#[derive(Debug, Clone, Default)]
pub struct CandidateSources {
    builtins: Vec<Candidate>,
    emotes: Vec<Candidate>,
    roster: Vec<Candidate>,
}

impl CandidateSources {
    pub fn with_builtins() -> Self {
        Self {
            builtins: builtin_candidates(),
            ..Self::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Replace the roster; invalid usernames are skipped and returned.
    pub fn set_roster<I, S>(&mut self, usernames: I) -> Vec<CandidateError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rejected = Vec::new();
        self.roster = usernames
            .into_iter()
            .filter_map(|name| match Candidate::mention(name.as_ref()) {
                Ok(c) => Some(c),
                Err(err) => {
                    rejected.push(err);
                    None
                }
            })
            .collect();
        rejected
    }

    /// Add an emote, replacing any emote with the same alias in place.
    pub fn add_emote(&mut self, alias: &str, uri: &str) -> Result<(), CandidateError> {
        let emote = Candidate::emote(alias, uri)?;
        if let Some(slot) = self.emotes.iter_mut().find(|e| e.text() == emote.text()) {
            *slot = emote;
        } else {
            self.emotes.push(emote);
        }
        Ok(())
    }

    /// Remove every emote with this alias. Built-in emoji are untouched.
    pub fn remove_emote(&mut self, alias: &str) -> bool {
        let Ok(probe) = Candidate::emote(alias, "") else {
            return false;
        };
        let before = self.emotes.len();
        self.emotes.retain(|e| e.text() != probe.text());
        before != self.emotes.len()
    }

    pub fn emotes(&self) -> &[Candidate] {
        &self.emotes
    }

    pub fn roster(&self) -> &[Candidate] {
        &self.roster
    }

    /// Built-ins, emotes, roster, in that order.
    pub fn compose(&self) -> Vec<Candidate> {
        self.builtins
            .iter()
            .chain(self.emotes.iter())
            .chain(self.roster.iter())
            .cloned()
            .collect()
    }

    pub fn count(&self, kind: CandidateKind) -> usize {
        match kind {
            CandidateKind::Emoji => self.builtins.len(),
            CandidateKind::Emote => self.emotes.len(),
            CandidateKind::Mention => self.roster.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_replaces_without_touching_old_snapshots() {
        let mut index = CandidateIndex::new(vec![Candidate::mention("a").expect("m")]);
        let before = index.snapshot();
        index.update(vec![
            Candidate::mention("b").expect("m"),
            Candidate::mention("c").expect("m"),
        ]);
        assert_eq!(before.len(), 1);
        assert_eq!(before[0].text(), "@a");
        assert_eq!(index.len(), 2);
        assert_eq!(index.generation(), 1);
    }

    #[test]
    fn composes_builtins_then_emotes_then_roster() {
        let mut sources = CandidateSources::with_builtins();
        sources.add_emote("parrot", "https://e/parrot.gif").expect("emote");
        let rejected = sources.set_roster(["alice", "bad name", "bob"]);
        assert_eq!(rejected.len(), 1);

        let all = sources.compose();
        let builtins = sources.count(CandidateKind::Emoji);
        assert!(builtins > 0);
        assert!(all[..builtins].iter().all(|c| c.kind() == CandidateKind::Emoji));
        assert_eq!(all[builtins].text(), ":parrot:");
        assert_eq!(all[builtins + 1].text(), "@alice");
        assert_eq!(all[builtins + 2].text(), "@bob");
    }

    #[test]
    fn emote_add_replaces_and_remove_spares_builtins() {
        let mut sources = CandidateSources::with_builtins();
        sources.add_emote("smile", "https://e/one.png").expect("emote");
        sources.add_emote(":smile:", "https://e/two.png").expect("emote");
        assert_eq!(sources.emotes().len(), 1);
        assert_eq!(sources.emotes()[0].preview(), "https://e/two.png");

        assert!(sources.remove_emote("smile"));
        assert!(!sources.remove_emote("smile"));
        assert!(
            sources
                .compose()
                .iter()
                .any(|c| c.text() == ":smile:" && c.kind() == CandidateKind::Emoji)
        );
    }
}
