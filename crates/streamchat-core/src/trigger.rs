use serde::{Deserialize, Serialize};

/// Which words may open the suggestion menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerPolicy {
    /// Only `@name` and `:name` words trigger a lookup.
    #[default]
    SigilOnly,
    /// Additionally any plain word longer than one character.
    Permissive,
}

impl TriggerPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sigil-only" => Some(Self::SigilOnly),
            "permissive" => Some(Self::Permissive),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SigilOnly => "sigil-only",
            Self::Permissive => "permissive",
        }
    }
}

/// A qualifying trigger word, lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "query", rename_all = "snake_case")]
pub enum Trigger {
    Mention(String),
    Emoji(String),
    FreeText(String),
}

impl Trigger {
    pub fn query(&self) -> &str {
        match self {
            Self::Mention(q) | Self::Emoji(q) | Self::FreeText(q) => q,
        }
    }

    /// Whether the substring tier applies to this trigger.
    pub fn wants_partial_matches(&self) -> bool {
        matches!(self, Self::Emoji(q) if !crate::candidate::is_closed_token(q))
    }
}

/// Classify a word; the first satisfied rule wins.
pub fn classify(word: &str, policy: TriggerPolicy) -> Option<Trigger> {
    let lowered = word.to_lowercase();
    let len = lowered.chars().count();
    if lowered.starts_with('@') {
        return Some(Trigger::Mention(lowered));
    }
    if lowered.starts_with(':') {
        // A closed `:name:` token is already complete.
        if len > 2 && !lowered[1..].ends_with(':') {
            return Some(Trigger::Emoji(lowered));
        }
        return None;
    }
    if policy == TriggerPolicy::Permissive && len > 1 {
        return Some(Trigger::FreeText(lowered));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mention_sigil_triggers_at_any_length() {
        assert_eq!(
            classify("@", TriggerPolicy::SigilOnly),
            Some(Trigger::Mention("@".to_string()))
        );
        assert_eq!(
            classify("@AL", TriggerPolicy::SigilOnly),
            Some(Trigger::Mention("@al".to_string()))
        );
    }

    #[test]
    fn emoji_needs_two_chars_after_colon_and_must_be_open() {
        assert_eq!(classify(":", TriggerPolicy::SigilOnly), None);
        assert_eq!(classify(":s", TriggerPolicy::SigilOnly), None);
        assert_eq!(
            classify(":Sm", TriggerPolicy::SigilOnly),
            Some(Trigger::Emoji(":sm".to_string()))
        );
        assert_eq!(classify(":smile:", TriggerPolicy::SigilOnly), None);
        assert_eq!(classify(":smile:", TriggerPolicy::Permissive), None);
    }

    #[test]
    fn plain_words_only_trigger_under_permissive_policy() {
        assert_eq!(classify("hello", TriggerPolicy::SigilOnly), None);
        assert_eq!(
            classify("Hello", TriggerPolicy::Permissive),
            Some(Trigger::FreeText("hello".to_string()))
        );
        assert_eq!(classify("h", TriggerPolicy::Permissive), None);
        assert_eq!(classify("", TriggerPolicy::Permissive), None);
    }

    #[test]
    fn policy_names_match_the_config_vocabulary() {
        for policy in [TriggerPolicy::SigilOnly, TriggerPolicy::Permissive] {
            assert_eq!(TriggerPolicy::parse(policy.as_str()), Some(policy));
            let json = serde_json::to_string(&policy).expect("serialize");
            assert_eq!(json, format!("\"{}\"", policy.as_str()));
        }
        for alias in ["bogus", "loose", "strict", "sigil", "sigil_only", "free-text"] {
            assert_eq!(TriggerPolicy::parse(alias), None, "{alias}");
        }
    }
}
