use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why the suggestion menu closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    Escape,
    Blur,
    NoMatch,
    Commit,
    PickerOpened,
}

/// Something worth writing to the session log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComposerEvent {
    IndexUpdated {
        generation: u64,
        candidates: usize,
    },
    MenuOpened {
        query: String,
        shown: usize,
        more_available: bool,
    },
    MenuClosed {
        reason: CloseReason,
    },
    Committed {
        text: String,
        caret: usize,
    },
    PickerOpened,
    PickerClosed,
    PickerChose {
        text: String,
    },
    MessageSubmitted {
        chars: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub seq_no: u64,
    pub at: DateTime<Utc>,
    pub event: ComposerEvent,
}

impl EventEnvelope {
    pub fn new(seq_no: u64, event: ComposerEvent) -> Self {
        Self {
            seq_no,
            at: Utc::now(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let envelope = EventEnvelope::new(
            3,
            ComposerEvent::MenuClosed {
                reason: CloseReason::NoMatch,
            },
        );
        let json = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(json["seq_no"], 3);
        assert_eq!(json["event"]["type"], "menu_closed");
        assert_eq!(json["event"]["reason"], "no_match");
    }
}
