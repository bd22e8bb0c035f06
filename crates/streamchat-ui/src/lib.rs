pub mod channel;
pub mod engine;
pub mod input;
pub mod keys;
pub mod layout;
pub mod menu;
pub mod picker;
pub mod render;
pub mod session;
pub mod shell;

pub use channel::{STATE_AUTOCOMPLETE, STATE_EMPTY, STATE_SEARCH, SharedChannel, StateChannel};
pub use engine::{KeyDisposition, TriggerEngine};
pub use input::{InputBuffer, TextHost};
pub use keys::{ComposerAction, Key, KeyBindings, load_keybindings};
pub use layout::{MenuGeometry, PickerHit, anchor_above};
pub use menu::{MenuState, SuggestionMenu};
pub use picker::{PickerCategory, PickerPanel, build_categories};
pub use render::{PickerWidget, SuggestionMenuWidget, TuiTheme};
pub use session::{ChatSession, Focus, InputEvent, Overlay, SessionOutcome};
pub use shell::run_composer;
