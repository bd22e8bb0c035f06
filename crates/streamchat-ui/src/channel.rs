use std::cell::RefCell;
use std::rc::Rc;

pub const STATE_EMPTY: &str = "empty";
pub const STATE_SEARCH: &str = "search";
pub const STATE_AUTOCOMPLETE: &str = "autocomplete";

type Listener = Box<dyn Fn(&str)>;

/// Named UI ownership shared between the suggestion menu and the picker.
///
/// Lives on the UI thread only; hand it around as [`SharedChannel`].
pub struct StateChannel {
    current: RefCell<String>,
    listeners: RefCell<Vec<Listener>>,
}

pub type SharedChannel = Rc<StateChannel>;

impl Default for StateChannel {
    fn default() -> Self {
        Self {
            current: RefCell::new(STATE_EMPTY.to_string()),
            listeners: RefCell::new(Vec::new()),
        }
    }
}

impl std::fmt::Debug for StateChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateChannel")
            .field("current", &*self.current.borrow())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

impl StateChannel {
    pub fn shared() -> SharedChannel {
        Rc::new(Self::default())
    }

    pub fn current(&self) -> String {
        self.current.borrow().clone()
    }

    pub fn is(&self, name: &str) -> bool {
        *self.current.borrow() == name
    }

    /// Set the state and notify every listener, even if unchanged.
    pub fn set_state(&self, name: &str) {
        {
            let mut current = self.current.borrow_mut();
            current.clear();
            current.push_str(name);
        }
        for listener in self.listeners.borrow().iter() {
            listener(name);
        }
    }

    /// Restore `empty` only if `owner` still holds the state.
    pub fn release(&self, owner: &str) {
        if self.is(owner) {
            self.set_state(STATE_EMPTY);
        }
    }

    /// Listeners must not register further listeners from inside the callback.
    pub fn on_state_change(&self, callback: impl Fn(&str) + 'static) {
        self.listeners.borrow_mut().push(Box::new(callback));
    }
}
