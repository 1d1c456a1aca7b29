use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SHORTCUT_KEY: char = 's';

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShortcutError {
    #[error("a listener for '{0}' is already registered")]
    AlreadyRegistered(char),
    #[error("unknown listener: {0:?}")]
    UnknownListener(ListenerId),
}

/// Where keyboard focus sits when a key event arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusTarget {
    #[default]
    Document,
    SearchField,
    TextInput,
    TextArea,
}

impl FocusTarget {
    pub fn accepts_text(self) -> bool {
        matches!(self, Self::SearchField | Self::TextInput | Self::TextArea)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub alt: bool,
}

impl KeyEvent {
    pub fn plain(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ctrl: false,
            meta: false,
            alt: false,
        }
    }

    pub fn has_modifier(&self) -> bool {
        self.ctrl || self.meta || self.alt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortcutOutcome {
    Propagate,
    /// Suppress the default action and move focus to the search field.
    FocusSearch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutDispatcher {
    key: char,
}

impl Default for ShortcutDispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SHORTCUT_KEY)
    }
}

impl ShortcutDispatcher {
    pub fn new(key: char) -> Self {
        Self { key }
    }

    pub fn key(&self) -> char {
        self.key
    }

    pub fn dispatch(&self, event: &KeyEvent, focus: FocusTarget) -> ShortcutOutcome {
        if event.has_modifier() || focus.accepts_text() {
            return ShortcutOutcome::Propagate;
        }

        let mut chars = event.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c == self.key => ShortcutOutcome::FocusSearch,
            _ => ShortcutOutcome::Propagate,
        }
    }
}

pub trait KeyListenerRegistry {
    fn subscribe(&mut self, key: char) -> Result<ListenerId, ShortcutError>;
    fn unsubscribe(&mut self, id: ListenerId) -> Result<(), ShortcutError>;
    fn active_listeners(&self) -> usize;
}

/// In-process listener table. One listener per key.
#[derive(Debug, Default)]
pub struct LocalKeyListenerTable {
    next_id: u64,
    listeners: BTreeMap<ListenerId, char>,
}

impl LocalKeyListenerTable {
    pub fn is_listening(&self, key: char) -> bool {
        self.listeners.values().any(|&registered| registered == key)
    }
}

impl KeyListenerRegistry for LocalKeyListenerTable {
    fn subscribe(&mut self, key: char) -> Result<ListenerId, ShortcutError> {
        if self.is_listening(key) {
            return Err(ShortcutError::AlreadyRegistered(key));
        }
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.insert(id, key);
        Ok(id)
    }

    fn unsubscribe(&mut self, id: ListenerId) -> Result<(), ShortcutError> {
        self.listeners
            .remove(&id)
            .map(|_| ())
            .ok_or(ShortcutError::UnknownListener(id))
    }

    fn active_listeners(&self) -> usize {
        self.listeners.len()
    }
}

#[derive(Debug, Default)]
struct MockLedger {
    table: LocalKeyListenerTable,
    subscribe_calls: usize,
    unsubscribe_calls: usize,
}

/// Registry whose ledger stays observable after it is moved into a controller.
#[derive(Debug, Clone, Default)]
pub struct MockKeyListenerRegistry {
    ledger: Rc<RefCell<MockLedger>>,
}

impl MockKeyListenerRegistry {
    pub fn subscribe_calls(&self) -> usize {
        self.ledger.borrow().subscribe_calls
    }

    pub fn unsubscribe_calls(&self) -> usize {
        self.ledger.borrow().unsubscribe_calls
    }

    pub fn is_listening(&self, key: char) -> bool {
        self.ledger.borrow().table.is_listening(key)
    }
}

impl KeyListenerRegistry for MockKeyListenerRegistry {
    fn subscribe(&mut self, key: char) -> Result<ListenerId, ShortcutError> {
        let mut ledger = self.ledger.borrow_mut();
        ledger.subscribe_calls += 1;
        ledger.table.subscribe(key)
    }

    fn unsubscribe(&mut self, id: ListenerId) -> Result<(), ShortcutError> {
        let mut ledger = self.ledger.borrow_mut();
        ledger.unsubscribe_calls += 1;
        ledger.table.unsubscribe(id)
    }

    fn active_listeners(&self) -> usize {
        self.ledger.borrow().table.active_listeners()
    }
}
