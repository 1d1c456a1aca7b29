use std::time::Instant;

use crate::config::{validate, Config, ConfigError};
use crate::contract::{DisplayState, ViewSnapshot};
use crate::debounce::SearchDebouncer;
use crate::model::{is_blank, SearchSessionState, TabId, UnknownTabId, VisibilitySettings};
use crate::result_store::ResultStore;
use crate::search::compute_visible;
use crate::shortcut::{
    FocusTarget, KeyEvent, KeyListenerRegistry, ListenerId, ShortcutDispatcher, ShortcutError,
    ShortcutOutcome,
};
use crate::tab_visibility::TabVisibilityCoordinator;

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    UnknownTab(#[from] UnknownTabId),
    #[error("shortcut error: {0}")]
    Shortcut(#[from] ShortcutError),
    #[error("search session has been disposed")]
    Disposed,
}

/// Root of the search overlay. Every mutating entry point returns the new
/// snapshot when observable state changed, `None` when it did not.
pub struct SearchController {
    store: ResultStore,
    debouncer: SearchDebouncer,
    tabs: TabVisibilityCoordinator,
    dispatcher: ShortcutDispatcher,
    registry: Box<dyn KeyListenerRegistry>,
    subscription: Option<ListenerId>,
    disposed: bool,
}

impl SearchController {
    pub fn new(store: ResultStore, registry: Box<dyn KeyListenerRegistry>) -> Self {
        Self {
            store,
            debouncer: SearchDebouncer::default(),
            tabs: TabVisibilityCoordinator::default(),
            dispatcher: ShortcutDispatcher::default(),
            registry,
            subscription: None,
            disposed: false,
        }
    }

    pub fn from_config(
        config: &Config,
        store: ResultStore,
        registry: Box<dyn KeyListenerRegistry>,
    ) -> Result<Self, ControllerError> {
        validate(config)?;
        Ok(Self {
            store,
            debouncer: SearchDebouncer::new(config.debounce()),
            tabs: TabVisibilityCoordinator::new(config.default_visibility),
            dispatcher: ShortcutDispatcher::new(config.shortcut_char()?),
            registry,
            subscription: None,
            disposed: false,
        })
    }

    /// Registers the shortcut listener. Calling it again while mounted is a no-op.
    pub fn mount(&mut self) -> Result<(), ControllerError> {
        self.ensure_live()?;
        if self.subscription.is_some() {
            return Ok(());
        }
        let id = self.registry.subscribe(self.dispatcher.key())?;
        tracing::info!(key = %self.dispatcher.key(), listener = id.0, "shortcut listener registered");
        self.subscription = Some(id);
        Ok(())
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Cancels the pending commit and releases the shortcut listener.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.debouncer.cancel();
        if let Some(id) = self.subscription.take() {
            match self.registry.unsubscribe(id) {
                Ok(()) => tracing::info!(listener = id.0, "shortcut listener released"),
                Err(error) => tracing::warn!(listener = id.0, %error, "failed to release shortcut listener"),
            }
        }
    }

    pub fn on_query_input(
        &mut self,
        text: &str,
        now: Instant,
    ) -> Result<Option<ViewSnapshot>, ControllerError> {
        self.ensure_live()?;
        let before = self.session();
        self.debouncer.submit(text, now);
        Ok(self.snapshot_if_changed(&before))
    }

    pub fn on_clear(&mut self, now: Instant) -> Result<Option<ViewSnapshot>, ControllerError> {
        self.on_query_input("", now)
    }

    pub fn on_tab_select(&mut self, id: &str) -> Result<Option<ViewSnapshot>, ControllerError> {
        self.ensure_live()?;
        let tab: TabId = id.parse()?;
        if tab == self.tabs.active_tab() || !self.tabs.select(tab) {
            return Ok(None);
        }
        Ok(Some(self.snapshot()))
    }

    /// Settings and any forced fallback to `All` land in the same snapshot.
    pub fn on_visibility_change(
        &mut self,
        next: VisibilitySettings,
    ) -> Result<Option<ViewSnapshot>, ControllerError> {
        self.ensure_live()?;
        if next == self.tabs.settings() {
            return Ok(None);
        }
        self.tabs.set_visibility(next);
        Ok(Some(self.snapshot()))
    }

    pub fn on_toggle_visibility(&mut self, id: &str) -> Result<Option<ViewSnapshot>, ControllerError> {
        self.ensure_live()?;
        let tab: TabId = id.parse()?;
        let next = self.tabs.settings().toggled(tab);
        self.on_visibility_change(next)
    }

    pub fn on_key(
        &self,
        event: &KeyEvent,
        focus: FocusTarget,
    ) -> Result<ShortcutOutcome, ControllerError> {
        self.ensure_live()?;
        if self.subscription.is_none() {
            return Ok(ShortcutOutcome::Propagate);
        }
        Ok(self.dispatcher.dispatch(event, focus))
    }

    /// Fires a due commit. Never mutates a disposed session.
    pub fn poll(&mut self, now: Instant) -> Option<ViewSnapshot> {
        if self.disposed {
            return None;
        }
        if self.debouncer.poll(now) {
            Some(self.snapshot())
        } else {
            None
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        if self.disposed {
            return None;
        }
        self.debouncer.next_deadline()
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    pub fn settings(&self) -> VisibilitySettings {
        self.tabs.settings()
    }

    pub fn session(&self) -> SearchSessionState {
        SearchSessionState {
            raw_query: self.debouncer.raw_query().to_string(),
            committed_query: self.debouncer.committed_query().to_string(),
            active_tab_id: self.tabs.active_tab(),
            is_loading: self.debouncer.is_loading(),
        }
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let committed = self.debouncer.committed_query();
        let active_tab = self.tabs.active_tab();
        let visible_results: Vec<_> = compute_visible(self.store.entities(), committed, active_tab)
            .into_iter()
            .cloned()
            .collect();
        let is_loading = self.debouncer.is_loading();

        let display = if is_loading {
            DisplayState::Loading
        } else if is_blank(committed) {
            DisplayState::Collapsed
        } else if visible_results.is_empty() {
            DisplayState::NoResults
        } else {
            DisplayState::Results
        };

        ViewSnapshot {
            raw_query: self.debouncer.raw_query().to_string(),
            committed_query: committed.to_string(),
            active_tab_id: active_tab,
            is_loading,
            display,
            settings: self.tabs.settings(),
            tabs: self.tabs.descriptors(self.store.entities(), committed),
            visible_results,
        }
    }

    fn snapshot_if_changed(&self, before: &SearchSessionState) -> Option<ViewSnapshot> {
        if self.session() == *before {
            None
        } else {
            Some(self.snapshot())
        }
    }

    fn ensure_live(&self) -> Result<(), ControllerError> {
        if self.disposed {
            tracing::debug!("rejecting call on disposed search session");
            Err(ControllerError::Disposed)
        } else {
            Ok(())
        }
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.dispose();
    }
}
