use crate::model::{ResultEntity, TabDescriptor, TabId, VisibilitySettings};
use crate::search::count_for;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityUpdate {
    pub settings: VisibilitySettings,
    pub active_tab: TabId,
    pub active_tab_reset: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabVisibilityCoordinator {
    settings: VisibilitySettings,
    active_tab: TabId,
}

impl Default for TabVisibilityCoordinator {
    fn default() -> Self {
        Self::new(VisibilitySettings::default())
    }
}

impl TabVisibilityCoordinator {
    pub fn new(settings: VisibilitySettings) -> Self {
        Self {
            settings,
            active_tab: TabId::All,
        }
    }

    pub fn settings(&self) -> VisibilitySettings {
        self.settings
    }

    pub fn active_tab(&self) -> TabId {
        self.active_tab
    }

    pub fn is_enabled(&self, tab: TabId) -> bool {
        self.settings.is_enabled(tab)
    }

    /// Replaces the settings wholesale. Falls back to `All` only when the
    /// active tab itself ends up disabled.
    pub fn set_visibility(&mut self, next: VisibilitySettings) -> VisibilityUpdate {
        self.settings = next;

        let active_tab_reset = !next.is_enabled(self.active_tab);
        if active_tab_reset {
            tracing::info!(
                previous = %self.active_tab,
                "active tab disabled; falling back to all"
            );
            self.active_tab = TabId::All;
        }

        VisibilityUpdate {
            settings: self.settings,
            active_tab: self.active_tab,
            active_tab_reset,
        }
    }

    /// Returns false (and leaves the active tab alone) for disabled tabs.
    pub fn select(&mut self, tab: TabId) -> bool {
        if !self.settings.is_enabled(tab) {
            tracing::debug!(tab = %tab, "ignoring selection of disabled tab");
            return false;
        }
        self.active_tab = tab;
        true
    }

    pub fn descriptors(&self, results: &[ResultEntity], committed_query: &str) -> Vec<TabDescriptor> {
        TabId::ORDERED
            .iter()
            .map(|&tab| TabDescriptor {
                id: tab,
                label: tab.label().to_string(),
                matched_count: count_for(results, committed_query, tab),
                icon_ref: tab.icon_ref().map(str::to_string),
                enabled: self.settings.is_enabled(tab),
            })
            .collect()
    }
}
