use serde::{Deserialize, Serialize};

use crate::model::{ResultEntity, TabDescriptor, TabId, VisibilitySettings};
use crate::shortcut::{FocusTarget, ShortcutOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    Collapsed,
    Loading,
    NoResults,
    Results,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub raw_query: String,
    pub committed_query: String,
    pub active_tab_id: TabId,
    pub is_loading: bool,
    pub display: DisplayState,
    pub settings: VisibilitySettings,
    pub tabs: Vec<TabDescriptor>,
    pub visible_results: Vec<ResultEntity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryInput {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub focus: FocusTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum ViewEvent {
    QueryInput(QueryInput),
    Clear,
    TabSelect(TabRef),
    VisibilityChange(VisibilitySettings),
    ToggleVisibility(TabRef),
    Key(KeyPress),
    Dispose,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum CoreResponse {
    Snapshot(Box<ViewSnapshot>),
    Unchanged,
    Shortcut { outcome: ShortcutOutcome },
    Disposed,
}

impl From<Option<ViewSnapshot>> for CoreResponse {
    fn from(value: Option<ViewSnapshot>) -> Self {
        match value {
            Some(snapshot) => Self::Snapshot(Box::new(snapshot)),
            None => Self::Unchanged,
        }
    }
}
