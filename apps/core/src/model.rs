use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Person,
    Folder,
    File,
    Video,
    Image,
}

impl ResultKind {
    pub fn is_file_like(self) -> bool {
        matches!(self, Self::File | Self::Folder | Self::Video | Self::Image)
    }
}

/// A single candidate row in the overlay. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEntity {
    pub id: String,
    pub kind: ResultKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_online: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
}

impl ResultEntity {
    pub fn new(id: &str, kind: ResultKind, title: &str) -> Self {
        Self {
            id: id.to_string(),
            kind,
            title: title.to_string(),
            subtitle: None,
            metadata: None,
            avatar_ref: None,
            is_online: None,
            file_count: None,
            file_size: None,
            link_url: None,
        }
    }

    pub fn with_subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = Some(subtitle.to_string());
        self
    }

    pub fn with_metadata(mut self, metadata: &str) -> Self {
        self.metadata = Some(metadata.to_string());
        self
    }

    pub fn with_avatar(mut self, avatar_ref: &str, is_online: bool) -> Self {
        self.avatar_ref = Some(avatar_ref.to_string());
        self.is_online = Some(is_online);
        self
    }

    pub fn with_file_count(mut self, file_count: u32) -> Self {
        self.file_count = Some(file_count);
        self
    }

    pub fn with_file_size(mut self, file_size: &str) -> Self {
        self.file_size = Some(file_size.to_string());
        self
    }

    pub fn with_link(mut self, link_url: &str) -> Self {
        self.link_url = Some(link_url.to_string());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabId {
    All,
    Files,
    People,
    Chats,
    Lists,
}

impl TabId {
    pub const ORDERED: [TabId; 5] = [
        TabId::All,
        TabId::Files,
        TabId::People,
        TabId::Chats,
        TabId::Lists,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Files => "files",
            Self::People => "people",
            Self::Chats => "chats",
            Self::Lists => "lists",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Files => "Files",
            Self::People => "People",
            Self::Chats => "Chats",
            Self::Lists => "Lists",
        }
    }

    pub fn icon_ref(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Files => Some("📄"),
            Self::People => Some("👤"),
            Self::Chats => Some("💬"),
            Self::Lists => Some("📋"),
        }
    }
}

impl Display for TabId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tab id: {0}")]
pub struct UnknownTabId(pub String);

impl FromStr for TabId {
    type Err = UnknownTabId;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim() {
            "all" => Ok(Self::All),
            "files" => Ok(Self::Files),
            "people" => Ok(Self::People),
            "chats" => Ok(Self::Chats),
            "lists" => Ok(Self::Lists),
            other => Err(UnknownTabId(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilitySettings {
    pub files: bool,
    pub people: bool,
    pub chats: bool,
    pub lists: bool,
}

impl Default for VisibilitySettings {
    fn default() -> Self {
        Self {
            files: true,
            people: true,
            chats: false,
            lists: false,
        }
    }
}

impl VisibilitySettings {
    /// `All` is always enabled.
    pub fn is_enabled(&self, tab: TabId) -> bool {
        match tab {
            TabId::All => true,
            TabId::Files => self.files,
            TabId::People => self.people,
            TabId::Chats => self.chats,
            TabId::Lists => self.lists,
        }
    }

    pub fn toggled(&self, tab: TabId) -> Self {
        let mut next = *self;
        match tab {
            TabId::All => {}
            TabId::Files => next.files = !next.files,
            TabId::People => next.people = !next.people,
            TabId::Chats => next.chats = !next.chats,
            TabId::Lists => next.lists = !next.lists,
        }
        next
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabDescriptor {
    pub id: TabId,
    pub label: String,
    pub matched_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_ref: Option<String>,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSessionState {
    pub raw_query: String,
    pub committed_query: String,
    pub active_tab_id: TabId,
    pub is_loading: bool,
}

pub fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}
