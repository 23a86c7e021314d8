// ── Side panel item types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Identity of a built-in side panel entry.
///
/// The set is closed: every item the registry holds is one of these kinds,
/// and a kind appears at most once across the visible and hidden sequences.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BuiltInItemType {
    Talk,
    Wallet,
    Bookmarks,
    ReadingList,
    History,
    Playlist,
    /// The assistant chat entry.
    ChatUi,
}

impl BuiltInItemType {
    /// Title shown in the panel when the user hasn't renamed the entry.
    pub fn default_title(self) -> &'static str {
        match self {
            Self::Talk => "Talk",
            Self::Wallet => "Wallet",
            Self::Bookmarks => "Bookmarks",
            Self::ReadingList => "Reading List",
            Self::History => "History",
            Self::Playlist => "Playlist",
            Self::ChatUi => "Assistant",
        }
    }
}

/// A single entry in the side panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarItem {
    pub built_in_item_type: BuiltInItemType,
    pub title: String,
}

impl SidebarItem {
    pub fn built_in(kind: BuiltInItemType) -> Self {
        Self {
            built_in_item_type: kind,
            title: kind.default_title().to_owned(),
        }
    }

    pub fn is(&self, kind: BuiltInItemType) -> bool {
        self.built_in_item_type == kind
    }
}

/// Every built-in item, in canonical panel order.
pub fn default_items() -> Vec<SidebarItem> {
    BuiltInItemType::iter().map(SidebarItem::built_in).collect()
}
