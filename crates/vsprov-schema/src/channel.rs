//! Channel documents: the stable pointer to the current manifest.

use serde::{Deserialize, Serialize};

use crate::manifest::Payload;

/// A decoded channel document (`{"channelItems": [...]}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    /// Items published on this channel.
    #[serde(default)]
    pub channel_items: Vec<ChannelItem>,
}

impl Channel {
    /// Decode a channel document from raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns the underlying serde error if the bytes are not a valid channel.
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// Find the item with exactly the given `id`.
    pub fn find_item(&self, id: &str) -> Option<&ChannelItem> {
        self.channel_items.iter().find(|item| item.id == id)
    }
}

/// A named, versioned entry on a channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelItem {
    /// Item identifier (e.g. `Microsoft.VisualStudio.Manifests.VisualStudio`).
    pub id: String,
    /// Declared version of the item.
    #[serde(default)]
    pub version: String,
    /// Free-form item type (e.g. `Manifest`, `ChannelProduct`).
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Downloadable files that make up the item.
    #[serde(default)]
    pub payloads: Vec<Payload>,
}
