//! Recorded drag gestures.
//!
//! A replay script holds the content of the dragged items and the
//! sequence of native events, as the native layer would marshal them:
//!
//! ```json
//! {
//!   "texts": { "1": "https://example.com" },
//!   "files": { "0": { "id": "f0", "name": "cat.png", "contentType": "image/png" } },
//!   "events": [ { "eventName": "dragenter", "id": 1, "dataItems": "[...]" } ]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use dnd_core::ports::NativeStorageItemInfo;

use crate::adapters::InMemoryNativeHost;
use crate::interop::NativeDragEventArgs;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub texts: HashMap<u32, String>,
    #[serde(default)]
    pub files: HashMap<u32, NativeStorageItemInfo>,
    pub events: Vec<NativeDragEventArgs>,
}

impl ReplayScript {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse replay script")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read replay script: {}", path.display()))?;
        Self::from_json(&content)
    }

    /// Native host serving the scripted content.
    pub fn host(&self) -> InMemoryNativeHost {
        InMemoryNativeHost::new(self.files.clone(), self.texts.clone())
    }
}
