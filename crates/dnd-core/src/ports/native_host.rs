use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port to the native layer that raises drag events and owns the dragged data.
///
/// 原生拖放层端口：负责产生拖拽事件并持有被拖拽的数据。
///
/// # Behavior / 行为
/// - `enable()` registers the native drag and drop listeners. Until it is
///   called the browser handles drops itself (usually by navigating to the
///   dropped file).
/// - `retrieve_files()` and `retrieve_text()` only work while the session
///   that announced the ids is still known by the native layer.
///
/// - `enable()` 注册原生拖放监听器。
/// - `retrieve_files()` 与 `retrieve_text()` 仅在对应会话仍然有效时可用。
#[async_trait]
pub trait NativeDragHostPort: Send + Sync {
    /// Registers the native drag and drop listeners.
    fn enable(&self) -> Result<(), NativeHostError>;

    /// Unregisters the native drag and drop listeners.
    fn disable(&self);

    /// Fetches the descriptors of several file items in one call.
    ///
    /// Returns the JSON array of [`NativeStorageItemInfo`] produced by the
    /// native layer, in the order of `item_ids`.
    async fn retrieve_files(&self, item_ids: &[u32]) -> Result<String, NativeHostError>;

    /// Fetches the text content of one string item.
    async fn retrieve_text(&self, item_id: u32) -> Result<String, NativeHostError>;
}

/// Storage item descriptor as serialized by the native layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NativeStorageItemInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default = "default_is_file")]
    pub is_file: bool,
}

fn default_is_file() -> bool {
    true
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum NativeHostError {
    #[error("native drag and drop is not available: {0}")]
    Unavailable(String),

    #[error("native drag and drop listeners are already registered")]
    AlreadyEnabled,

    #[error("native item {0} is unknown")]
    UnknownItem(u32),

    #[error("native call failed: {0}")]
    Invocation(String),
}
