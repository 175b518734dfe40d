use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::debug;

use dnd_core::ports::{NativeDragHostPort, NativeHostError, NativeStorageItemInfo};

/// In-memory native host.
///
/// 内存版的原生拖放宿主实现。
///
/// Serves the content of a drag from maps keyed by data item id, the same
/// ids the native layer announces in `dataItems`.
#[derive(Debug, Default)]
pub struct InMemoryNativeHost {
    files: HashMap<u32, NativeStorageItemInfo>,
    texts: HashMap<u32, String>,
    enabled: AtomicBool,
}

impl InMemoryNativeHost {
    pub fn new(
        files: HashMap<u32, NativeStorageItemInfo>,
        texts: HashMap<u32, String>,
    ) -> Self {
        Self {
            files,
            texts,
            enabled: AtomicBool::new(false),
        }
    }

    pub fn with_text(mut self, id: u32, text: impl Into<String>) -> Self {
        self.texts.insert(id, text.into());
        self
    }

    pub fn with_file(mut self, id: u32, info: NativeStorageItemInfo) -> Self {
        self.files.insert(id, info);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NativeDragHostPort for InMemoryNativeHost {
    fn enable(&self) -> Result<(), NativeHostError> {
        self.enabled
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| ())
            .map_err(|_| NativeHostError::AlreadyEnabled)
    }

    fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }

    async fn retrieve_files(&self, item_ids: &[u32]) -> Result<String, NativeHostError> {
        debug!("Retrieving files {:?}", item_ids);
        let infos = item_ids
            .iter()
            .map(|id| self.files.get(id).ok_or(NativeHostError::UnknownItem(*id)))
            .collect::<Result<Vec<_>, _>>()?;

        serde_json::to_string(&infos).map_err(|e| NativeHostError::Invocation(e.to_string()))
    }

    async fn retrieve_text(&self, item_id: u32) -> Result<String, NativeHostError> {
        debug!("Retrieving text {}", item_id);
        self.texts
            .get(&item_id)
            .cloned()
            .ok_or(NativeHostError::UnknownItem(item_id))
    }
}
