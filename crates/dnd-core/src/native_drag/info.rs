use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::data_package::DataPackageView;
use crate::native_drag::DragEventSource;
use crate::operation::DataPackageOperation;

pub type CompletedCallback = Box<dyn FnOnce(DataPackageOperation) + Send>;

#[derive(Default)]
struct Completion {
    result: Option<DataPackageOperation>,
    callbacks: Vec<CompletedCallback>,
}

/// Drag session handed to the drag/drop manager when a drag starts.
///
/// 拖拽开始时交给拖放管理器的会话信息。
///
/// Clones share the same completion state: completing any clone runs the
/// callbacks registered on all of them, once.
#[derive(Clone)]
pub struct CoreDragInfo {
    source: Arc<dyn DragEventSource>,
    data: DataPackageView,
    allowed_operations: DataPackageOperation,
    completion: Arc<Mutex<Completion>>,
}

impl CoreDragInfo {
    pub fn new(
        source: Arc<dyn DragEventSource>,
        data: DataPackageView,
        allowed_operations: DataPackageOperation,
    ) -> Self {
        Self {
            source,
            data,
            allowed_operations,
            completion: Arc::new(Mutex::new(Completion::default())),
        }
    }

    pub fn source(&self) -> &Arc<dyn DragEventSource> {
        &self.source
    }

    pub fn data(&self) -> &DataPackageView {
        &self.data
    }

    pub fn allowed_operations(&self) -> DataPackageOperation {
        self.allowed_operations
    }

    /// Final result, once the manager completed the session.
    pub fn result(&self) -> Option<DataPackageOperation> {
        self.completion
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .result
    }

    /// Registers a callback run when the session completes.
    ///
    /// If the session already completed, the callback runs immediately.
    pub fn register_completed_callback<F>(&self, callback: F)
    where
        F: FnOnce(DataPackageOperation) + Send + 'static,
    {
        let mut completion = self
            .completion
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        match completion.result {
            Some(result) => {
                drop(completion);
                callback(result);
            }
            None => completion.callbacks.push(Box::new(callback)),
        }
    }

    /// Marks the session as completed with `result` and runs the callbacks.
    ///
    /// Only the first call has an effect.
    pub fn complete(&self, result: DataPackageOperation) {
        let callbacks = {
            let mut completion = self
                .completion
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if completion.result.is_some() {
                debug!(
                    "Drag session {} already completed, ignoring {:?}",
                    self.source.id(),
                    result
                );
                return;
            }
            completion.result = Some(result);
            std::mem::take(&mut completion.callbacks)
        };

        // Callbacks run without the lock so they can query this info.
        for callback in callbacks {
            callback(result);
        }
    }
}

impl fmt::Debug for CoreDragInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreDragInfo")
            .field("source", &self.source.id())
            .field("data", &self.data)
            .field("allowed_operations", &self.allowed_operations)
            .finish()
    }
}
