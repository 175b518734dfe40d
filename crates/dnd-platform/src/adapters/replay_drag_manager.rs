use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

use dnd_core::ports::DragDropManagerPort;
use dnd_core::{CoreDragInfo, DataPackageOperation, DragEventSource};

/// Manager call, as recorded by [`ReplayDragManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerCall {
    Started(i64),
    Moved(i64),
    Aborted(i64),
    Dropped(i64),
}

#[derive(Default)]
struct Sessions {
    current: Option<CoreDragInfo>,
    last: Option<CoreDragInfo>,
    calls: Vec<ManagerCall>,
}

/// Drag/drop manager used to replay recorded gestures.
///
/// 用于回放拖拽手势的拖放管理器。
///
/// Accepts whatever the session allows, completes the session on drop
/// with that result and on leave with no operation.
#[derive(Default)]
pub struct ReplayDragManager {
    sessions: Mutex<Sessions>,
}

impl ReplayDragManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last session handed to [`DragDropManagerPort::drag_started`].
    pub fn last_session(&self) -> Option<CoreDragInfo> {
        self.lock().last.clone()
    }

    pub fn calls(&self) -> Vec<ManagerCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Sessions> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn session_of(&self, source: &Arc<dyn DragEventSource>) -> Option<CoreDragInfo> {
        self.lock()
            .current
            .as_ref()
            .filter(|info| info.source().id() == source.id())
            .cloned()
    }

    /// Completes and forgets the session of `source`.
    fn finish(&self, source: &Arc<dyn DragEventSource>, result: DataPackageOperation) {
        let session = {
            let mut sessions = self.lock();
            match &sessions.current {
                Some(info) if info.source().id() == source.id() => sessions.current.take(),
                _ => None,
            }
        };

        // Completion callbacks run without our lock held.
        if let Some(info) = session {
            info.complete(result);
        }
    }
}

impl DragDropManagerPort for ReplayDragManager {
    fn drag_started(&self, info: CoreDragInfo) {
        info!(
            "Replay session {} started with {:?}",
            info.source().id(),
            info.data().available_formats()
        );
        let mut sessions = self.lock();
        sessions.calls.push(ManagerCall::Started(info.source().id()));
        sessions.current = Some(info.clone());
        sessions.last = Some(info);
    }

    fn process_moved(&self, source: &Arc<dyn DragEventSource>) -> DataPackageOperation {
        self.lock().calls.push(ManagerCall::Moved(source.id()));
        self.session_of(source)
            .map(|info| info.allowed_operations())
            .unwrap_or(DataPackageOperation::NONE)
    }

    fn process_aborted(&self, source: &Arc<dyn DragEventSource>) -> DataPackageOperation {
        self.lock().calls.push(ManagerCall::Aborted(source.id()));
        self.finish(source, DataPackageOperation::NONE);
        DataPackageOperation::NONE
    }

    fn process_dropped(&self, source: &Arc<dyn DragEventSource>) -> DataPackageOperation {
        self.lock().calls.push(ManagerCall::Dropped(source.id()));
        let accepted = self
            .session_of(source)
            .map(|info| info.allowed_operations())
            .unwrap_or(DataPackageOperation::NONE);
        self.finish(source, accepted);
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnd_core::pointer::{DragDropModifiers, Point, RelativeTo};
    use dnd_core::DataPackage;

    struct Source(i64);

    impl DragEventSource for Source {
        fn id(&self) -> i64 {
            self.0
        }
        fn frame_id(&self) -> u32 {
            0
        }
        fn state(&self) -> (Point, DragDropModifiers) {
            (Point::default(), DragDropModifiers::NONE)
        }
        fn position(&self, _relative_to: Option<&dyn RelativeTo>) -> Point {
            Point::default()
        }
    }

    fn start(manager: &ReplayDragManager, id: i64) -> (Arc<dyn DragEventSource>, CoreDragInfo) {
        let source: Arc<dyn DragEventSource> = Arc::new(Source(id));
        let info = CoreDragInfo::new(
            source.clone(),
            DataPackage::new().get_view(),
            DataPackageOperation::COPY | DataPackageOperation::LINK,
        );
        manager.drag_started(info.clone());
        (source, info)
    }

    #[test]
    fn drop_accepts_allowed_operations() {
        let manager = ReplayDragManager::new();
        let (source, info) = start(&manager, 1);

        let moved = manager.process_moved(&source);
        let dropped = manager.process_dropped(&source);

        assert_eq!(moved, DataPackageOperation::COPY | DataPackageOperation::LINK);
        assert_eq!(dropped, moved);
        assert_eq!(info.result(), Some(dropped));
        assert_eq!(
            manager.calls(),
            vec![
                ManagerCall::Started(1),
                ManagerCall::Moved(1),
                ManagerCall::Dropped(1)
            ]
        );
    }

    #[test]
    fn abort_completes_with_none() {
        let manager = ReplayDragManager::new();
        let (source, info) = start(&manager, 2);

        assert_eq!(manager.process_aborted(&source), DataPackageOperation::NONE);
        assert_eq!(info.result(), Some(DataPackageOperation::NONE));
        assert!(manager.last_session().is_some());

        // The session is forgotten once completed.
        assert_eq!(manager.process_moved(&source), DataPackageOperation::NONE);
    }
}
