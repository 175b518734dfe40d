use std::sync::Arc;

use crate::native_drag::{CoreDragInfo, DragEventSource};
use crate::operation::DataPackageOperation;

/// Port to the platform-agnostic drag/drop manager.
///
/// 跨平台拖放管理器端口。
///
/// The manager owns the drag semantics: it hit-tests targets, raises the
/// drag events on them and decides which operation is accepted. The bridge
/// only feeds it the native session lifecycle.
///
/// # Behavior / 行为
/// - Calls are synchronous and made on the thread that dispatched the
///   native event. Implementations must not block.
/// - The manager signals the end of a session through
///   [`CoreDragInfo::complete`]. It may do so from inside
///   `process_dropped` / `process_aborted`.
///
/// - 调用是同步的，实现不得阻塞。
/// - 管理器通过 [`CoreDragInfo::complete`] 通知会话结束。
pub trait DragDropManagerPort: Send + Sync {
    /// A new drag session entered the view.
    fn drag_started(&self, info: CoreDragInfo);

    /// The pointer moved; returns the operation accepted by the current target.
    fn process_moved(&self, source: &Arc<dyn DragEventSource>) -> DataPackageOperation;

    /// The session left the view or was replaced; returns the final operation.
    fn process_aborted(&self, source: &Arc<dyn DragEventSource>) -> DataPackageOperation;

    /// The user dropped; returns the operation performed by the target.
    fn process_dropped(&self, source: &Arc<dyn DragEventSource>) -> DataPackageOperation;
}
