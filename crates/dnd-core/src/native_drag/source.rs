use crate::pointer::{DragDropModifiers, Point, RelativeTo};

/// Pointer source of a drag session, queried by the drag/drop manager.
///
/// 拖拽会话的指针来源，由拖放管理器查询。
pub trait DragEventSource: Send + Sync {
    /// Identifier of the session, unique while it is alive.
    fn id(&self) -> i64;

    /// Coarse ordering key used to correlate events of the same frame.
    fn frame_id(&self) -> u32;

    /// Latest pointer position (root space) and button/key modifiers.
    fn state(&self) -> (Point, DragDropModifiers);

    /// Latest pointer position expressed in the space of `relative_to`,
    /// or in the root space when `None`.
    fn position(&self, relative_to: Option<&dyn RelativeTo>) -> Point;
}
