use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use dnd_core::pointer::{self, DragDropModifiers, Point, RelativeTo};
use dnd_core::{DragEnvelope, DragEventSource, NativeDragId};

/// A drag session raised by the native layer.
///
/// 原生层发起的拖拽会话。
///
/// The session keeps the latest envelope it received; positions, buttons
/// and modifiers reported to the manager always come from that envelope.
#[derive(Debug)]
pub struct NativeDrop {
    id: NativeDragId,
    envelope: RwLock<DragEnvelope>,
}

impl NativeDrop {
    pub fn new(envelope: DragEnvelope) -> Self {
        Self {
            id: envelope.id,
            envelope: RwLock::new(envelope),
        }
    }

    pub fn session_id(&self) -> NativeDragId {
        self.id
    }

    /// Snapshot of the last envelope received for this session.
    pub fn envelope(&self) -> DragEnvelope {
        self.envelope
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the current envelope with a newer one.
    pub fn update(&self, envelope: DragEnvelope) {
        debug!(
            "Updating native drop operation {} ({})",
            self.id, envelope.kind
        );
        *self
            .envelope
            .write()
            .unwrap_or_else(PoisonError::into_inner) = envelope;
    }

    pub fn as_source(self: &Arc<Self>) -> Arc<dyn DragEventSource> {
        self.clone()
    }
}

impl DragEventSource for NativeDrop {
    fn id(&self) -> i64 {
        i64::from(self.id.value())
    }

    fn frame_id(&self) -> u32 {
        let envelope = self.envelope.read().unwrap_or_else(PoisonError::into_inner);
        pointer::frame_id(envelope.timestamp)
    }

    fn state(&self) -> (Point, DragDropModifiers) {
        let envelope = self.envelope.read().unwrap_or_else(PoisonError::into_inner);
        (
            envelope.position,
            DragDropModifiers::from_pointer(
                envelope.buttons,
                envelope.shift,
                envelope.ctrl,
                envelope.alt,
            ),
        )
    }

    fn position(&self, relative_to: Option<&dyn RelativeTo>) -> Point {
        let envelope = self.envelope.read().unwrap_or_else(PoisonError::into_inner);
        pointer::relative_position(envelope.position, relative_to)
    }
}
