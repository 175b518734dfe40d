use std::sync::Arc;

use dnd_core::ports::{DragEventChannelPort, EventChannelError};

use super::native_drag_tracker::{NativeDragTracker, TrackerError};

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("event channel error: {0}")]
    Channel(#[from] EventChannelError),

    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

/// Dispatch the event pending in the channel to the session tracker.
/// 将通道中待处理的事件分发给会话跟踪器。
///
/// Runs on the caller thread and never awaits: the native layer blocks
/// until the response is written back.
pub struct DispatchNativeDragEvent {
    channel: Arc<dyn DragEventChannelPort>,
    tracker: Arc<NativeDragTracker>,
}

impl DispatchNativeDragEvent {
    pub fn new(channel: Arc<dyn DragEventChannelPort>, tracker: Arc<NativeDragTracker>) -> Self {
        Self { channel, tracker }
    }

    pub fn tracker(&self) -> &Arc<NativeDragTracker> {
        &self.tracker
    }

    pub fn execute(&self) -> Result<(), DispatchError> {
        let envelope = self.channel.take_event()?;
        let response = self.tracker.handle(envelope)?;
        self.channel.post_result(response)?;
        Ok(())
    }
}
