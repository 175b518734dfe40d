//! Process-wide bridge installation.
//!
//! The native layer calls back into a single parameterless entry point, so
//! the bridge it dispatches to lives in a process-wide slot.

use std::sync::{Arc, OnceLock};

use tracing::info;

use dnd_app::{DispatchNativeDragEvent, NativeDragTracker, TrackerError};
use dnd_core::config::BridgeConfig;
use dnd_core::ports::{DragDropManagerPort, NativeDragHostPort};
use dnd_platform::InteropBuffer;

static BRIDGE: OnceLock<Bridge> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("the drag and drop bridge is already installed")]
    AlreadyInstalled,

    #[error("failed to enable native drag and drop: {0}")]
    Enable(#[from] TrackerError),
}

/// Wired bridge: the interop buffer shared with the native layer and the
/// dispatcher reading from it.
pub struct Bridge {
    buffer: Arc<InteropBuffer>,
    dispatch: DispatchNativeDragEvent,
}

impl Bridge {
    pub fn new(manager: Arc<dyn DragDropManagerPort>, host: Arc<dyn NativeDragHostPort>) -> Self {
        let buffer = Arc::new(InteropBuffer::new());
        let tracker = Arc::new(NativeDragTracker::new(manager, host));
        let dispatch = DispatchNativeDragEvent::new(buffer.clone(), tracker);
        Self { buffer, dispatch }
    }

    pub fn buffer(&self) -> &Arc<InteropBuffer> {
        &self.buffer
    }

    pub fn tracker(&self) -> &Arc<NativeDragTracker> {
        self.dispatch.tracker()
    }

    pub fn dispatch(&self) -> &DispatchNativeDragEvent {
        &self.dispatch
    }
}

/// Installs the process-wide bridge.
///
/// 安装进程级的拖放桥接。
///
/// # Errors / 错误
///
/// - [`BootstrapError::AlreadyInstalled`] on any call after the first
///   successful one.
/// - [`BootstrapError::Enable`] when `[native] enable_on_install` is set
///   and the native host refuses to register its listeners.
pub fn install(
    config: &BridgeConfig,
    manager: Arc<dyn DragDropManagerPort>,
    host: Arc<dyn NativeDragHostPort>,
) -> Result<&'static Bridge, BootstrapError> {
    if BRIDGE.get().is_some() {
        return Err(BootstrapError::AlreadyInstalled);
    }

    let bridge = Bridge::new(manager, host);
    if config.enable_on_install {
        bridge.tracker().enable()?;
    }

    let tracker = bridge.tracker().clone();
    if BRIDGE.set(bridge).is_err() {
        // Lost an install race: release the listeners we just registered.
        tracker.disable();
        return Err(BootstrapError::AlreadyInstalled);
    }

    info!(
        "Native drag and drop bridge installed (enabled: {})",
        tracker.is_enabled()
    );
    installed().ok_or(BootstrapError::AlreadyInstalled)
}

/// The installed bridge, if any.
pub fn installed() -> Option<&'static Bridge> {
    BRIDGE.get()
}
