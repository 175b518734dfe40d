//! Native drag session tracker
//!
//! Applies the decisions of [`NativeDragStateMachine`] to the drag/drop
//! manager. The tracker owns the single pending session slot; the state
//! machine itself stays free of side-effects.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, error, info};

use dnd_core::ports::{DragDropManagerPort, NativeDragHostPort, NativeHostError};
use dnd_core::{
    CoreDragInfo, DataPackageOperation, DragEnvelope, DragEventKind, NativeDragAction, NativeDragState,
    NativeDragStateMachine, PayloadError,
};

use super::create_data_package::CreateDataPackage;
use super::native_drop::NativeDrop;

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("native drag and drop is already enabled")]
    AlreadyEnabled,

    #[error("native host error: {0}")]
    Host(#[from] NativeHostError),

    #[error("cannot build the data package of the session: {0}")]
    Payload(#[from] PayloadError),
}

type PendingSlot = Arc<Mutex<Option<Arc<NativeDrop>>>>;

/// Tracks the native drag session and forwards its lifecycle to the manager.
///
/// 跟踪原生拖拽会话，并将其生命周期转发给拖放管理器。
pub struct NativeDragTracker {
    manager: Arc<dyn DragDropManagerPort>,
    host: Arc<dyn NativeDragHostPort>,
    resolver: CreateDataPackage,
    pending: PendingSlot,
    enabled: AtomicBool,
}

impl NativeDragTracker {
    pub fn new(manager: Arc<dyn DragDropManagerPort>, host: Arc<dyn NativeDragHostPort>) -> Self {
        Self {
            manager,
            resolver: CreateDataPackage::new(host.clone()),
            host,
            pending: Arc::new(Mutex::new(None)),
            enabled: AtomicBool::new(false),
        }
    }

    /// Registers the native listeners. Fails if already enabled.
    pub fn enable(&self) -> Result<(), TrackerError> {
        if self
            .enabled
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(TrackerError::AlreadyEnabled);
        }

        if let Err(err) = self.host.enable() {
            self.enabled.store(false, Ordering::SeqCst);
            return Err(err.into());
        }

        info!("Native drag and drop enabled");
        Ok(())
    }

    pub fn disable(&self) {
        if self.enabled.swap(false, Ordering::SeqCst) {
            self.host.disable();
            info!("Native drag and drop disabled");
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> NativeDragState {
        state_of(self.pending_session().as_ref())
    }

    pub fn pending_session(&self) -> Option<Arc<NativeDrop>> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Handles one event of the native layer and builds its response.
    ///
    /// The response echoes the incoming accepted operation unless the
    /// manager took a decision.
    pub fn handle(&self, envelope: DragEnvelope) -> Result<DragEnvelope, TrackerError> {
        debug!("Received native drag event {}", envelope);

        // The slot is only read here; the manager may complete sessions
        // re-entrantly, which locks it again.
        let current = self.pending_session();
        let (_, action) = NativeDragStateMachine::transition(
            state_of(current.as_ref()),
            &envelope.kind,
            envelope.id,
        );

        let accepted = match (action, current) {
            (NativeDragAction::Start, _) => Some(self.start(&envelope, None)?),
            (NativeDragAction::Replace { .. }, Some(stale)) => {
                Some(self.start(&envelope, Some(stale))?)
            }
            (NativeDragAction::IgnoreRedundantBegin, _) => {
                error!(
                    "The native drop operation ({}) has already been started, ignoring the redundant begin",
                    envelope.id
                );
                None
            }
            (NativeDragAction::Move, Some(drop)) => {
                drop.update(envelope.clone());
                Some(self.manager.process_moved(&drop.as_source()))
            }
            (NativeDragAction::Leave, Some(drop)) => {
                drop.update(envelope.clone());
                let result = self.manager.process_aborted(&drop.as_source());
                self.clear(&drop);
                Some(result)
            }
            (NativeDragAction::Drop, Some(drop)) => {
                drop.update(envelope.clone());
                let result = self.manager.process_dropped(&drop.as_source());
                self.clear(&drop);
                Some(result)
            }
            (NativeDragAction::Ignore, _) | (_, None) => {
                match envelope.kind {
                    DragEventKind::Move | DragEventKind::Leave | DragEventKind::End => {
                        error!(
                            "No pending native drop operation for {} {}, ignoring",
                            envelope.kind, envelope.id
                        );
                    }
                    _ => debug!("Ignoring native drag event {}", envelope.kind),
                }
                None
            }
        };

        Ok(envelope.to_result(accepted))
    }

    fn start(
        &self,
        envelope: &DragEnvelope,
        stale: Option<Arc<NativeDrop>>,
    ) -> Result<DataPackageOperation, TrackerError> {
        // Resolve first: a malformed begin must leave the pending session as is.
        let package = self.resolver.execute(envelope.data_items.as_deref())?;

        if let Some(stale) = stale {
            error!(
                "A native drop operation ({}) is already pending, aborting it to start {}",
                stale.session_id(),
                envelope.id
            );
            self.manager.process_aborted(&stale.as_source());
        }

        let allowed =
            DataPackageOperation::from_native(envelope.allowed_operations.as_deref());
        let drop = Arc::new(NativeDrop::new(envelope.clone()));
        let info = CoreDragInfo::new(drop.as_source(), package.get_view(), allowed);

        info!(
            "Starting new native drop operation {} (allowed: {:?}, formats: {:?})",
            drop.session_id(),
            allowed,
            info.data().available_formats()
        );
        *self.pending.lock().unwrap_or_else(PoisonError::into_inner) = Some(drop.clone());

        let slot = self.pending.clone();
        let completed = drop.clone();
        info.register_completed_callback(move |result| {
            info!(
                "Native drop operation {} completed: {:?}",
                completed.session_id(),
                result
            );
            let mut pending = slot.lock().unwrap_or_else(PoisonError::into_inner);
            if pending
                .as_ref()
                .is_some_and(|current| Arc::ptr_eq(current, &completed))
            {
                *pending = None;
            }
        });

        self.manager.drag_started(info);

        Ok(DataPackageOperation::NONE)
    }

    fn clear(&self, drop: &Arc<NativeDrop>) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if pending
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, drop))
        {
            *pending = None;
        }
    }
}

fn state_of(pending: Option<&Arc<NativeDrop>>) -> NativeDragState {
    match pending {
        Some(drop) => NativeDragState::Active {
            session_id: drop.session_id(),
        },
        None => NativeDragState::Idle,
    }
}
