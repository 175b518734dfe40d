use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex, OnceLock};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use dnd_app::NativeDragTracker;
use dnd_core::ports::{DragDropManagerPort, NativeDragHostPort, NativeHostError};
use dnd_core::{
    CoreDragInfo, DataItemDescriptor, DataPackageOperation, DragEnvelope, DragEventKind,
    DragEventSource, FormatId, NativeDragId, NativeDragState, Point, PointerButtons,
};

#[derive(Clone)]
struct SharedLogBuffer {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SharedLogBuffer {
    type Writer = SharedLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SharedLogWriter {
            buffer: self.buffer.clone(),
        }
    }
}

struct SharedLogWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for SharedLogWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut guard = self.buffer.lock().unwrap();
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

static LOG_BUFFER: OnceLock<Arc<Mutex<Vec<u8>>>> = OnceLock::new();

fn init_test_tracing() -> Arc<Mutex<Vec<u8>>> {
    LOG_BUFFER
        .get_or_init(|| {
            let buffer = Arc::new(Mutex::new(Vec::new()));
            let writer = SharedLogBuffer {
                buffer: buffer.clone(),
            };
            let subscriber = tracing_subscriber::fmt()
                .with_ansi(false)
                .with_env_filter(EnvFilter::new("warn"))
                .with_writer(writer)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .expect("set global tracing subscriber");
            buffer
        })
        .clone()
}

fn logs(buffer: &Arc<Mutex<Vec<u8>>>) -> String {
    String::from_utf8_lossy(&buffer.lock().unwrap()).into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Started(i64),
    Moved(i64),
    Aborted(i64),
    Dropped(i64),
}

/// Manager recording every call, optionally completing sessions on drop.
#[derive(Default)]
struct RecordingManager {
    calls: Mutex<Vec<Call>>,
    sessions: Mutex<Vec<CoreDragInfo>>,
    complete_on_drop: bool,
}

impl RecordingManager {
    fn completing() -> Self {
        Self {
            complete_on_drop: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn session(&self, index: usize) -> CoreDragInfo {
        self.sessions.lock().unwrap()[index].clone()
    }
}

impl DragDropManagerPort for RecordingManager {
    fn drag_started(&self, info: CoreDragInfo) {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Started(info.source().id()));
        self.sessions.lock().unwrap().push(info);
    }

    fn process_moved(&self, source: &Arc<dyn DragEventSource>) -> DataPackageOperation {
        self.calls.lock().unwrap().push(Call::Moved(source.id()));
        DataPackageOperation::COPY
    }

    fn process_aborted(&self, source: &Arc<dyn DragEventSource>) -> DataPackageOperation {
        self.calls.lock().unwrap().push(Call::Aborted(source.id()));
        DataPackageOperation::NONE
    }

    fn process_dropped(&self, source: &Arc<dyn DragEventSource>) -> DataPackageOperation {
        self.calls.lock().unwrap().push(Call::Dropped(source.id()));
        if self.complete_on_drop {
            let session = self
                .sessions
                .lock()
                .unwrap()
                .iter()
                .find(|info| info.source().id() == source.id())
                .cloned();
            // Completes while the tracker is still dispatching the drop.
            if let Some(session) = session {
                session.complete(DataPackageOperation::COPY);
            }
        }
        DataPackageOperation::COPY
    }
}

#[derive(Default)]
struct TextHost {
    texts: HashMap<u32, String>,
}

#[async_trait]
impl NativeDragHostPort for TextHost {
    fn enable(&self) -> Result<(), NativeHostError> {
        Ok(())
    }

    fn disable(&self) {}

    async fn retrieve_files(&self, item_ids: &[u32]) -> Result<String, NativeHostError> {
        Err(NativeHostError::UnknownItem(item_ids.first().copied().unwrap_or_default()))
    }

    async fn retrieve_text(&self, item_id: u32) -> Result<String, NativeHostError> {
        self.texts
            .get(&item_id)
            .cloned()
            .ok_or(NativeHostError::UnknownItem(item_id))
    }
}

fn event(kind: DragEventKind, id: i32, x: f64) -> DragEnvelope {
    DragEnvelope {
        kind,
        id: NativeDragId(id),
        timestamp: 100.0 + x,
        position: Point::new(x, x),
        buttons: PointerButtons::LEFT,
        shift: false,
        ctrl: false,
        alt: false,
        allowed_operations: Some("all".to_string()),
        accepted_operation: Some("none".to_string()),
        data_items: None,
    }
}

fn begin(id: i32) -> DragEnvelope {
    DragEnvelope {
        data_items: Some(vec![DataItemDescriptor::new(0, "string", "text/plain")]),
        ..event(DragEventKind::Begin, id, 0.0)
    }
}

fn setup(manager: RecordingManager) -> (Arc<RecordingManager>, NativeDragTracker) {
    let manager = Arc::new(manager);
    let host = TextHost {
        texts: HashMap::from([(0, "dragged text".to_string())]),
    };
    let tracker = NativeDragTracker::new(manager.clone(), Arc::new(host));
    (manager, tracker)
}

#[test]
fn redundant_begin_starts_a_single_session() {
    let buffer = init_test_tracing();
    let (manager, tracker) = setup(RecordingManager::default());

    tracker.handle(begin(31)).unwrap();
    let response = tracker.handle(begin(31)).unwrap();

    assert_eq!(manager.calls(), vec![Call::Started(31)]);
    assert_eq!(response.accepted_operation.as_deref(), Some("none"));
    assert!(logs(&buffer).contains("(#31) has already been started"));
}

#[test]
fn overlapping_session_is_aborted_then_replaced() {
    let buffer = init_test_tracing();
    let (manager, tracker) = setup(RecordingManager::default());

    tracker.handle(begin(41)).unwrap();
    tracker.handle(begin(42)).unwrap();

    assert_eq!(
        manager.calls(),
        vec![Call::Started(41), Call::Aborted(41), Call::Started(42)]
    );
    assert_eq!(
        tracker.state(),
        NativeDragState::Active {
            session_id: NativeDragId(42)
        }
    );
    assert!(logs(&buffer).contains("(#41) is already pending, aborting it to start #42"));
}

#[test]
fn stray_events_are_logged_as_errors() {
    let buffer = init_test_tracing();
    let (manager, tracker) = setup(RecordingManager::default());

    let response = tracker.handle(event(DragEventKind::Move, 77, 5.0)).unwrap();
    tracker.handle(event(DragEventKind::Leave, 78, 5.0)).unwrap();
    tracker.handle(event(DragEventKind::End, 79, 5.0)).unwrap();

    assert!(manager.calls().is_empty());
    assert_eq!(response.accepted_operation.as_deref(), Some("none"));

    let logs = logs(&buffer);
    assert!(logs.contains("ERROR"));
    assert!(logs.contains("No pending native drop operation for dragover #77, ignoring"));
    assert!(logs.contains("No pending native drop operation for dragleave #78, ignoring"));
    assert!(logs.contains("No pending native drop operation for drop #79, ignoring"));
}

#[test]
fn full_gesture_reaches_manager_in_order() {
    let (manager, tracker) = setup(RecordingManager::default());

    tracker.handle(begin(5)).unwrap();
    let moved = tracker
        .handle(event(DragEventKind::Move, 5, 20.0))
        .unwrap();
    let dropped = tracker
        .handle(event(DragEventKind::End, 5, 30.0))
        .unwrap();

    assert_eq!(
        manager.calls(),
        vec![Call::Started(5), Call::Moved(5), Call::Dropped(5)]
    );
    assert_eq!(moved.accepted_operation.as_deref(), Some("copy"));
    assert_eq!(dropped.accepted_operation.as_deref(), Some("copy"));
    assert_eq!(tracker.state(), NativeDragState::Idle);

    // The source handed to the manager follows the latest event.
    let (position, _) = manager.session(0).source().state();
    assert_eq!(position, Point::new(30.0, 30.0));
}

#[test]
fn malformed_begin_keeps_pending_session() {
    let (manager, tracker) = setup(RecordingManager::default());
    tracker.handle(begin(7)).unwrap();

    let malformed = event(DragEventKind::Begin, 8, 0.0);
    assert!(tracker.handle(malformed).is_err());

    assert_eq!(manager.calls(), vec![Call::Started(7)]);
    assert_eq!(
        tracker.state(),
        NativeDragState::Active {
            session_id: NativeDragId(7)
        }
    );
}

#[test]
fn completion_clears_only_its_own_session() {
    let (manager, tracker) = setup(RecordingManager::default());

    tracker.handle(begin(1)).unwrap();
    tracker.handle(begin(2)).unwrap();

    manager.session(0).complete(DataPackageOperation::NONE);
    assert_eq!(
        tracker.state(),
        NativeDragState::Active {
            session_id: NativeDragId(2)
        }
    );

    manager.session(1).complete(DataPackageOperation::MOVE);
    assert_eq!(tracker.state(), NativeDragState::Idle);
}

#[test]
fn reentrant_completion_does_not_deadlock() {
    let (manager, tracker) = setup(RecordingManager::completing());

    tracker.handle(begin(9)).unwrap();
    tracker
        .handle(event(DragEventKind::End, 9, 1.0))
        .unwrap();

    assert_eq!(tracker.state(), NativeDragState::Idle);
    assert_eq!(
        manager.session(0).result(),
        Some(DataPackageOperation::COPY)
    );
}

#[tokio::test]
async fn started_session_exposes_lazy_payload() {
    let (manager, tracker) = setup(RecordingManager::default());
    tracker.handle(begin(3)).unwrap();

    let session = manager.session(0);
    assert_eq!(session.allowed_operations(), DataPackageOperation::all());
    let text = session
        .data()
        .get_text(&FormatId::text(), CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(text, "dragged text");
}
