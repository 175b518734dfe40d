//! Native drag session state machine.
//!
//! Defines a pure state transition function for the native session
//! tracker. The native layer supports a single drag gesture per view, so
//! at most one session is active at a time.

use crate::envelope::{DragEventKind, NativeDragId};

/// Tracker state.
///
/// 跟踪器状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeDragState {
    /// No pending session.
    ///
    /// 没有进行中的会话。
    Idle,
    /// One native session is being tracked.
    ///
    /// 正在跟踪一个原生会话。
    Active { session_id: NativeDragId },
}

/// Side-effects produced by a transition.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeDragAction {
    /// Build the session and notify the manager that a drag started.
    Start,
    /// The native layer announced an already tracked session again.
    IgnoreRedundantBegin,
    /// Another session begins while `stale` is pending: abort `stale`,
    /// then start the new one.
    Replace { stale: NativeDragId },
    /// Forward a pointer move to the manager.
    Move,
    /// Forward the session leaving the view to the manager.
    Leave,
    /// Forward the drop to the manager.
    Drop,
    /// Nothing to do: no pending session, or an event kind the tracker
    /// does not handle.
    Ignore,
}

/// Pure native drag state machine.
///
/// 纯状态机：不包含副作用。
pub struct NativeDragStateMachine;

impl NativeDragStateMachine {
    pub fn transition(
        state: NativeDragState,
        kind: &DragEventKind,
        id: NativeDragId,
    ) -> (NativeDragState, NativeDragAction) {
        use NativeDragAction as A;
        use NativeDragState as S;

        match (state, kind) {
            // ===== Begin =====
            (S::Idle, DragEventKind::Begin) => (S::Active { session_id: id }, A::Start),
            (S::Active { session_id }, DragEventKind::Begin) if session_id == id => {
                (state, A::IgnoreRedundantBegin)
            }
            (S::Active { session_id }, DragEventKind::Begin) => (
                S::Active { session_id: id },
                A::Replace { stale: session_id },
            ),

            // ===== Pending session =====
            // The native layer serializes sessions, so move/leave/drop are
            // applied to the pending session whatever id they carry.
            (S::Active { .. }, DragEventKind::Move) => (state, A::Move),
            (S::Active { .. }, DragEventKind::Leave) => (S::Idle, A::Leave),
            (S::Active { .. }, DragEventKind::End) => (S::Idle, A::Drop),

            // ===== No match =====
            (S::Idle, DragEventKind::Move | DragEventKind::Leave | DragEventKind::End)
            | (_, DragEventKind::Result | DragEventKind::Unknown(_)) => (state, A::Ignore),
        }
    }
}
