//! Native drag session model.

mod info;
mod source;
mod state_machine;

pub use info::{CompletedCallback, CoreDragInfo};
pub use source::DragEventSource;
pub use state_machine::{NativeDragAction, NativeDragState, NativeDragStateMachine};
