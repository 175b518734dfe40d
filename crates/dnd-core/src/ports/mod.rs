//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and its collaborators. The bridge sits between two of them:
//!
//! - [`NativeDragHostPort`]: the native layer (browser) that raises drag
//!   events and serves the content of the dragged items.
//! - [`DragDropManagerPort`]: the platform-agnostic drag/drop manager that
//!   owns drag semantics (targets, visuals, accepted operations).
//! - [`DragEventChannelPort`]: the shared buffer the native layer writes
//!   each event into before invoking the dispatch callback.
//!
//! All of them are implemented outside of this crate, by the platform layer or by
//! the host UI framework.

pub mod drag_manager;
pub mod event_channel;
pub mod native_host;

#[cfg(any(test, feature = "testing"))]
pub mod tests;

pub use drag_manager::DragDropManagerPort;
pub use event_channel::{DragEventChannelPort, EventChannelError};
pub use native_host::{NativeDragHostPort, NativeHostError, NativeStorageItemInfo};
