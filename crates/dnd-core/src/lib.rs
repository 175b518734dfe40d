//! # dnd-core
//!
//! Core domain models and ports for the native drag and drop bridge.
//!
//! This crate contains pure logic without any infrastructure dependencies:
//! the event envelope received from the native layer, the data item
//! descriptors, operation negotiation, the pointer snapshot, the lazily
//! resolved data package and the pure session state machine.

// Public module exports
pub mod config;
pub mod data_item;
pub mod data_package;
pub mod envelope;
pub mod native_drag;
pub mod operation;
pub mod pointer;
pub mod ports;

// Re-export commonly used types at the crate root
pub use config::BridgeConfig;
pub use data_item::{DataItemDescriptor, DataItemKind};
pub use data_package::{
    DataContent, DataPackage, DataPackageView, FormatId, PayloadError, StorageItem,
    StorageItemKind, StreamReference,
};
pub use envelope::{DragEnvelope, DragEventKind, NativeDragId};
pub use native_drag::{
    CoreDragInfo, DragEventSource, NativeDragAction, NativeDragState, NativeDragStateMachine,
};
pub use operation::DataPackageOperation;
pub use pointer::{DragDropModifiers, ElementOffset, Point, PointerButtons, RelativeTo};
