//! # dnd-platform
//!
//! Native layer adapters for the drag and drop bridge.
//!
//! This crate contains the implementations of the `dnd-core` ports that
//! face the native layer: the interop buffer events are marshalled
//! through, an in-memory native host and a drag/drop manager replaying
//! scripted gestures.

pub mod adapters;
pub mod interop;
pub mod replay;

pub use interop::{InteropBuffer, InteropError, NativeDragEventArgs};
