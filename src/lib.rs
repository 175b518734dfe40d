//! # dropbridge
//!
//! Bridges browser-native drag and drop events to a platform-agnostic
//! drag/drop session manager.
//!
//! The native layer writes each event into the [`InteropBuffer`] of the
//! installed bridge and calls [`on_native_drag_and_drop`], then reads the
//! response back from the same buffer.

pub mod bootstrap;
pub mod boundary;

pub use bootstrap::{install, installed, BootstrapError, Bridge};
pub use boundary::{dispatch_pending, on_native_drag_and_drop, BoundaryResult};
pub use dnd_platform::InteropBuffer;
