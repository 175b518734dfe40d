//! Native drag and drop bridge use cases
//!
//! This crate drives the drag/drop manager from native drag events: it
//! tracks the single native session, resolves its payload lazily and
//! dispatches each event received through the interop channel.

pub mod usecases;

pub use usecases::{
    CreateDataPackage, DispatchError, DispatchNativeDragEvent, NativeDragTracker, NativeDrop,
    TrackerError, TEXT_FETCH_TIMEOUT,
};
