pub mod create_data_package;
pub mod dispatch_native_drag_event;
pub mod native_drag_tracker;
pub mod native_drop;

pub use create_data_package::{CreateDataPackage, TEXT_FETCH_TIMEOUT};
pub use dispatch_native_drag_event::{DispatchError, DispatchNativeDragEvent};
pub use native_drag_tracker::{NativeDragTracker, TrackerError};
pub use native_drop::NativeDrop;
