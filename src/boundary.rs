//! Native entry point.
//!
//! The native layer only understands `"true"` and `"false"`: anything
//! going wrong inside dispatch, panics included, is logged here and
//! reported as `"false"`.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::error;

use crate::bootstrap::installed;

/// Outcome of one dispatch through the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryResult {
    Ok,
    Failed(String),
}

impl BoundaryResult {
    pub fn as_native(&self) -> &'static str {
        match self {
            Self::Ok => "true",
            Self::Failed(_) => "false",
        }
    }
}

/// Dispatches the event pending in the installed bridge buffer.
///
/// Fails until the bridge is both installed and enabled.
pub fn dispatch_pending() -> BoundaryResult {
    let Some(bridge) = installed() else {
        return BoundaryResult::Failed("the drag and drop bridge is not installed".to_string());
    };
    if !bridge.tracker().is_enabled() {
        return BoundaryResult::Failed("native drag and drop is not enabled".to_string());
    }

    match catch_unwind(AssertUnwindSafe(|| bridge.dispatch().execute())) {
        Ok(Ok(())) => BoundaryResult::Ok,
        Ok(Err(err)) => BoundaryResult::Failed(err.to_string()),
        Err(panic) => BoundaryResult::Failed(format!("panic: {}", panic_message(&*panic))),
    }
}

/// Callback invoked by the native layer once it wrote an event into the
/// interop buffer.
pub fn on_native_drag_and_drop() -> &'static str {
    let result = dispatch_pending();
    if let BoundaryResult::Failed(reason) = &result {
        error!("Failed to dispatch native drag event: {}", reason);
    }
    result.as_native()
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
