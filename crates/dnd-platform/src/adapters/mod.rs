pub mod in_memory_native_host;
pub mod replay_drag_manager;

pub use in_memory_native_host::InMemoryNativeHost;
pub use replay_drag_manager::{ManagerCall, ReplayDragManager};
