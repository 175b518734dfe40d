//! Bridge bootstrap: configuration, tracing and process-wide installation.

pub mod config;
pub mod install;
pub mod tracing;

pub use config::load_config;
pub use install::{install, installed, BootstrapError, Bridge};
pub use self::tracing::init_tracing_subscriber;
