//! Tracing configuration for the bridge
//!
//! Initializes the global `tracing-subscriber`: an env-filter honouring
//! `RUST_LOG` and a single stdout fmt layer.
//!
//! ## Format / 格式
//!
//! "2025-01-15 10:30:45.123 INFO [file.rs:42] [target] message"

use std::io;

use dnd_core::config::BridgeConfig;
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry, EnvFilter};

/// Build the default filter directives for tracing
///
/// ## Behavior / 行为
/// - Global level from the configuration
/// - The bridge crates follow the configured level as well, so a quieter
///   global level does not hide them once `RUST_LOG` adds other targets
fn build_filter_directives(config: &BridgeConfig) -> Vec<String> {
    let level = if config.log_level.trim().is_empty() {
        "info"
    } else {
        config.log_level.trim()
    };

    let mut directives = vec![level.to_string()];
    directives.extend(
        ["dnd_core", "dnd_app", "dnd_platform", "dropbridge_lib"]
            .iter()
            .map(|target| format!("{target}={level}")),
    );
    directives
}

/// Initialize the tracing subscriber
///
/// ## Behavior / 行为
///
/// - **Environment filter**: `RUST_LOG` wins over the configured level
/// - **Output**: stdout, colored unless `[logging] ansi = false`
///
/// ## Errors / 错误
///
/// Returns `Err` if a subscriber is already registered (call once).
pub fn init_tracing_subscriber(config: &BridgeConfig) -> anyhow::Result<()> {
    let filter_directives = build_filter_directives(config);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives.join(",")));

    let stdout_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(config.log_ansi && cfg!(not(test)))
        .with_writer(BoxMakeWriter::new(io::stdout));

    registry().with(env_filter).with(stdout_layer).try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_directives() {
        let config = BridgeConfig {
            log_level: "debug".to_string(),
            ..BridgeConfig::default()
        };

        let directives = build_filter_directives(&config);
        assert_eq!(directives[0], "debug");
        assert!(directives.contains(&"dnd_app=debug".to_string()));
        assert!(directives.contains(&"dnd_platform=debug".to_string()));
    }

    #[test]
    fn test_blank_level_falls_back_to_info() {
        let config = BridgeConfig {
            log_level: "  ".to_string(),
            ..BridgeConfig::default()
        };

        let directives = build_filter_directives(&config);
        assert_eq!(directives[0], "info");
        assert!(directives.contains(&"dnd_core=info".to_string()));
    }
}
