//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Read the TOML configuration file / 读取 TOML 配置文件
//! - ✅ Map it into the BridgeConfig DTO / 映射为 BridgeConfig DTO
//! - ✅ Report I/O and parsing errors with context / 报告带上下文的 I/O 和解析错误
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**

use std::path::Path;

use anyhow::Context;
use dnd_core::config::BridgeConfig;

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
/// 无法读取文件或内容不是有效 TOML 时返回错误。
pub fn load_config(config_path: &Path) -> anyhow::Result<BridgeConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    BridgeConfig::from_toml(&toml_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_load_config_reads_valid_toml() {
        let temp_file = write_config(
            r#"
            [logging]
            level = "trace"
            ansi = false

            [native]
            enable_on_install = false
        "#,
        );

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.log_level, "trace");
        assert!(!config.log_ansi);
        assert!(!config.enable_on_install);
    }

    #[test]
    fn test_load_config_keeps_defaults_for_missing_keys() {
        let temp_file = write_config("[logging]\n# level is missing\n");

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let temp_file = write_config("[logging\nlevel = ");

        let err = load_config(temp_file.path()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }

    #[test]
    fn test_load_config_returns_io_error_on_file_not_found() {
        let err = load_config(Path::new("/this/path/does/not/exist/dropbridge.toml")).unwrap_err();

        assert!(
            err.to_string().contains("Failed to read config file"),
            "Expected IO error message, got: {}",
            err
        );
    }
}
