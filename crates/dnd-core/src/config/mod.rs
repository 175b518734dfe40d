//! # Pure Data Module / 纯数据模块 - Data Transfer Objects Only
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Define the bridge configuration / 定义桥接配置结构
//! - ✅ Provide TOML → DTO mapping / 提供 TOML → DTO 的映射
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No business rules / 禁止业务规则**
//!
//! Missing keys fall back to the defaults of [`BridgeConfig::default`];
//! present values are taken as they are.

/// Bridge configuration DTO (pure data, no logic)
/// 桥接配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Default tracing level, used when `RUST_LOG` is not set.
    /// 默认日志级别（未设置 `RUST_LOG` 时使用）
    pub log_level: String,

    /// Colored log output
    pub log_ansi: bool,

    /// Register the native listeners as soon as the bridge is installed.
    ///
    /// Enabling early prevents the browser from handling drops itself
    /// (navigating away to the dropped file).
    pub enable_on_install: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_ansi: true,
            enable_on_install: true,
        }
    }
}

impl BridgeConfig {
    /// Create BridgeConfig from TOML value
    /// 从 TOML 值创建 BridgeConfig
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let logging = toml_value.get("logging");
        let native = toml_value.get("native");

        Ok(Self {
            log_level: logging
                .and_then(|l| l.get("level"))
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or(defaults.log_level),
            log_ansi: logging
                .and_then(|l| l.get("ansi"))
                .and_then(|v| v.as_bool())
                .unwrap_or(defaults.log_ansi),
            enable_on_install: native
                .and_then(|n| n.get("enable_on_install"))
                .and_then(|v| v.as_bool())
                .unwrap_or(defaults.enable_on_install),
        })
    }
}
