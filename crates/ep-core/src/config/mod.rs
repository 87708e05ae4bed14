//! # Pure Data Module / 纯数据模块 - Data Transfer Objects Only
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Define configuration data structures / 定义配置数据结构
//! - ✅ Provide TOML → DTO mapping / 提供 TOML → DTO 的映射
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No default value calculation / 禁止默认值计算**
//!
//! Defaults are applied once, during wiring.

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the remote document store / asset host (may be empty)
    pub remote_base_url: String,

    /// Document path of the splash settings document
    pub splash_document: String,

    /// Document path of the pending notices document
    pub notices_document: String,

    /// URL probed to decide connectivity
    pub connectivity_probe_url: String,

    /// Network timeout in seconds (0 = not set)
    pub network_timeout_secs: u64,

    /// Treat the network as unavailable regardless of probes
    pub force_offline: bool,

    /// Data directory override (empty = platform default)
    pub data_dir: PathBuf,

    /// Delay between "ready" and the notice modal, in ms (0 = not set)
    pub notice_delay_ms: u64,

    /// Delay between main view mount and the background refresh, in ms (0 = not set)
    pub refresh_delay_ms: u64,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    ///
    /// Missing sections and keys become empty values; they are facts, not errors.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let str_at = |section: &str, key: &str| {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };
        let int_at = |section: &str, key: &str| {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
                .max(0) as u64
        };

        Ok(Self {
            remote_base_url: str_at("remote", "base_url"),
            splash_document: str_at("remote", "splash_document"),
            notices_document: str_at("remote", "notices_document"),
            connectivity_probe_url: str_at("connectivity", "probe_url"),
            network_timeout_secs: int_at("connectivity", "timeout_secs"),
            force_offline: toml_value
                .get("connectivity")
                .and_then(|c| c.get("force_offline"))
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            data_dir: PathBuf::from(str_at("storage", "data_dir")),
            notice_delay_ms: int_at("bootstrap", "notice_delay_ms"),
            refresh_delay_ms: int_at("bootstrap", "refresh_delay_ms"),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    /// 创建空的 AppConfig（所有字段为空/默认值）
    pub fn empty() -> Self {
        Self {
            remote_base_url: String::new(),
            splash_document: String::new(),
            notices_document: String::new(),
            connectivity_probe_url: String::new(),
            network_timeout_secs: 0,
            force_offline: false,
            data_dir: PathBuf::new(),
            notice_delay_ms: 0,
            refresh_delay_ms: 0,
        }
    }
}
