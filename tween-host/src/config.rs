//! # Config 模块
//!
//! 播放器配置管理。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{Level, info, warn};
use tween_runtime::ManagerConfig;

/// 应用配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 模拟帧率（每秒帧数）
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// 最长模拟时间（秒），防止无限循环的场景永远不结束
    #[serde(default = "default_max_duration")]
    pub max_duration: f32,

    /// 日志级别（trace/debug/info/warn/error）
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// 每隔多少帧记录一次属性快照（0 表示不记录）
    #[serde(default = "default_sample_every")]
    pub sample_every: u32,

    /// 管理器配置
    #[serde(default)]
    pub manager: ManagerConfig,
}

// 默认值函数
fn default_fps() -> u32 {
    60
}

fn default_max_duration() -> f32 {
    60.0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_sample_every() -> u32 {
    0
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            max_duration: default_max_duration(),
            log_level: default_log_level(),
            sample_every: default_sample_every(),
            manager: ManagerConfig::default(),
        }
    }
}

impl AppConfig {
    /// 读取并解析配置文件
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并记录警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(config) => {
                info!(path = %path.display(), "配置文件加载成功");
                config
            }
            Err(e) => {
                warn!(error = %e, "使用默认配置");
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// 解析日志级别
    pub fn level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .parse::<Level>()
            .map_err(|_| ConfigError::ValidationFailed(format!("未知日志级别: {}", self.log_level)))
    }

    /// 单帧时长（秒）
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.fps as f32
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 || self.fps > 1000 {
            return Err(ConfigError::ValidationFailed(format!(
                "帧率必须在 1 - 1000 之间，实际为 {}",
                self.fps
            )));
        }

        if !self.max_duration.is_finite() || self.max_duration <= 0.0 {
            return Err(ConfigError::ValidationFailed(format!(
                "最长模拟时间必须大于 0，实际为 {}",
                self.max_duration
            )));
        }

        self.level()?;

        self.manager
            .validate()
            .map_err(|e| ConfigError::ValidationFailed(e.to_string()))?;

        Ok(())
    }
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件不存在
    #[error("配置文件不存在: {0}")]
    NotFound(String),

    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 解析或序列化失败
    #[error("配置格式错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.fps, 60);
        assert_eq!(config.level().unwrap(), Level::INFO);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "fps": 30, "manager": { "time_scale": 2.0 } }"#).unwrap();
        assert_eq!(config.fps, 30);
        assert_eq!(config.max_duration, 60.0);
        assert_eq!(config.manager.time_scale, 2.0);
        assert!(config.manager.auto_remove_finished);
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.fps = 0;
        assert!(config.validate().is_err());
        config.fps = 60;

        config.max_duration = f32::NAN;
        assert!(config.validate().is_err());
        config.max_duration = 10.0;

        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());
        config.log_level = "debug".to_string();

        config.manager.time_scale = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed(_))
        ));
        config.manager.time_scale = 1.0;

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = AppConfig::load("definitely/not/here.json");
        assert_eq!(config, AppConfig::default());
        assert!(matches!(
            AppConfig::try_load("definitely/not/here.json"),
            Err(ConfigError::NotFound(_))
        ));
    }
}
