//! # Config 模块
//!
//! 管理器配置。

use serde::{Deserialize, Serialize};

use crate::error::ConstructError;

/// 管理器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// 全局时间缩放（1.0 为正常速度）
    #[serde(default = "default_time_scale")]
    pub time_scale: f32,
    /// 是否在每帧结束后移除已完成的 tween
    #[serde(default = "default_auto_remove")]
    pub auto_remove_finished: bool,
}

fn default_time_scale() -> f32 {
    1.0
}

fn default_auto_remove() -> bool {
    true
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            time_scale: default_time_scale(),
            auto_remove_finished: default_auto_remove(),
        }
    }
}

impl ManagerConfig {
    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConstructError> {
        validate_time_scale(self.time_scale)
    }
}

/// 时间缩放必须是非负有限数
pub(crate) fn validate_time_scale(time_scale: f32) -> Result<(), ConstructError> {
    if !time_scale.is_finite() || time_scale < 0.0 {
        return Err(ConstructError::InvalidTimeScale { time_scale });
    }
    Ok(())
}
