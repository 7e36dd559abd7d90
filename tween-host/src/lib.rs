//! # Tween Host
//!
//! `tween-runtime` 的无界面宿主：从 JSON 场景构建时间线，
//! 以固定步长驱动管理器并输出播放报告。
//!
//! ## 模块结构
//!
//! - [`config`]：播放器配置（config.json + 命令行覆盖）
//! - [`scene`]：场景文件格式与时间线构建
//! - [`player`]：固定步长播放与报告

pub mod config;
pub mod player;
pub mod scene;

pub use config::{AppConfig, ConfigError};
pub use player::{CompletionRecord, PlaybackReport, Player, Sample};
pub use scene::{Scene, SceneError, SceneFile, SceneTargets, TimelineNode};

use anyhow::Context;
use std::path::Path;

/// 加载场景并播放到结束
pub fn play_file(path: impl AsRef<Path>, config: &AppConfig) -> anyhow::Result<PlaybackReport> {
    let path = path.as_ref();
    config.validate().context("配置无效")?;
    let scene =
        Scene::load(path).with_context(|| format!("加载场景失败: {}", path.display()))?;
    let player = Player::new(scene, config).context("创建播放器失败")?;
    Ok(player.run())
}
