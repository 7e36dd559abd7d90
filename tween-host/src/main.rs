//! # tween-play
//!
//! 无界面 tween 播放器 - 按固定帧率回放 JSON 场景并输出报告。
//!
//! ## 用法
//!
//! ```bash
//! cargo run -p tween-host -- tween-host/scenes/demo.json
//! cargo run -p tween-host -- tween-host/scenes/demo.json --fps 30 --sample-every 5
//! cargo run -p tween-host -- scene.json --config config.json --output report.json
//! ```

use anyhow::Context;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::{Level, warn};
use tween_host::{AppConfig, play_file};

#[derive(Parser)]
#[command(name = "tween-play")]
#[command(about = "无界面 tween 播放器 - 按固定帧率回放 JSON 场景")]
#[command(version)]
struct Cli {
    /// 场景文件（JSON）
    scene: PathBuf,

    /// 配置文件（默认：config.json，不存在时使用默认配置）
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// 模拟帧率
    #[arg(long)]
    fps: Option<u32>,

    /// 最长模拟时间（秒）
    #[arg(long)]
    max_duration: Option<f32>,

    /// 全局时间缩放
    #[arg(long)]
    time_scale: Option<f32>,

    /// 日志级别（trace/debug/info/warn/error）
    #[arg(long)]
    log_level: Option<String>,

    /// 每隔多少帧记录一次属性快照
    #[arg(long)]
    sample_every: Option<u32>,

    /// 报告输出文件（默认输出到 stdout）
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    /// 命令行参数覆盖配置文件
    fn apply(&self, config: &mut AppConfig) {
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(max_duration) = self.max_duration {
            config.max_duration = max_duration;
        }
        if let Some(time_scale) = self.time_scale {
            config.manager.time_scale = time_scale;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(sample_every) = self.sample_every {
            config.sample_every = sample_every;
        }
    }
}

fn init_tracing(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 日志级别可能来自配置文件，先读配置再初始化日志
    let loaded = AppConfig::try_load(&cli.config);
    let mut config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => AppConfig::default(),
    };
    cli.apply(&mut config);

    init_tracing(config.level().unwrap_or(Level::INFO));
    if let Err(e) = loaded {
        warn!(error = %e, "使用默认配置");
    }

    let report = play_file(&cli.scene, &config)?;
    let json = serde_json::to_string_pretty(&report).context("报告序列化失败")?;

    match &cli.output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("写入报告失败: {}", path.display()))?;
        }
        None => println!("{json}"),
    }

    Ok(())
}
