//! # Player 模块
//!
//! 无界面的固定步长播放器。
//!
//! 以 `1 / fps` 为步长驱动 [`TweenManager`]，直到没有活跃的 tween
//! 或达到最长模拟时间，最后生成 [`PlaybackReport`]。

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};
use tween_runtime::{ConstructError, ManagerEvent, Number, TweenId, TweenManager};

use crate::config::AppConfig;
use crate::scene::{Scene, SceneTargets};

/// 完成记录
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRecord {
    /// 完成时的帧序号（从 1 开始）
    pub frame: u64,
    /// 完成时的模拟时间（秒）
    pub time: f32,
    /// 顶层 tween 的名称
    pub label: String,
}

/// 属性快照
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub frame: u64,
    pub time: f32,
    pub values: BTreeMap<String, BTreeMap<String, Number>>,
}

/// 播放报告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackReport {
    /// 场景名称
    pub scene: Option<String>,
    /// 模拟的帧数
    pub frames: u64,
    /// 模拟的总时间（秒）
    pub simulated_time: f32,
    /// 是否在时间上限之前播放完毕
    pub finished: bool,
    /// 顶层 tween 的完成顺序
    pub completions: Vec<CompletionRecord>,
    /// 定期采样的属性值
    pub samples: Vec<Sample>,
    /// 结束时的属性值
    pub final_values: BTreeMap<String, BTreeMap<String, Number>>,
}

/// 播放器
#[derive(Debug)]
pub struct Player {
    scene_name: Option<String>,
    manager: TweenManager,
    targets: SceneTargets,
    labels: HashMap<TweenId, String>,
    frame_dt: f32,
    max_frames: u64,
    sample_every: u32,
}

impl Player {
    /// 创建播放器并注册场景中的所有顶层 tween
    pub fn new(scene: Scene, config: &AppConfig) -> Result<Self, ConstructError> {
        let mut manager = TweenManager::with_config(&config.manager)?;
        let mut labels = HashMap::new();

        for entry in scene.entries {
            let id = manager.add(entry.tween);
            labels.insert(id, entry.label);
        }

        let frame_dt = config.frame_dt();
        let max_frames = (config.max_duration * config.fps as f32).ceil() as u64;

        Ok(Self {
            scene_name: scene.name,
            manager,
            targets: scene.targets,
            labels,
            frame_dt,
            max_frames,
            sample_every: config.sample_every,
        })
    }

    pub fn manager(&self) -> &TweenManager {
        &self.manager
    }

    pub fn targets(&self) -> &SceneTargets {
        &self.targets
    }

    /// 是否还有需要推进的 tween
    pub fn is_active(&self) -> bool {
        self.manager.iter().any(|t| t.state().is_active())
    }

    fn label_of(&self, id: TweenId) -> String {
        self.labels
            .get(&id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }

    /// 运行到结束
    pub fn run(mut self) -> PlaybackReport {
        let mut frames = 0_u64;
        let mut completions = Vec::new();
        let mut samples = Vec::new();

        while self.is_active() && frames < self.max_frames {
            let events = self.manager.update(self.frame_dt);
            frames += 1;
            let time = frames as f32 * self.frame_dt;

            for event in events {
                match event {
                    ManagerEvent::Completed(id) => {
                        let label = self.label_of(id);
                        debug!(frame = frames, time, label = %label, "顶层 tween 完成");
                        completions.push(CompletionRecord {
                            frame: frames,
                            time,
                            label,
                        });
                    }
                    ManagerEvent::Removed(id) => {
                        debug!(frame = frames, id = %id, "顶层 tween 已移除");
                    }
                }
            }

            if self.sample_every > 0 && frames % self.sample_every as u64 == 0 {
                samples.push(Sample {
                    frame: frames,
                    time,
                    values: self.targets.snapshot(),
                });
            }
        }

        let finished = !self.is_active();
        let simulated_time = frames as f32 * self.frame_dt;
        if finished {
            info!(frames, simulated_time, "播放完成");
        } else {
            warn!(frames, simulated_time, "达到最长模拟时间，提前结束");
        }

        PlaybackReport {
            scene: self.scene_name,
            frames,
            simulated_time,
            finished,
            completions,
            samples,
            final_values: self.targets.snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(fps: u32, max_duration: f32) -> AppConfig {
        AppConfig {
            fps,
            max_duration,
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_run_until_finished() {
        let scene = Scene::from_json(
            r#"{
                "targets": { "box": { "x": 0.0 } },
                "timeline": [
                    { "type": "property", "label": "move", "target": "box",
                      "property": "x", "duration": 1.0, "to": 4.0 }
                ]
            }"#,
        )
        .unwrap();

        let report = Player::new(scene, &config(4, 10.0)).unwrap().run();
        assert!(report.finished);
        assert_eq!(report.frames, 4);
        assert_eq!(report.simulated_time, 1.0);
        assert_eq!(
            report.completions,
            vec![CompletionRecord {
                frame: 4,
                time: 1.0,
                label: "move".to_string()
            }]
        );
        assert_eq!(report.final_values["box"]["x"], Number::Double(4.0));
    }

    #[test]
    fn test_infinite_loop_hits_time_limit() {
        let scene = Scene::from_json(
            r#"{ "timeline": [ { "type": "wait", "duration": 0.5, "loops": -1 } ] }"#,
        )
        .unwrap();

        let report = Player::new(scene, &config(10, 2.0)).unwrap().run();
        assert!(!report.finished);
        assert_eq!(report.frames, 20);
        assert!(report.completions.is_empty());
    }

    #[test]
    fn test_idle_entries_do_not_run() {
        let scene = Scene::from_json(
            r#"{ "timeline": [ { "type": "wait", "duration": 1.0, "auto_start": false } ] }"#,
        )
        .unwrap();

        let report = Player::new(scene, &config(10, 2.0)).unwrap().run();
        assert!(report.finished);
        assert_eq!(report.frames, 0);
    }

    #[test]
    fn test_samples() {
        let scene = Scene::from_json(
            r#"{
                "targets": { "box": { "x": 0 } },
                "timeline": [
                    { "type": "property", "target": "box", "property": "x",
                      "duration": 1.0, "to": 100 }
                ]
            }"#,
        )
        .unwrap();

        let mut config = config(4, 10.0);
        config.sample_every = 2;
        let report = Player::new(scene, &config).unwrap().run();

        let values: Vec<Number> = report
            .samples
            .iter()
            .map(|s| s.values["box"]["x"])
            .collect();
        assert_eq!(values, vec![Number::Int(50), Number::Int(100)]);
    }

    #[test]
    fn test_invalid_manager_config() {
        let scene = Scene::from_json(r#"{ "timeline": [] }"#).unwrap();
        let mut config = AppConfig::default();
        config.manager.time_scale = f32::NAN;
        assert!(Player::new(scene, &config).is_err());
    }
}
