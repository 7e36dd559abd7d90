//! # Timing 模块
//!
//! 所有 tween 共用的时间轴状态机。
//!
//! 状态流转：
//!
//! ```text
//! Idle ──start()──► Running ──(最后一轮结束)──► Finished
//!                    │  ▲
//!            pause() │  │ resume()
//!                    ▼  │
//!                   Paused
//! ```
//!
//! `Timing` 只负责时间计算（延迟吸收、循环进位、往返反向），
//! 事件分发与目标写入由持有它的 `Tween` 完成。

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::easing::EasingFunction;
use crate::error::ConstructError;

/// 循环模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// 每轮从头开始
    #[default]
    Restart,
    /// 每轮反向播放
    PingPong,
}

/// tween 状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TweenState {
    /// 未开始或已重置
    #[default]
    Idle,
    /// 正在播放（包括延迟阶段）
    Running,
    /// 已暂停
    Paused,
    /// 已完成
    Finished,
}

impl TweenState {
    /// 是否为活跃状态（正在播放或暂停）
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }
}

/// 单次推进最多逐个处理的循环边界数，超出部分按取模折叠
const MAX_BOUNDARIES_PER_STEP: u32 = 4096;

/// 一次推进的结果
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Advance {
    /// 未运行、`dt` 非法或仍处于延迟阶段
    Skipped,
    /// 时间轴已推进，`progress` 已更新
    Stepped {
        /// 扣除延迟后实际推进的时间
        dt: f32,
        /// 本次越过的循环边界（刚结束的循环序号）
        loops_completed: Range<i32>,
        /// 是否到达最终边界
        terminal: bool,
    },
}

/// 时间轴参数与运行状态
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    duration: f32,
    delay: f32,
    elapsed: f32,
    delay_elapsed: f32,
    progress: f32,
    easing: EasingFunction,
    loop_count: i32,
    current_loop: i32,
    loop_mode: LoopMode,
    reversed: bool,
    state: TweenState,
    auto_start: bool,
}

impl Timing {
    /// 创建时间轴
    ///
    /// # 参数
    /// - `duration`: 单轮时长（秒），必须大于 0
    pub fn new(duration: f32) -> Result<Self, ConstructError> {
        validate_duration(duration)?;
        Ok(Self {
            duration,
            delay: 0.0,
            elapsed: 0.0,
            delay_elapsed: 0.0,
            progress: 0.0,
            easing: EasingFunction::default(),
            loop_count: 0,
            current_loop: 0,
            loop_mode: LoopMode::default(),
            reversed: false,
            state: TweenState::Idle,
            auto_start: false,
        })
    }

    /// 组使用的时间轴（`duration` 不参与计算）
    pub(crate) fn for_group() -> Self {
        Self {
            duration: 1.0,
            delay: 0.0,
            elapsed: 0.0,
            delay_elapsed: 0.0,
            progress: 0.0,
            easing: EasingFunction::Linear,
            loop_count: 0,
            current_loop: 0,
            loop_mode: LoopMode::default(),
            reversed: false,
            state: TweenState::Idle,
            auto_start: false,
        }
    }

    // ========== 访问器 ==========

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    /// 当前循环内已播放的时间（不含延迟）
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// 已吸收的延迟时间
    pub fn delay_elapsed(&self) -> f32 {
        self.delay_elapsed
    }

    /// 当前进度（0.0 - 1.0，已考虑往返反向，未应用缓动）
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// 当前进度应用缓动后的值
    pub fn eased_progress(&self) -> f32 {
        self.easing.apply(self.progress)
    }

    pub fn easing(&self) -> EasingFunction {
        self.easing
    }

    pub fn loop_count(&self) -> i32 {
        self.loop_count
    }

    pub fn current_loop(&self) -> i32 {
        self.current_loop
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn state(&self) -> TweenState {
        self.state
    }

    pub fn auto_start(&self) -> bool {
        self.auto_start
    }

    /// 是否仍处于延迟阶段
    pub fn is_delaying(&self) -> bool {
        self.state == TweenState::Running && self.delay_elapsed < self.delay
    }

    /// 是否还有剩余循环
    pub fn has_loops_remaining(&self) -> bool {
        self.loop_count == -1 || (self.loop_count > 0 && self.current_loop < self.loop_count)
    }

    // ========== 设置器 ==========

    /// 设置单轮时长（必须大于 0）
    pub fn set_duration(&mut self, duration: f32) -> Result<(), ConstructError> {
        validate_duration(duration)?;
        self.duration = duration;
        Ok(())
    }

    /// 设置延迟（必须 >= 0）
    pub fn set_delay(&mut self, delay: f32) -> Result<(), ConstructError> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(ConstructError::InvalidDelay { delay });
        }
        self.delay = delay;
        Ok(())
    }

    /// 设置循环次数（-1 为无限，0 为不循环）
    pub fn set_loop_count(&mut self, loop_count: i32) -> Result<(), ConstructError> {
        if loop_count < -1 {
            return Err(ConstructError::InvalidLoopCount { loop_count });
        }
        self.loop_count = loop_count;
        Ok(())
    }

    pub fn set_easing(&mut self, easing: EasingFunction) {
        self.easing = easing;
    }

    pub fn set_loop_mode(&mut self, loop_mode: LoopMode) {
        self.loop_mode = loop_mode;
    }

    pub fn set_auto_start(&mut self, auto_start: bool) {
        self.auto_start = auto_start;
    }

    // ========== 状态流转 ==========

    /// 开始播放，清零所有计时字段
    pub(crate) fn start(&mut self) {
        self.clear();
        self.state = TweenState::Running;
    }

    /// 回到 Idle，清零所有计时字段
    pub(crate) fn reset(&mut self) {
        self.clear();
        self.state = TweenState::Idle;
    }

    /// 暂停
    ///
    /// # 返回
    /// 状态确实发生变化时返回 `true`
    pub(crate) fn pause(&mut self) -> bool {
        if self.state == TweenState::Running {
            self.state = TweenState::Paused;
            true
        } else {
            false
        }
    }

    /// 恢复
    ///
    /// # 返回
    /// 状态确实发生变化时返回 `true`
    pub(crate) fn resume(&mut self) -> bool {
        if self.state == TweenState::Paused {
            self.state = TweenState::Running;
            true
        } else {
            false
        }
    }

    /// 标记完成
    pub(crate) fn finish(&mut self) {
        self.state = TweenState::Finished;
    }

    fn clear(&mut self) {
        self.elapsed = 0.0;
        self.delay_elapsed = 0.0;
        self.progress = 0.0;
        self.current_loop = 0;
        self.reversed = false;
    }

    // ========== 时间推进 ==========

    /// 吸收延迟
    ///
    /// # 返回
    /// - `Some(dt)`: 延迟已结束，返回扣除延迟后剩余的时间
    /// - `None`: 仍在延迟中
    pub(crate) fn absorb_delay(&mut self, dt: f32) -> Option<f32> {
        if self.delay_elapsed >= self.delay {
            return Some(dt);
        }

        self.delay_elapsed += dt;
        if self.delay_elapsed < self.delay {
            return None;
        }

        let overflow = self.delay_elapsed - self.delay;
        self.delay_elapsed = self.delay;
        Some(overflow)
    }

    /// 推进单个 tween 的时间轴
    ///
    /// 只在 Running 状态下生效。一次调用可以越过多个循环边界，
    /// 每越过一个边界扣除一轮时长，结束后 `elapsed` 落在 `[0, duration]`。
    /// 到达最终边界时 `progress` 固定为当前方向的终点，但状态的切换
    /// 由调用方在分发事件后完成。
    pub(crate) fn advance(&mut self, dt: f32) -> Advance {
        if self.state != TweenState::Running || !is_valid_dt(dt) {
            return Advance::Skipped;
        }

        let Some(dt) = self.absorb_delay(dt) else {
            return Advance::Skipped;
        };

        self.elapsed += dt;
        let first_loop = self.current_loop;
        let mut terminal = false;
        let mut crossed = 0;

        let mut raw = self.elapsed / self.duration;
        while raw >= 1.0 {
            if !self.has_loops_remaining() {
                terminal = true;
                self.elapsed = self.duration;
                raw = 1.0;
                break;
            }
            if crossed == MAX_BOUNDARIES_PER_STEP {
                debug!(elapsed = self.elapsed, "越过的循环过多，折叠剩余时间");
                self.elapsed %= self.duration;
                raw = self.elapsed / self.duration;
                break;
            }
            crossed += 1;
            self.current_loop += 1;
            if self.loop_mode == LoopMode::PingPong {
                self.reversed = !self.reversed;
            }
            self.elapsed -= self.duration;
            raw = self.elapsed / self.duration;
        }

        if self.reversed {
            raw = 1.0 - raw;
        }
        self.progress = raw.clamp(0.0, 1.0);

        Advance::Stepped {
            dt,
            loops_completed: first_loop..self.current_loop,
            terminal,
        }
    }

    /// 组的簿记：累计时间并写入派生进度
    pub(crate) fn record_group_step(&mut self, dt: f32, progress: f32) {
        self.elapsed += dt;
        self.progress = progress.clamp(0.0, 1.0);
    }

    /// 组完成一轮循环
    ///
    /// # 返回
    /// 刚结束的循环序号
    pub(crate) fn complete_group_loop(&mut self) -> i32 {
        let finished = self.current_loop;
        self.current_loop += 1;
        self.elapsed = 0.0;
        finished
    }
}

/// `dt` 必须是非负有限数
pub(crate) fn is_valid_dt(dt: f32) -> bool {
    dt.is_finite() && dt >= 0.0
}

fn validate_duration(duration: f32) -> Result<(), ConstructError> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(ConstructError::InvalidDuration { duration });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(duration: f32) -> Timing {
        let mut timing = Timing::new(duration).unwrap();
        timing.start();
        timing
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            Timing::new(0.0),
            Err(ConstructError::InvalidDuration { duration: 0.0 })
        );
        assert!(Timing::new(-1.0).is_err());
        assert!(Timing::new(f32::NAN).is_err());

        let mut timing = Timing::new(1.0).unwrap();
        assert_eq!(
            timing.set_delay(-0.1),
            Err(ConstructError::InvalidDelay { delay: -0.1 })
        );
        assert_eq!(
            timing.set_loop_count(-2),
            Err(ConstructError::InvalidLoopCount { loop_count: -2 })
        );
        assert!(timing.set_loop_count(-1).is_ok());
        assert!(timing.set_delay(0.0).is_ok());
    }

    #[test]
    fn test_advance_requires_running() {
        let mut timing = Timing::new(1.0).unwrap();
        assert_eq!(timing.advance(0.5), Advance::Skipped);
        assert_eq!(timing.progress(), 0.0);

        timing.start();
        timing.pause();
        assert_eq!(timing.advance(0.5), Advance::Skipped);
        assert_eq!(timing.elapsed(), 0.0);
    }

    #[test]
    fn test_invalid_dt_ignored() {
        let mut timing = running(1.0);
        assert_eq!(timing.advance(-0.5), Advance::Skipped);
        assert_eq!(timing.advance(f32::NAN), Advance::Skipped);
        assert_eq!(timing.advance(f32::INFINITY), Advance::Skipped);
        assert_eq!(timing.elapsed(), 0.0);
    }

    #[test]
    fn test_basic_progress() {
        let mut timing = running(2.0);
        assert_eq!(
            timing.advance(1.0),
            Advance::Stepped {
                dt: 1.0,
                loops_completed: 0..0,
                terminal: false
            }
        );
        assert_eq!(timing.progress(), 0.5);

        assert_eq!(
            timing.advance(1.5),
            Advance::Stepped {
                dt: 1.5,
                loops_completed: 0..0,
                terminal: true
            }
        );
        assert_eq!(timing.progress(), 1.0);
        assert_eq!(timing.elapsed(), 2.0);
    }

    #[test]
    fn test_delay_absorption() {
        let mut timing = running(1.0);
        timing.set_delay(0.5).unwrap();

        assert_eq!(timing.advance(0.25), Advance::Skipped);
        assert!(timing.is_delaying());
        assert_eq!(timing.elapsed(), 0.0);

        // 0.25 吸收进延迟，0.25 溢出进入播放
        match timing.advance(0.5) {
            Advance::Stepped { dt, .. } => assert_eq!(dt, 0.25),
            other => panic!("unexpected {:?}", other),
        }
        assert!(!timing.is_delaying());
        assert_eq!(timing.delay_elapsed(), 0.5);
        assert_eq!(timing.elapsed(), 0.25);
    }

    #[test]
    fn test_loop_carry_over() {
        let mut timing = running(1.0);
        timing.set_loop_count(1).unwrap();

        match timing.advance(1.25) {
            Advance::Stepped {
                loops_completed,
                terminal,
                ..
            } => {
                assert_eq!(loops_completed, 0..1);
                assert!(!terminal);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(timing.current_loop(), 1);
        assert_eq!(timing.elapsed(), 0.25);
        assert_eq!(timing.progress(), 0.25);
    }

    #[test]
    fn test_large_step_crosses_several_boundaries() {
        let mut timing = running(1.0);
        timing.set_loop_count(-1).unwrap();

        match timing.advance(5.5) {
            Advance::Stepped {
                loops_completed,
                terminal,
                ..
            } => {
                assert_eq!(loops_completed, 0..5);
                assert!(!terminal);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(timing.current_loop(), 5);
        assert_eq!(timing.elapsed(), 0.5);
        assert_eq!(timing.progress(), 0.5);

        // 不经过时间就不会再越过边界
        timing.advance(0.0);
        assert_eq!(timing.current_loop(), 5);
        assert_eq!(timing.elapsed(), 0.5);
    }

    #[test]
    fn test_large_step_stops_at_final_boundary() {
        let mut timing = running(1.0);
        timing.set_loop_count(2).unwrap();
        timing.set_loop_mode(LoopMode::PingPong);

        match timing.advance(10.0) {
            Advance::Stepped {
                loops_completed,
                terminal,
                ..
            } => {
                assert_eq!(loops_completed, 0..2);
                assert!(terminal);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(timing.elapsed(), 1.0);
        // 两次反向后回到正向终点
        assert!(!timing.is_reversed());
        assert_eq!(timing.progress(), 1.0);
    }

    #[test]
    fn test_ping_pong_reverses() {
        let mut timing = running(1.0);
        timing.set_loop_count(-1).unwrap();
        timing.set_loop_mode(LoopMode::PingPong);

        timing.advance(0.75);
        assert_eq!(timing.progress(), 0.75);

        timing.advance(0.5);
        assert!(timing.is_reversed());
        assert_eq!(timing.progress(), 0.75);

        timing.advance(0.5);
        assert_eq!(timing.progress(), 0.25);
    }

    #[test]
    fn test_pause_resume_guards() {
        let mut timing = Timing::new(1.0).unwrap();
        assert!(!timing.pause());
        assert!(!timing.resume());

        timing.start();
        assert!(timing.pause());
        assert!(!timing.pause());
        assert_eq!(timing.state(), TweenState::Paused);
        assert!(timing.resume());
        assert_eq!(timing.state(), TweenState::Running);
    }

    #[test]
    fn test_reset_clears_fields() {
        let mut timing = running(1.0);
        timing.set_loop_count(3).unwrap();
        timing.advance(1.5);
        timing.reset();

        assert_eq!(timing.state(), TweenState::Idle);
        assert_eq!(timing.elapsed(), 0.0);
        assert_eq!(timing.progress(), 0.0);
        assert_eq!(timing.current_loop(), 0);
        // 配置保留
        assert_eq!(timing.loop_count(), 3);
    }
}
