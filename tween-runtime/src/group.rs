//! # Group 模块
//!
//! 组合 tween：`Sequence` 依次播放子 tween，`Parallel` 同时播放。
//!
//! 组自身的 `duration`/`easing` 不参与计算，完成状态完全由子 tween 决定。

use crate::tween::{Tween, TweenId};

/// 组的公共操作
pub trait TweenGroup {
    /// 子 tween（按插入顺序）
    fn children(&self) -> &[Tween];

    /// 子 tween 的可变切片
    fn children_mut(&mut self) -> &mut [Tween];

    /// 追加子 tween，返回其 ID
    fn add(&mut self, child: Tween) -> TweenId;

    /// 移除并取回子 tween
    fn take(&mut self, id: TweenId) -> Option<Tween>;

    /// 移除全部子 tween
    fn clear(&mut self);

    /// 子 tween 是否全部按组的规则完成
    fn is_finished(&self) -> bool;

    /// 移除子 tween
    fn remove(&mut self, id: TweenId) -> bool {
        self.take(id).is_some()
    }

    /// 子 tween 数量
    fn count(&self) -> usize {
        self.children().len()
    }
}

/// 顺序组
///
/// 同一时刻只有 `current_index` 指向的子 tween 在播放，
/// 它完成后才启动下一个。子 tween 只会在组启动或推进时被启动。
#[derive(Debug, Default)]
pub struct Sequence {
    children: Vec<Tween>,
    current_index: usize,
    has_started: bool,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前播放的子 tween 下标
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn has_started(&self) -> bool {
        self.has_started
    }

    /// 当前播放的子 tween
    pub fn current(&self) -> Option<&Tween> {
        self.children.get(self.current_index)
    }

    pub(crate) fn start(&mut self) {
        self.current_index = 0;
        self.has_started = true;
        if let Some(first) = self.children.first_mut() {
            first.start();
        }
    }

    pub(crate) fn update(&mut self, dt: f32) {
        if !self.has_started {
            return;
        }
        let Some(current) = self.children.get_mut(self.current_index) else {
            return;
        };

        current.update(dt);
        if current.is_finished() {
            self.current_index += 1;
            if let Some(next) = self.children.get_mut(self.current_index) {
                next.start();
            }
        }
    }

    /// 倒序重置，保证共享属性最终回到第一个子 tween 的起始值
    pub(crate) fn reset(&mut self) {
        self.current_index = 0;
        self.has_started = false;
        for child in self.children.iter_mut().rev() {
            child.reset();
        }
    }

    pub(crate) fn stop(&mut self) {
        self.current_index = 0;
        self.has_started = false;
        for child in self.children.iter_mut() {
            child.stop();
        }
    }

    pub(crate) fn pause(&mut self) {
        for child in self.children.iter_mut() {
            child.pause();
        }
    }

    pub(crate) fn resume(&mut self) {
        for child in self.children.iter_mut() {
            child.resume();
        }
    }

    /// 派生进度：已完成的子 tween 数加上当前子 tween 的进度
    pub(crate) fn progress(&self) -> f32 {
        if self.children.is_empty() || TweenGroup::is_finished(self) {
            return 1.0;
        }
        let current = self
            .children
            .get(self.current_index)
            .map(|c| c.progress())
            .unwrap_or(0.0);
        (self.current_index as f32 + current) / self.children.len() as f32
    }

    /// 按顺序累加各子 tween 的完成时间
    pub(crate) fn total_duration(&self) -> Option<f32> {
        self.children
            .iter()
            .map(|c| c.total_duration())
            .sum::<Option<f32>>()
    }
}

impl TweenGroup for Sequence {
    fn children(&self) -> &[Tween] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Tween] {
        &mut self.children
    }

    fn add(&mut self, mut child: Tween) -> TweenId {
        let id = child.id();
        // 已播放到末尾的序列追加子 tween 时直接接上
        if self.has_started && self.current_index == self.children.len() {
            child.start();
        }
        self.children.push(child);
        id
    }

    fn take(&mut self, id: TweenId) -> Option<Tween> {
        let index = self.children.iter().position(|c| c.id() == id)?;
        let removed = self.children.remove(index);

        if index < self.current_index {
            self.current_index -= 1;
        } else if index == self.current_index && self.has_started {
            if let Some(next) = self.children.get_mut(self.current_index) {
                next.start();
            }
        }
        Some(removed)
    }

    fn clear(&mut self) {
        self.children.clear();
        self.current_index = 0;
    }

    fn is_finished(&self) -> bool {
        let count = self.children.len();
        if count == 0 || self.current_index >= count {
            return true;
        }
        self.current_index == count - 1 && self.children[count - 1].is_finished()
    }
}

/// 并行组
///
/// 启动时同时启动所有子 tween；每次 `update` 推进所有未完成的子 tween，
/// 全部完成时组完成。
#[derive(Debug, Default)]
pub struct Parallel {
    children: Vec<Tween>,
    has_started: bool,
}

impl Parallel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_started(&self) -> bool {
        self.has_started
    }

    pub(crate) fn start(&mut self) {
        self.has_started = true;
        for child in self.children.iter_mut() {
            child.start();
        }
    }

    pub(crate) fn update(&mut self, dt: f32) {
        if !self.has_started {
            return;
        }
        for child in self.children.iter_mut() {
            if !child.is_finished() {
                child.update(dt);
            }
        }
    }

    pub(crate) fn reset(&mut self) {
        self.has_started = false;
        for child in self.children.iter_mut().rev() {
            child.reset();
        }
    }

    pub(crate) fn stop(&mut self) {
        self.has_started = false;
        for child in self.children.iter_mut() {
            child.stop();
        }
    }

    pub(crate) fn pause(&mut self) {
        for child in self.children.iter_mut() {
            child.pause();
        }
    }

    pub(crate) fn resume(&mut self) {
        for child in self.children.iter_mut() {
            child.resume();
        }
    }

    /// 派生进度：最慢的子 tween 的进度
    pub(crate) fn progress(&self) -> f32 {
        if TweenGroup::is_finished(self) {
            return 1.0;
        }
        self.children
            .iter()
            .map(|c| if c.is_finished() { 1.0 } else { c.progress() })
            .fold(1.0, f32::min)
    }

    /// 最长的子 tween 完成时间
    pub(crate) fn total_duration(&self) -> Option<f32> {
        self.children
            .iter()
            .map(|c| c.total_duration())
            .try_fold(0.0_f32, |acc, d| d.map(|d| acc.max(d)))
    }
}

impl TweenGroup for Parallel {
    fn children(&self) -> &[Tween] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Tween] {
        &mut self.children
    }

    fn add(&mut self, mut child: Tween) -> TweenId {
        let id = child.id();
        if self.has_started {
            child.start();
        }
        self.children.push(child);
        id
    }

    fn take(&mut self, id: TweenId) -> Option<Tween> {
        let index = self.children.iter().position(|c| c.id() == id)?;
        Some(self.children.remove(index))
    }

    fn clear(&mut self) {
        self.children.clear();
    }

    fn is_finished(&self) -> bool {
        self.children.iter().all(|c| c.is_finished())
    }
}
