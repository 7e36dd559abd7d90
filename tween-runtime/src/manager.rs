//! # Manager 模块
//!
//! 顶层 tween 管理器。
//!
//! 宿主每帧调用一次 [`TweenManager::update`]，管理器按注册顺序推进所有 tween：
//! ```rust,ignore
//! let mut manager = TweenManager::new();
//! manager.add(Tween::property(&sprite, "alpha", 0.3)?.to(1.0)?.with_auto_start(true));
//! // 每帧
//! for event in manager.update(dt) { /* ... */ }
//! ```
//!
//! 在 `update` 过程中（例如观察者回调里）修改注册表需要通过 [`ManagerQueue`]，
//! 请求会在本次遍历结束后统一应用。

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::config::{ManagerConfig, validate_time_scale};
use crate::error::{ConstructError, TweenResult};
use crate::target::Animatable;
use crate::timing::{TweenState, is_valid_dt};
use crate::tween::{Tween, TweenId};

/// 管理器事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerEvent {
    /// 顶层 tween 在本帧完成
    Completed(TweenId),
    /// 顶层 tween 在本帧被移除（自动移除或延迟请求）
    Removed(TweenId),
}

/// 延迟执行的注册表修改
enum Deferred {
    Add(Tween),
    Remove(TweenId),
    Clear,
}

/// 延迟修改队列
///
/// 可以克隆后被观察者闭包捕获。请求在下一次 `update` 遍历结束后应用。
#[derive(Clone, Default)]
pub struct ManagerQueue {
    pending: Rc<RefCell<VecDeque<Deferred>>>,
}

impl ManagerQueue {
    /// 请求注册 tween
    ///
    /// # 返回
    /// tween 的 ID（应用前即可使用）
    pub fn add(&self, tween: Tween) -> TweenId {
        let id = tween.id();
        self.pending.borrow_mut().push_back(Deferred::Add(tween));
        id
    }

    /// 请求移除 tween
    pub fn remove(&self, id: TweenId) {
        self.pending.borrow_mut().push_back(Deferred::Remove(id));
    }

    /// 请求清空所有 tween
    pub fn clear(&self) {
        self.pending.borrow_mut().push_back(Deferred::Clear);
    }

    /// 待处理的请求数
    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    fn pop(&self) -> Option<Deferred> {
        self.pending.borrow_mut().pop_front()
    }
}

impl fmt::Debug for ManagerQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagerQueue")
            .field("pending", &self.len())
            .finish()
    }
}

/// Tween 管理器
///
/// 拥有所有顶层 tween。组拥有自己的子 tween，不需要单独注册。
pub struct TweenManager {
    tweens: Vec<Tween>,
    time_scale: f32,
    auto_remove_finished: bool,
    queue: ManagerQueue,
}

impl Default for TweenManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TweenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenManager")
            .field("tweens", &self.tweens.len())
            .field("time_scale", &self.time_scale)
            .field("auto_remove_finished", &self.auto_remove_finished)
            .field("queue", &self.queue)
            .finish()
    }
}

impl TweenManager {
    /// 创建管理器（默认配置）
    pub fn new() -> Self {
        Self {
            tweens: Vec::new(),
            time_scale: 1.0,
            auto_remove_finished: true,
            queue: ManagerQueue::default(),
        }
    }

    /// 按配置创建管理器
    pub fn with_config(config: &ManagerConfig) -> Result<Self, ConstructError> {
        config.validate()?;
        Ok(Self {
            time_scale: config.time_scale,
            auto_remove_finished: config.auto_remove_finished,
            ..Self::new()
        })
    }

    // ========== 配置 ==========

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// 设置全局时间缩放（必须是非负有限数）
    pub fn set_time_scale(&mut self, time_scale: f32) -> Result<(), ConstructError> {
        validate_time_scale(time_scale)?;
        self.time_scale = time_scale;
        Ok(())
    }

    pub fn auto_remove_finished(&self) -> bool {
        self.auto_remove_finished
    }

    pub fn set_auto_remove_finished(&mut self, auto_remove: bool) {
        self.auto_remove_finished = auto_remove;
    }

    /// 延迟修改队列的句柄
    pub fn queue(&self) -> ManagerQueue {
        self.queue.clone()
    }

    // ========== 注册表 ==========

    /// 注册 tween
    ///
    /// `auto_start` 为真时先启动再注册。
    ///
    /// # 返回
    /// tween 的 ID
    pub fn add(&mut self, mut tween: Tween) -> TweenId {
        let id = tween.id();
        if tween.timing().auto_start() {
            tween.start();
        }
        debug!(id = %id, kind = tween.kind().name(), "注册 tween");
        self.tweens.push(tween);
        id
    }

    /// 移除 tween（不写目标，不触发事件）
    pub fn remove(&mut self, id: TweenId) -> bool {
        let before = self.tweens.len();
        self.tweens.retain(|t| t.id() != id);
        self.tweens.len() != before
    }

    /// 移除所有 tween
    pub fn clear(&mut self) {
        self.tweens.clear();
    }

    pub fn get(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.iter().find(|t| t.id() == id)
    }

    pub fn get_mut(&mut self, id: TweenId) -> Option<&mut Tween> {
        self.tweens.iter_mut().find(|t| t.id() == id)
    }

    /// 在所有顶层 tween 及其后代中查找
    pub fn find(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.iter().find_map(|t| t.find(id))
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// 所有顶层 tween 的 ID（注册顺序）
    pub fn ids(&self) -> Vec<TweenId> {
        self.tweens.iter().map(|t| t.id()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tween> {
        self.tweens.iter()
    }

    /// 是否还有正在运行的 tween
    pub fn has_running(&self) -> bool {
        self.tweens.iter().any(|t| t.is_running())
    }

    // ========== 便捷构造 ==========

    /// 创建并注册属性 tween
    ///
    /// 新 tween 处于 Idle，配置完成后由调用方 `start()`。
    pub fn create_tween<T: Animatable>(
        &mut self,
        target: &Rc<T>,
        property: &str,
        duration: f32,
    ) -> TweenResult<&mut Tween> {
        let tween = Tween::property(target, property, duration)?;
        Ok(self.push_and_get(tween))
    }

    /// 创建并注册空的顺序组
    pub fn create_sequence(&mut self) -> &mut Tween {
        self.push_and_get(Tween::sequence())
    }

    /// 创建并注册空的并行组
    pub fn create_parallel(&mut self) -> &mut Tween {
        self.push_and_get(Tween::parallel())
    }

    fn push_and_get(&mut self, tween: Tween) -> &mut Tween {
        let index = self.tweens.len();
        self.add(tween);
        &mut self.tweens[index]
    }

    // ========== 批量控制 ==========

    pub fn pause_all(&mut self) {
        for tween in self.tweens.iter_mut() {
            tween.pause();
        }
    }

    pub fn resume_all(&mut self) {
        for tween in self.tweens.iter_mut() {
            tween.resume();
        }
    }

    /// 停止所有 tween（保留注册）
    pub fn stop_all(&mut self) {
        for tween in self.tweens.iter_mut() {
            tween.stop();
        }
    }

    // ========== 帧驱动 ==========

    /// 推进所有 tween
    ///
    /// # 参数
    /// - `dt`: 帧时间（秒），乘以 `time_scale` 后传给每个 tween
    ///
    /// # 返回
    /// 本帧产生的管理器事件
    pub fn update(&mut self, dt: f32) -> Vec<ManagerEvent> {
        let mut events = Vec::new();

        if is_valid_dt(dt) {
            let scaled = dt * self.time_scale;
            for tween in self.tweens.iter_mut() {
                let was_finished = tween.state() == TweenState::Finished;
                tween.update(scaled);
                if !was_finished && tween.state() == TweenState::Finished {
                    events.push(ManagerEvent::Completed(tween.id()));
                }
            }

            if self.auto_remove_finished {
                self.tweens.retain(|t| {
                    if t.is_finished() {
                        events.push(ManagerEvent::Removed(t.id()));
                        false
                    } else {
                        true
                    }
                });
            }
        } else {
            warn!(dt, "非法帧时间，跳过推进");
        }

        self.apply_deferred(&mut events);
        events
    }

    fn apply_deferred(&mut self, events: &mut Vec<ManagerEvent>) {
        while let Some(request) = self.queue.pop() {
            match request {
                Deferred::Add(tween) => {
                    self.add(tween);
                }
                Deferred::Remove(id) => {
                    if self.remove(id) {
                        events.push(ManagerEvent::Removed(id));
                    }
                }
                Deferred::Clear => {
                    events.extend(self.tweens.iter().map(|t| ManagerEvent::Removed(t.id())));
                    self.clear();
                }
            }
        }
    }
}
