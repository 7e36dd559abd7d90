//! # Tween 模块
//!
//! 统一的 tween 句柄。
//!
//! 所有种类共享一个 [`Timing`]，种类特有的行为通过 [`TweenKind`] 分发：
//! 叶子（等待、属性）由时间轴直接推进，组（顺序、并行）把时间转交给子 tween，
//! 自身进度由子 tween 派生。

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, trace};

use crate::easing::EasingFunction;
use crate::error::{TweenError, TweenResult};
use crate::event::{Observers, SubscriptionId, TweenEvent};
use crate::group::{Parallel, Sequence, TweenGroup};
use crate::property::PropertyTween;
use crate::target::{Animatable, TargetRef};
use crate::timing::{Advance, LoopMode, Timing, TweenState, is_valid_dt};
use crate::value::Number;

static NEXT_TWEEN_ID: AtomicU64 = AtomicU64::new(1);

/// Tween 唯一标识（进程内唯一）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(u64);

impl TweenId {
    fn next() -> Self {
        Self(NEXT_TWEEN_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// 原始数值
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TweenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tween#{}", self.0)
    }
}

/// Tween 种类
#[derive(Debug)]
pub enum TweenKind {
    /// 纯等待，不写任何目标
    Wait,
    /// 属性插值
    Property(PropertyTween),
    /// 顺序组
    Sequence(Sequence),
    /// 并行组
    Parallel(Parallel),
}

impl TweenKind {
    /// 种类名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Wait => "wait",
            Self::Property(_) => "property",
            Self::Sequence(_) => "sequence",
            Self::Parallel(_) => "parallel",
        }
    }

    /// 是否为组
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Sequence(_) | Self::Parallel(_))
    }

    fn group(&self) -> Option<&dyn TweenGroup> {
        match self {
            Self::Sequence(s) => Some(s as &dyn TweenGroup),
            Self::Parallel(p) => Some(p as &dyn TweenGroup),
            Self::Wait | Self::Property(_) => None,
        }
    }
}

/// Tween
///
/// 创建后处于 `Idle`，需要 `start()`（或由管理器按 `auto_start` 启动）后才会推进。
#[derive(Debug)]
pub struct Tween {
    id: TweenId,
    timing: Timing,
    kind: TweenKind,
    observers: Observers,
}

impl Tween {
    fn with_kind(timing: Timing, kind: TweenKind) -> Self {
        Self {
            id: TweenId::next(),
            timing,
            kind,
            observers: Observers::new(),
        }
    }

    // ========== 构造 ==========

    /// 创建属性 tween
    ///
    /// # 参数
    /// - `target`: 目标对象（只保存弱引用）
    /// - `property`: 属性名，必须存在于目标上
    /// - `duration`: 单轮时长（秒）
    pub fn property<T: Animatable>(
        target: &Rc<T>,
        property: &str,
        duration: f32,
    ) -> TweenResult<Self> {
        let target: Rc<dyn Animatable> = target.clone();
        Self::property_dyn(&target, property, duration)
    }

    /// 创建属性 tween（目标已擦除类型）
    pub fn property_dyn(
        target: &Rc<dyn Animatable>,
        property: &str,
        duration: f32,
    ) -> TweenResult<Self> {
        let timing = Timing::new(duration)?;
        let property = PropertyTween::bind(target, property)?;
        Ok(Self::with_kind(timing, TweenKind::Property(property)))
    }

    /// 通过弱引用创建属性 tween
    pub fn property_ref(target: &TargetRef, property: &str, duration: f32) -> TweenResult<Self> {
        let timing = Timing::new(duration)?;
        let property = PropertyTween::bind_ref(target, property)?;
        Ok(Self::with_kind(timing, TweenKind::Property(property)))
    }

    /// 创建等待 tween（用于在序列中插入间隔）
    pub fn wait(duration: f32) -> TweenResult<Self> {
        Ok(Self::with_kind(Timing::new(duration)?, TweenKind::Wait))
    }

    /// 创建空的顺序组
    pub fn sequence() -> Self {
        Self::with_kind(Timing::for_group(), TweenKind::Sequence(Sequence::new()))
    }

    /// 创建空的并行组
    pub fn parallel() -> Self {
        Self::with_kind(Timing::for_group(), TweenKind::Parallel(Parallel::new()))
    }

    /// 以给定子 tween 创建顺序组
    pub fn sequence_of(children: impl IntoIterator<Item = Tween>) -> Self {
        let mut sequence = Sequence::new();
        for child in children {
            sequence.add(child);
        }
        Self::with_kind(Timing::for_group(), TweenKind::Sequence(sequence))
    }

    /// 以给定子 tween 创建并行组
    pub fn parallel_of(children: impl IntoIterator<Item = Tween>) -> Self {
        let mut parallel = Parallel::new();
        for child in children {
            parallel.add(child);
        }
        Self::with_kind(Timing::for_group(), TweenKind::Parallel(parallel))
    }

    // ========== Builder ==========

    pub fn with_duration(mut self, duration: f32) -> TweenResult<Self> {
        self.timing.set_duration(duration)?;
        Ok(self)
    }

    pub fn with_delay(mut self, delay: f32) -> TweenResult<Self> {
        self.timing.set_delay(delay)?;
        Ok(self)
    }

    /// 设置循环次数（-1 为无限，n 为额外播放 n 轮）
    pub fn with_loops(mut self, loop_count: i32) -> TweenResult<Self> {
        self.timing.set_loop_count(loop_count)?;
        Ok(self)
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.timing.set_easing(easing);
        self
    }

    pub fn with_loop_mode(mut self, loop_mode: LoopMode) -> Self {
        self.timing.set_loop_mode(loop_mode);
        self
    }

    pub fn with_auto_start(mut self, auto_start: bool) -> Self {
        self.timing.set_auto_start(auto_start);
        self
    }

    /// 设置起始值（仅属性 tween）
    pub fn from(mut self, value: impl Into<Number>) -> TweenResult<Self> {
        self.set_from(value)?;
        Ok(self)
    }

    /// 设置目标值（仅属性 tween）
    pub fn to(mut self, value: impl Into<Number>) -> TweenResult<Self> {
        self.set_to(value)?;
        Ok(self)
    }

    /// 设置相对偏移：启动时解析为 `from + delta`，只解析一次
    pub fn by(mut self, delta: impl Into<Number>) -> TweenResult<Self> {
        self.set_delta(delta)?;
        Ok(self)
    }

    /// 启动时以目标的当前值作为起始值
    pub fn from_current(mut self) -> TweenResult<Self> {
        self.property_mut()?.set_use_current_as_from(true);
        Ok(self)
    }

    /// 追加子 tween（仅组）
    pub fn with_child(mut self, child: Tween) -> TweenResult<Self> {
        self.add_child(child)?;
        Ok(self)
    }

    /// 订阅生命周期事件
    pub fn on_event(mut self, callback: impl FnMut(&TweenEvent) + 'static) -> Self {
        self.observers.subscribe(callback);
        self
    }

    // ========== 访问器 ==========

    pub fn id(&self) -> TweenId {
        self.id
    }

    pub fn kind(&self) -> &TweenKind {
        &self.kind
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// 时间轴参数的可变引用（只暴露经过校验的设置器）
    pub fn timing_mut(&mut self) -> &mut Timing {
        &mut self.timing
    }

    pub fn state(&self) -> TweenState {
        self.timing.state()
    }

    /// 当前进度（0.0 - 1.0，未应用缓动）
    pub fn progress(&self) -> f32 {
        self.timing.progress()
    }

    pub fn is_running(&self) -> bool {
        self.timing.state() == TweenState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.timing.state() == TweenState::Paused
    }

    /// 是否已完成
    ///
    /// 叶子看自身状态；组看子 tween。
    pub fn is_finished(&self) -> bool {
        match self.kind.group() {
            Some(group) => group.is_finished(),
            None => self.timing.state() == TweenState::Finished,
        }
    }

    pub fn as_property(&self) -> Option<&PropertyTween> {
        match &self.kind {
            TweenKind::Property(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match &self.kind {
            TweenKind::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_parallel(&self) -> Option<&Parallel> {
        match &self.kind {
            TweenKind::Parallel(p) => Some(p),
            _ => None,
        }
    }

    /// 属性 tween 的可变引用
    pub fn property_mut(&mut self) -> TweenResult<&mut PropertyTween> {
        match &mut self.kind {
            TweenKind::Property(p) => Ok(p),
            other => Err(kind_mismatch("property", other)),
        }
    }

    /// 组的只读视图
    pub fn group(&self) -> Option<&dyn TweenGroup> {
        self.kind.group()
    }

    /// 组的可变视图
    pub fn group_mut(&mut self) -> TweenResult<&mut dyn TweenGroup> {
        match &mut self.kind {
            TweenKind::Sequence(s) => Ok(s as &mut dyn TweenGroup),
            TweenKind::Parallel(p) => Ok(p as &mut dyn TweenGroup),
            other => Err(kind_mismatch("group", other)),
        }
    }

    /// 子 tween（叶子返回空切片）
    pub fn children(&self) -> &[Tween] {
        self.kind.group().map(|g| g.children()).unwrap_or(&[])
    }

    /// 在自身及所有后代中查找
    pub fn find(&self, id: TweenId) -> Option<&Tween> {
        if self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(id))
    }

    /// 在自身及所有后代中查找（可变）
    pub fn find_mut(&mut self, id: TweenId) -> Option<&mut Tween> {
        if self.id == id {
            return Some(self);
        }
        match &mut self.kind {
            TweenKind::Sequence(s) => s.children_mut().iter_mut().find_map(|c| c.find_mut(id)),
            TweenKind::Parallel(p) => p.children_mut().iter_mut().find_map(|c| c.find_mut(id)),
            TweenKind::Wait | TweenKind::Property(_) => None,
        }
    }

    /// 从开始到完成所需的总时间（含延迟与循环）
    ///
    /// # 返回
    /// 无限循环（自身或任一后代）时返回 `None`
    pub fn total_duration(&self) -> Option<f32> {
        let loops = self.timing.loop_count();
        if loops < 0 {
            return None;
        }
        let pass = match &self.kind {
            TweenKind::Wait | TweenKind::Property(_) => self.timing.duration(),
            TweenKind::Sequence(s) => s.total_duration()?,
            TweenKind::Parallel(p) => p.total_duration()?,
        };
        Some(self.timing.delay() + pass * (loops + 1) as f32)
    }

    // ========== 设置器 ==========

    pub fn set_from(&mut self, value: impl Into<Number>) -> TweenResult<()> {
        self.property_mut()?.set_from(value.into())?;
        Ok(())
    }

    pub fn set_to(&mut self, value: impl Into<Number>) -> TweenResult<()> {
        self.property_mut()?.set_to(value.into())?;
        Ok(())
    }

    /// 设置相对偏移，启动时解析为 `from + delta`
    pub fn set_delta(&mut self, delta: impl Into<Number>) -> TweenResult<()> {
        self.property_mut()?.set_delta(delta.into())?;
        Ok(())
    }

    pub fn set_relative(&mut self, relative: bool) -> TweenResult<()> {
        self.property_mut()?.set_relative(relative);
        Ok(())
    }

    pub fn set_use_current_as_from(&mut self, use_current: bool) -> TweenResult<()> {
        self.property_mut()?.set_use_current_as_from(use_current);
        Ok(())
    }

    /// 追加子 tween
    ///
    /// # 返回
    /// 子 tween 的 ID；自身不是组时返回 `KindMismatch`
    pub fn add_child(&mut self, child: Tween) -> TweenResult<TweenId> {
        Ok(self.group_mut()?.add(child))
    }

    /// 移除子 tween（仅直接子级）
    pub fn remove_child(&mut self, id: TweenId) -> TweenResult<bool> {
        Ok(self.group_mut()?.remove(id))
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&TweenEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ========== 生命周期 ==========

    /// 开始播放
    ///
    /// 重新调用会从头开始。叶子 tween 先发出 `Started` 再执行启动钩子，
    /// 观察者在回调里对目标的写入会被 `from_current` 读到。
    /// 组先启动子 tween，再发出自身的 `Started`。
    pub fn start(&mut self) {
        self.timing.start();
        debug!(id = %self.id, kind = self.kind.name(), "tween 开始");
        match &mut self.kind {
            TweenKind::Wait => self.observers.emit(TweenEvent::Started),
            TweenKind::Property(p) => {
                self.observers.emit(TweenEvent::Started);
                p.on_start();
            }
            TweenKind::Sequence(s) => {
                s.start();
                self.observers.emit(TweenEvent::Started);
            }
            TweenKind::Parallel(p) => {
                p.start();
                self.observers.emit(TweenEvent::Started);
            }
        }
    }

    /// 停止并回到 Idle，不触发 `Completed`，不写目标
    pub fn stop(&mut self) {
        match &mut self.kind {
            TweenKind::Sequence(s) => s.stop(),
            TweenKind::Parallel(p) => p.stop(),
            TweenKind::Wait | TweenKind::Property(_) => {}
        }
        self.timing.reset();
        debug!(id = %self.id, "tween 停止");
    }

    /// 暂停（仅 Running 时生效）
    pub fn pause(&mut self) {
        if !self.timing.pause() {
            trace!(id = %self.id, state = ?self.timing.state(), "非运行状态，忽略暂停");
            return;
        }
        match &mut self.kind {
            TweenKind::Sequence(s) => s.pause(),
            TweenKind::Parallel(p) => p.pause(),
            TweenKind::Wait | TweenKind::Property(_) => {}
        }
    }

    /// 恢复（仅 Paused 时生效）
    pub fn resume(&mut self) {
        if !self.timing.resume() {
            trace!(id = %self.id, state = ?self.timing.state(), "非暂停状态，忽略恢复");
            return;
        }
        match &mut self.kind {
            TweenKind::Sequence(s) => s.resume(),
            TweenKind::Parallel(p) => p.resume(),
            TweenKind::Wait | TweenKind::Property(_) => {}
        }
    }

    /// 重置到 Idle
    ///
    /// 属性 tween 会把起始值写回目标；组倒序重置子 tween。不触发事件。
    pub fn reset(&mut self) {
        match &mut self.kind {
            TweenKind::Wait => {}
            TweenKind::Property(p) => p.on_reset(),
            TweenKind::Sequence(s) => s.reset(),
            TweenKind::Parallel(p) => p.reset(),
        }
        self.timing.reset();
    }

    /// 推进时间
    ///
    /// # 参数
    /// - `dt`: 时间增量（秒）。负数、NaN、无穷大会被忽略
    pub fn update(&mut self, dt: f32) {
        if self.timing.state() != TweenState::Running {
            return;
        }
        if !is_valid_dt(dt) {
            trace!(id = %self.id, dt, "非法 dt，忽略");
            return;
        }

        if self.kind.is_group() {
            self.update_group(dt);
        } else {
            self.update_leaf(dt);
        }
    }

    fn update_leaf(&mut self, dt: f32) {
        let Advance::Stepped {
            loops_completed,
            terminal,
            ..
        } = self.timing.advance(dt)
        else {
            return;
        };

        for index in loops_completed {
            self.observers.emit(TweenEvent::LoopCompleted(index));
        }
        if let TweenKind::Property(p) = &mut self.kind {
            p.on_update(self.timing.eased_progress());
        }
        self.observers
            .emit(TweenEvent::Updated(self.timing.progress()));

        if terminal {
            self.complete();
        }
    }

    fn update_group(&mut self, dt: f32) {
        let Some(dt) = self.timing.absorb_delay(dt) else {
            return;
        };

        let (progress, finished, count) = match &mut self.kind {
            TweenKind::Sequence(s) => {
                s.update(dt);
                (s.progress(), s.is_finished(), s.count())
            }
            TweenKind::Parallel(p) => {
                p.update(dt);
                (p.progress(), p.is_finished(), p.count())
            }
            TweenKind::Wait | TweenKind::Property(_) => return,
        };

        self.timing.record_group_step(dt, progress);
        self.observers
            .emit(TweenEvent::Updated(self.timing.progress()));

        if !finished {
            return;
        }
        // 空组不循环，避免无限循环的空组永远不结束
        if count > 0 && self.timing.has_loops_remaining() {
            let index = self.timing.complete_group_loop();
            self.observers.emit(TweenEvent::LoopCompleted(index));
            self.restart_children();
        } else {
            self.complete();
        }
    }

    fn restart_children(&mut self) {
        match &mut self.kind {
            TweenKind::Sequence(s) => {
                s.reset();
                s.start();
            }
            TweenKind::Parallel(p) => {
                p.reset();
                p.start();
            }
            TweenKind::Wait | TweenKind::Property(_) => {}
        }
    }

    fn complete(&mut self) {
        self.timing.finish();
        debug!(id = %self.id, kind = self.kind.name(), "tween 完成");
        self.observers.emit(TweenEvent::Completed);
    }
}

fn kind_mismatch(expected: &'static str, actual: &TweenKind) -> TweenError {
    TweenError::KindMismatch {
        expected,
        actual: actual.name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BindError, ConstructError};
    use crate::target::PropertyBag;
    use std::cell::RefCell;

    fn recorder(tween: &mut Tween) -> Rc<RefCell<Vec<TweenEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        tween.subscribe(move |e| sink.borrow_mut().push(*e));
        log
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Tween::sequence();
        let b = Tween::sequence();
        assert_ne!(a.id(), b.id());
        assert!(a.id().to_string().starts_with("tween#"));
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            Tween::wait(0.0).unwrap_err(),
            TweenError::Construct(ConstructError::InvalidDuration { duration: 0.0 })
        );
        assert!(Tween::wait(1.0).unwrap().with_delay(-1.0).is_err());
        assert!(Tween::wait(1.0).unwrap().with_loops(-3).is_err());
    }

    #[test]
    fn test_kind_mismatch() {
        let err = Tween::sequence().to(1.0).unwrap_err();
        assert_eq!(
            err,
            TweenError::KindMismatch {
                expected: "property",
                actual: "sequence"
            }
        );

        let err = Tween::wait(1.0)
            .unwrap()
            .with_child(Tween::sequence())
            .unwrap_err();
        assert_eq!(
            err,
            TweenError::KindMismatch {
                expected: "group",
                actual: "wait"
            }
        );
    }

    #[test]
    fn test_property_ref_shares_target() {
        let bag = PropertyBag::new().with("x", 0.0).shared();
        let first = Tween::property(&bag, "x", 1.0).unwrap();
        let weak = first.as_property().unwrap().target().clone();

        let mut second = Tween::property_ref(&weak, "x", 1.0).unwrap().to(2.0).unwrap();
        second.start();
        second.update(0.5);
        assert_eq!(bag.value_f64("x"), Some(1.0));

        drop(bag);
        assert!(matches!(
            Tween::property_ref(&weak, "x", 1.0),
            Err(TweenError::Bind(BindError::TargetDropped { .. }))
        ));
    }

    #[test]
    fn test_leaf_event_order() {
        let mut tween = Tween::wait(1.0).unwrap();
        let log = recorder(&mut tween);

        tween.start();
        tween.update(0.5);
        tween.update(0.5);
        tween.update(0.5);

        assert_eq!(
            *log.borrow(),
            vec![
                TweenEvent::Started,
                TweenEvent::Updated(0.5),
                TweenEvent::Updated(1.0),
                TweenEvent::Completed,
            ]
        );
        assert!(tween.is_finished());
    }

    #[test]
    fn test_started_observer_write_becomes_from() {
        let bag = PropertyBag::new().with("x", 5.0).shared();
        let writer = bag.clone();
        let mut tween = Tween::property(&bag, "x", 1.0)
            .unwrap()
            .to(200.0)
            .unwrap()
            .from_current()
            .unwrap()
            .on_event(move |e| {
                if *e == TweenEvent::Started {
                    writer.set_property("x", Number::Double(100.0));
                }
            });

        tween.start();
        assert_eq!(
            tween.as_property().unwrap().from_value(),
            Some(Number::Double(100.0))
        );

        tween.update(0.5);
        assert_eq!(bag.value_f64("x"), Some(150.0));
    }

    #[test]
    fn test_update_before_start_is_noop() {
        let mut tween = Tween::wait(1.0).unwrap();
        let log = recorder(&mut tween);
        tween.update(0.5);
        assert_eq!(tween.state(), TweenState::Idle);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_stop_does_not_complete() {
        let bag = PropertyBag::new().with("x", 0.0).shared();
        let mut tween = Tween::property(&bag, "x", 1.0)
            .unwrap()
            .from(0.0)
            .unwrap()
            .to(10.0)
            .unwrap();
        let log = recorder(&mut tween);

        tween.start();
        tween.update(0.5);
        tween.stop();

        assert_eq!(tween.state(), TweenState::Idle);
        assert!(!log.borrow().contains(&TweenEvent::Completed));
        // 停止不回写起始值
        assert_eq!(bag.value_f64("x"), Some(5.0));
    }

    #[test]
    fn test_group_pause_propagates() {
        let mut group = Tween::parallel_of([Tween::wait(1.0).unwrap(), Tween::wait(2.0).unwrap()]);
        group.start();
        group.pause();
        assert!(group.children().iter().all(|c| c.is_paused()));

        group.update(1.0);
        assert!(group.children().iter().all(|c| c.progress() == 0.0));

        group.resume();
        assert!(group.children().iter().all(|c| c.is_running()));
    }

    #[test]
    fn test_group_delay() {
        let mut group = Tween::sequence_of([Tween::wait(1.0).unwrap()])
            .with_delay(0.5)
            .unwrap();
        group.start();

        group.update(0.25);
        assert_eq!(group.children()[0].progress(), 0.0);

        group.update(0.75);
        assert_eq!(group.children()[0].progress(), 0.5);
    }

    #[test]
    fn test_group_loops_restart_children() {
        let mut group = Tween::sequence_of([Tween::wait(1.0).unwrap()])
            .with_loops(1)
            .unwrap();
        let log = recorder(&mut group);
        group.start();

        group.update(1.0);
        assert!(!group.is_finished());
        assert!(group.children()[0].is_running());

        group.update(1.0);
        assert!(group.is_finished());
        assert_eq!(group.state(), TweenState::Finished);

        let loops: Vec<_> = log
            .borrow()
            .iter()
            .filter(|e| matches!(e, TweenEvent::LoopCompleted(_)))
            .copied()
            .collect();
        assert_eq!(loops, vec![TweenEvent::LoopCompleted(0)]);
    }

    #[test]
    fn test_empty_group_completes_on_first_update() {
        let mut group = Tween::sequence().with_loops(-1).unwrap();
        let log = recorder(&mut group);
        group.start();
        group.update(0.1);

        assert_eq!(group.state(), TweenState::Finished);
        assert_eq!(log.borrow().last(), Some(&TweenEvent::Completed));
    }

    #[test]
    fn test_find_nested() {
        let inner = Tween::wait(1.0).unwrap();
        let inner_id = inner.id();
        let mut root = Tween::sequence_of([Tween::parallel_of([inner])]);

        assert!(root.find(inner_id).is_some());
        root.find_mut(inner_id)
            .unwrap()
            .timing_mut()
            .set_duration(2.0)
            .unwrap();
        assert_eq!(root.find(inner_id).unwrap().timing().duration(), 2.0);
    }

    #[test]
    fn test_total_duration() {
        let wait = Tween::wait(1.0)
            .unwrap()
            .with_delay(0.5)
            .unwrap()
            .with_loops(2)
            .unwrap();
        assert_eq!(wait.total_duration(), Some(3.5));

        let seq = Tween::sequence_of([Tween::wait(1.0).unwrap(), Tween::wait(2.0).unwrap()]);
        assert_eq!(seq.total_duration(), Some(3.0));

        let par = Tween::parallel_of([
            Tween::wait(1.0).unwrap(),
            Tween::wait(1.0).unwrap().with_loops(-1).unwrap(),
        ]);
        assert_eq!(par.total_duration(), None);
    }
}
