//! # Tween Runtime
//!
//! 帧驱动的补间动画引擎。
//!
//! ## 架构概述
//!
//! `tween-runtime` 是纯逻辑核心，不做 IO，也不关心渲染。
//! 宿主每帧把时间增量交给 [`TweenManager`]，引擎把缓动后的进度写回目标对象：
//!
//! ```text
//! Host                          Runtime
//!   │                              │
//!   │──── update(dt) ────────────►│ TweenManager
//!   │                              │   └─ Tween::update(dt * time_scale)
//!   │                              │        ├─ 叶子：Timing → Easing → Animatable::set_property
//!   │                              │        └─ 组：转交给当前/全部子 tween
//!   │◄─── Vec<ManagerEvent> ──────│
//!   │                              │
//! ```
//!
//! ## 核心类型
//!
//! - [`Tween`]：统一的 tween 句柄（等待、属性、顺序组、并行组）
//! - [`Timing`]：共享的时间轴状态机
//! - [`EasingFunction`]：缓动函数
//! - [`Animatable`]：目标对象需要实现的 trait
//! - [`Number`]：可动画的数值
//! - [`TweenEvent`]：生命周期事件
//!
//! ## 使用示例
//!
//! ```ignore
//! use tween_runtime::{EasingFunction, PropertyBag, Tween, TweenManager};
//!
//! let sprite = PropertyBag::new().with("x", 0.0).shared();
//! let mut manager = TweenManager::new();
//!
//! let slide = Tween::property(&sprite, "x", 0.5)?
//!     .to(100.0)?
//!     .with_easing(EasingFunction::EaseOutQuad)
//!     .with_auto_start(true);
//! manager.add(slide);
//!
//! loop {
//!     for event in manager.update(frame_dt) {
//!         // ...
//!     }
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`easing`]：缓动函数
//! - [`value`]：数值类型与转换规则
//! - [`target`]：目标 trait 与弱引用
//! - [`event`]：生命周期事件与观察者
//! - [`timing`]：时间轴状态机
//! - [`property`]：属性 tween
//! - [`group`]：顺序组与并行组
//! - [`tween`]：统一的 tween 句柄
//! - [`manager`]：顶层管理器
//! - [`config`]：管理器配置
//! - [`error`]：错误类型定义

pub mod config;
pub mod easing;
pub mod error;
pub mod event;
pub mod group;
pub mod manager;
pub mod property;
pub mod target;
pub mod timing;
pub mod tween;
pub mod value;

// 重导出核心类型
pub use config::ManagerConfig;
pub use easing::{EasingFunction, UnknownEasing};
pub use error::{BindError, ConstructError, TweenError, TweenResult};
pub use event::{Observers, SubscriptionId, TweenEvent};
pub use group::{Parallel, Sequence, TweenGroup};
pub use manager::{ManagerEvent, ManagerQueue, TweenManager};
pub use property::PropertyTween;
pub use target::{Animatable, PropertyBag, TargetRef};
pub use timing::{LoopMode, Timing, TweenState};
pub use tween::{Tween, TweenId, TweenKind};
pub use value::{Number, NumberKind};
