//! # Target 模块
//!
//! 可动画目标的接口定义与弱引用句柄。
//!
//! ## 核心概念
//!
//! - `Animatable`: 可动画对象接口（按名称读写数值属性）
//! - `TargetRef`: 对目标的弱引用，目标销毁后读写自动变为 no-op
//! - `PropertyBag`: 基于有序映射的简单实现，便于宿主和测试使用

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::value::Number;

/// 可动画对象接口
///
/// 对象通过实现此 trait 声明自己有哪些数值属性可以被动画。
/// 方法接收 `&self`，对象内部使用 `RefCell` 等方式实现可变性，
/// 这样多个 tween 可以同时持有同一对象的弱引用。
///
/// ## 实现示例
///
/// ```rust,ignore
/// struct Sprite {
///     alpha: Cell<f32>,
///     frame: Cell<u32>,
/// }
///
/// impl Animatable for Sprite {
///     fn get_property(&self, property_id: &str) -> Option<Number> {
///         match property_id {
///             "alpha" => Some(Number::Float(self.alpha.get())),
///             "frame" => Some(Number::UInt(self.frame.get() as u64)),
///             _ => None,
///         }
///     }
///
///     fn set_property(&self, property_id: &str, value: Number) -> bool {
///         match (property_id, value) {
///             ("alpha", Number::Float(v)) => { self.alpha.set(v); true }
///             ("frame", Number::UInt(v)) => { self.frame.set(v as u32); true }
///             _ => false,
///         }
///     }
///
///     fn property_list(&self) -> Vec<String> {
///         vec!["alpha".to_string(), "frame".to_string()]
///     }
/// }
/// ```
pub trait Animatable: 'static {
    /// 获取属性的当前值
    ///
    /// # 返回
    /// - `Some(value)`: 属性存在，返回当前值（其类型即属性类型）
    /// - `None`: 属性不存在
    fn get_property(&self, property_id: &str) -> Option<Number>;

    /// 设置属性的新值
    ///
    /// 传入值的类型与 `get_property` 返回的类型一致。
    ///
    /// # 返回
    /// - `true`: 设置成功
    /// - `false`: 属性不存在或设置失败
    fn set_property(&self, property_id: &str, value: Number) -> bool;

    /// 获取所有可动画属性的列表
    ///
    /// 用于错误信息和调试。
    fn property_list(&self) -> Vec<String>;
}

/// 目标弱引用
///
/// tween 不拥有目标。每次访问先检查目标是否存活，
/// 已销毁时读返回 `None`、写返回 `false`，不会 panic。
#[derive(Clone)]
pub struct TargetRef {
    inner: Weak<dyn Animatable>,
}

impl TargetRef {
    /// 从强引用创建弱引用
    pub fn new(target: &Rc<dyn Animatable>) -> Self {
        Self {
            inner: Rc::downgrade(target),
        }
    }

    /// 目标是否仍然存活
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// 尝试获取强引用
    pub fn upgrade(&self) -> Option<Rc<dyn Animatable>> {
        self.inner.upgrade()
    }

    /// 读取属性，目标已销毁时返回 `None`
    pub fn get(&self, property_id: &str) -> Option<Number> {
        self.inner.upgrade()?.get_property(property_id)
    }

    /// 写入属性，目标已销毁时返回 `false`
    pub fn set(&self, property_id: &str, value: Number) -> bool {
        match self.inner.upgrade() {
            Some(target) => target.set_property(property_id, value),
            None => false,
        }
    }
}

impl fmt::Debug for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetRef")
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// 简单的属性集合
///
/// 按名称保存若干数值属性，属性类型在插入时确定，
/// 之后写入的值会按原类型转换。
#[derive(Debug, Default)]
pub struct PropertyBag {
    values: RefCell<BTreeMap<String, Number>>,
}

impl PropertyBag {
    /// 创建空的属性集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加属性（builder）
    pub fn with(self, property_id: impl Into<String>, value: impl Into<Number>) -> Self {
        self.values.borrow_mut().insert(property_id.into(), value.into());
        self
    }

    /// 包装为共享引用
    pub fn shared(self) -> Rc<Self> {
        Rc::new(self)
    }

    /// 读取属性值
    pub fn value(&self, property_id: &str) -> Option<Number> {
        self.values.borrow().get(property_id).copied()
    }

    /// 读取属性值并转为 f64
    pub fn value_f64(&self, property_id: &str) -> Option<f64> {
        self.value(property_id).map(|v| v.as_f64())
    }

    /// 当前所有属性的快照
    pub fn snapshot(&self) -> BTreeMap<String, Number> {
        self.values.borrow().clone()
    }
}

impl Animatable for PropertyBag {
    fn get_property(&self, property_id: &str) -> Option<Number> {
        self.value(property_id)
    }

    fn set_property(&self, property_id: &str, value: Number) -> bool {
        let mut values = self.values.borrow_mut();
        match values.get_mut(property_id) {
            Some(slot) => match value.coerce(property_id, slot.kind()) {
                Ok(value) => {
                    *slot = value;
                    true
                }
                Err(_) => false,
            },
            None => false,
        }
    }

    fn property_list(&self) -> Vec<String> {
        self.values.borrow().keys().cloned().collect()
    }
}
