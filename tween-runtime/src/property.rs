//! # Property 模块
//!
//! 属性 tween：把时间轴进度插值成数值，写入目标的命名属性。
//!
//! 目标只以弱引用持有。目标销毁后 `update`/`reset` 照常推进时间，
//! 只是跳过写入。

use std::rc::Rc;

use tracing::{debug, trace};

use crate::error::BindError;
use crate::target::{Animatable, TargetRef};
use crate::value::{Number, NumberKind};

/// 属性绑定与插值端点
#[derive(Debug, Clone)]
pub struct PropertyTween {
    target: TargetRef,
    property: String,
    kind: NumberKind,
    from: Option<Number>,
    to: Option<Number>,
    relative: bool,
    use_current_as_from: bool,
}

impl PropertyTween {
    /// 绑定目标属性
    ///
    /// 属性必须存在于目标上，其当前值的类型即为属性类型。
    pub fn bind(target: &Rc<dyn Animatable>, property: &str) -> Result<Self, BindError> {
        let current = target
            .get_property(property)
            .ok_or_else(|| BindError::PropertyNotFound {
                property: property.to_string(),
                available: target.property_list(),
            })?;

        Ok(Self {
            target: TargetRef::new(target),
            property: property.to_string(),
            kind: current.kind(),
            from: None,
            to: None,
            relative: false,
            use_current_as_from: false,
        })
    }

    /// 通过已有的弱引用绑定
    ///
    /// 目标已销毁时返回 `TargetDropped`。
    pub fn bind_ref(target: &TargetRef, property: &str) -> Result<Self, BindError> {
        let target = target.upgrade().ok_or_else(|| BindError::TargetDropped {
            property: property.to_string(),
        })?;
        Self::bind(&target, property)
    }

    // ========== 访问器 ==========

    pub fn target(&self) -> &TargetRef {
        &self.target
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    /// 属性的数值类型（绑定时确定）
    pub fn kind(&self) -> NumberKind {
        self.kind
    }

    pub fn from_value(&self) -> Option<Number> {
        self.from
    }

    pub fn to_value(&self) -> Option<Number> {
        self.to
    }

    pub fn is_from_set(&self) -> bool {
        self.from.is_some()
    }

    pub fn is_to_set(&self) -> bool {
        self.to.is_some()
    }

    /// `to` 是否仍是待解析的相对偏移
    pub fn is_relative(&self) -> bool {
        self.relative
    }

    pub fn uses_current_as_from(&self) -> bool {
        self.use_current_as_from
    }

    // ========== 设置器 ==========

    /// 设置起始值（按属性类型转换）
    pub fn set_from(&mut self, value: Number) -> Result<(), BindError> {
        self.from = Some(value.coerce(&self.property, self.kind)?);
        Ok(())
    }

    /// 设置目标值（按属性类型转换）
    pub fn set_to(&mut self, value: Number) -> Result<(), BindError> {
        self.to = Some(value.coerce(&self.property, self.kind)?);
        Ok(())
    }

    pub fn set_relative(&mut self, relative: bool) {
        self.relative = relative;
    }

    /// 设置相对偏移，并标记 `to` 为待解析
    ///
    /// 整数属性上的整数偏移不做类型转换，负偏移可以作用于无符号属性，
    /// 解析时饱和到 0。其余情况按属性类型转换。
    pub fn set_delta(&mut self, delta: Number) -> Result<(), BindError> {
        let delta = if self.kind.is_integer() && delta.kind().is_integer() {
            delta
        } else {
            delta.coerce(&self.property, self.kind)?
        };
        self.to = Some(delta);
        self.relative = true;
        Ok(())
    }

    pub fn set_use_current_as_from(&mut self, use_current: bool) {
        self.use_current_as_from = use_current;
    }

    // ========== 生命周期钩子 ==========

    /// `start()` 钩子
    ///
    /// 需要时从目标读取起始值，然后一次性解析相对偏移。
    pub(crate) fn on_start(&mut self) {
        if self.use_current_as_from || self.from.is_none() {
            if let Some(current) = self.target.get(&self.property) {
                match current.coerce(&self.property, self.kind) {
                    Ok(current) => self.from = Some(current),
                    Err(e) => debug!(error = %e, "读取当前值失败，保留原起始值"),
                }
            }
        }

        if !self.relative {
            return;
        }
        if let (Some(from), Some(delta)) = (self.from, self.to) {
            let resolved = from.offset(delta);
            debug!(
                property = %self.property,
                from = %from,
                to = %resolved,
                "相对目标值已解析"
            );
            self.to = Some(resolved);
            self.relative = false;
        }
    }

    /// `update()` 钩子：按缓动后的进度插值并写入目标
    pub(crate) fn on_update(&mut self, eased: f32) {
        let (Some(from), Some(to)) = (self.from, self.to) else {
            return;
        };

        let value = Number::lerp(from, to, eased);
        if !self.target.set(&self.property, value) {
            trace!(property = %self.property, "目标已失效或拒绝写入，跳过");
        }
    }

    /// `reset()` 钩子：把起始值写回目标
    pub(crate) fn on_reset(&mut self) {
        if let Some(from) = self.from {
            self.target.set(&self.property, from);
        }
    }
}
