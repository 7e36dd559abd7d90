//! # Value 模块
//!
//! 可动画的数值类型。
//!
//! 属性值只允许数值：32/64 位有符号、无符号整数与单/双精度浮点。
//! 插值在 `from` 的数值类型下进行，整数结果四舍五入。

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::BindError;

/// 数值类型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberKind {
    /// 有符号整数
    Int,
    /// 无符号整数
    UInt,
    /// 单精度浮点
    Float,
    /// 双精度浮点
    Double,
}

impl NumberKind {
    /// 是否为整数类型
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Int | Self::UInt)
    }

    /// 类型名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::UInt => "uint",
            Self::Float => "float",
            Self::Double => "double",
        }
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 数值
///
/// JSON 形式为外部标签：`{"int": 3}`、`{"double": 1.5}`。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f32),
    Double(f64),
}

impl Number {
    /// 获取数值类型
    pub fn kind(&self) -> NumberKind {
        match self {
            Self::Int(_) => NumberKind::Int,
            Self::UInt(_) => NumberKind::UInt,
            Self::Float(_) => NumberKind::Float,
            Self::Double(_) => NumberKind::Double,
        }
    }

    /// 转为 f64（用于插值计算）
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Int(v) => v as f64,
            Self::UInt(v) => v as f64,
            Self::Float(v) => v as f64,
            Self::Double(v) => v,
        }
    }

    /// 由 f64 构造指定类型的数值
    ///
    /// 整数四舍五入，超出范围时饱和；无符号整数下限为 0。
    pub fn from_f64(kind: NumberKind, value: f64) -> Self {
        match kind {
            NumberKind::Int => Self::Int(value.round() as i64),
            NumberKind::UInt => Self::UInt(value.round().max(0.0) as u64),
            NumberKind::Float => Self::Float(value as f32),
            NumberKind::Double => Self::Double(value),
        }
    }

    /// 线性插值：`from + (to - from) * t`，结果类型与 `from` 相同
    ///
    /// `t` 不做截断，允许 back/elastic 等缓动越界。
    pub fn lerp(from: Number, to: Number, t: f32) -> Number {
        match (from, to) {
            (Self::Float(a), Self::Float(b)) => Self::Float(a + (b - a) * t),
            (Self::Double(a), Self::Double(b)) => Self::Double(a + (b - a) * t as f64),
            _ => {
                let a = from.as_f64();
                let b = to.as_f64();
                Self::from_f64(from.kind(), a + (b - a) * t as f64)
            }
        }
    }

    /// 相对偏移：`self + delta`，结果类型与 `self` 相同
    pub fn offset(self, delta: Number) -> Number {
        match (self, delta) {
            (Self::Int(a), Self::Int(b)) => Self::Int(a.saturating_add(b)),
            (Self::UInt(a), Self::UInt(b)) => Self::UInt(a.saturating_add(b)),
            (Self::Float(a), Self::Float(b)) => Self::Float(a + b),
            (Self::Double(a), Self::Double(b)) => Self::Double(a + b),
            _ => Self::from_f64(self.kind(), self.as_f64() + delta.as_f64()),
        }
    }

    /// 按属性类型转换数值
    ///
    /// 转换策略偏向放宽：
    /// - 整数 → 浮点：接受
    /// - float ↔ double：接受
    /// - 整数 ↔ 整数：值在范围内时接受
    /// - 浮点 → 整数：拒绝
    pub fn coerce(self, property: &str, kind: NumberKind) -> Result<Number, BindError> {
        if self.kind() == kind {
            return Ok(self);
        }

        let out_of_range = || BindError::OutOfRange {
            property: property.to_string(),
            expected: kind,
        };

        match (self, kind) {
            (Self::Int(v), NumberKind::UInt) => {
                u64::try_from(v).map(Self::UInt).map_err(|_| out_of_range())
            }
            (Self::UInt(v), NumberKind::Int) => {
                i64::try_from(v).map(Self::Int).map_err(|_| out_of_range())
            }
            (_, NumberKind::Float) => Ok(Self::Float(self.as_f64() as f32)),
            (_, NumberKind::Double) => Ok(Self::Double(self.as_f64())),
            _ => Err(BindError::TypeMismatch {
                property: property.to_string(),
                expected: kind,
                actual: self.kind(),
            }),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::UInt(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Double(v) => write!(f, "{}", v),
        }
    }
}

impl From<i32> for Number {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for Number {
    fn from(v: u32) -> Self {
        Self::UInt(v as u64)
    }
}

impl From<u64> for Number {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<f32> for Number {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_keeps_from_kind() {
        assert_eq!(
            Number::lerp(Number::Double(0.0), Number::Double(10.0), 0.5),
            Number::Double(5.0)
        );
        assert_eq!(
            Number::lerp(Number::Float(2.0), Number::Float(4.0), 0.5),
            Number::Float(3.0)
        );
        // 整数四舍五入
        assert_eq!(
            Number::lerp(Number::Int(0), Number::Int(3), 0.5),
            Number::Int(2)
        );
        assert_eq!(
            Number::lerp(Number::Int(10), Number::Int(0), 0.26),
            Number::Int(7)
        );
    }

    #[test]
    fn test_lerp_unsigned_clamps_at_zero() {
        // back 缓动可能产生负的中间值
        assert_eq!(
            Number::lerp(Number::UInt(0), Number::UInt(10), -0.2),
            Number::UInt(0)
        );
    }

    #[test]
    fn test_lerp_allows_overshoot() {
        assert_eq!(
            Number::lerp(Number::Double(0.0), Number::Double(10.0), 1.5),
            Number::Double(15.0)
        );
    }

    #[test]
    fn test_offset() {
        assert_eq!(Number::Double(5.0).offset(Number::Double(3.0)), Number::Double(8.0));
        assert_eq!(Number::Int(i64::MAX).offset(Number::Int(1)), Number::Int(i64::MAX));
        assert_eq!(Number::Int(5).offset(Number::Double(2.4)), Number::Int(7));
    }

    #[test]
    fn test_coerce_widening() {
        assert_eq!(
            Number::Int(3).coerce("x", NumberKind::Double),
            Ok(Number::Double(3.0))
        );
        assert_eq!(
            Number::UInt(3).coerce("x", NumberKind::Float),
            Ok(Number::Float(3.0))
        );
        assert_eq!(
            Number::Double(0.5).coerce("x", NumberKind::Float),
            Ok(Number::Float(0.5))
        );
        assert_eq!(
            Number::Float(0.5).coerce("x", NumberKind::Double),
            Ok(Number::Double(0.5))
        );
    }

    #[test]
    fn test_coerce_integers() {
        assert_eq!(
            Number::Int(7).coerce("count", NumberKind::UInt),
            Ok(Number::UInt(7))
        );
        assert!(matches!(
            Number::Int(-1).coerce("count", NumberKind::UInt),
            Err(BindError::OutOfRange { .. })
        ));
        assert!(matches!(
            Number::UInt(u64::MAX).coerce("count", NumberKind::Int),
            Err(BindError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_coerce_rejects_narrowing() {
        let err = Number::Double(1.5).coerce("count", NumberKind::Int).unwrap_err();
        assert_eq!(
            err,
            BindError::TypeMismatch {
                property: "count".to_string(),
                expected: NumberKind::Int,
                actual: NumberKind::Double,
            }
        );
    }

    #[test]
    fn test_serde_tagged() {
        let n: Number = serde_json::from_str(r#"{"int": 3}"#).unwrap();
        assert_eq!(n, Number::Int(3));
        let json = serde_json::to_string(&Number::Double(1.5)).unwrap();
        assert_eq!(json, r#"{"double":1.5}"#);
    }
}
