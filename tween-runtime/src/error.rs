//! # Error 模块
//!
//! 定义 tween-runtime 中使用的错误类型。
//!
//! 只有构造和绑定阶段会返回错误；每帧的 `update` 路径是全函数，
//! 目标失效、非法 `dt` 等情况一律按 no-op 处理。

use thiserror::Error;

use crate::value::NumberKind;

/// 构造错误
///
/// 在 builder 调用时立即返回，不会延迟到 `update`。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstructError {
    /// 时长必须为正
    #[error("时长必须大于 0，实际为 {duration}")]
    InvalidDuration { duration: f32 },

    /// 延迟不能为负
    #[error("延迟不能小于 0，实际为 {delay}")]
    InvalidDelay { delay: f32 },

    /// 循环次数非法
    #[error("循环次数必须 >= -1，实际为 {loop_count}")]
    InvalidLoopCount { loop_count: i32 },

    /// 时间缩放非法
    #[error("时间缩放必须是非负有限数，实际为 {time_scale}")]
    InvalidTimeScale { time_scale: f32 },
}

/// 绑定错误
///
/// 设置目标、`from`、`to` 时检查一次，之后每帧不再重复检查。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindError {
    /// 目标上没有该属性
    #[error("属性 '{property}' 不存在，可用属性: {available:?}")]
    PropertyNotFound {
        property: String,
        available: Vec<String>,
    },

    /// 值类型与属性类型不兼容
    #[error("属性 '{property}' 类型为 {expected}，无法接受 {actual}")]
    TypeMismatch {
        property: String,
        expected: NumberKind,
        actual: NumberKind,
    },

    /// 整数值超出目标类型范围
    #[error("属性 '{property}' 的值超出 {expected} 的范围")]
    OutOfRange {
        property: String,
        expected: NumberKind,
    },

    /// 绑定时目标已被销毁
    #[error("绑定属性 '{property}' 时目标已失效")]
    TargetDropped { property: String },
}

/// tween-runtime 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TweenError {
    /// 构造错误
    #[error("构造错误: {0}")]
    Construct(#[from] ConstructError),

    /// 绑定错误
    #[error("绑定错误: {0}")]
    Bind(#[from] BindError),

    /// 对错误种类的 tween 调用了专属操作（例如对 Sequence 设置 `to`）
    #[error("操作需要 {expected}，实际为 {actual}")]
    KindMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

/// Result 类型别名
pub type TweenResult<T> = Result<T, TweenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TweenError::from(ConstructError::InvalidDuration { duration: 0.0 });
        assert_eq!(err.to_string(), "构造错误: 时长必须大于 0，实际为 0");

        let err = TweenError::from(BindError::TypeMismatch {
            property: "x".to_string(),
            expected: NumberKind::Int,
            actual: NumberKind::Double,
        });
        assert_eq!(err.to_string(), "绑定错误: 属性 'x' 类型为 int，无法接受 double");
    }
}
