//! # Scene 模块
//!
//! JSON 场景描述：一组具名目标对象和一棵 tween 时间线。
//!
//! ```json
//! {
//!   "name": "slide-in",
//!   "targets": { "panel": { "x": -200.0, "alpha": 0.0 } },
//!   "timeline": [
//!     { "type": "sequence", "children": [
//!       { "type": "property", "target": "panel", "property": "x", "duration": 0.5, "to": 0.0,
//!         "easing": "ease_out_quad" },
//!       { "type": "wait", "duration": 0.2 },
//!       { "type": "property", "target": "panel", "property": "alpha", "duration": 0.3, "to": 1.0 }
//!     ] }
//!   ]
//! }
//! ```
//!
//! 属性值可以写成普通 JSON 数字（整数视为 int，小数视为 double），
//! 也可以写成带类型标签的形式，如 `{"uint": 3}`、`{"float": 0.5}`。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, info};
use tween_runtime::{EasingFunction, LoopMode, Number, PropertyBag, Tween, TweenError};

/// 场景错误
#[derive(Error, Debug)]
pub enum SceneError {
    /// 读取失败
    #[error("场景文件读取失败: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 解析失败
    #[error("场景格式错误: {0}")]
    Parse(#[from] serde_json::Error),

    /// 时间线引用了不存在的目标
    #[error("{path}: 目标 '{target}' 不存在")]
    UnknownTarget { path: String, target: String },

    /// tween 构建失败
    #[error("{path}: {source}")]
    Build {
        path: String,
        #[source]
        source: TweenError,
    },
}

/// 场景中的数值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SceneNumber {
    /// 普通整数
    Integer(i64),
    /// 普通小数
    Decimal(f64),
    /// 带类型标签的数值
    Typed(Number),
}

impl From<SceneNumber> for Number {
    fn from(value: SceneNumber) -> Self {
        match value {
            SceneNumber::Integer(v) => Number::Int(v),
            SceneNumber::Decimal(v) => Number::Double(v),
            SceneNumber::Typed(v) => v,
        }
    }
}

/// 场景文件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    /// 场景名称
    #[serde(default)]
    pub name: Option<String>,

    /// 目标对象：名称 -> 属性名 -> 初始值
    #[serde(default)]
    pub targets: BTreeMap<String, BTreeMap<String, SceneNumber>>,

    /// 顶层 tween，每一项单独注册到管理器
    #[serde(default)]
    pub timeline: Vec<TimelineNode>,
}

/// 时间线节点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineNode {
    /// 节点种类
    #[serde(flatten)]
    pub kind: NodeKind,

    /// 报告中使用的名称
    #[serde(default)]
    pub label: Option<String>,

    /// 延迟（秒）
    #[serde(default)]
    pub delay: f32,

    /// 循环次数（-1 为无限）
    #[serde(default)]
    pub loops: i32,

    /// 循环模式
    #[serde(default)]
    pub loop_mode: LoopMode,

    /// 缓动函数（组忽略）
    #[serde(default)]
    pub easing: EasingFunction,

    /// 注册时是否自动启动（只对顶层节点有意义）
    #[serde(default = "default_auto_start")]
    pub auto_start: bool,
}

fn default_auto_start() -> bool {
    true
}

/// 节点种类
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// 等待
    Wait { duration: f32 },

    /// 属性插值
    Property {
        target: String,
        property: String,
        duration: f32,
        #[serde(default)]
        from: Option<SceneNumber>,
        #[serde(default)]
        to: Option<SceneNumber>,
        /// 相对偏移（与 `to` 互斥，同时给出时以 `by` 为准）
        #[serde(default)]
        by: Option<SceneNumber>,
        /// 启动时以当前值为起点
        #[serde(default)]
        from_current: bool,
    },

    /// 顺序组
    Sequence { children: Vec<TimelineNode> },

    /// 并行组
    Parallel { children: Vec<TimelineNode> },
}

/// 场景中的目标对象
#[derive(Debug, Default)]
pub struct SceneTargets {
    objects: BTreeMap<String, Rc<PropertyBag>>,
}

impl SceneTargets {
    /// 按场景描述创建目标
    pub fn from_file(targets: &BTreeMap<String, BTreeMap<String, SceneNumber>>) -> Self {
        let objects = targets
            .iter()
            .map(|(name, properties)| {
                let bag = properties
                    .iter()
                    .fold(PropertyBag::new(), |bag, (key, value)| {
                        bag.with(key.clone(), Number::from(*value))
                    });
                (name.clone(), bag.shared())
            })
            .collect();
        Self { objects }
    }

    pub fn get(&self, name: &str) -> Option<&Rc<PropertyBag>> {
        self.objects.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// 所有目标当前属性值的快照
    pub fn snapshot(&self) -> BTreeMap<String, BTreeMap<String, Number>> {
        self.objects
            .iter()
            .map(|(name, bag)| (name.clone(), bag.snapshot()))
            .collect()
    }
}

/// 已构建的顶层 tween
#[derive(Debug)]
pub struct SceneEntry {
    /// 报告中使用的名称
    pub label: String,
    pub tween: Tween,
}

/// 已加载的场景
#[derive(Debug)]
pub struct Scene {
    pub name: Option<String>,
    pub targets: SceneTargets,
    pub entries: Vec<SceneEntry>,
}

impl Scene {
    /// 从文件加载场景
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let scene = Self::from_json(&content)?;
        info!(
            path = %path.display(),
            targets = scene.targets.len(),
            tweens = scene.entries.len(),
            "场景加载成功"
        );
        Ok(scene)
    }

    /// 从 JSON 文本构建场景
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let file: SceneFile = serde_json::from_str(json)?;
        Self::build(&file)
    }

    /// 从场景描述构建目标与 tween
    pub fn build(file: &SceneFile) -> Result<Self, SceneError> {
        let targets = SceneTargets::from_file(&file.targets);

        let entries = file
            .timeline
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let path = format!("timeline[{index}]");
                let tween = build_node(node, &targets, &path)?
                    .with_auto_start(node.auto_start);
                let label = node.label.clone().unwrap_or(path);
                Ok(SceneEntry { label, tween })
            })
            .collect::<Result<Vec<_>, SceneError>>()?;

        Ok(Self {
            name: file.name.clone(),
            targets,
            entries,
        })
    }
}

/// 递归构建节点
fn build_node(node: &TimelineNode, targets: &SceneTargets, path: &str) -> Result<Tween, SceneError> {
    let wrap = |source: TweenError| SceneError::Build {
        path: path.to_string(),
        source,
    };

    let tween = match &node.kind {
        NodeKind::Wait { duration } => Tween::wait(*duration).map_err(wrap)?,
        NodeKind::Property {
            target,
            property,
            duration,
            from,
            to,
            by,
            from_current,
        } => {
            let object = targets.get(target).ok_or_else(|| SceneError::UnknownTarget {
                path: path.to_string(),
                target: target.clone(),
            })?;
            build_property(object, property, *duration, *from, *to, *by, *from_current)
                .map_err(wrap)?
        }
        NodeKind::Sequence { children } => {
            let mut group = Tween::sequence();
            for (index, child) in children.iter().enumerate() {
                let child = build_node(child, targets, &format!("{path}.children[{index}]"))?;
                group.add_child(child).map_err(wrap)?;
            }
            group
        }
        NodeKind::Parallel { children } => {
            let mut group = Tween::parallel();
            for (index, child) in children.iter().enumerate() {
                let child = build_node(child, targets, &format!("{path}.children[{index}]"))?;
                group.add_child(child).map_err(wrap)?;
            }
            group
        }
    };

    let tween = tween
        .with_delay(node.delay)
        .and_then(|t| t.with_loops(node.loops))
        .map_err(wrap)?
        .with_loop_mode(node.loop_mode)
        .with_easing(node.easing);

    debug!(path, id = %tween.id(), kind = tween.kind().name(), "节点已构建");
    Ok(tween)
}

fn build_property(
    object: &Rc<PropertyBag>,
    property: &str,
    duration: f32,
    from: Option<SceneNumber>,
    to: Option<SceneNumber>,
    by: Option<SceneNumber>,
    from_current: bool,
) -> Result<Tween, TweenError> {
    let mut tween = Tween::property(object, property, duration)?;
    if let Some(from) = from {
        tween.set_from(from)?;
    }
    match (by, to) {
        (Some(delta), _) => {
            tween.set_delta(delta)?;
        }
        (None, Some(to)) => tween.set_to(to)?,
        (None, None) => {}
    }
    if from_current {
        tween.set_use_current_as_from(true)?;
    }
    Ok(tween)
}
