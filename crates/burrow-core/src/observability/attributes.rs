use alloc::{borrow::Cow, string::String};
use core::fmt;

/// 诊断属性键的通用别名。
///
/// # 设计背景（Why）
/// - 键限定为 UTF-8 字符串，采用 `Cow<'a, str>` 兼顾静态常量与运行时拼接，
///   避免热路径上的多余分配。
///
/// # 契约说明（What）
/// - **前置条件**：键名遵循低基数、蛇形命名约定（如 `input_len`）；
/// - **后置条件**：键名在日志导出链路中按原样传递。
pub type AttributeKey<'a> = Cow<'a, str>;

/// 单个结构化键值对。
///
/// # 逻辑解析（How）
/// - `value` 经 [`AttributeValue`] 的 `From` 族自动适配常用标量，调用点写
///   `KeyValue::new("input_len", 4096usize as u64)` 即可；
/// - 借用数据不复制，拥有所有权的数据按值收纳。
///
/// # 契约说明（What）
/// - **前置条件**：同一属性集合内键不重复；
/// - **后置条件**：`KeyValue` 可克隆，可跨线程移动，但不提供同步原语。
#[derive(Clone, Debug, PartialEq)]
pub struct KeyValue<'a> {
    pub key: AttributeKey<'a>,
    pub value: AttributeValue<'a>,
}

impl<'a> KeyValue<'a> {
    /// 构建新的属性键值对。
    pub fn new(key: impl Into<AttributeKey<'a>>, value: impl Into<AttributeValue<'a>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// 属性集合的借用视图。
///
/// # 契约说明（What）
/// - 仅提供只读视图，不承担所有权，生命周期由调用方管理；
/// - **后置条件**：[`Logger`](super::Logger) 实现不得把该引用缓存到调用栈
///   之外；需要留存时必须在 `log` 内部完成复制。
pub type AttributeSet<'a> = &'a [KeyValue<'a>];

/// 诊断属性值的统一枚举。
///
/// # 逻辑解析（How）
/// - 文本用 `Cow<'a, str>` 在借用与拥有之间切换；
/// - 数值经 `From` 转换为零成本或最小成本；无符号整型统一折叠进 `I64`，
///   超出范围时饱和截断。
///
/// # 风险提示（Trade-offs）
/// - 饱和截断以可预期的信息损失换取枚举面最小化；字节计数场景距离
///   `i64::MAX` 尚有数个数量级余量。
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum AttributeValue<'a> {
    Text(Cow<'a, str>),
    Bool(bool),
    F64(f64),
    I64(i64),
}

impl<'a> From<&'a str> for AttributeValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }
}

impl From<String> for AttributeValue<'_> {
    fn from(value: String) -> Self {
        Self::Text(Cow::Owned(value))
    }
}

impl<'a> From<Cow<'a, str>> for AttributeValue<'a> {
    fn from(value: Cow<'a, str>) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for AttributeValue<'_> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for AttributeValue<'_> {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}

impl From<i64> for AttributeValue<'_> {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<i32> for AttributeValue<'_> {
    fn from(value: i32) -> Self {
        Self::I64(value.into())
    }
}

impl From<u64> for AttributeValue<'_> {
    fn from(value: u64) -> Self {
        if value > i64::MAX as u64 {
            AttributeValue::I64(i64::MAX)
        } else {
            AttributeValue::I64(value as i64)
        }
    }
}

impl From<u32> for AttributeValue<'_> {
    fn from(value: u32) -> Self {
        AttributeValue::I64(value as i64)
    }
}

impl fmt::Display for AttributeValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(text) => f.write_str(text),
            AttributeValue::Bool(value) => write!(f, "{value}"),
            AttributeValue::F64(value) => write!(f, "{value}"),
            AttributeValue::I64(value) => write!(f, "{value}"),
        }
    }
}
