use super::attributes::AttributeSet;
use crate::Error;
use alloc::borrow::Cow;

/// 日志级别枚举。
///
/// # 契约说明（What）
/// - 六级语义与主流结构化日志系统对齐：`Trace`/`Debug` 面向开发期诊断，
///   `Info` 为业务常规事件，`Warn` 为潜在风险，`Error` 为故障，
///   `Fatal` 为不可恢复错误；
/// - **后置条件**：导出端可依据级别映射到目标系统的告警阈值。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogSeverity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// 单条结构化日志记录。
///
/// # 设计背景（Why）
/// - 压缩路径原本以变参格式串上报字节计数等诊断信息，本契约改以
///   "静态消息 + 结构化字段"表达，字段可被机读聚合而非正则提取。
///
/// # 逻辑解析（How）
/// - `message` 使用 `Cow<'a, str>`：固定文案走借用，动态拼接走拥有；
/// - `target` 标记来源分类（如 `"burrow_compress"`），便于按模块过滤；
/// - `error` 以引用携带实现 [`Error`] 的对象，用于根因回溯，不做克隆。
///
/// # 契约说明（What）
/// - **前置条件**：`attributes` 切片须在 [`Logger::log`] 返回前保持有效；
/// - **后置条件**：记录提交后视为不可变，实现方不得改写引用数据。
#[derive(Debug)]
pub struct LogRecord<'a> {
    pub message: Cow<'a, str>,
    pub severity: LogSeverity,
    pub target: Option<Cow<'a, str>>,
    pub error: Option<&'a dyn Error>,
    pub attributes: AttributeSet<'a>,
}

impl<'a> LogRecord<'a> {
    /// 构建新的日志记录；仅收纳引用，不做任何复制。
    pub fn new(
        message: impl Into<Cow<'a, str>>,
        severity: LogSeverity,
        target: Option<impl Into<Cow<'a, str>>>,
        error: Option<&'a dyn Error>,
        attributes: AttributeSet<'a>,
    ) -> Self {
        Self {
            message: message.into(),
            severity,
            target: target.map(Into::into),
            error,
            attributes,
        }
    }
}

/// 诊断端点的核心契约。
///
/// # 设计背景（Why）
/// - 暂存层不持有进程级日志单例：编解码器以注入方式持有端点引用，测试
///   可替换为捕获型桩，宿主可桥接到任意后端；
/// - 日志永不失败、不参与控制流，实现方吞掉自身内部错误。
///
/// # 逻辑解析（How）
/// - `log` 为唯一必需方法；`trace`/`debug`/`error` 等便捷方法在内部构造
///   [`LogRecord`] 再走 `log`，确保所有路径共享同一提交逻辑。
///
/// # 契约说明（What）
/// - **前置条件**：`attributes` 键低基数；`error` 若存在必须满足 [`Error`]；
/// - **后置条件**：实现应尽量非阻塞，必要时把落盘动作移交后台。
pub trait Logger: Send + Sync + 'static {
    /// 提交结构化日志。
    fn log(&self, record: &LogRecord<'_>);

    /// 输出 TRACE 日志（无额外字段）。
    fn trace(&self, message: &str) {
        self.trace_with_fields(message, &[]);
    }

    /// 输出带字段的 TRACE 日志。
    fn trace_with_fields(&self, message: &str, attributes: AttributeSet<'_>) {
        let record = LogRecord::new(
            message,
            LogSeverity::Trace,
            None::<Cow<'_, str>>,
            None,
            attributes,
        );
        self.log(&record);
    }

    /// 输出 DEBUG 日志（无额外字段）。
    fn debug(&self, message: &str) {
        self.debug_with_fields(message, &[]);
    }

    /// 输出带字段的 DEBUG 日志。
    fn debug_with_fields(&self, message: &str, attributes: AttributeSet<'_>) {
        let record = LogRecord::new(
            message,
            LogSeverity::Debug,
            None::<Cow<'_, str>>,
            None,
            attributes,
        );
        self.log(&record);
    }

    /// 输出 ERROR 日志（无额外字段）。
    fn error(&self, message: &str, error: Option<&dyn Error>) {
        self.error_with_fields(message, error, &[]);
    }

    /// 输出带字段的 ERROR 日志。
    fn error_with_fields(
        &self,
        message: &str,
        error: Option<&dyn Error>,
        attributes: AttributeSet<'_>,
    ) {
        let record = LogRecord::new(
            message,
            LogSeverity::Error,
            None::<Cow<'_, str>>,
            error,
            attributes,
        );
        self.log(&record);
    }
}
