use alloc::{borrow::Cow, boxed::Box};
use core::fmt;

/// 全工作区统一的 `Result` 别名，错误位默认 [`CoreError`]。
pub type Result<T, E = CoreError> = core::result::Result<T, E>;

/// `ErrorCause` 封装底层原因，保持 `Send + Sync` 以方便跨线程传递。
pub type ErrorCause = Box<dyn crate::Error + Send + Sync + 'static>;

/// `CoreError` 是数据暂存层所有可观察错误的最终形态。
///
/// # 设计背景（Why）
/// - 缓冲与编解码两个实现 crate 的故障需要合流为统一的稳定错误码，供日志、
///   告警与上层隧道协议做精确分类，而不是解析自由文本；
/// - 本层仍需兼容 `no_std + alloc` 场景，因此不直接绑定 `std::error::Error`，
///   而是经由 crate 根部按 Feature 切换的 [`crate::Error`] 抽象。
///
/// # 逻辑解析（How）
/// - `code` 始终为 `'static` 字符串，承载稳定语义；`message` 面向排障人员；
/// - Builder 风格的 [`with_cause`](Self::with_cause) 叠加底层原因，
///   并通过 `source()` 暴露完整错误链。
///
/// # 契约说明（What）
/// - **前置条件**：`code` 必须取自 [`codes`] 注册表，或遵循 `<域>.<语义>` 约定
///   的自定义码值；`message` 不应包含敏感信息；
/// - **后置条件**：返回值拥有独立所有权，可安全跨线程移动（`Send + Sync`）。
///
/// # 设计取舍与风险（Trade-offs）
/// - 消息采用 `Cow<'static, str>`：静态文案零分配，动态描述仅一次堆分配；
/// - 错误本身不做指标上报或格式化，观测动作由持有 [`crate::Logger`] 的调用方执行。
#[derive(Debug)]
pub struct CoreError {
    code: &'static str,
    message: Cow<'static, str>,
    cause: Option<ErrorCause>,
}

impl CoreError {
    /// 构造核心错误。
    ///
    /// # 契约定义（What）
    /// - **输入参数**：
    ///   - `code`：遵循 `<域>.<语义>` 约定的稳定错误码；
    ///   - `message`：面向排障人员的描述，可为 `&'static str` 或堆分配字符串。
    /// - **前置条件**：调用场景已根据上下文选定合适的错误码；
    /// - **后置条件**：返回的错误不含底层原因，可稍后通过
    ///   [`with_cause`](Self::with_cause) / [`set_cause`](Self::set_cause) 补充。
    ///
    /// # 示例（Examples）
    /// ```rust
    /// use burrow_core::{CoreError, codes};
    ///
    /// let err = CoreError::new(codes::BUFFER_EXHAUSTED, "allocation refused");
    /// assert_eq!(err.code(), codes::BUFFER_EXHAUSTED);
    /// assert!(err.cause().is_none(), "初始错误默认不含底层原因");
    /// ```
    pub fn new(code: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
        }
    }

    /// 附带底层原因并返回新的核心错误。
    pub fn with_cause(mut self, cause: impl crate::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// 为现有错误设置底层原因。
    pub fn set_cause(&mut self, cause: impl crate::Error + Send + Sync + 'static) {
        self.cause = Some(Box::new(cause));
    }

    /// 获取稳定错误码。
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// 获取描述。
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 获取底层原因。
    pub fn cause(&self) -> Option<&ErrorCause> {
        self.cause.as_ref()
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl crate::Error for CoreError {
    fn source(&self) -> Option<&(dyn crate::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|boxed| boxed.as_ref() as &(dyn crate::Error + 'static))
    }
}

/// 稳定错误码注册表。
///
/// # 设计背景（Why）
/// - 错误码是日志聚合与协议层自动处置的匹配键，必须在文档、测试与实现之间
///   保持逐字符一致，故集中为常量而非散落在调用点的字面量。
///
/// # 契约说明（What）
/// - 命名遵循 `<域>.<语义>`，域当前仅有 `buffer` 与 `codec` 两个；
/// - 常量值一经发布即冻结；语义变化时新增码值并弃用旧码，不得原地改写。
pub mod codes {
    /// 暂存缓冲扩容时分配器拒绝分配；已提交的字节保持原样。
    pub const BUFFER_EXHAUSTED: &str = "buffer.exhausted";

    /// `commit` 超出最近一次 `reserve` 授予且尚未提交的空间，属调用方契约违规。
    pub const BUFFER_COMMIT_OVERFLOW: &str = "buffer.commit_overflow";

    /// `consume` 超出当前有效数据长度，属调用方契约违规。
    pub const BUFFER_CONSUME_OVERFLOW: &str = "buffer.consume_overflow";

    /// 压缩输入超出算法可寻址范围等参数性误用。
    pub const CODEC_INVALID_ARGUMENT: &str = "codec.invalid_argument";

    /// 透传（`none`）路径输出容量不足以容纳输入。
    pub const CODEC_OUTPUT_TOO_SMALL: &str = "codec.output_too_small";

    /// 算法标识合法但当前构建未编入对应编解码器。
    pub const CODEC_UNSUPPORTED_ALGORITHM: &str = "codec.unsupported_algorithm";

    /// 底层压缩流未能干净结束，或压缩数据本身损坏。
    pub const CODEC_FAILURE: &str = "codec.failure";
}
