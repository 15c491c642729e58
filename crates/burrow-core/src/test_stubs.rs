use crate::observability::{LogRecord, Logger};

/// 丢弃一切记录的空操作日志端点。
///
/// # 设计背景（Why）
/// - 大量测试只关心被测对象的字节行为，不关心诊断输出；统一提供零尺寸桩，
///   避免各测试文件重复定义；
/// - 也可作为宿主"显式静默"的合法配置，而非以 `Option` 的缺省语义兜底。
///
/// # 契约说明（What）
/// - **后置条件**：`log` 不产生任何可观察副作用，调用开销可忽略。
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _record: &LogRecord<'_>) {}
}
