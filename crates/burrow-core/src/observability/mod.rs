//! 数据暂存层的诊断契约：结构化日志的最小公共接口。
//!
//! # 设计背景（Why）
//! - 缓冲与编解码实现只把日志当作"永不失败的旁路"上报诊断事件，绝不依赖其
//!   返回值做控制流；因此契约面只需一个对象安全的 [`Logger`] trait；
//! - 不引入进程级单例：实现 crate 以注入方式持有端点引用，测试可替换为
//!   捕获型桩，宿主可桥接到任意日志后端。
//!
//! # 契约说明（What）
//! - [`LogRecord`] 打包消息、级别、可选分类目标、可选错误与结构化字段；
//! - 字段采用借用切片 [`AttributeSet`]，调用路径零分配；
//! - 本层不含分布式链路上下文：暂存层没有跨节点传播语义。

mod attributes;
mod logging;

pub use attributes::{AttributeKey, AttributeSet, AttributeValue, KeyValue};
pub use logging::{LogRecord, LogSeverity, Logger};
