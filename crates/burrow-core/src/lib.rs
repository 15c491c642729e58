#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![doc = "burrow-core: 隧道数据暂存层的共享契约。"]
#![doc = ""]
#![doc = "本 crate 不含任何实现逻辑，只承载三类跨 crate 稳定约定："]
#![doc = "1. 错误模型：`CoreError` 与 `error::codes` 稳定错误码注册表；"]
#![doc = "2. 诊断接口：`Logger` 结构化日志契约，供缓冲与编解码实现以注入方式上报事件；"]
#![doc = "3. 线缆常量：`CompressionAlgorithm` 压缩算法标识，编解码与封帧层必须逐比特一致地共享。"]
#![doc = ""]
#![doc = "定位于 `no_std + alloc`：契约类型依赖 `Box`、`Cow`、`Arc` 等堆分配结构；"]
#![doc = "`std` Feature 仅额外接通 `std::error::Error` 生态，不改变任何契约语义。"]

extern crate alloc;

pub mod codec;
pub mod error;
pub mod observability;
/// 测试桩命名空间，集中维护官方 `Noop` 实现，供各实现 crate 的测试复用。
///
/// # 设计背景（Why）
/// - 避免每个测试文件重复定义零尺寸的空操作日志桩；
/// - 契约演进时单点更新，所有测试同步适配。
///
/// # 使用方式（How）
/// - `use burrow_core::test_stubs::NoopLogger;` 即可获得一个丢弃所有记录的日志端点；
/// - 桩对象在 `no_std + alloc` 环境同样可用。
pub mod test_stubs;

pub use codec::{CompressionAlgorithm, algorithm_name};
pub use error::{CoreError, ErrorCause, Result, codes};
pub use observability::{
    AttributeKey, AttributeSet, AttributeValue, KeyValue, LogRecord, LogSeverity, Logger,
};

#[cfg(feature = "std")]
pub use std::error::Error;

/// `no_std` 轨道下的最小错误抽象，与 `std::error::Error::source` 语义一致。
///
/// # 设计背景（Why）
/// - `std::error::Error` 在 `no_std` 环境不可用，而错误链（根因回溯）是排障的基本诉求；
/// - 通过本地对象安全 trait 供 `ErrorCause` 装箱，`std` 构建时直接换用标准库定义，
///   两条轨道对调用方呈现同一签名。
///
/// # 契约说明（What）
/// - **前置条件**：实现类型需同时提供 `Debug` 与 `Display`，保证日志可读；
/// - **后置条件**：`source` 返回的引用生命周期受限于 `self`，链路在首个不提供
///   `source` 的错误处终止，这是允许的边界情况。
#[cfg(not(feature = "std"))]
pub trait Error: core::fmt::Debug + core::fmt::Display {
    /// 返回当前错误的上游来源，默认无上游。
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

#[cfg(not(feature = "std"))]
impl<E> Error for alloc::boxed::Box<E>
where
    E: Error + ?Sized,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        (**self).source()
    }
}
