//! `burrow-compress`：隧道负载的压缩编解码层。
//!
//! # 模块定位（Why）
//! - 负载在进入传输层之前可按链路协商的算法压缩，接收侧按同一算法
//!   还原；本 crate 提供这一步的调度器 [`CodecDispatcher`] 与配套的
//!   容量上界、压缩价值判定等辅助函数。
//! - 算法标识（线路字节）与错误码定义在 `burrow-core`，线路封装
//!   （长度前缀、算法号标注）属于传输层，均不在本 crate 范围内。
//!
//! # 设计概要（How）
//! - 调度器按 [`CompressionAlgorithm`] 分发到后端：`none` 仅做容量
//!   检查加拷贝，`gzip` 走 `flate2` 的单趟 zlib 流，`lz4` 走 `lz4`
//!   crate 的块接口（可经 `lz4` 特性裁剪）。
//! - 全部操作写入调用方提供的输出缓冲，成功返回写入字节数，失败
//!   返回携带稳定错误码的 [`CoreError`](burrow_core::CoreError)，
//!   绝不终止进程。
//! - 诊断端点以注入方式持有（[`CodecDispatcher::with_logger`]），
//!   未注入时完全静默，两种形态的字节行为一致。
//!
//! # 命名约定（Consistency）
//! - “压缩（compress）/解压（decompress）”成对出现；
//! - 上界函数 [`max_compressed_size`] 的返回值是调用压缩前应准备的
//!   输出容量下限，命名沿用各算法的 worst-case bound 惯例。

mod dispatch;
mod gzip;
#[cfg(feature = "lz4")]
mod lz4;

pub use burrow_core::CompressionAlgorithm;
pub use dispatch::{CodecDispatcher, MIN_COMPRESS_LEN, max_compressed_size, should_compress};
