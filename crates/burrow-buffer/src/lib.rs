#![cfg_attr(not(feature = "std"), no_std)]
//! `burrow-buffer`：隧道数据面的暂存缓冲实现。
//!
//! # 模块定位（Why）
//! - 链路两端在读写 socket 之间需要一块可增长的字节暂存区，先积累数据再批量转发；
//!   本 crate 提供这块暂存区的实现 [`StagingBuffer`]。
//! - 错误码与日志接口等共享契约定义在 `burrow-core`，本 crate 只关心字节的存取。
//!
//! # 设计概要（How）
//! - [`StagingBuffer`] 以 `Vec<u8>` 加读游标实现：尾部通过“预留 -> 写入 -> 提交”
//!   两段式流程追加数据，头部通过 `consume` 前移游标消费数据。
//! - 扩容采用倍增策略并设有 2 KiB 的容量下限；分配失败返回 `buffer.exhausted`，
//!   已提交内容保持原样。
//! - [`BufferPair`] 把读/写两个方向的缓冲捆绑为一组，对应一条链路的双向暂存。
//!
//! # 命名约定（Consistency）
//! - “预留（reserve）/提交（commit）/消费（consume）”与契约文档用语保持一致；
//! - 缓冲标签 [`BufferTag`] 只服务于日志与调试断言中的定位，不参与数据路径。

extern crate alloc;

mod pair;
mod staging;

pub use pair::BufferPair;
pub use staging::{BufferTag, Direction, MIN_CAPACITY, StagingBuffer};
