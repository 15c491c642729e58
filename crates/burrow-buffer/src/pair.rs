use alloc::borrow::Cow;

use crate::staging::{Direction, StagingBuffer};

/// 一条链路的双向暂存缓冲组。
///
/// # 设计背景（Why）
/// - 隧道中的每条链路都同时需要读、写两个方向的暂存区，两者总是
///   一起建立、一起释放；把它们捆绑成一个结构可以避免上层散落
///   成对的初始化与清理代码。
///
/// # 契约说明（What）
/// - 两个缓冲以同一个链路名称打标签，方向分别为 [`Direction::Read`]
///   与 [`Direction::Write`]；
/// - [`Self::release`] 同时释放两侧存储，重复调用无副作用。
#[derive(Debug, Default)]
pub struct BufferPair {
    /// 接收方向缓冲：暂存从对端收到、等待本地写出的数据。
    pub read: StagingBuffer,
    /// 发送方向缓冲：暂存本地产生、等待发往对端的数据。
    pub write: StagingBuffer,
}

impl BufferPair {
    /// 以链路名称创建一对带标签的空缓冲。
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        Self {
            read: StagingBuffer::with_tag(Direction::Read, name.clone()),
            write: StagingBuffer::with_tag(Direction::Write, name),
        }
    }

    /// 同时释放两个方向的底层存储。
    pub fn release(&mut self) {
        self.read.release();
        self.write.release();
    }
}
