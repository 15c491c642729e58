use alloc::borrow::Cow;
use alloc::format;
use alloc::vec::Vec;
use core::fmt;
use core::mem::MaybeUninit;

use burrow_core::{CoreError, Result, codes};

/// 暂存缓冲的最小分配容量（2 KiB）。
///
/// 首次扩容或极小的预留请求都会被抬升到该值，避免链路建立初期
/// 因小步扩容而反复搬移数据。
pub const MIN_CAPACITY: usize = 2048;

/// 缓冲在一条链路中承担的方向角色。
///
/// 隧道的每条链路持有一对暂存缓冲：`Read` 侧暂存从对端收到、等待
/// 本地写出的数据，`Write` 侧暂存本地产生、等待发往对端的数据。
/// 方向只用于日志与调试定位，不影响缓冲本身的行为。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// 接收方向：对端 -> 本地。
    Read,
    /// 发送方向：本地 -> 对端。
    Write,
}

impl Direction {
    /// 返回方向的小写名称，供结构化日志作为字段值使用。
    pub const fn name(self) -> &'static str {
        match self {
            Direction::Read => "read",
            Direction::Write => "write",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 缓冲标签：携带链路名称与方向，用于日志和调试断言中的定位。
///
/// 标签不参与任何数据路径，缺失标签的缓冲行为完全一致。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BufferTag {
    name: Cow<'static, str>,
    direction: Direction,
}

impl BufferTag {
    /// 创建标签。`name` 通常是链路标识（如 `"conn-42"`）。
    pub fn new(direction: Direction, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            direction,
        }
    }

    /// 返回标签中的链路名称。
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 返回标签中的方向。
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// `StagingBuffer` 是隧道数据面的可增长字节暂存区。
///
/// # 设计背景（Why）
/// - 链路在“读入 socket”与“写出 socket”之间需要一块弹性的中转区：
///   读侧可能一次收到远多于写侧当前可消化的数据，反之亦然。
/// - 上层收发循环围绕两段式写入展开：先 `reserve` 拿到未初始化的
///   尾部空间直接交给系统调用填充，再按实际读到的字节数 `commit`，
///   避免中间拷贝与整块清零。
///
/// # 逻辑解析（How）
/// - 内部为 `Vec<u8>` 加一个读游标 `head`：`[head, storage.len())`
///   之间是已提交、尚未消费的内容；`storage.len()` 之后是备用容量。
/// - `consume` 只前移游标；当内容全部耗尽时长度与游标同时归零，
///   让既有容量可以立即复用。
/// - 容量不足时先做一次前缀压实（把未消费内容搬到偏移 0 回收游标
///   之前的空间），仍不足才真正扩容：目标取“所需容量、当前容量的
///   两倍、[`MIN_CAPACITY`]”三者的最大值，扩容失败返回
///   `buffer.exhausted` 且已提交内容保持原样。
///
/// # 契约说明（What）
/// - **前置条件**：`commit(n)` 要求调用方已把备用区前 `n` 字节全部
///   初始化，这是方法标记 `unsafe` 的唯一原因。
/// - **后置条件**：任何返回 `Err` 的操作都不改变缓冲内容；越界的
///   `commit`/`consume` 在调试构建下直接断言失败。
///
/// # 风险提示（Trade-offs）
/// - 压实会搬移未消费的字节，`data()` 返回的切片地址在任何一次
///   `reserve`/`append` 之后都不应再被假定有效；
/// - 游标方案使“已消费前缀”在下次压实前占着容量，`capacity()` 因此
///   统计的是整块分配而非立即可写的尾部空间。
#[derive(Default)]
pub struct StagingBuffer {
    storage: Vec<u8>,
    head: usize,
    tag: Option<BufferTag>,
}

impl StagingBuffer {
    /// 创建一个空缓冲，不做任何预分配。
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建带标签的空缓冲，标签会出现在日志与调试断言信息中。
    pub fn with_tag(direction: Direction, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            storage: Vec::new(),
            head: 0,
            tag: Some(BufferTag::new(direction, name)),
        }
    }

    /// 返回缓冲标签（若有）。
    pub fn tag(&self) -> Option<&BufferTag> {
        self.tag.as_ref()
    }

    /// 返回已提交、尚未消费的字节数。
    pub fn len(&self) -> usize {
        self.storage.len() - self.head
    }

    /// 判断缓冲是否没有任何待消费内容。
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 返回当前整块分配的容量（含已消费前缀与尾部备用区）。
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// 返回待消费内容的只读视图。
    ///
    /// 切片从最早提交且尚未消费的字节开始。后续任何可变操作（预留、
    /// 追加、消费）都可能搬移底层存储，调用方不得跨操作持有该切片。
    pub fn data(&self) -> &[u8] {
        &self.storage[self.head..]
    }

    /// 返回尾部备用区的裸视图，不触发扩容。
    ///
    /// 与 [`Self::reserve`] 的区别：本方法只暴露当下已有的备用容量，
    /// 可能为空。写入后仍需通过 [`Self::commit`] 公布初始化的字节数。
    pub fn spare_capacity_mut(&mut self) -> &mut [MaybeUninit<u8>] {
        self.storage.spare_capacity_mut()
    }

    /// 确保尾部至少有 `min_extra` 字节备用区，并返回整个备用区视图。
    ///
    /// # 逻辑解析（How）
    /// - 备用区足够时不做任何搬移，直接返回；
    /// - 不足时先压实前缀回收已消费空间，仍不足才扩容；
    /// - 返回的切片长度保证不小于 `min_extra`，且可能更长，调用方
    ///   可以顺势多写。
    ///
    /// # 契约说明（What）
    /// - **后置条件**：返回 `Err(buffer.exhausted)` 时缓冲内容与容量
    ///   均保持调用前的状态，已提交数据不丢失。
    pub fn reserve(&mut self, min_extra: usize) -> Result<&mut [MaybeUninit<u8>], CoreError> {
        self.validate();
        if self.spare_len() < min_extra {
            self.compact();
            if self.spare_len() < min_extra {
                self.grow(min_extra)?;
            }
        }
        self.validate();
        Ok(self.storage.spare_capacity_mut())
    }

    /// 公布备用区前 `n` 字节已初始化，将其并入待消费内容。
    ///
    /// 拆分 `reserve`/`commit` 两步是为了让系统调用直接写入备用区：
    /// 实际读到多少字节就提交多少，一字节都不预先清零。
    ///
    /// # Safety
    /// 当 `n` 不超过备用区长度时，调用方必须保证 [`Self::reserve`] 或
    /// [`Self::spare_capacity_mut`] 暴露的前 `n` 个字节已全部初始化，
    /// 本方法无法验证初始化事实。`n` 越界属于调用方缺陷但行为是
    /// 确定的：调试构建断言失败，发布构建返回错误，均不触碰任何
    /// 未初始化字节。
    pub unsafe fn commit(&mut self, n: usize) -> Result<(), CoreError> {
        self.validate();
        let spare = self.spare_len();
        debug_assert!(
            n <= spare,
            "提交 {} 字节超出备用区 {}（标签 {:?}）",
            n,
            spare,
            self.tag,
        );
        if n > spare {
            return Err(CoreError::new(
                codes::BUFFER_COMMIT_OVERFLOW,
                format!("提交 {n} 字节超出备用区 {spare}（标签 {:?}）", self.tag),
            ));
        }
        // 上方已确认 n 不越过分配容量，新长度落在已初始化（调用方
        // 契约保证）的范围内，set_len 不会暴露未初始化字节。
        unsafe {
            self.storage.set_len(self.storage.len() + n);
        }
        self.validate();
        Ok(())
    }

    /// 追加一段已初始化的字节，等价于“预留 -> 拷贝 -> 提交”一步完成。
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), CoreError> {
        if bytes.is_empty() {
            return Ok(());
        }
        self.reserve(bytes.len())?;
        // reserve 已保证容量充足，这里的 extend 不会再分配。
        self.storage.extend_from_slice(bytes);
        self.validate();
        Ok(())
    }

    /// 从前端消费 `n` 字节，之后 [`Self::data`] 从未消费的剩余部分开始。
    ///
    /// 消费只前移游标，不搬移字节；当内容全部耗尽时游标与长度一并
    /// 归零，使整块容量重新可写。
    pub fn consume(&mut self, n: usize) -> Result<(), CoreError> {
        self.validate();
        let held = self.len();
        debug_assert!(
            n <= held,
            "消费 {} 字节超出持有量 {}（标签 {:?}）",
            n,
            held,
            self.tag,
        );
        if n > held {
            return Err(CoreError::new(
                codes::BUFFER_CONSUME_OVERFLOW,
                format!("消费 {n} 字节超出持有量 {held}（标签 {:?}）", self.tag),
            ));
        }
        self.head += n;
        if self.head == self.storage.len() {
            self.storage.clear();
            self.head = 0;
        }
        self.validate();
        Ok(())
    }

    /// 清空待消费内容，保留已分配容量与标签，供同一链路复用。
    pub fn reset(&mut self) {
        self.validate();
        self.storage.clear();
        self.head = 0;
    }

    /// 释放底层存储并摘除标签，缓冲回到初始空态。
    ///
    /// 重复调用无副作用；释放后仍可继续使用，首次写入会重新分配。
    pub fn release(&mut self) {
        self.validate();
        self.storage = Vec::new();
        self.head = 0;
        self.tag = None;
    }

    /// 尾部备用区的当前长度。
    fn spare_len(&self) -> usize {
        self.storage.capacity() - self.storage.len()
    }

    /// 把未消费内容搬到偏移 0，回收已消费前缀占用的空间。
    fn compact(&mut self) {
        if self.head == 0 {
            return;
        }
        let held = self.storage.len() - self.head;
        self.storage.copy_within(self.head.., 0);
        self.storage.truncate(held);
        self.head = 0;
    }

    /// 扩容使尾部备用区至少容纳 `min_extra` 字节。
    ///
    /// 目标容量取“现有内容加请求量、当前容量两倍、[`MIN_CAPACITY`]”
    /// 的最大值，摊还后的搬移成本与总写入量成线性关系。
    fn grow(&mut self, min_extra: usize) -> Result<(), CoreError> {
        let needed = self.storage.len().checked_add(min_extra).ok_or_else(|| {
            CoreError::new(
                codes::BUFFER_EXHAUSTED,
                format!("预留 {min_extra} 字节使总容量溢出 usize（标签 {:?}）", self.tag),
            )
        })?;
        let target = needed
            .max(self.storage.capacity().saturating_mul(2))
            .max(MIN_CAPACITY);
        self.storage
            .try_reserve(target - self.storage.len())
            .map_err(|_| {
                CoreError::new(
                    codes::BUFFER_EXHAUSTED,
                    format!("暂存缓冲扩容到 {target} 字节失败（标签 {:?}）", self.tag),
                )
            })
    }

    /// 调试构建下校验内部账目：游标不越过已提交长度，持有量不超容量。
    #[inline]
    fn validate(&self) {
        debug_assert!(
            self.head <= self.storage.len(),
            "暂存缓冲游标越界：head {} 超过已提交长度 {}（标签 {:?}）",
            self.head,
            self.storage.len(),
            self.tag,
        );
        debug_assert!(
            self.len() <= self.capacity(),
            "暂存缓冲账目失衡：持有 {} 字节超过容量 {}（标签 {:?}）",
            self.len(),
            self.capacity(),
            self.tag,
        );
    }
}

impl fmt::Debug for StagingBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StagingBuffer")
            .field("tag", &self.tag)
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("head", &self.head)
            .finish()
    }
}
