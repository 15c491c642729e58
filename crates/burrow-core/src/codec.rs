use crate::{CoreError, codes};
use core::fmt;
use core::str::FromStr;

/// 压缩算法的线缆标识。
///
/// # 设计背景（Why）
/// - 隧道两端在协议头中以单字节交换算法标识，编解码层与封帧层必须逐比特
///   共享同一份判别值，因此该枚举落在契约 crate 而非实现 crate；
/// - `Lz4` 判别值无条件存在：未编入 lz4 编解码器的构建也必须认识 id `2`，
///   才能把对端请求显式拒绝为"不支持"，而不是误判为未知标识。
///
/// # 契约说明（What）
/// - 判别值 `None = 0`、`Gzip = 1`、`Lz4 = 2` 一经发布即冻结；
/// - **前置条件**：来自线缆的原始字节必须经 [`from_wire`](Self::from_wire)
///   校验，不得对任意字节做 `transmute` 式还原；
/// - **后置条件**：[`wire_id`](Self::wire_id) 与 `from_wire` 构成逆映射。
///
/// # 风险提示（Trade-offs）
/// - `Gzip` 的名字沿用既有隧道协议的叫法，实际字节格式为 zlib 封装的
///   deflate 流；重命名会破坏两端日志与配置的对账，故保留。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CompressionAlgorithm {
    /// 不压缩，字节透传。
    None = 0,
    /// zlib 封装的 deflate 流，级别 1-9。
    Gzip = 1,
    /// LZ4 block 格式，级别 1-16，9 以上走高压缩变体。
    Lz4 = 2,
}

impl CompressionAlgorithm {
    /// 按线缆字节还原算法标识；未注册的 id 返回 `None`。
    pub const fn from_wire(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::None),
            1 => Some(Self::Gzip),
            2 => Some(Self::Lz4),
            _ => None,
        }
    }

    /// 返回写入协议头的单字节标识。
    pub const fn wire_id(self) -> u8 {
        self as u8
    }

    /// 返回稳定的人类可读名称，供日志、遥测与配置往返使用。
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gzip => "gzip",
            Self::Lz4 => "lz4",
        }
    }
}

/// 按原始线缆字节查询算法名称，未注册的 id 得到 `"unknown"`。
///
/// # 契约说明（What）
/// - 与 [`CompressionAlgorithm::name`] 不同，本函数面向"对端送来任意字节"
///   的日志场景，永不失败；
/// - **后置条件**：返回值恒为 `'static`，可直接进入结构化日志字段。
pub const fn algorithm_name(id: u8) -> &'static str {
    match CompressionAlgorithm::from_wire(id) {
        Some(algorithm) => algorithm.name(),
        None => "unknown",
    }
}

impl fmt::Display for CompressionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompressionAlgorithm {
    type Err = CoreError;

    /// 从配置字符串解析算法，仅接受 [`name`](Self::name) 输出的拼写。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "gzip" => Ok(Self::Gzip),
            "lz4" => Ok(Self::Lz4),
            _ => Err(CoreError::new(
                codes::CODEC_UNSUPPORTED_ALGORITHM,
                alloc::format!("无法识别的压缩算法名称 {s:?}"),
            )),
        }
    }
}
