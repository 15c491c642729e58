//! gzip 后端：`flate2` 低层 API 的单趟 zlib 流封装。
//!
//! 每次调用新建一条流、以 `Finish` 一次性推完：输出容量按上界准备时
//! 必然到达 `StreamEnd`，任何中途状态都按失败处理，不保留跨调用的
//! 流状态。

use burrow_core::{CoreError, Result, codes};
use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};

/// deflate 允许的最低压缩级别。
const MIN_LEVEL: u32 = 1;
/// deflate 允许的最高压缩级别。
const MAX_LEVEL: u32 = 9;

/// 返回钳位后实际生效的压缩级别。
pub(crate) const fn effective_level(level: u32) -> u32 {
    if level < MIN_LEVEL {
        MIN_LEVEL
    } else if level > MAX_LEVEL {
        MAX_LEVEL
    } else {
        level
    }
}

/// 压缩 `input` 到 `output`，级别钳到 1..=9，返回写入字节数。
///
/// 输出容量不足时流无法收尾，与底层流错误一并归入 `codec.failure`。
pub(crate) fn compress(level: u32, input: &[u8], output: &mut [u8]) -> Result<usize, CoreError> {
    let level = effective_level(level);
    let mut stream = Compress::new(Compression::new(level), true);
    match stream.compress(input, output, FlushCompress::Finish) {
        Ok(Status::StreamEnd) => Ok(stream.total_out() as usize),
        Ok(_) => Err(CoreError::new(
            codes::CODEC_FAILURE,
            format!("gzip 压缩未能在 {} 字节输出容量内收尾", output.len()),
        )),
        Err(source) => {
            Err(CoreError::new(codes::CODEC_FAILURE, "gzip 压缩流失败").with_cause(source))
        }
    }
}

/// 解压 `input` 到 `output`，返回还原的字节数。
///
/// 输入被截断、不是合法 zlib 流、或 `output` 装不下完整原文时返回
/// `codec.failure`。
pub(crate) fn decompress(input: &[u8], output: &mut [u8]) -> Result<usize, CoreError> {
    let mut stream = Decompress::new(true);
    match stream.decompress(input, output, FlushDecompress::Finish) {
        Ok(Status::StreamEnd) => Ok(stream.total_out() as usize),
        Ok(_) => Err(CoreError::new(
            codes::CODEC_FAILURE,
            format!("gzip 解压未能在 {} 字节输出容量内收尾", output.len()),
        )),
        Err(source) => {
            Err(CoreError::new(codes::CODEC_FAILURE, "gzip 解压流失败").with_cause(source))
        }
    }
}
