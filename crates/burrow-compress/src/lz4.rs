//! lz4 后端：`lz4` crate 块接口的封装，整个模块随 `lz4` 特性裁剪。
//!
//! 块接口不写长度前缀（`prepend_size = false`）：原文长度由上层协议
//! 携带，解压时以输出缓冲的长度回告给解码器。

use burrow_core::{CoreError, Result, codes};

use ::lz4::block::{CompressionMode, compress_to_buffer, decompress_to_buffer};

/// 快速模式与高压缩比模式的分界：级别大于该值走 HC 变体。
const HC_THRESHOLD: u32 = 9;
/// 接受的最低压缩级别。
const MIN_LEVEL: u32 = 1;
/// 接受的最高压缩级别。
const MAX_LEVEL: u32 = 16;

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

/// 压缩 `input` 到 `output`，返回写入字节数。
///
/// 级别钳到 1..=16：不超过 9 时走快速路径（级别本身不再参与），
/// 超过 9 时走高压缩比变体并把级别透传给编码器。
pub(crate) fn compress(level: u32, input: &[u8], output: &mut [u8]) -> Result<usize, CoreError> {
    if input.len() > i32::MAX as usize || output.len() > i32::MAX as usize {
        return Err(CoreError::new(
            codes::CODEC_INVALID_ARGUMENT,
            format!(
                "lz4 块接口的输入与输出都不得超过 {} 字节，实际输入 {} 输出 {}",
                i32::MAX,
                input.len(),
                output.len()
            ),
        ));
    }
    let level = effective_level(level);
    let mode = if level > HC_THRESHOLD {
        CompressionMode::HIGHCOMPRESSION(level as i32)
    } else {
        CompressionMode::DEFAULT
    };
    compress_to_buffer(input, Some(mode), false, output).map_err(|source| {
        CoreError::new(codes::CODEC_FAILURE, "lz4 压缩失败，疑似输出容量不足").with_cause(source)
    })
}

/// 解压 `input` 到 `output`，返回还原的字节数。
///
/// `output` 的长度即解码器可写的原文上限；输入损坏或原文超出该上限
/// 都归入 `codec.failure`。
pub(crate) fn decompress(input: &[u8], output: &mut [u8]) -> Result<usize, CoreError> {
    if input.len() > i32::MAX as usize || output.len() > i32::MAX as usize {
        return Err(CoreError::new(
            codes::CODEC_INVALID_ARGUMENT,
            format!(
                "lz4 块接口的输入与输出都不得超过 {} 字节，实际输入 {} 输出 {}",
                i32::MAX,
                input.len(),
                output.len()
            ),
        ));
    }
    decompress_to_buffer(input, Some(output.len() as i32), output).map_err(|source| {
        CoreError::new(codes::CODEC_FAILURE, "lz4 解压失败，输入损坏或输出容量不足")
            .with_cause(source)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bound(len: usize) -> usize {
        len + len / 255 + 16
    }

    /// 级别钳位：0 抬升到 1，超过 16 压回 16，区间内原样透传。
    #[test]
    fn level_clamp_covers_both_ends() {
        assert_eq!(effective_level(0), 1);
        assert_eq!(effective_level(9), 9);
        assert_eq!(effective_level(16), 16);
        assert_eq!(effective_level(100), 16);
    }

    /// 快速路径与 HC 路径都应产出可完整还原的块。
    #[test]
    fn fast_and_hc_paths_round_trip() {
        let payload: Vec<u8> = b"tunnel payload ".repeat(100);
        for level in [1u32, 12] {
            let mut packed = vec![0u8; bound(payload.len())];
            let written = compress(level, &payload, &mut packed).expect("压缩应成功");
            assert!(written <= bound(payload.len()));

            let mut restored = vec![0u8; payload.len()];
            let size = decompress(&packed[..written], &mut restored).expect("解压应成功");
            assert_eq!(size, payload.len());
            assert_eq!(restored, payload);
        }
    }

    /// 输出上限装不下完整原文时，解码必须报失败而不是截断。
    #[test]
    fn undersized_output_is_a_codec_failure() {
        let payload = vec![0x33u8; 2048];
        let mut packed = vec![0u8; bound(payload.len())];
        let written = compress(1, &payload, &mut packed).expect("压缩应成功");

        let mut half = vec![0u8; payload.len() / 2];
        let err = decompress(&packed[..written], &mut half).expect_err("容量不足应失败");
        assert_eq!(err.code(), codes::CODEC_FAILURE);
    }
}
