use std::fmt;
use std::sync::Arc;

use burrow_core::{
    AttributeSet, CompressionAlgorithm, CoreError, Error, KeyValue, LogRecord, LogSeverity, Logger,
    Result, codes,
};

/// 压缩价值判定的长度阈值（字节）。
///
/// 小于该值的负载压缩头开销往往超过收益，直接明文转发。
pub const MIN_COMPRESS_LEN: usize = 64;

/// 调度器上报日志事件时使用的来源分类标识。
const LOG_TARGET: &str = "burrow_compress";

/// 返回压缩 `input_len` 字节时输出缓冲应准备的最坏情况容量。
///
/// # 契约说明（What）
/// - `none`：直通拷贝，上界即输入长度；
/// - `gzip`：沿用 zlib `compressBound` 的保守公式 `n + n/1000 + 12`；
/// - `lz4`：沿用 `LZ4_compressBound` 公式 `n + n/255 + 16`；未启用
///   `lz4` 特性时退化为输入长度，此时调度器也不会接受该算法。
/// - **后置条件**：以该容量调用 [`CodecDispatcher::compress`] 不会
///   因输出不足而失败。
pub const fn max_compressed_size(algorithm: CompressionAlgorithm, input_len: usize) -> usize {
    match algorithm {
        CompressionAlgorithm::None => input_len,
        CompressionAlgorithm::Gzip => input_len + input_len / 1000 + 12,
        #[cfg(feature = "lz4")]
        CompressionAlgorithm::Lz4 => input_len + input_len / 255 + 16,
        #[cfg(not(feature = "lz4"))]
        CompressionAlgorithm::Lz4 => input_len,
    }
}

/// 判定一段负载是否值得压缩。
///
/// 当前判定只看长度：不足 [`MIN_COMPRESS_LEN`] 一律明文，其余一律
/// 压缩。结果与内容无关。
pub fn should_compress(data: &[u8]) -> bool {
    if data.len() < MIN_COMPRESS_LEN {
        return false;
    }

    // 采样前 16 字节识别常量填充（全 0x00/0xFF 混排）的低熵负载，
    // 采样结果尚未接入判定。
    // TODO(codec): 让 constant_filled 短路返回 false，或删除采样窗口。
    let sample = &data[..16];
    let constant_filled = sample.iter().all(|byte| matches!(byte, 0x00 | 0xFF));
    let _ = constant_filled;

    true
}

/// `CodecDispatcher` 按算法标识把压缩/解压请求分发到具体后端。
///
/// # 设计背景（Why）
/// - 链路两端在握手时协商算法号，数据面此后对每个分片调用同一套
///   压缩/解压入口；把分发收敛到一个类型可以让传输层完全不感知
///   具体算法。
/// - 诊断端点以注入方式持有：宿主可桥接到任意日志后端，测试可换
///   成捕获型桩，未注入时调度器完全静默且字节行为不变。
///
/// # 逻辑解析（How）
/// - `none` 后端只做容量检查加直通拷贝；`gzip` 走 `flate2` 的单趟
///   zlib 流；`lz4` 走块接口，并可经 `lz4` 特性整体裁剪；
/// - 空输入在进入任何后端之前直接成功返回 0 字节，既不校验算法
///   可用性也不产生日志事件；
/// - 成功路径发一条 TRACE 事件（算法、输入/输出长度，压缩方向附带
///   钳位后的生效级别），失败路径发一条携带错误对象的 ERROR 事件，
///   随后原样返回错误；所有事件的 `target` 均为 `"burrow_compress"`。
///
/// # 契约说明（What）
/// - **前置条件**：压缩方向的输出容量应按 [`max_compressed_size`]
///   准备；解压方向应准备协商得到的原文长度。
/// - **后置条件**：失败时输出缓冲内容未定义，调用方不得信任其中
///   的任何字节；错误码见 `burrow-core` 的 `codes` 常量表。
#[derive(Clone, Default)]
pub struct CodecDispatcher {
    logger: Option<Arc<dyn Logger>>,
}

impl CodecDispatcher {
    /// 创建不带诊断端点的静默调度器。
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建注入诊断端点的调度器，所有编解码事件都会上报给 `logger`。
    pub fn with_logger(logger: Arc<dyn Logger>) -> Self {
        Self {
            logger: Some(logger),
        }
    }

    /// 以 `algorithm` 压缩 `input`，写入 `output`，返回写入的字节数。
    ///
    /// # 契约说明（What）
    /// - `level` 会被钳到所选算法的合法区间（gzip 1..=9，lz4 1..=16，
    ///   其中大于 9 走高压缩比变体），`none` 忽略该参数；
    /// - 空输入恒定成功并返回 0，不校验算法可用性；
    /// - `none` 在输出容量不足时返回 `codec.output_too_small`，压缩
    ///   后端自身的失败（含容量不足导致的收尾失败）统一归入
    ///   `codec.failure`。
    pub fn compress(
        &self,
        algorithm: CompressionAlgorithm,
        level: u32,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<usize, CoreError> {
        if input.is_empty() {
            return Ok(0);
        }
        let result = match algorithm {
            CompressionAlgorithm::None => copy_verbatim(input, output),
            CompressionAlgorithm::Gzip => crate::gzip::compress(level, input, output),
            #[cfg(feature = "lz4")]
            CompressionAlgorithm::Lz4 => crate::lz4::compress(level, input, output),
            #[cfg(not(feature = "lz4"))]
            CompressionAlgorithm::Lz4 => Err(unsupported(algorithm)),
        };
        match &result {
            Ok(written) => {
                let effective = effective_level(algorithm, level);
                self.emit_success("压缩完成", algorithm, input.len(), *written, effective);
            }
            Err(error) => self.emit_failure("压缩失败", algorithm, input.len(), error),
        }
        result
    }

    /// 以 `algorithm` 还原 `input`，写入 `output`，返回写入的字节数。
    ///
    /// # 契约说明（What）
    /// - 空输入恒定成功并返回 0；
    /// - 输入不是合法压缩流、或输出容量装不下还原结果时返回
    ///   `codec.failure`，`none` 的容量不足仍为 `codec.output_too_small`。
    pub fn decompress(
        &self,
        algorithm: CompressionAlgorithm,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<usize, CoreError> {
        if input.is_empty() {
            return Ok(0);
        }
        let result = match algorithm {
            CompressionAlgorithm::None => copy_verbatim(input, output),
            CompressionAlgorithm::Gzip => crate::gzip::decompress(input, output),
            #[cfg(feature = "lz4")]
            CompressionAlgorithm::Lz4 => crate::lz4::decompress(input, output),
            #[cfg(not(feature = "lz4"))]
            CompressionAlgorithm::Lz4 => Err(unsupported(algorithm)),
        };
        match &result {
            Ok(written) => self.emit_success("解压完成", algorithm, input.len(), *written, None),
            Err(error) => self.emit_failure("解压失败", algorithm, input.len(), error),
        }
        result
    }

    /// 成功路径的 TRACE 事件；未注入端点时不做任何事。
    fn emit_success(
        &self,
        message: &'static str,
        algorithm: CompressionAlgorithm,
        input_len: usize,
        output_len: usize,
        level: Option<u32>,
    ) {
        let Some(logger) = self.logger.as_deref() else {
            return;
        };
        let algorithm_kv = KeyValue::new("algorithm", algorithm.name());
        let input_kv = KeyValue::new("input_len", input_len as u64);
        let output_kv = KeyValue::new("output_len", output_len as u64);
        match level {
            Some(level) => {
                let attributes = [
                    algorithm_kv,
                    input_kv,
                    output_kv,
                    KeyValue::new("level", u64::from(level)),
                ];
                submit(logger, LogSeverity::Trace, message, None, &attributes);
            }
            None => {
                let attributes = [algorithm_kv, input_kv, output_kv];
                submit(logger, LogSeverity::Trace, message, None, &attributes);
            }
        }
    }

    /// 失败路径的 ERROR 事件，携带错误对象本身；未注入端点时静默。
    fn emit_failure(
        &self,
        message: &'static str,
        algorithm: CompressionAlgorithm,
        input_len: usize,
        error: &CoreError,
    ) {
        let Some(logger) = self.logger.as_deref() else {
            return;
        };
        let attributes = [
            KeyValue::new("algorithm", algorithm.name()),
            KeyValue::new("input_len", input_len as u64),
        ];
        let cause: &dyn Error = error;
        submit(logger, LogSeverity::Error, message, Some(cause), &attributes);
    }
}

/// 组装带来源分类的结构化记录并提交给诊断端点。
fn submit(
    logger: &dyn Logger,
    severity: LogSeverity,
    message: &'static str,
    error: Option<&dyn Error>,
    attributes: AttributeSet<'_>,
) {
    let record = LogRecord::new(message, severity, Some(LOG_TARGET), error, attributes);
    logger.log(&record);
}

/// 返回压缩事件应记录的生效级别。
///
/// `none` 不消费级别；未编入构建的算法没有可钳位的后端。
fn effective_level(algorithm: CompressionAlgorithm, level: u32) -> Option<u32> {
    match algorithm {
        CompressionAlgorithm::None => None,
        CompressionAlgorithm::Gzip => Some(crate::gzip::effective_level(level)),
        #[cfg(feature = "lz4")]
        CompressionAlgorithm::Lz4 => Some(crate::lz4::effective_level(level)),
        #[cfg(not(feature = "lz4"))]
        CompressionAlgorithm::Lz4 => None,
    }
}

impl fmt::Debug for CodecDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecDispatcher")
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

/// `none` 后端：容量检查加直通拷贝。
fn copy_verbatim(input: &[u8], output: &mut [u8]) -> Result<usize, CoreError> {
    if output.len() < input.len() {
        return Err(CoreError::new(
            codes::CODEC_OUTPUT_TOO_SMALL,
            format!(
                "直通拷贝需要 {} 字节输出容量，实际 {}",
                input.len(),
                output.len()
            ),
        ));
    }
    output[..input.len()].copy_from_slice(input);
    Ok(input.len())
}

/// 算法在线路上可识别、但未编译进本构建时的拒绝路径。
#[cfg(not(feature = "lz4"))]
fn unsupported(algorithm: CompressionAlgorithm) -> CoreError {
    CoreError::new(
        codes::CODEC_UNSUPPORTED_ALGORITHM,
        format!("算法 {algorithm} 未编译进本构建"),
    )
}
