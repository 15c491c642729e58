//! `staging_contract` 集成测试：聚焦 `StagingBuffer` 的存取契约。
//!
//! # 测试总览（Why）
//! - 校验“预留 -> 写入 -> 提交”两段式流程与前端消费的账目一致性；
//! - 验证扩容的摊还特性与 2 KiB 容量下限，确保高频小块写入不会退化；
//! - 覆盖越界提交/消费的双重契约：调试构建断言失败，发布构建返回
//!   专用错误码且内容原样保留；
//! - 以参照模型驱动随机追加/消费序列，钉住任意交错下的视图一致性。

use core::mem::MaybeUninit;

use burrow_buffer::{BufferTag, Direction, MIN_CAPACITY, StagingBuffer};
use proptest::prelude::*;

/// 把字节逐个写入未初始化备用区，返回写入数量。
fn fill(grant: &mut [MaybeUninit<u8>], payload: &[u8]) -> usize {
    for (slot, byte) in grant.iter_mut().zip(payload) {
        slot.write(*byte);
    }
    payload.len().min(grant.len())
}

/// 预留 100 字节后只提交 40 字节：长度与内容都应只反映已提交部分。
#[test]
fn reserve_then_partial_commit_tracks_only_committed_bytes() {
    let mut buf = StagingBuffer::new();
    let payload = [0xA5u8; 40];

    let grant = buf.reserve(100).expect("预留 100 字节应成功");
    assert!(grant.len() >= 100, "授予的备用区不得小于请求量");
    let written = fill(grant, &payload);
    assert_eq!(written, 40);

    unsafe { buf.commit(40) }.expect("提交已初始化的 40 字节应成功");
    assert_eq!(buf.len(), 40);
    assert_eq!(buf.data(), &payload[..]);
}

/// 追加 HELLO、WORLD 后消费 5 字节，剩余视图应恰好是 WORLD。
#[test]
fn consume_advances_view_to_remaining_suffix() {
    let mut buf = StagingBuffer::new();
    buf.append(b"HELLO").expect("追加 HELLO 应成功");
    buf.append(b"WORLD").expect("追加 WORLD 应成功");

    buf.consume(5).expect("消费 5 字节应成功");
    assert_eq!(buf.len(), 5);
    assert_eq!(buf.data(), b"WORLD");
}

/// 内容全部消费后游标归零，既有容量可直接复用而不再扩容。
#[test]
fn consuming_everything_resets_cursor_and_reuses_capacity() {
    let mut buf = StagingBuffer::new();
    buf.append(b"staging").expect("追加示例数据应成功");
    let capacity = buf.capacity();

    buf.consume(buf.len()).expect("消费全部内容应成功");
    assert!(buf.is_empty());
    assert_eq!(buf.capacity(), capacity, "消费不应释放已分配容量");

    buf.append(&[0x42u8; 64]).expect("复用容量的追加应成功");
    assert_eq!(buf.capacity(), capacity, "容量充足时追加不应触发扩容");
}

/// 一万次 8 字节小块追加的扩容次数应按容量对数摊还。
#[test]
fn growth_is_amortized_over_many_small_appends() {
    let mut buf = StagingBuffer::new();
    let mut capacity_changes = 0usize;
    let mut last_capacity = buf.capacity();

    for chunk in 0..10_000usize {
        let byte = (chunk % 256) as u8;
        buf.append(&[byte; 8]).expect("小块追加不应失败");
        if buf.capacity() != last_capacity {
            capacity_changes += 1;
            last_capacity = buf.capacity();
        }
    }

    assert_eq!(buf.len(), 80_000);
    assert!(
        capacity_changes <= 17,
        "80 KiB 累计写入的扩容次数应按对数摊还，实际 {capacity_changes} 次"
    );
    assert_eq!(buf.data()[0], 0);
    assert_eq!(buf.data()[79_999], 15);
}

/// 首次扩容应抬升到 2 KiB 下限，避免初期的小步扩容。
#[test]
fn first_growth_is_raised_to_min_capacity() {
    let mut buf = StagingBuffer::new();
    buf.append(&[1u8]).expect("追加单字节应成功");
    assert!(
        buf.capacity() >= MIN_CAPACITY,
        "首次分配 {} 字节低于下限 {MIN_CAPACITY}",
        buf.capacity()
    );
}

/// 零量预留在空缓冲上不分配内存，返回空备用区视图。
#[test]
fn zero_reserve_on_fresh_buffer_does_not_allocate() {
    let mut buf = StagingBuffer::new();
    let grant = buf.reserve(0).expect("零量预留应成功");
    assert!(grant.is_empty());
    assert_eq!(buf.capacity(), 0);
    assert!(buf.spare_capacity_mut().is_empty());
}

/// 压实应原地腾出已消费前缀的空间，而非向分配器再要内存。
#[test]
fn compaction_reclaims_consumed_prefix_without_growing() {
    let mut buf = StagingBuffer::new();
    buf.append(&[7u8; 2048]).expect("填满首块分配应成功");
    let capacity = buf.capacity();

    buf.consume(1000).expect("消费前 1000 字节应成功");
    buf.append(&[9u8; 1000]).expect("压实后追加应成功");

    assert_eq!(buf.capacity(), capacity, "压实应在原地完成，无需扩容");
    assert_eq!(buf.len(), 2048);
    assert!(buf.data()[..1048].iter().all(|byte| *byte == 7));
    assert!(buf.data()[1048..].iter().all(|byte| *byte == 9));
}

/// 重置清空内容但保留容量与标签，供同一链路继续使用。
#[test]
fn reset_keeps_capacity_and_tag() {
    let mut buf = StagingBuffer::with_tag(Direction::Write, "conn-7");
    buf.append(b"pending").expect("追加示例数据应成功");
    let capacity = buf.capacity();

    buf.reset();
    assert!(buf.is_empty());
    assert_eq!(buf.capacity(), capacity);
    let tag = buf.tag().expect("重置不应摘除标签");
    assert_eq!(tag.name(), "conn-7");
    assert_eq!(tag.direction(), Direction::Write);
}

/// 释放应归还存储并摘除标签，重复释放与后续复用均无副作用。
#[test]
fn release_is_idempotent_and_buffer_stays_usable() {
    let mut buf = StagingBuffer::with_tag(Direction::Read, "conn-7");
    buf.append(b"payload").expect("追加示例数据应成功");

    buf.release();
    assert!(buf.is_empty());
    assert_eq!(buf.capacity(), 0);
    assert!(buf.tag().is_none());

    buf.release();
    assert_eq!(buf.capacity(), 0);

    buf.append(b"again").expect("释放后的缓冲应可继续使用");
    assert_eq!(buf.data(), b"again");
}

/// 标签只负责定位：方向名与链路名可直接进入日志字段。
#[test]
fn tag_exposes_direction_and_name_for_diagnostics() {
    let tag = BufferTag::new(Direction::Read, "conn-42");
    assert_eq!(tag.direction().name(), "read");
    assert_eq!(Direction::Write.to_string(), "write");
    assert_eq!(tag.name(), "conn-42");
}

/// 越界提交在调试构建下立即断言失败。
#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "超出备用区")]
fn oversized_commit_asserts_in_debug_builds() {
    let mut buf = StagingBuffer::new();
    buf.append(b"abc").expect("准备基础数据");
    let _ = unsafe { buf.commit(1 << 20) };
}

/// 越界消费在调试构建下立即断言失败。
#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "超出持有量")]
fn oversized_consume_asserts_in_debug_builds() {
    let mut buf = StagingBuffer::new();
    buf.append(b"abc").expect("准备基础数据");
    let _ = buf.consume(99);
}

/// 发布构建下越界提交退化为专用错误码，内容保持原样。
#[cfg(not(debug_assertions))]
#[test]
fn oversized_commit_reports_commit_overflow_in_release_builds() {
    let mut buf = StagingBuffer::new();
    buf.append(b"abc").expect("准备基础数据");
    let err = unsafe { buf.commit(1 << 20) }.expect_err("越界提交应返回错误");
    assert_eq!(err.code(), burrow_core::codes::BUFFER_COMMIT_OVERFLOW);
    assert_eq!(buf.data(), b"abc", "失败的提交不得改动既有内容");
}

/// 发布构建下越界消费退化为专用错误码，内容保持原样。
#[cfg(not(debug_assertions))]
#[test]
fn oversized_consume_reports_consume_overflow_in_release_builds() {
    let mut buf = StagingBuffer::new();
    buf.append(b"abc").expect("准备基础数据");
    let err = buf.consume(99).expect_err("越界消费应返回错误");
    assert_eq!(err.code(), burrow_core::codes::BUFFER_CONSUME_OVERFLOW);
    assert_eq!(buf.data(), b"abc", "失败的消费不得改动既有内容");
}

/// 参照模型的单步操作：追加一段字节，或消费一个（待钳位的）数量。
#[derive(Clone, Debug)]
enum FlowOp {
    Append(Vec<u8>),
    Consume(usize),
}

proptest! {
    /// 任意追加/消费交错序列后，缓冲视图与参照模型逐字节一致。
    ///
    /// 参照模型取一根朴素的 `Vec<u8>`：追加即尾部扩展，消费即前缀
    /// 移除。消费量先对模型持有量钳位，再喂给被测缓冲，保证序列
    /// 始终合法。
    #[test]
    fn prop_interleaved_ops_match_reference_model(
        ops in proptest::collection::vec(
            prop_oneof![
                proptest::collection::vec(any::<u8>(), 1..64).prop_map(FlowOp::Append),
                (0usize..96).prop_map(FlowOp::Consume),
            ],
            1..48,
        ),
    ) {
        let mut buf = StagingBuffer::new();
        let mut model: Vec<u8> = Vec::new();

        for op in ops {
            match op {
                FlowOp::Append(bytes) => {
                    buf.append(&bytes).expect("追加不应失败");
                    model.extend_from_slice(&bytes);
                }
                FlowOp::Consume(raw) => {
                    let n = raw.min(model.len());
                    buf.consume(n).expect("钳位后的消费不应失败");
                    model.drain(..n);
                }
            }
            prop_assert_eq!(buf.data(), &model[..], "缓冲视图偏离参照模型");
            prop_assert_eq!(buf.len(), model.len());
        }
    }
}
