//! # 容量模型
//!
//! 根据图像尺寸计算可用的 LSB 槽位数量，并校验一条消息能否完整放入。

use crate::constants::{BITS_PER_BYTE, LENGTH_FIELD_BITS, USABLE_CHANNELS};
use crate::error::StegoError;

/// 返回 `width x height` 图像可用于隐写的比特数。
pub fn capacity(width: u32, height: u32) -> u64 {
    width as u64 * height as u64 * USABLE_CHANNELS as u64
}

/// 返回嵌入 `payload_len` 字节载荷所需的比特数 (含 32 位长度字段)。
pub fn required_bits(payload_len: usize) -> u64 {
    LENGTH_FIELD_BITS as u64 + payload_len as u64 * BITS_PER_BYTE as u64
}

/// 判断载荷能否放入给定尺寸的图像。
pub fn fits(width: u32, height: u32, payload_len: usize) -> bool {
    required_bits(payload_len) <= capacity(width, height)
}

/// 与 [`fits`] 相同，但在容量不足时返回携带双方数值的错误。
///
/// # Errors
///
/// 当所需比特数大于可用比特数时返回 [`StegoError::CapacityExceeded`]。
pub fn ensure_fits(width: u32, height: u32, payload_len: usize) -> Result<(), StegoError> {
    let available = capacity(width, height);
    let needed = required_bits(payload_len);
    if needed > available {
        return Err(StegoError::CapacityExceeded { available, needed });
    }
    Ok(())
}

/// 该尺寸的图像最多能隐藏的载荷字节数。
pub fn max_message_len(width: u32, height: u32) -> usize {
    let spare = capacity(width, height).saturating_sub(LENGTH_FIELD_BITS as u64);
    usize::try_from(spare / BITS_PER_BYTE as u64).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_counts_three_channels_per_pixel() {
        assert_eq!(capacity(4, 4), 48);
        assert_eq!(capacity(0, 100), 0);
        assert_eq!(capacity(100_000, 100_000), 30_000_000_000);
    }

    #[test]
    fn boundary_is_inclusive() {
        // 4x4 图像: 48 比特 = 32 位长度 + 2 字节
        assert!(fits(4, 4, 2));
        assert!(!fits(4, 4, 3));
        assert_eq!(ensure_fits(4, 4, 2), Ok(()));
        assert_eq!(
            ensure_fits(4, 4, 3),
            Err(StegoError::CapacityExceeded {
                available: 48,
                needed: 56
            })
        );
    }

    #[test]
    fn max_message_len_saturates_on_tiny_images() {
        assert_eq!(max_message_len(4, 4), 2);
        assert_eq!(max_message_len(2, 2), 0);
        assert_eq!(max_message_len(0, 0), 0);
    }
}
