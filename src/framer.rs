//! # 比特帧
//!
//! 定义隐写比特流的布局：
//!
//! ```text
//! [ 32 位载荷字节数 (大端, MSB 优先) ][ 载荷字节, 每字节 MSB 优先 ]
//! ```
//!
//! 没有填充、校验和或结束符，长度字段是唯一的成帧信号。
//! 比特以 `u8` 表示，取值只会是 0 或 1。

use std::iter::FusedIterator;

use thiserror::Error;

use crate::capacity::required_bits;
use crate::constants::{BITS_PER_BYTE, LENGTH_FIELD_BITS};
use crate::error::StegoError;

/// 一个帧的惰性比特序列，由 [`serialize`] 产生。
#[derive(Debug, Clone)]
pub struct FrameBits<'a> {
    length: u32,
    payload: &'a [u8],
    pos: usize,
    total: usize,
}

impl Iterator for FrameBits<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.total {
            return None;
        }
        let bit = if self.pos < LENGTH_FIELD_BITS {
            (self.length >> (LENGTH_FIELD_BITS - 1 - self.pos)) & 1
        } else {
            let i = self.pos - LENGTH_FIELD_BITS;
            let byte = self.payload[i / BITS_PER_BYTE] as u32;
            (byte >> (BITS_PER_BYTE - 1 - i % BITS_PER_BYTE)) & 1
        };
        self.pos += 1;
        Some(bit as u8)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total - self.pos;
        (left, Some(left))
    }
}

impl ExactSizeIterator for FrameBits<'_> {}

impl FusedIterator for FrameBits<'_> {}

/// 将载荷序列化为帧比特流。
///
/// # Errors
///
/// 载荷长度超过 `u32::MAX` 时返回 [`StegoError::MessageTooLong`]。
pub fn serialize(payload: &[u8]) -> Result<FrameBits<'_>, StegoError> {
    let length = u32::try_from(payload.len())
        .map_err(|_| StegoError::MessageTooLong { len: payload.len() })?;
    Ok(FrameBits {
        length,
        payload,
        pos: 0,
        total: LENGTH_FIELD_BITS + payload.len() * BITS_PER_BYTE,
    })
}

/// 比特数不足以构成一个完整帧。
///
/// 这是可预期的结果 (例如图像中根本没有隐藏消息)，调用方应当把它当作“无消息”处理。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Insufficient frame data: {needed} bits needed, {available} bits available")]
pub struct InsufficientData {
    pub available: u64,
    pub needed: u64,
}

/// 从比特流中还原一个帧的载荷。
///
/// 先读取 32 位长度 `N`，再读取恰好 `N` 个字节；多余的比特被忽略。
///
/// # Errors
///
/// 比特数少于 32，或者长度字段声明的载荷超出剩余比特时返回 [`InsufficientData`]。
pub fn deserialize<I>(bits: I) -> Result<Vec<u8>, InsufficientData>
where
    I: IntoIterator<Item = u8>,
    I::IntoIter: ExactSizeIterator,
{
    let mut bits = bits.into_iter();
    let available = bits.len() as u64;

    if available < LENGTH_FIELD_BITS as u64 {
        return Err(InsufficientData {
            available,
            needed: LENGTH_FIELD_BITS as u64,
        });
    }

    let length = bits
        .by_ref()
        .take(LENGTH_FIELD_BITS)
        .fold(0u32, |acc, bit| (acc << 1) | (bit & 1) as u32);

    let length = length as usize;
    let needed = required_bits(length);
    if needed > available {
        return Err(InsufficientData { available, needed });
    }

    let payload = (0..length)
        .map(|_| {
            bits.by_ref()
                .take(BITS_PER_BYTE)
                .fold(0u8, |acc, bit| (acc << 1) | (bit & 1))
        })
        .collect();
    Ok(payload)
}
