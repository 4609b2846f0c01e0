//! # 隐写核心错误类型
//!
//! 只有编码阶段才会产生真正的错误；解码阶段的“没有消息”属于正常结果，
//! 由 [`crate::decoder::Unveiled`] 表达，而不是错误。

use thiserror::Error;

/// 编码隐写帧时可能出现的错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// 图像容量不足以容纳整个帧 (长度字段 + 载荷)。
    #[error("Not enough capacity: needed {needed} bits, but only {available} bits are available")]
    CapacityExceeded { available: u64, needed: u64 },

    /// 载荷字节数无法用 32 位长度字段表示。
    #[error("Message of {len} bytes does not fit into a 32-bit length field")]
    MessageTooLong { len: usize },
}
