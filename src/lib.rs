//! # lsb_frame 库
//!
//! 本库包含基于长度帧的 LSB 隐写核心 (容量模型、比特帧、通道遍历、编码器与解码器)
//! 以及命令行工具使用的处理逻辑。

// 声明库包含的所有模块。

pub mod capacity;
pub mod channels;
pub mod cli;
pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod framer;
pub mod handler;

pub use decoder::{Unveiled, decode, decode_bytes};
pub use encoder::{encode, encode_text};
pub use error::StegoError;
