/// 长度字段占用的比特数。
/// 载荷长度以 `u32` 大端序 (MSB 优先) 写在帧的最前面。
pub const LENGTH_FIELD_BITS: usize = 32;

/// 每个字节的比特数。
pub const BITS_PER_BYTE: usize = 8;

/// 每个像素中可用于隐写的通道数 (R, G, B)。
/// Alpha 通道永远不参与隐写，以保证透明度完全不变。
pub const USABLE_CHANNELS: usize = 3;

/// RGBA8 像素在原始缓冲区中占用的字节数。
pub const BYTES_PER_PIXEL: usize = 4;

/// 输出图像允许使用的无损格式扩展名。
pub const LOSSLESS_EXTENSIONS: [&str; 6] = ["png", "bmp", "tif", "tiff", "webp", "qoi"];
