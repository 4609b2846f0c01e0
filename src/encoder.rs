//! # 编码器
//!
//! 将一条消息以帧的形式写入图像各槽位的最低有效位。

use image::RgbaImage;
use log::debug;

use crate::capacity::ensure_fits;
use crate::channels::ChannelWalk;
use crate::error::StegoError;
use crate::framer::serialize;

/// 把 `message` 嵌入 `image`，返回一张新的图像。
///
/// 输入图像不会被修改。输出与输入尺寸相同，Alpha 通道以及帧之后的所有槽位都原样保留。
/// 对同一图像和同一消息，输出逐字节一致。
///
/// # Errors
///
/// * [`StegoError::MessageTooLong`]：消息长度无法用 32 位表示。
/// * [`StegoError::CapacityExceeded`]：图像容量不足。
pub fn encode(image: &RgbaImage, message: &[u8]) -> Result<RgbaImage, StegoError> {
    let (width, height) = image.dimensions();
    let bits = serialize(message)?;
    ensure_fits(width, height, message.len())?;

    debug!(
        "embedding {} payload bytes ({} bits) into {}x{} image",
        message.len(),
        bits.len(),
        width,
        height
    );

    let mut output = image.clone();
    let raw: &mut [u8] = &mut output;
    ChannelWalk::new(width, height)
        .zip(bits)
        .for_each(|(slot, bit)| {
            let value = &mut raw[slot.byte_offset()];
            *value = (*value & !1) | bit;
        });

    Ok(output)
}

/// 以 UTF-8 字节嵌入一段文本，等价于 `encode(image, text.as_bytes())`。
///
/// # Errors
///
/// 同 [`encode`]。
pub fn encode_text(image: &RgbaImage, text: &str) -> Result<RgbaImage, StegoError> {
    encode(image, text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn writes_frame_bits_into_low_bits() {
        let image = RgbaImage::from_pixel(4, 4, Rgba([0xFF, 0xFF, 0xFF, 0x80]));
        let output = encode(&image, b"A").unwrap();

        let low: Vec<u8> = output
            .pixels()
            .flat_map(|p| [p[0] & 1, p[1] & 1, p[2] & 1])
            .take(40)
            .collect();
        let mut expected = vec![0u8; 31];
        expected.push(1);
        expected.extend([0, 1, 0, 0, 0, 0, 0, 1]);
        assert_eq!(low, expected);
    }

    #[test]
    fn only_low_bit_changes() {
        let image = RgbaImage::from_pixel(8, 8, Rgba([0b1010_1010, 0b0101_0101, 7, 9]));
        let output = encode_text(&image, "xyz").unwrap();
        for (before, after) in image.as_raw().iter().zip(output.as_raw()) {
            assert_eq!(before & !1, after & !1);
        }
    }

    #[test]
    fn zero_sized_image_cannot_hold_a_frame() {
        let image = RgbaImage::new(0, 0);
        assert_eq!(
            encode(&image, b"").unwrap_err(),
            StegoError::CapacityExceeded {
                available: 0,
                needed: 32
            }
        );
    }
}
