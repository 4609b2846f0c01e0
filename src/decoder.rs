//! # 解码器
//!
//! 按与编码器相同的顺序读出所有槽位的最低有效位，并尝试还原一个帧。
//!
//! 解码对任何图像都有结果，“没有消息”是正常情况而不是错误。
//! 由于帧格式没有魔数或校验和，一张从未编码过的图像偶尔也可能被解析成一条短消息。

use image::RgbaImage;
use log::{debug, warn};

use crate::channels::low_bits;
use crate::framer::deserialize;

/// 解码结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unveiled {
    /// 未检测到帧：比特不足以容纳长度字段或其声明的载荷。
    Absent,
    /// 检测到帧，但载荷不是合法的 UTF-8；保留原始字节。
    Corrupt(Vec<u8>),
    /// 检测到帧，载荷是合法的 UTF-8 文本。
    Text(String),
}

impl Unveiled {
    /// 文本视图。`Absent` 和 `Corrupt` 都返回 `None`。
    pub fn text(&self) -> Option<&str> {
        match self {
            Unveiled::Text(text) => Some(text),
            _ => None,
        }
    }

    /// 原始字节视图，只要检测到帧就可用。
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Unveiled::Absent => None,
            Unveiled::Corrupt(bytes) => Some(bytes),
            Unveiled::Text(text) => Some(text.as_bytes()),
        }
    }

    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Unveiled::Absent => None,
            Unveiled::Corrupt(bytes) => Some(bytes),
            Unveiled::Text(text) => Some(text.into_bytes()),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Unveiled::Absent)
    }
}

/// 从图像中还原帧载荷的原始字节，不做任何文本解码。
pub fn decode_bytes(image: &RgbaImage) -> Option<Vec<u8>> {
    match deserialize(low_bits(image)) {
        Ok(payload) => Some(payload),
        Err(insufficient) => {
            debug!("no frame detected: {insufficient}");
            None
        }
    }
}

/// 从图像中解码隐藏的消息。输入图像只读。
pub fn decode(image: &RgbaImage) -> Unveiled {
    let Some(payload) = decode_bytes(image) else {
        return Unveiled::Absent;
    };

    match String::from_utf8(payload) {
        Ok(text) => Unveiled::Text(text),
        Err(e) => {
            warn!(
                "frame of {} bytes detected but payload is not valid UTF-8: {}",
                e.as_bytes().len(),
                e.utf8_error()
            );
            Unveiled::Corrupt(e.into_bytes())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;
    use image::Rgba;

    #[test]
    fn blank_image_decodes_to_empty_message() {
        // 全零的最低位等价于长度为 0 的帧
        let image = RgbaImage::new(4, 4);
        assert_eq!(decode(&image), Unveiled::Text(String::new()));
    }

    #[test]
    fn saturated_image_is_absent() {
        // 全一的最低位声明了一个 u32::MAX 字节的载荷
        let image = RgbaImage::from_pixel(16, 16, Rgba([255, 255, 255, 255]));
        assert_eq!(decode(&image), Unveiled::Absent);
        assert_eq!(decode_bytes(&image), None);
    }

    #[test]
    fn too_small_image_is_absent() {
        let image = RgbaImage::new(3, 3);
        assert!(decode(&image).is_absent());
    }

    #[test]
    fn invalid_utf8_is_reported_as_corrupt() {
        let image = RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 40]));
        let payload = [0xFF, 0xFE, 0x00];
        let encoded = encode(&image, &payload).unwrap();

        let unveiled = decode(&encoded);
        assert_eq!(unveiled, Unveiled::Corrupt(payload.to_vec()));
        assert_eq!(unveiled.text(), None);
        assert_eq!(unveiled.bytes(), Some(&payload[..]));
        assert_eq!(decode_bytes(&encoded), Some(payload.to_vec()));
    }

    #[test]
    fn views_on_text_result() {
        let unveiled = Unveiled::Text("hi".to_owned());
        assert_eq!(unveiled.text(), Some("hi"));
        assert_eq!(unveiled.bytes(), Some(&b"hi"[..]));
        assert!(!unveiled.is_absent());
        assert_eq!(unveiled.into_bytes(), Some(b"hi".to_vec()));
        assert_eq!(Unveiled::Absent.into_bytes(), None);
    }
}
