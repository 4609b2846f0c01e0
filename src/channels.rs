//! # 像素通道遍历
//!
//! 编码器和解码器之间唯一的约定就是遍历顺序：像素按行优先，
//! 每个像素内按 红 -> 绿 -> 蓝。两端都通过 [`ChannelWalk`] 访问槽位，
//! 因此不可能出现顺序不一致。

use std::iter::FusedIterator;

use image::RgbaImage;

use crate::constants::{BYTES_PER_PIXEL, USABLE_CHANNELS};

/// 参与隐写的颜色通道。Alpha 不在其中。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// 遍历时使用的通道顺序。
    pub const ORDER: [Channel; USABLE_CHANNELS] = [Channel::Red, Channel::Green, Channel::Blue];

    /// 通道在 RGBA 像素中的下标。
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// 一个 LSB 槽位：某个像素的某个通道。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSlot {
    /// 行优先的像素序号 (`y * width + x`)。
    pub pixel_index: usize,
    pub channel: Channel,
}

impl ChannelSlot {
    /// 槽位在 RGBA8 原始缓冲区中的字节偏移。
    pub fn byte_offset(self) -> usize {
        self.pixel_index * BYTES_PER_PIXEL + self.channel.index()
    }
}

/// 按固定顺序遍历图像中所有可用槽位的惰性迭代器。
///
/// 可以 `clone()` 后从当前位置重新开始，也可以为同一尺寸重新创建。
#[derive(Debug, Clone)]
pub struct ChannelWalk {
    next: usize,
    end: usize,
}

impl ChannelWalk {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            next: 0,
            end: width as usize * height as usize * USABLE_CHANNELS,
        }
    }

    pub fn for_image(image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self::new(width, height)
    }
}

impl Iterator for ChannelWalk {
    type Item = ChannelSlot;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let slot = ChannelSlot {
            pixel_index: self.next / USABLE_CHANNELS,
            channel: Channel::ORDER[self.next % USABLE_CHANNELS],
        };
        self.next += 1;
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.end - self.next;
        (left, Some(left))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.next = self.next.saturating_add(n).min(self.end);
        self.next()
    }
}

impl ExactSizeIterator for ChannelWalk {}

impl FusedIterator for ChannelWalk {}

/// 依遍历顺序读出图像每个槽位的最低有效位。
pub fn low_bits(image: &RgbaImage) -> impl ExactSizeIterator<Item = u8> + '_ {
    let raw = image.as_raw();
    ChannelWalk::for_image(image).map(move |slot| raw[slot.byte_offset()] & 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_row_major_then_rgb() {
        let slots: Vec<(usize, Channel)> = ChannelWalk::new(2, 1)
            .map(|s| (s.pixel_index, s.channel))
            .collect();
        assert_eq!(
            slots,
            vec![
                (0, Channel::Red),
                (0, Channel::Green),
                (0, Channel::Blue),
                (1, Channel::Red),
                (1, Channel::Green),
                (1, Channel::Blue),
            ]
        );
    }

    #[test]
    fn skips_alpha_bytes() {
        let offsets: Vec<usize> = ChannelWalk::new(2, 2).map(ChannelSlot::byte_offset).collect();
        assert_eq!(offsets, vec![0, 1, 2, 4, 5, 6, 8, 9, 10, 12, 13, 14]);
        assert!(offsets.iter().all(|o| o % BYTES_PER_PIXEL != 3));
    }

    #[test]
    fn is_exact_sized_and_restartable() {
        let walk = ChannelWalk::new(4, 4);
        assert_eq!(walk.len(), 48);

        let mut partial = walk.clone();
        partial.nth(9);
        assert_eq!(partial.len(), 38);

        let first: Vec<ChannelSlot> = walk.clone().collect();
        let second: Vec<ChannelSlot> = walk.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_image_yields_nothing() {
        assert_eq!(ChannelWalk::new(0, 7).next(), None);
        let mut walk = ChannelWalk::new(1, 1);
        assert_eq!(walk.nth(5), None);
        assert_eq!(walk.next(), None);
    }

    #[test]
    fn low_bits_reads_lsb_in_walk_order() {
        let image = RgbaImage::from_raw(2, 1, vec![1, 2, 3, 255, 4, 5, 7, 0]).unwrap();
        let bits: Vec<u8> = low_bits(&image).collect();
        assert_eq!(bits, vec![1, 0, 1, 0, 1, 1]);
    }
}
