//! ### English
//! Decoded frame handed over by the decode producer: tightly packed RGB565 pixels.
//!
//! ### 中文
//! 解码生产者交付的帧：紧密排列的 RGB565 像素。

use dpi::PhysicalSize;

use crate::engine::error::FrameError;

/// ### English
/// Bytes per pixel of the fixed source encoding (`UNSIGNED_SHORT_5_6_5`).
///
/// ### 中文
/// 固定源编码（`UNSIGNED_SHORT_5_6_5`）每像素字节数。
pub const BYTES_PER_PIXEL: usize = 2;

/// ### English
/// One validated frame. `pixels` holds at least `width * height * 2` bytes and both dimensions fit
/// a `GLsizei`.
///
/// ### 中文
/// 一帧已校验的数据：`pixels` 至少包含 `width * height * 2` 字节，且宽高均可表示为 `GLsizei`。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pixels: Vec<u8>,
    size: PhysicalSize<u32>,
}

impl Frame {
    /// ### English
    /// Validates `pixels` against `width x height`.
    ///
    /// #### Parameters
    /// - `pixels`: RGB565 pixel rows, top row first, no padding.
    /// - `width` / `height`: Decoded frame dimensions (may change frame to frame).
    ///
    /// ### 中文
    /// 根据 `width x height` 校验 `pixels`。
    ///
    /// #### 参数
    /// - `pixels`：RGB565 像素行，自上而下，无填充。
    /// - `width` / `height`：解码帧尺寸（逐帧可变）。
    pub fn new(pixels: Vec<u8>, width: u32, height: u32) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::Empty { width, height });
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(FrameError::TooLarge { width, height });
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or(FrameError::TooLarge { width, height })?;
        if pixels.len() < expected {
            return Err(FrameError::BufferTooSmall {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            pixels,
            size: PhysicalSize::new(width, height),
        })
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// ### English
    /// Width and height as GL sizes (guaranteed to fit by construction).
    ///
    /// ### 中文
    /// 以 GL 尺寸类型返回宽高（构造时已保证不会溢出）。
    pub fn gl_size(&self) -> (i32, i32) {
        (self.size.width as i32, self.size.height as i32)
    }
}
