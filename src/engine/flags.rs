//! ### English
//! Bitflags controlling optional renderer behaviors.
//!
//! These are passed through the C ABI as a `u32` bitmask.
//!
//! ### 中文
//! 控制渲染器可选行为的位标志（bitflags）。
//!
//! 通过 C ABI 以 `u32` 位掩码传入。
/// ### English
/// Clear the color buffer before each frame upload.
///
/// Off by default: every frame covers the whole viewport, so the clear is redundant unless the
/// window is larger than the frame.
///
/// ### 中文
/// 每帧上传前清空颜色缓冲区。
///
/// 默认关闭：每帧都覆盖整个 viewport，除非 window 大于帧尺寸，否则清屏是多余的。
pub const VIDEO_SURFACE_FLAG_CLEAR_BEFORE_DRAW: u32 = 1 << 0;

/// ### English
/// All flags understood by this build; unknown bits are ignored.
///
/// ### 中文
/// 本构建识别的全部标志位；未知位会被忽略。
pub const VIDEO_SURFACE_FLAGS_ALL: u32 = VIDEO_SURFACE_FLAG_CLEAR_BEFORE_DRAW;
