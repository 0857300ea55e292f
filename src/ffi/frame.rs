use super::VideoSurface;
use super::status::{CallError, InvalidArgument, return_code};

#[unsafe(no_mangle)]
/// ### English
/// Queues one decoded frame for drawing. Called by the decode producer thread.
///
/// `pixels` holds `len` bytes of tightly packed RGB565 (`width * height * 2` at least); the data
/// is copied before this returns. Blocks while the frame queue is full.
///
/// Frames with an empty dimension or a short buffer are rejected (and logged) without reaching
/// the GPU.
///
/// # Safety
/// `pixels` must be NULL or valid for reads of `len` bytes.
///
/// ### 中文
/// 将一帧解码数据排队等待绘制；由解码生产者线程调用。
///
/// `pixels` 含 `len` 字节紧密排列的 RGB565 数据（至少 `width * height * 2`）；返回前会完成拷贝。
/// 帧队列已满时阻塞。
///
/// 宽或高为 0、或缓冲区不足的帧会被拒绝（并记录日志），不会到达 GPU。
///
/// # Safety
/// `pixels` 必须为 NULL，或可读取 `len` 字节。
pub unsafe extern "C" fn video_surface_deliver_frame(
    surface: *const VideoSurface,
    pixels: *const u8,
    len: usize,
    width: u32,
    height: u32,
) -> i32 {
    return_code(move || -> Result<(), CallError> {
        let surface = unsafe { super::surface_ref(surface) }?;
        let pixels = match (pixels.is_null(), len) {
            (_, 0) => Vec::new(),
            (true, _) => return Err(CallError::from(InvalidArgument)),
            (false, len) => unsafe { std::slice::from_raw_parts(pixels, len) }.to_vec(),
        };

        surface.handler.deliver_frame(pixels, width, height)?;
        Ok(())
    })
}
