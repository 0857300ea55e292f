//! ### English
//! C ABI bindings for the surface lifecycle (create/destroy/attach/pause/resume/stop).
//!
//! ### 中文
//! surface 生命周期相关的 C ABI 绑定（create/destroy/attach/pause/resume/stop）。

use std::ffi::c_void;
use std::sync::Arc;

use dpi::PhysicalSize;
use tracing::error;

use super::VideoSurface;
use super::status::{CallError, VIDEO_SURFACE_ERR_INVALID_ARGUMENT, return_code};
use crate::engine::config::RendererConfig;
use crate::engine::producer::EmbedderProducer;
use crate::engine::runtime::SurfaceLifecycleHandler;
use crate::engine::window::NativeWindow;

#[unsafe(no_mangle)]
/// ### English
/// Creates a surface renderer and its dedicated render thread.
///
/// #### Parameters
/// - `flags`: `VIDEO_SURFACE_FLAG_*` bitmask (unknown bits are ignored).
/// - `frame_queue_capacity`: Frames buffered before `video_surface_deliver_frame` blocks
///   (`0` = default, at most 64).
/// - `producer`: Optional decoder start callback, called on a fresh thread after every
///   successful attach (NULL = none). It may deliver frames before returning.
///
/// Returns NULL on failure (the reason is logged).
///
/// # Safety
/// `producer` must be NULL or point to a valid `EmbedderProducer`.
///
/// ### 中文
/// 创建 surface 渲染器及其独立渲染线程。
///
/// #### 参数
/// - `flags`：`VIDEO_SURFACE_FLAG_*` 位掩码（未知位会被忽略）。
/// - `frame_queue_capacity`：`video_surface_deliver_frame` 阻塞前可缓冲的帧数（`0` 表示默认值，最多 64）。
/// - `producer`：可选的解码器启动回调，每次 attach 成功后在新线程上调用（NULL 表示无），
///   可在返回前投递帧。
///
/// 失败返回 NULL（原因会写入日志）。
///
/// # Safety
/// `producer` 必须为 NULL 或指向有效的 `EmbedderProducer`。
pub unsafe extern "C" fn video_surface_create(
    flags: u32,
    frame_queue_capacity: u32,
    producer: *const EmbedderProducer,
) -> *mut VideoSurface {
    let producer = unsafe { producer.as_ref() }.copied().unwrap_or_default();
    let config = RendererConfig::from_flags(flags, frame_queue_capacity);

    let created = std::panic::catch_unwind(move || {
        SurfaceLifecycleHandler::spawn_platform(config, Arc::new(producer))
    });
    match created {
        Ok(Ok(handler)) => Box::into_raw(Box::new(VideoSurface { handler })),
        Ok(Err(err)) => {
            error!("video_surface_create failed: {err}");
            std::ptr::null_mut()
        }
        Err(_) => std::ptr::null_mut(),
    }
}

#[unsafe(no_mangle)]
/// ### English
/// Destroys a surface created by `video_surface_create`.
///
/// Shuts down the render thread after it releases the texture/program and closes the graphics
/// context. Do not use the pointer afterwards.
///
/// ### 中文
/// 销毁由 `video_surface_create` 创建的 surface。
///
/// 渲染线程会先释放纹理/程序并关闭图形上下文，然后退出；之后不要再使用该指针。
pub unsafe extern "C" fn video_surface_destroy(surface: *mut VideoSurface) {
    if surface.is_null() {
        return;
    }
    unsafe {
        drop(Box::from_raw(surface));
    }
}

#[unsafe(no_mangle)]
/// ### English
/// Rebinds the renderer to `window` (an `ANativeWindow*` on Android), or records "no window" when
/// `window` is NULL. Blocks until the render thread finishes.
///
/// On Android the surface takes its own reference on the window. Elsewhere the caller must keep
/// the window alive until the next attach or destroy.
///
/// ### 中文
/// 将渲染器重新绑定到 `window`（Android 上为 `ANativeWindow*`）；`window` 为 NULL 时记录“无 window”。
/// 会阻塞直到渲染线程处理完成。
///
/// Android 上 surface 会自行持有该 window 的引用；其它平台需由调用方保证 window 在下一次
/// attach 或 destroy 之前有效。
pub unsafe extern "C" fn video_surface_attach(surface: *const VideoSurface, window: *mut c_void) -> i32 {
    return_code(move || {
        let surface = unsafe { super::surface_ref(surface) }?;

        #[cfg(target_os = "android")]
        let window = unsafe { NativeWindow::from_raw_acquired(window) };
        #[cfg(not(target_os = "android"))]
        let window = unsafe { NativeWindow::from_raw_borrowed(window) };

        surface.handler.attach_surface(window)?;
        Ok::<(), CallError>(())
    })
}

#[unsafe(no_mangle)]
/// ### English
/// Pauses drawing; frames delivered while paused are dropped without touching the GPU.
///
/// ### 中文
/// 暂停绘制；暂停期间投递的帧会被丢弃，不会触及 GPU。
pub unsafe extern "C" fn video_surface_pause(surface: *const VideoSurface) -> i32 {
    return_code(move || {
        let surface = unsafe { super::surface_ref(surface) }?;
        surface.handler.pause();
        Ok::<(), CallError>(())
    })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn video_surface_resume(surface: *const VideoSurface) -> i32 {
    return_code(move || {
        let surface = unsafe { super::surface_ref(surface) }?;
        surface.handler.resume();
        Ok::<(), CallError>(())
    })
}

#[unsafe(no_mangle)]
/// ### English
/// Stops playback for good. The texture and program are released on the render thread with the
/// next frame (or the next attach / destroy).
///
/// ### 中文
/// 永久停止播放。纹理与程序会在下一帧（或下一次 attach / destroy）时于渲染线程释放。
pub unsafe extern "C" fn video_surface_stop(surface: *const VideoSurface) -> i32 {
    return_code(move || {
        let surface = unsafe { super::surface_ref(surface) }?;
        surface.handler.stop();
        Ok::<(), CallError>(())
    })
}

#[unsafe(no_mangle)]
/// ### English
/// Returns the playback state (`video_surface_state_*`), or a negative status code.
///
/// ### 中文
/// 返回播放状态（`video_surface_state_*`），失败时返回负数状态码。
pub unsafe extern "C" fn video_surface_state(surface: *const VideoSurface) -> i32 {
    return_code(move || match unsafe { super::surface_ref(surface) } {
        Ok(surface) => surface.handler.state() as i32,
        Err(_) => VIDEO_SURFACE_ERR_INVALID_ARGUMENT,
    })
}

#[unsafe(no_mangle)]
/// ### English
/// Sets the attached window's buffer geometry to `width x height` in the context's native pixel
/// format (Android only).
///
/// ### 中文
/// 以上下文的原生像素格式将已挂载 window 的缓冲区尺寸设为 `width x height`（仅 Android）。
pub unsafe extern "C" fn video_surface_set_buffers_geometry(
    surface: *const VideoSurface,
    width: u32,
    height: u32,
) -> i32 {
    return_code(move || {
        let surface = unsafe { super::surface_ref(surface) }?;
        surface
            .handler
            .set_buffers_geometry(PhysicalSize::new(width, height))?;
        Ok::<(), CallError>(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::status::{VIDEO_SURFACE_ERR_DISPLAY_UNAVAILABLE, VIDEO_SURFACE_OK};

    #[test]
    fn null_handles_are_rejected() {
        unsafe {
            assert_eq!(
                video_surface_attach(std::ptr::null(), std::ptr::null_mut()),
                VIDEO_SURFACE_ERR_INVALID_ARGUMENT
            );
            assert_eq!(
                video_surface_pause(std::ptr::null()),
                VIDEO_SURFACE_ERR_INVALID_ARGUMENT
            );
            assert_eq!(
                video_surface_state(std::ptr::null()),
                VIDEO_SURFACE_ERR_INVALID_ARGUMENT
            );
            video_surface_destroy(std::ptr::null_mut());
        }
    }

    #[cfg(not(target_os = "android"))]
    #[test]
    fn stub_platform_round_trip() {
        unsafe {
            let surface = video_surface_create(0, 0, std::ptr::null());
            assert!(!surface.is_null());

            assert_eq!(
                video_surface_attach(surface, std::ptr::null_mut()),
                VIDEO_SURFACE_OK
            );
            assert_eq!(
                video_surface_attach(surface, 0x1000 as *mut c_void),
                VIDEO_SURFACE_ERR_DISPLAY_UNAVAILABLE
            );

            assert_eq!(video_surface_pause(surface), VIDEO_SURFACE_OK);
            assert_eq!(video_surface_state(surface), 1);
            assert_eq!(video_surface_stop(surface), VIDEO_SURFACE_OK);
            assert_eq!(video_surface_resume(surface), VIDEO_SURFACE_OK);
            assert_eq!(video_surface_state(surface), 2);

            video_surface_destroy(surface);
        }
    }

    #[cfg(not(target_os = "android"))]
    #[test]
    fn huge_queue_capacity_still_creates() {
        unsafe {
            let surface = video_surface_create(0, u32::MAX, std::ptr::null());
            assert!(!surface.is_null());
            video_surface_destroy(surface);
        }
    }
}
