//! ### English
//! C ABI surface for `native_video_surface`.
//!
//! All exported symbols are `extern "C"` functions; structs are `#[repr(C)]`. Every entry point
//! that can fail returns an `i32` status code (`0` = success, see `status.rs`), and runs behind a
//! panic barrier.
//!
//! On Android the same runtime is additionally reachable through JNI (`jni.rs`).
//!
//! ### 中文
//! `native_video_surface` 的 C ABI 接口层。
//!
//! 所有导出符号均为 `extern "C"` 函数；结构体使用 `#[repr(C)]`。所有可能失败的入口都返回
//! `i32` 状态码（`0` 表示成功，见 `status.rs`），并运行在 panic 屏障之后。
//!
//! Android 上同一运行时也可以通过 JNI（`jni.rs`）访问。
mod abi;
mod frame;
mod log;
mod producer;
mod status;
mod surface;

#[cfg(target_os = "android")]
mod jni;

use crate::engine::runtime::SurfaceLifecycleHandler;

#[repr(C)]
/// ### English
/// Opaque surface handle owning the dedicated render thread.
///
/// ### 中文
/// 不透明 surface 句柄，持有独立的渲染线程。
pub struct VideoSurface {
    /// ### English
    /// Thread-safe handler that forwards GPU work to the render thread.
    ///
    /// ### 中文
    /// 线程安全的处理器：将 GPU 工作转发到渲染线程。
    handler: SurfaceLifecycleHandler,
}

/// ### English
/// C ABI version for `native_video_surface`.
///
/// ### 中文
/// `native_video_surface` 的 C ABI 版本号。
const VIDEO_SURFACE_ABI_VERSION: u32 = 1;

/// ### English
/// Borrows the surface behind a host pointer.
///
/// # Safety
/// `surface` must be NULL or a pointer returned by `video_surface_create` that has not been
/// destroyed.
///
/// ### 中文
/// 借用宿主指针背后的 surface。
///
/// # Safety
/// `surface` 必须为 NULL，或是由 `video_surface_create` 返回且尚未销毁的指针。
unsafe fn surface_ref<'a>(surface: *const VideoSurface) -> Result<&'a VideoSurface, status::InvalidArgument> {
    unsafe { surface.as_ref() }.ok_or(status::InvalidArgument)
}
