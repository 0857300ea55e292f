//! ### English
//! Host-supplied window handle (`ANativeWindow*` on Android).
//!
//! ### 中文
//! 宿主提供的 window 句柄（Android 上为 `ANativeWindow*`）。

use std::ffi::c_void;
use std::ptr::NonNull;

use dpi::PhysicalSize;

use crate::engine::error::GeometryError;

/// ### English
/// Non-null window pointer, optionally holding one reference on the native window.
///
/// Owned windows (Android) release their reference on drop; borrowed windows rely on the caller to
/// keep the pointer alive while attached.
///
/// ### 中文
/// 非空 window 指针，可选地持有原生 window 的一个引用。
///
/// 持有引用的 window（Android）在 drop 时释放该引用；借用的 window 则要求调用方在挂载期间保证指针有效。
#[derive(Debug)]
pub struct NativeWindow {
    ptr: NonNull<c_void>,
    #[cfg_attr(not(target_os = "android"), allow(dead_code))]
    owned: bool,
}

// The pointer is only dereferenced by EGL/NDK calls on the render thread.
unsafe impl Send for NativeWindow {}

impl NativeWindow {
    /// ### English
    /// Wraps `ptr` without taking a reference. Returns `None` for NULL.
    ///
    /// # Safety
    /// `ptr` must stay a valid native window for as long as this value (or a surface built on it)
    /// is in use.
    ///
    /// ### 中文
    /// 包装 `ptr` 但不获取引用；NULL 返回 `None`。
    ///
    /// # Safety
    /// 在该值（或基于它创建的 surface）使用期间，`ptr` 必须始终是有效的原生 window。
    pub unsafe fn from_raw_borrowed(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self { ptr, owned: false })
    }

    /// ### English
    /// Takes an extra reference on `ptr` (`ANativeWindow_acquire`), released on drop.
    ///
    /// # Safety
    /// `ptr` must be NULL or a valid `ANativeWindow*`.
    ///
    /// ### 中文
    /// 对 `ptr` 额外获取一个引用（`ANativeWindow_acquire`），drop 时释放。
    ///
    /// # Safety
    /// `ptr` 必须为 NULL 或有效的 `ANativeWindow*`。
    #[cfg(target_os = "android")]
    pub unsafe fn from_raw_acquired(ptr: *mut c_void) -> Option<Self> {
        let ptr = NonNull::new(ptr)?;
        unsafe { ndk_sys::ANativeWindow_acquire(ptr.as_ptr().cast()) };
        Some(Self { ptr, owned: true })
    }

    /// ### English
    /// Obtains the native window behind a Java `Surface` (`ANativeWindow_fromSurface`).
    /// The returned reference is released on drop.
    ///
    /// # Safety
    /// `env` must be the JNI env of the calling thread and `surface` a live `android.view.Surface`.
    ///
    /// ### 中文
    /// 获取 Java `Surface` 背后的原生 window（`ANativeWindow_fromSurface`），drop 时释放该引用。
    ///
    /// # Safety
    /// `env` 必须是当前线程的 JNI env，`surface` 必须是有效的 `android.view.Surface`。
    #[cfg(target_os = "android")]
    pub unsafe fn from_surface(env: *mut c_void, surface: *mut c_void) -> Option<Self> {
        let ptr = unsafe { ndk_sys::ANativeWindow_fromSurface(env.cast(), surface.cast()) };
        NonNull::new(ptr.cast()).map(|ptr| Self { ptr, owned: true })
    }

    pub fn as_ptr(&self) -> *mut c_void {
        self.ptr.as_ptr()
    }

    /// ### English
    /// Sets the window buffer geometry and pixel format (the EGL config's native visual id).
    ///
    /// ### 中文
    /// 设置 window 缓冲区的尺寸与像素格式（即 EGL config 的 native visual id）。
    #[cfg(target_os = "android")]
    pub fn set_buffers_geometry(
        &self,
        size: PhysicalSize<u32>,
        format: i32,
    ) -> Result<(), GeometryError> {
        let (width, height) = native_size(size)?;
        let code = unsafe {
            ndk_sys::ANativeWindow_setBuffersGeometry(self.ptr.as_ptr().cast(), width, height, format)
        };
        if code < 0 {
            return Err(GeometryError::Rejected { code });
        }
        Ok(())
    }

    #[cfg(not(target_os = "android"))]
    pub fn set_buffers_geometry(
        &self,
        size: PhysicalSize<u32>,
        _format: i32,
    ) -> Result<(), GeometryError> {
        native_size(size)?;
        Err(GeometryError::Unsupported)
    }
}

/// ### English
/// `size` as the signed pair `ANativeWindow_setBuffersGeometry` takes.
///
/// ### 中文
/// 将 `size` 转为 `ANativeWindow_setBuffersGeometry` 所需的有符号尺寸。
fn native_size(size: PhysicalSize<u32>) -> Result<(i32, i32), GeometryError> {
    match (i32::try_from(size.width), i32::try_from(size.height)) {
        (Ok(width), Ok(height)) => Ok((width, height)),
        _ => Err(GeometryError::OutOfRange {
            width: size.width,
            height: size.height,
        }),
    }
}

impl Drop for NativeWindow {
    fn drop(&mut self) {
        #[cfg(target_os = "android")]
        if self.owned {
            unsafe { ndk_sys::ANativeWindow_release(self.ptr.as_ptr().cast()) };
        }
    }
}
