//! ### English
//! EGL seam: handle newtypes, the attribute constants used to pick a config, and the `EglApi`
//! trait implemented by the linked `libEGL` (Android) or a stub (other targets).
//!
//! ### 中文
//! EGL 接缝：句柄 newtype、选择 config 所需的属性常量，以及 `EglApi` trait。
//! Android 上由链接的 `libEGL` 实现，其它目标使用占位实现。

use std::ffi::c_void;

use crate::engine::window::NativeWindow;

#[cfg(target_os = "android")]
mod android;

#[cfg(not(target_os = "android"))]
mod stub;

#[cfg(target_os = "android")]
pub use android::LinkedEgl;

#[cfg(not(target_os = "android"))]
pub use stub::LinkedEgl;

pub type EGLint = i32;

#[cfg_attr(target_os = "android", allow(dead_code))]
pub const EGL_SUCCESS: EGLint = 0x3000;

pub const EGL_DONT_CARE: EGLint = -1;
pub const EGL_NONE: EGLint = 0x3038;
pub const EGL_BUFFER_SIZE: EGLint = 0x3020;
pub const EGL_ALPHA_SIZE: EGLint = 0x3021;
pub const EGL_BLUE_SIZE: EGLint = 0x3022;
pub const EGL_GREEN_SIZE: EGLint = 0x3023;
pub const EGL_RED_SIZE: EGLint = 0x3024;
pub const EGL_DEPTH_SIZE: EGLint = 0x3025;
pub const EGL_STENCIL_SIZE: EGLint = 0x3026;
pub const EGL_NATIVE_VISUAL_ID: EGLint = 0x302E;
pub const EGL_SURFACE_TYPE: EGLint = 0x3033;
pub const EGL_RENDERABLE_TYPE: EGLint = 0x3040;
pub const EGL_CONTEXT_CLIENT_VERSION: EGLint = 0x3098;
pub const EGL_WINDOW_BIT: EGLint = 0x0004;
pub const EGL_OPENGL_ES2_BIT: EGLint = 0x0004;

macro_rules! egl_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct $name(*mut c_void);

        impl $name {
            pub const NULL: Self = Self(std::ptr::null_mut());

            pub fn from_raw(ptr: *mut c_void) -> Self {
                Self(ptr)
            }

            pub fn as_raw(self) -> *mut c_void {
                self.0
            }

            pub fn is_null(self) -> bool {
                self.0.is_null()
            }
        }
    };
}

egl_handle!(
    /// ### English
    /// `EGLDisplay` (`EGL_NO_DISPLAY` is `NULL`).
    ///
    /// ### 中文
    /// `EGLDisplay`（`EGL_NO_DISPLAY` 即 `NULL`）。
    EglDisplay
);
egl_handle!(
    /// ### English
    /// `EGLConfig` chosen for the window surface.
    ///
    /// ### 中文
    /// 为 window surface 选中的 `EGLConfig`。
    EglConfig
);
egl_handle!(
    /// ### English
    /// `EGLContext` (`EGL_NO_CONTEXT` is `NULL`).
    ///
    /// ### 中文
    /// `EGLContext`（`EGL_NO_CONTEXT` 即 `NULL`）。
    EglContext
);
egl_handle!(
    /// ### English
    /// `EGLSurface` (`EGL_NO_SURFACE` is `NULL`).
    ///
    /// ### 中文
    /// `EGLSurface`（`EGL_NO_SURFACE` 即 `NULL`）。
    EglSurface
);

/// ### English
/// The EGL entry points used by `GraphicsContext` and `FrameRenderer`.
///
/// Return values mirror EGL: `NULL` handles, `false` and `None` signal failure, after which
/// `get_error` reports the reason. All calls must happen on the render thread.
///
/// ### 中文
/// `GraphicsContext` 与 `FrameRenderer` 使用的 EGL 入口。
///
/// 返回值与 EGL 一致：`NULL` 句柄、`false` 与 `None` 表示失败，随后可用 `get_error` 查询原因。
/// 所有调用必须发生在渲染线程。
pub trait EglApi {
    fn get_default_display(&self) -> EglDisplay;

    /// ### English
    /// Returns the `(major, minor)` version on success.
    ///
    /// ### 中文
    /// 成功时返回 `(major, minor)` 版本号。
    fn initialize(&self, display: EglDisplay) -> Option<(EGLint, EGLint)>;

    /// ### English
    /// Returns the first matching config, or `None` if the call failed or nothing matched.
    ///
    /// ### 中文
    /// 返回第一个匹配的 config；调用失败或无匹配时返回 `None`。
    fn choose_config(&self, display: EglDisplay, attribs: &[EGLint]) -> Option<EglConfig>;

    fn create_context(
        &self,
        display: EglDisplay,
        config: EglConfig,
        attribs: &[EGLint],
    ) -> EglContext;

    fn get_config_attrib(
        &self,
        display: EglDisplay,
        config: EglConfig,
        attribute: EGLint,
    ) -> Option<EGLint>;

    fn create_window_surface(
        &self,
        display: EglDisplay,
        config: EglConfig,
        window: &NativeWindow,
    ) -> EglSurface;

    /// ### English
    /// Binds `context` with `surface` as draw and read target; `NULL` handles release the binding.
    ///
    /// ### 中文
    /// 将 `context` 与 `surface`（同时作为 draw/read 目标）绑定；传入 `NULL` 句柄则解除绑定。
    fn make_current(&self, display: EglDisplay, surface: EglSurface, context: EglContext)
    -> bool;

    fn swap_buffers(&self, display: EglDisplay, surface: EglSurface) -> bool;

    fn destroy_surface(&self, display: EglDisplay, surface: EglSurface) -> bool;

    fn destroy_context(&self, display: EglDisplay, context: EglContext) -> bool;

    fn terminate(&self, display: EglDisplay) -> bool;

    fn get_error(&self) -> EGLint;

    /// ### English
    /// GL function loader used to build the gleam function table.
    ///
    /// ### 中文
    /// 用于构建 gleam 函数表的 GL 函数加载器。
    fn get_proc_address(&self, name: &str) -> *const c_void;
}
