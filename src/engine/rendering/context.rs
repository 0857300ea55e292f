//! ### English
//! EGL display/context/surface triple bound to one native window.
//!
//! A `GraphicsContext` value only exists while all three handles are valid ("open"); "closed" is
//! represented by not having one (`Option<GraphicsContext>` in the session). Construction and
//! teardown live in `open.rs` / `close.rs`.
//!
//! ### 中文
//! 绑定到一个原生 window 的 EGL display/context/surface 三元组。
//!
//! `GraphicsContext` 值只在三个句柄均有效（“打开”）时存在；“关闭”即不存在该值
//! （会话中为 `Option<GraphicsContext>`）。构建与销毁分别位于 `open.rs` / `close.rs`。

mod close;
mod open;

use std::ffi::c_void;

use crate::engine::egl::{EGLint, EglApi, EglContext, EglDisplay, EglSurface};

/// ### English
/// Open graphics context.
///
/// ### 中文
/// 已打开的图形上下文。
#[derive(Debug)]
pub struct GraphicsContext {
    display: EglDisplay,
    context: EglContext,
    surface: EglSurface,
    /// ### English
    /// `EGL_NATIVE_VISUAL_ID` of `config`, the pixel format the window buffers must use.
    ///
    /// ### 中文
    /// `config` 的 `EGL_NATIVE_VISUAL_ID`，即 window 缓冲区必须使用的像素格式。
    native_visual_id: EGLint,
    window: *mut c_void,
}

impl GraphicsContext {
    pub fn native_visual_id(&self) -> EGLint {
        self.native_visual_id
    }

    /// ### English
    /// Window the surface was created for (identity only, never dereferenced).
    ///
    /// ### 中文
    /// surface 所绑定的 window（仅作标识，从不解引用）。
    pub fn window(&self) -> *mut c_void {
        self.window
    }

    /// ### English
    /// Presents the back buffer. On failure returns the EGL error code.
    ///
    /// ### 中文
    /// 呈现后缓冲区；失败时返回 EGL 错误码。
    pub fn swap_buffers(&self, egl: &impl EglApi) -> Result<(), EGLint> {
        if egl.swap_buffers(self.display, self.surface) {
            Ok(())
        } else {
            Err(egl.get_error())
        }
    }
}
