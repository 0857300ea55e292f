//! ### English
//! Non-Android placeholder for the EGL binding. Reports no display, so `GraphicsContext::open`
//! fails with `DisplayUnavailable` before touching anything else.
//!
//! ### 中文
//! 非 Android 平台的 EGL 占位实现。始终报告无 display，使 `GraphicsContext::open`
//! 在触及其它对象之前以 `DisplayUnavailable` 失败。

use std::ffi::c_void;

use super::{EGL_SUCCESS, EGLint, EglApi, EglConfig, EglContext, EglDisplay, EglSurface};
use crate::engine::window::NativeWindow;

/// ### English
/// Placeholder EGL binding for non-Android builds.
///
/// ### 中文
/// 非 Android 构建的 EGL 占位绑定。
#[derive(Clone, Copy, Debug, Default)]
pub struct LinkedEgl;

impl LinkedEgl {
    pub fn new() -> Self {
        Self
    }
}

impl EglApi for LinkedEgl {
    fn get_default_display(&self) -> EglDisplay {
        EglDisplay::NULL
    }

    fn initialize(&self, _display: EglDisplay) -> Option<(EGLint, EGLint)> {
        None
    }

    fn choose_config(&self, _display: EglDisplay, _attribs: &[EGLint]) -> Option<EglConfig> {
        None
    }

    fn create_context(
        &self,
        _display: EglDisplay,
        _config: EglConfig,
        _attribs: &[EGLint],
    ) -> EglContext {
        EglContext::NULL
    }

    fn get_config_attrib(
        &self,
        _display: EglDisplay,
        _config: EglConfig,
        _attribute: EGLint,
    ) -> Option<EGLint> {
        None
    }

    fn create_window_surface(
        &self,
        _display: EglDisplay,
        _config: EglConfig,
        _window: &NativeWindow,
    ) -> EglSurface {
        EglSurface::NULL
    }

    fn make_current(
        &self,
        _display: EglDisplay,
        _surface: EglSurface,
        _context: EglContext,
    ) -> bool {
        false
    }

    fn swap_buffers(&self, _display: EglDisplay, _surface: EglSurface) -> bool {
        false
    }

    fn destroy_surface(&self, _display: EglDisplay, _surface: EglSurface) -> bool {
        false
    }

    fn destroy_context(&self, _display: EglDisplay, _context: EglContext) -> bool {
        false
    }

    fn terminate(&self, _display: EglDisplay) -> bool {
        false
    }

    fn get_error(&self) -> EGLint {
        EGL_SUCCESS
    }

    fn get_proc_address(&self, _name: &str) -> *const c_void {
        std::ptr::null()
    }
}
