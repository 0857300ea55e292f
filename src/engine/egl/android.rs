//! ### English
//! Android implementation of `EglApi`, linked directly against the system `libEGL`.
//!
//! ### 中文
//! `EglApi` 的 Android 实现，直接链接系统 `libEGL`。

use std::ffi::{CString, c_char, c_void};

use super::{EGLint, EglApi, EglConfig, EglContext, EglDisplay, EglSurface};
use crate::engine::window::NativeWindow;

type EGLBoolean = u32;
const EGL_TRUE: EGLBoolean = 1;

#[link(name = "EGL")]
unsafe extern "C" {
    fn eglGetDisplay(display_id: *mut c_void) -> *mut c_void;
    fn eglInitialize(dpy: *mut c_void, major: *mut EGLint, minor: *mut EGLint) -> EGLBoolean;
    fn eglChooseConfig(
        dpy: *mut c_void,
        attrib_list: *const EGLint,
        configs: *mut *mut c_void,
        config_size: EGLint,
        num_config: *mut EGLint,
    ) -> EGLBoolean;
    fn eglCreateContext(
        dpy: *mut c_void,
        config: *mut c_void,
        share_context: *mut c_void,
        attrib_list: *const EGLint,
    ) -> *mut c_void;
    fn eglGetConfigAttrib(
        dpy: *mut c_void,
        config: *mut c_void,
        attribute: EGLint,
        value: *mut EGLint,
    ) -> EGLBoolean;
    fn eglCreateWindowSurface(
        dpy: *mut c_void,
        config: *mut c_void,
        win: *mut c_void,
        attrib_list: *const EGLint,
    ) -> *mut c_void;
    fn eglMakeCurrent(
        dpy: *mut c_void,
        draw: *mut c_void,
        read: *mut c_void,
        ctx: *mut c_void,
    ) -> EGLBoolean;
    fn eglSwapBuffers(dpy: *mut c_void, surface: *mut c_void) -> EGLBoolean;
    fn eglDestroySurface(dpy: *mut c_void, surface: *mut c_void) -> EGLBoolean;
    fn eglDestroyContext(dpy: *mut c_void, ctx: *mut c_void) -> EGLBoolean;
    fn eglTerminate(dpy: *mut c_void) -> EGLBoolean;
    fn eglGetError() -> EGLint;
    fn eglGetProcAddress(procname: *const c_char) -> *const c_void;
}

/// ### English
/// Zero-sized handle to the process-wide `libEGL`.
///
/// ### 中文
/// 指向进程级 `libEGL` 的零大小句柄。
#[derive(Clone, Copy, Debug, Default)]
pub struct LinkedEgl;

impl LinkedEgl {
    pub fn new() -> Self {
        Self
    }
}

impl EglApi for LinkedEgl {
    fn get_default_display(&self) -> EglDisplay {
        // EGL_DEFAULT_DISPLAY is ((EGLNativeDisplayType)0).
        EglDisplay::from_raw(unsafe { eglGetDisplay(std::ptr::null_mut()) })
    }

    fn initialize(&self, display: EglDisplay) -> Option<(EGLint, EGLint)> {
        let mut major = 0;
        let mut minor = 0;
        let ok = unsafe { eglInitialize(display.as_raw(), &mut major, &mut minor) };
        (ok == EGL_TRUE).then_some((major, minor))
    }

    fn choose_config(&self, display: EglDisplay, attribs: &[EGLint]) -> Option<EglConfig> {
        let mut config = std::ptr::null_mut();
        let mut num_configs = 0;
        let ok = unsafe {
            eglChooseConfig(
                display.as_raw(),
                attribs.as_ptr(),
                &mut config,
                1,
                &mut num_configs,
            )
        };
        (ok == EGL_TRUE && num_configs > 0).then_some(EglConfig::from_raw(config))
    }

    fn create_context(
        &self,
        display: EglDisplay,
        config: EglConfig,
        attribs: &[EGLint],
    ) -> EglContext {
        EglContext::from_raw(unsafe {
            eglCreateContext(
                display.as_raw(),
                config.as_raw(),
                std::ptr::null_mut(),
                attribs.as_ptr(),
            )
        })
    }

    fn get_config_attrib(
        &self,
        display: EglDisplay,
        config: EglConfig,
        attribute: EGLint,
    ) -> Option<EGLint> {
        let mut value = 0;
        let ok =
            unsafe { eglGetConfigAttrib(display.as_raw(), config.as_raw(), attribute, &mut value) };
        (ok == EGL_TRUE).then_some(value)
    }

    fn create_window_surface(
        &self,
        display: EglDisplay,
        config: EglConfig,
        window: &NativeWindow,
    ) -> EglSurface {
        EglSurface::from_raw(unsafe {
            eglCreateWindowSurface(
                display.as_raw(),
                config.as_raw(),
                window.as_ptr(),
                std::ptr::null(),
            )
        })
    }

    fn make_current(
        &self,
        display: EglDisplay,
        surface: EglSurface,
        context: EglContext,
    ) -> bool {
        unsafe {
            eglMakeCurrent(
                display.as_raw(),
                surface.as_raw(),
                surface.as_raw(),
                context.as_raw(),
            ) == EGL_TRUE
        }
    }

    fn swap_buffers(&self, display: EglDisplay, surface: EglSurface) -> bool {
        unsafe { eglSwapBuffers(display.as_raw(), surface.as_raw()) == EGL_TRUE }
    }

    fn destroy_surface(&self, display: EglDisplay, surface: EglSurface) -> bool {
        unsafe { eglDestroySurface(display.as_raw(), surface.as_raw()) == EGL_TRUE }
    }

    fn destroy_context(&self, display: EglDisplay, context: EglContext) -> bool {
        unsafe { eglDestroyContext(display.as_raw(), context.as_raw()) == EGL_TRUE }
    }

    fn terminate(&self, display: EglDisplay) -> bool {
        unsafe { eglTerminate(display.as_raw()) == EGL_TRUE }
    }

    fn get_error(&self) -> EGLint {
        unsafe { eglGetError() }
    }

    fn get_proc_address(&self, name: &str) -> *const c_void {
        let Ok(name) = CString::new(name) else {
            return std::ptr::null();
        };
        unsafe { eglGetProcAddress(name.as_ptr()) }
    }
}
