//! ### English
//! `GraphicsContext::open`: display → initialize → config → context → visual id → surface →
//! make current. A failed step releases everything acquired before it.
//!
//! ### 中文
//! `GraphicsContext::open`：display → initialize → config → context → visual id → surface →
//! make current。任一步失败都会释放此前获取的全部对象。

use tracing::{debug, error, info};

use super::GraphicsContext;
use crate::engine::egl::{
    EGL_ALPHA_SIZE, EGL_BLUE_SIZE, EGL_BUFFER_SIZE, EGL_CONTEXT_CLIENT_VERSION, EGL_DEPTH_SIZE,
    EGL_DONT_CARE, EGL_GREEN_SIZE, EGL_NATIVE_VISUAL_ID, EGL_NONE, EGL_OPENGL_ES2_BIT,
    EGL_RED_SIZE, EGL_RENDERABLE_TYPE, EGL_STENCIL_SIZE, EGL_SURFACE_TYPE, EGL_WINDOW_BIT, EGLint,
    EglApi, EglContext, EglDisplay, EglSurface,
};
use crate::engine::error::ContextError;
use crate::engine::window::NativeWindow;

/// ### English
/// RGB 5-6-5, 16-bit depth, ES2 renderable, window drawable. Everything else is don't-care.
///
/// ### 中文
/// RGB 5-6-5、16 位深度、可用于 ES2、可绘制到 window；其余属性不关心。
pub(crate) const CONFIG_ATTRIBS: [EGLint; 19] = [
    EGL_RED_SIZE,
    5,
    EGL_GREEN_SIZE,
    6,
    EGL_BLUE_SIZE,
    5,
    EGL_DEPTH_SIZE,
    16,
    EGL_ALPHA_SIZE,
    EGL_DONT_CARE,
    EGL_STENCIL_SIZE,
    EGL_DONT_CARE,
    EGL_BUFFER_SIZE,
    EGL_DONT_CARE,
    EGL_RENDERABLE_TYPE,
    EGL_OPENGL_ES2_BIT,
    EGL_SURFACE_TYPE,
    EGL_WINDOW_BIT,
    EGL_NONE,
];

pub(crate) const CONTEXT_ATTRIBS: [EGLint; 3] = [EGL_CONTEXT_CLIENT_VERSION, 2, EGL_NONE];

/// ### English
/// Partially built context. Dropping it without `finish` undoes every step taken so far in
/// reverse order.
///
/// ### 中文
/// 构建到一半的上下文。未调用 `finish` 就被 drop 时，会按相反顺序撤销已完成的步骤。
struct Rollback<'a, E: EglApi> {
    egl: &'a E,
    display: EglDisplay,
    initialized: bool,
    context: EglContext,
    surface: EglSurface,
}

impl<'a, E: EglApi> Rollback<'a, E> {
    fn new(egl: &'a E, display: EglDisplay) -> Self {
        Self {
            egl,
            display,
            initialized: false,
            context: EglContext::NULL,
            surface: EglSurface::NULL,
        }
    }

    fn finish(mut self) -> (EglContext, EglSurface) {
        let handles = (self.context, self.surface);
        self.initialized = false;
        self.context = EglContext::NULL;
        self.surface = EglSurface::NULL;
        handles
    }
}

impl<E: EglApi> Drop for Rollback<'_, E> {
    fn drop(&mut self) {
        if !self.surface.is_null() {
            debug!("rollback: destroying surface");
            self.egl.destroy_surface(self.display, self.surface);
        }
        if !self.context.is_null() {
            debug!("rollback: destroying context");
            self.egl.destroy_context(self.display, self.context);
        }
        if self.initialized {
            debug!("rollback: terminating display");
            self.egl.terminate(self.display);
        }
    }
}

impl GraphicsContext {
    /// ### English
    /// Builds an open context bound to `window` and makes it current on the calling thread.
    ///
    /// The caller must close any context it already holds first. EGL display initialization is
    /// not reference counted, so a failed open terminates the display under any context still
    /// open on it.
    ///
    /// ### 中文
    /// 构建绑定到 `window` 的上下文，并使其在当前线程 current。
    ///
    /// 调用方必须先关闭自己已持有的上下文。EGL display 的初始化不计引用，
    /// 因此一次失败的 open 会终止 display，连同其上仍打开的上下文。
    pub fn open(egl: &impl EglApi, window: &NativeWindow) -> Result<Self, ContextError> {
        let display = egl.get_default_display();
        if display.is_null() {
            error!("eglGetDisplay returned EGL_NO_DISPLAY");
            return Err(ContextError::DisplayUnavailable);
        }

        let mut rollback = Rollback::new(egl, display);

        let Some((major, minor)) = egl.initialize(display) else {
            let code = egl.get_error();
            error!("eglInitialize failed: {code:#x}");
            return Err(ContextError::InitFailed { code });
        };
        rollback.initialized = true;
        debug!("EGL {major}.{minor} initialized");

        let Some(config) = egl.choose_config(display, &CONFIG_ATTRIBS) else {
            error!("eglChooseConfig found no RGB565/depth16/ES2 window config");
            return Err(ContextError::NoMatchingConfig);
        };

        let context = egl.create_context(display, config, &CONTEXT_ATTRIBS);
        if context.is_null() {
            let code = egl.get_error();
            error!("eglCreateContext failed: {code:#x}");
            return Err(ContextError::ContextCreateFailed { code });
        }
        rollback.context = context;

        let Some(native_visual_id) = egl.get_config_attrib(display, config, EGL_NATIVE_VISUAL_ID)
        else {
            let code = egl.get_error();
            error!("eglGetConfigAttrib(EGL_NATIVE_VISUAL_ID) failed: {code:#x}");
            return Err(ContextError::ConfigQueryFailed { code });
        };

        let surface = egl.create_window_surface(display, config, window);
        if surface.is_null() {
            let code = egl.get_error();
            error!("eglCreateWindowSurface failed: {code:#x}");
            return Err(ContextError::SurfaceCreateFailed { code });
        }
        rollback.surface = surface;

        if !egl.make_current(display, surface, context) {
            let code = egl.get_error();
            error!("eglMakeCurrent failed: {code:#x}");
            return Err(ContextError::MakeCurrentFailed { code });
        }

        let (context, surface) = rollback.finish();
        info!(native_visual_id, window = ?window.as_ptr(), "graphics context open");
        Ok(Self {
            display,
            context,
            surface,
            native_visual_id,
            window: window.as_ptr(),
        })
    }
}
