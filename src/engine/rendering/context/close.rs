//! ### English
//! Best-effort teardown: every step runs even if an earlier one fails.
//!
//! ### 中文
//! 尽力而为的销毁：即使前一步失败，后续步骤也会继续执行。

use tracing::{info, warn};

use super::GraphicsContext;
use crate::engine::egl::{EglApi, EglContext, EglSurface};

impl GraphicsContext {
    /// ### English
    /// Releases the current binding, then destroys surface, context and display connection in
    /// that order. Failures are logged and swallowed.
    ///
    /// ### 中文
    /// 先解除 current 绑定，再依次销毁 surface、context 与 display 连接。失败仅记录日志，不会中断。
    pub fn close(self, egl: &impl EglApi) {
        if !egl.make_current(self.display, EglSurface::NULL, EglContext::NULL) {
            warn!("eglMakeCurrent(release) failed: {:#x}", egl.get_error());
        }
        if !egl.destroy_surface(self.display, self.surface) {
            warn!("eglDestroySurface failed: {:#x}", egl.get_error());
        }
        if !egl.destroy_context(self.display, self.context) {
            warn!("eglDestroyContext failed: {:#x}", egl.get_error());
        }
        if !egl.terminate(self.display) {
            warn!("eglTerminate failed: {:#x}", egl.get_error());
        }
        info!(window = ?self.window(), "graphics context closed");
    }
}
