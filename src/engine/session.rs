//! ### English
//! `RendererSession`: the single owner of window, graphics context and frame renderer.
//!
//! Lives on the render thread; every method issues EGL/GLES calls on that thread. Playback state
//! is the only piece shared with other threads.
//!
//! ### 中文
//! `RendererSession`：window、图形上下文与帧渲染器的唯一所有者。
//!
//! 位于渲染线程；所有方法都在该线程发出 EGL/GLES 调用。播放状态是唯一与其它线程共享的部分。

use std::sync::Arc;

use dpi::PhysicalSize;
use tracing::{debug, error, info};

use crate::engine::config::RendererConfig;
use crate::engine::egl::EglApi;
use crate::engine::error::{AttachError, GeometryError};
use crate::engine::frame::Frame;
use crate::engine::gles::GlesApi;
use crate::engine::playback::PlaybackStateMachine;
use crate::engine::producer::{self, FrameProducer};
use crate::engine::rendering::{FrameOutcome, FrameRenderer, GraphicsContext};
use crate::engine::window::NativeWindow;

pub struct RendererSession<E: EglApi, G: GlesApi> {
    egl: E,
    gl: G,
    config: RendererConfig,
    playback: Arc<PlaybackStateMachine>,
    producer: Arc<dyn FrameProducer>,
    /// ### English
    /// Latest window supplied by the host (`None` = no drawable target).
    ///
    /// ### 中文
    /// 宿主最近一次提供的 window（`None` 表示没有可绘制目标）。
    window: Option<NativeWindow>,
    context: Option<GraphicsContext>,
    /// ### English
    /// Present exactly when `context` is.
    ///
    /// ### 中文
    /// 与 `context` 同时存在。
    renderer: Option<FrameRenderer>,
}

impl<E: EglApi, G: GlesApi> RendererSession<E, G> {
    pub fn new(
        egl: E,
        gl: G,
        config: RendererConfig,
        playback: Arc<PlaybackStateMachine>,
        producer: Arc<dyn FrameProducer>,
    ) -> Self {
        Self {
            egl,
            gl,
            config,
            playback,
            producer,
            window: None,
            context: None,
            renderer: None,
        }
    }

    /// ### English
    /// Rebinds the session to `window`.
    ///
    /// Any open context is closed first. `None` records "no window" and leaves the session
    /// closed. `Some` opens a fresh context on the window, prepares the draw path and starts the
    /// producer on its own thread, so a producer that delivers frames from `start` never blocks
    /// the render thread. On failure nothing stays open and the window is kept, so geometry calls report
    /// `NotOpen`; a later attach may retry.
    ///
    /// ### 中文
    /// 将会话重新绑定到 `window`。
    ///
    /// 先关闭已打开的上下文。`None` 记录“无 window”并保持关闭状态。`Some` 会在该 window 上打开
    /// 新上下文、准备绘制路径，并在独立线程上启动生产者，因此在 `start` 中投递帧的生产者
    /// 不会阻塞渲染线程。失败时不会保留任何已打开对象，但会保留 window，
    /// 因此尺寸设置会返回 `NotOpen`；之后可再次 attach 重试。
    pub fn attach_surface(&mut self, window: Option<NativeWindow>) -> Result<(), AttachError> {
        self.close_context();
        self.window = window;

        let Some(window) = self.window.as_ref() else {
            info!("no window");
            return Ok(());
        };

        let context = GraphicsContext::open(&self.egl, window).inspect_err(|err| {
            error!("attach_surface: could not open graphics context: {err}");
        })?;

        let renderer = match FrameRenderer::prepare(&self.gl, &self.config) {
            Ok(renderer) => renderer,
            Err(err) => {
                error!("attach_surface: could not prepare frame renderer: {err}");
                context.close(&self.egl);
                return Err(err.into());
            }
        };

        self.context = Some(context);
        self.renderer = Some(renderer);
        debug!("attach_surface: starting producer");
        producer::spawn_start(&self.producer);
        Ok(())
    }

    /// ### English
    /// Draws one frame if a context is open, gated by the current playback state.
    ///
    /// ### 中文
    /// 若上下文已打开则绘制一帧，是否绘制由当前播放状态决定。
    pub fn render_frame(&mut self, frame: &Frame) -> FrameOutcome {
        let (Some(context), Some(renderer)) = (&self.context, &mut self.renderer) else {
            debug!("frame dropped: no graphics context");
            return FrameOutcome::NoContext;
        };
        renderer.render_frame(&self.gl, &self.egl, context, self.playback.state(), frame)
    }

    /// ### English
    /// Applies `size` and the context's native visual id to the attached window's buffers.
    ///
    /// ### 中文
    /// 将 `size` 与上下文的 native visual id 应用到已挂载 window 的缓冲区。
    pub fn set_buffers_geometry(&self, size: PhysicalSize<u32>) -> Result<(), GeometryError> {
        let window = self.window.as_ref().ok_or(GeometryError::NoWindow)?;
        let context = self.context.as_ref().ok_or(GeometryError::NotOpen)?;
        window.set_buffers_geometry(size, context.native_visual_id())
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.context.is_some()
    }

    fn close_context(&mut self) {
        // Draw-path objects belong to the context and must go while it is still current.
        if let Some(mut renderer) = self.renderer.take() {
            if renderer.release(&self.gl) {
                debug!("frame renderer released with its context");
            }
        }
        if let Some(context) = self.context.take() {
            context.close(&self.egl);
        }
    }
}

impl<E: EglApi, G: GlesApi> Drop for RendererSession<E, G> {
    fn drop(&mut self) {
        self.close_context();
    }
}
