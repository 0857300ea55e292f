//! ### English
//! `SurfaceLifecycleHandler`: thread-safe host-facing handle to the render thread.
//!
//! ### 中文
//! `SurfaceLifecycleHandler`：面向宿主、线程安全的渲染线程句柄。

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel as channel;
use dpi::PhysicalSize;
use tracing::{info, warn};

use crate::engine::config::{MAX_FRAME_QUEUE_CAPACITY, RendererConfig};
use crate::engine::egl::{EglApi, LinkedEgl};
use crate::engine::error::RuntimeError;
use crate::engine::frame::Frame;
use crate::engine::gles::{GlesApi, GleamGles};
use crate::engine::playback::{PlaybackState, PlaybackStateMachine};
use crate::engine::producer::FrameProducer;
use crate::engine::window::NativeWindow;

use super::command::RenderCommand;
use super::render_thread;

const INIT_TIMEOUT: Duration = Duration::from_secs(30);

/// ### English
/// Owns the render thread. Lifecycle calls (`pause`/`resume`/`stop`) are direct atomic writes;
/// everything that touches GPU state is forwarded to the render thread.
///
/// Dropping the handler shuts the render thread down and joins it.
///
/// ### 中文
/// 持有渲染线程。生命周期调用（`pause`/`resume`/`stop`）直接写原子变量；
/// 所有涉及 GPU 状态的操作都会转发到渲染线程。
///
/// drop 时会关闭并 join 渲染线程。
pub struct SurfaceLifecycleHandler {
    command_tx: channel::Sender<RenderCommand>,
    playback: Arc<PlaybackStateMachine>,
    thread: Option<thread::JoinHandle<()>>,
}

impl SurfaceLifecycleHandler {
    /// ### English
    /// Spawns the render thread and blocks until its backend is initialized (or times out).
    ///
    /// #### Parameters
    /// - `make_backend`: Builds the EGL/GLES backends on the render thread.
    /// - `config`: Renderer settings (queue capacity is taken from here, clamped to
    ///   `1..=MAX_FRAME_QUEUE_CAPACITY`).
    /// - `producer`: Decode worker started on its own thread after every successful attach.
    ///
    /// ### 中文
    /// 创建渲染线程，并阻塞等待其后端初始化完成（或超时）。
    ///
    /// #### 参数
    /// - `make_backend`：在渲染线程上构建 EGL/GLES 后端。
    /// - `config`：渲染器设置（队列容量取自此处，限制在 `1..=MAX_FRAME_QUEUE_CAPACITY`）。
    /// - `producer`：每次 attach 成功后在独立线程上启动的解码工作者。
    pub fn spawn<E, G, F>(
        make_backend: F,
        config: RendererConfig,
        producer: Arc<dyn FrameProducer>,
    ) -> Result<Self, RuntimeError>
    where
        E: EglApi + 'static,
        G: GlesApi + 'static,
        F: FnOnce() -> Result<(E, G), String> + Send + 'static,
    {
        let capacity = config.frame_queue_capacity.clamp(1, MAX_FRAME_QUEUE_CAPACITY);
        let (command_tx, command_rx) = channel::bounded(capacity);
        let (init_tx, init_rx) = channel::bounded(1);

        let playback = Arc::new(PlaybackStateMachine::new());
        let playback_for_thread = playback.clone();

        let thread = thread::Builder::new()
            .name("video-surface-render".to_string())
            .spawn(move || {
                render_thread::run_render_thread(
                    make_backend,
                    config,
                    playback_for_thread,
                    producer,
                    command_rx,
                    init_tx,
                );
            })
            .map_err(|err| RuntimeError::Init(err.to_string()))?;

        match init_rx.recv_timeout(INIT_TIMEOUT) {
            Ok(Ok(())) => Ok(Self {
                command_tx,
                playback,
                thread: Some(thread),
            }),
            Ok(Err(err)) => {
                let _ = thread.join();
                Err(RuntimeError::Init(err))
            }
            Err(channel::RecvTimeoutError::Timeout) => {
                // Dropping `command_tx` lets the thread exit once it finishes initializing.
                warn!("render thread did not initialize within {INIT_TIMEOUT:?}");
                Err(RuntimeError::Timeout)
            }
            Err(channel::RecvTimeoutError::Disconnected) => {
                let _ = thread.join();
                Err(RuntimeError::Disconnected)
            }
        }
    }

    /// ### English
    /// Spawns the render thread on the platform EGL (`libEGL` on Android) with gleam GLES.
    ///
    /// ### 中文
    /// 基于平台 EGL（Android 上为 `libEGL`）与 gleam GLES 创建渲染线程。
    pub fn spawn_platform(
        config: RendererConfig,
        producer: Arc<dyn FrameProducer>,
    ) -> Result<Self, RuntimeError> {
        Self::spawn(
            || {
                let egl = LinkedEgl::new();
                let gl = GleamGles::load(&egl);
                Ok((egl, gl))
            },
            config,
            producer,
        )
    }

    /// ### English
    /// Rebinds the renderer to `window` (`None` = surface destroyed) and waits for the outcome.
    ///
    /// ### 中文
    /// 将渲染器重新绑定到 `window`（`None` 表示 surface 已销毁），并等待结果。
    pub fn attach_surface(&self, window: Option<NativeWindow>) -> Result<(), RuntimeError> {
        let (reply, reply_rx) = channel::bounded(1);
        self.send(RenderCommand::AttachSurface { window, reply })?;
        reply_rx.recv().map_err(|_| RuntimeError::Disconnected)??;
        Ok(())
    }

    /// ### English
    /// Validates and queues one RGB565 frame. Blocks while the frame queue is full.
    ///
    /// ### 中文
    /// 校验并排队一帧 RGB565 数据；帧队列已满时阻塞。
    pub fn deliver_frame(&self, pixels: Vec<u8>, width: u32, height: u32) -> Result<(), RuntimeError> {
        let frame = Frame::new(pixels, width, height).inspect_err(|err| {
            warn!("frame rejected: {err}");
        })?;
        self.send(RenderCommand::Frame(frame))
    }

    /// ### English
    /// Applies frame geometry and the context's native pixel format to the attached window.
    ///
    /// ### 中文
    /// 将帧尺寸与上下文的原生像素格式应用到已挂载的 window。
    pub fn set_buffers_geometry(&self, size: PhysicalSize<u32>) -> Result<(), RuntimeError> {
        let (reply, reply_rx) = channel::bounded(1);
        self.send(RenderCommand::SetBuffersGeometry { size, reply })?;
        reply_rx.recv().map_err(|_| RuntimeError::Disconnected)??;
        Ok(())
    }

    pub fn pause(&self) {
        self.playback.pause();
    }

    pub fn resume(&self) {
        self.playback.resume();
    }

    /// ### English
    /// Marks playback stopped. GPU resources are released by the next frame, the next attach, or
    /// shutdown, whichever comes first.
    ///
    /// ### 中文
    /// 标记播放停止。GPU 资源会在下一帧、下一次 attach 或关闭时（以先到者为准）释放。
    pub fn stop(&self) {
        self.playback.stop();
    }

    pub fn state(&self) -> PlaybackState {
        self.playback.state()
    }

    fn send(&self, command: RenderCommand) -> Result<(), RuntimeError> {
        self.command_tx
            .send(command)
            .map_err(|_| RuntimeError::Disconnected)
    }
}

impl Drop for SurfaceLifecycleHandler {
    fn drop(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };
        let _ = self.command_tx.send(RenderCommand::Shutdown);
        let _ = thread.join();
        info!("surface lifecycle handler shut down");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{OnceLock, Weak};
    use std::time::Instant;

    use super::*;
    use crate::engine::error::{AttachError, ContextError, FrameError, GeometryError};
    use crate::engine::testing::{Call, FakeGpu, fake_window};

    fn spawn_fake(gpu: &FakeGpu, starts: &Arc<AtomicUsize>) -> SurfaceLifecycleHandler {
        let backend = gpu.clone();
        let starts = starts.clone();
        SurfaceLifecycleHandler::spawn(
            move || Ok((backend.clone(), backend)),
            RendererConfig::default(),
            Arc::new(move || {
                starts.fetch_add(1, Ordering::Relaxed);
            }),
        )
        .unwrap()
    }

    fn wait_for_starts(starts: &AtomicUsize, n: usize) -> usize {
        let deadline = Instant::now() + Duration::from_secs(5);
        while starts.load(Ordering::Relaxed) < n && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        starts.load(Ordering::Relaxed)
    }

    #[test]
    fn handler_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SurfaceLifecycleHandler>();
    }

    #[test]
    fn backend_failure_is_reported_from_spawn() {
        let result = SurfaceLifecycleHandler::spawn(
            || Err::<(FakeGpu, FakeGpu), _>("no libEGL".to_string()),
            RendererConfig::default(),
            Arc::new(|| {}),
        );

        assert_eq!(result.err(), Some(RuntimeError::Init("no libEGL".to_string())));
    }

    #[test]
    fn attach_and_deliver_end_to_end() {
        let gpu = FakeGpu::new();
        let starts = Arc::new(AtomicUsize::new(0));
        let handler = spawn_fake(&gpu, &starts);

        handler.attach_surface(Some(fake_window(0x100))).unwrap();
        assert_eq!(wait_for_starts(&starts, 1), 1);
        gpu.take_calls();

        handler
            .deliver_frame(vec![7; 640 * 480 * 2], 640, 480)
            .unwrap();
        // A round trip through the queue guarantees the frame was drawn.
        handler.attach_surface(Some(fake_window(0x100))).unwrap();

        let calls = gpu.calls();
        let pos = |want: &dyn Fn(&Call) -> bool| calls.iter().position(|c| want(c)).unwrap();
        let viewport = pos(&|c| *c == Call::Viewport { width: 640, height: 480 });
        let upload = pos(&|c| matches!(c, Call::TexImage { width: 640, height: 480, .. }));
        let draw = pos(&|c| *c == Call::DrawTriangleFan { first: 0, count: 6 });
        let swap = pos(&|c| matches!(c, Call::SwapBuffers { .. }));
        assert!(viewport < upload && upload < draw && draw < swap);
        assert_eq!(
            calls
                .iter()
                .filter(|c| matches!(c, Call::SwapBuffers { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn producer_may_deliver_frames_from_start() {
        let gpu = FakeGpu::new();
        let backend = gpu.clone();
        let slot: Arc<OnceLock<Weak<SurfaceLifecycleHandler>>> = Arc::new(OnceLock::new());
        let producer_slot = slot.clone();
        let (done_tx, done_rx) = channel::bounded(1);

        let handler = Arc::new(
            SurfaceLifecycleHandler::spawn(
                move || Ok((backend.clone(), backend)),
                RendererConfig::default(),
                Arc::new(move || {
                    let Some(handler) = producer_slot.get().and_then(Weak::upgrade) else {
                        return;
                    };
                    // Twice the queue depth: only drains if the render thread keeps running.
                    for _ in 0..8 {
                        let _ = handler.deliver_frame(vec![1; 4 * 4 * 2], 4, 4);
                    }
                    let _ = done_tx.send(());
                }),
            )
            .unwrap(),
        );
        slot.set(Arc::downgrade(&handler)).unwrap();

        let (attached_tx, attached_rx) = channel::bounded(1);
        let attacher = handler.clone();
        thread::spawn(move || {
            let _ = attached_tx.send(attacher.attach_surface(Some(fake_window(0x100))));
        });

        assert_eq!(attached_rx.recv_timeout(Duration::from_secs(5)), Ok(Ok(())));
        done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        // Round trip through the queue so every delivered frame has been drawn.
        let _ = handler.set_buffers_geometry(PhysicalSize::new(4, 4));

        let swaps = gpu
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::SwapBuffers { .. }))
            .count();
        assert_eq!(swaps, 8);
    }

    #[test]
    fn oversized_queue_capacity_is_clamped() {
        let gpu = FakeGpu::new();
        let backend = gpu.clone();
        let handler = SurfaceLifecycleHandler::spawn(
            move || Ok((backend.clone(), backend)),
            RendererConfig {
                frame_queue_capacity: usize::MAX,
                ..RendererConfig::default()
            },
            Arc::new(|| {}),
        )
        .unwrap();

        handler.attach_surface(Some(fake_window(0x100))).unwrap();
        assert_eq!(handler.deliver_frame(vec![0; 8], 2, 2), Ok(()));
    }

    #[test]
    fn attach_failure_surfaces_as_error() {
        let gpu = FakeGpu::new();
        gpu.fail(|f| f.choose_config = true);
        let starts = Arc::new(AtomicUsize::new(0));
        let handler = spawn_fake(&gpu, &starts);

        let err = handler.attach_surface(Some(fake_window(0x100))).unwrap_err();

        assert_eq!(
            err,
            RuntimeError::Attach(AttachError::Context(ContextError::NoMatchingConfig))
        );
        assert_eq!(starts.load(Ordering::Relaxed), 0);
        assert_eq!(gpu.live_egl_objects(), (0, 0, 0));
    }

    #[test]
    fn null_attach_is_ok_and_opens_nothing() {
        let gpu = FakeGpu::new();
        let handler = spawn_fake(&gpu, &Arc::new(AtomicUsize::new(0)));

        assert_eq!(handler.attach_surface(None), Ok(()));
        assert!(!gpu.calls().iter().any(Call::is_egl));
    }

    #[test]
    fn invalid_frames_never_reach_the_render_thread() {
        let gpu = FakeGpu::new();
        let handler = spawn_fake(&gpu, &Arc::new(AtomicUsize::new(0)));
        handler.attach_surface(Some(fake_window(0x100))).unwrap();
        gpu.take_calls();

        assert_eq!(
            handler.deliver_frame(vec![0; 4], 0, 2),
            Err(RuntimeError::Frame(FrameError::Empty {
                width: 0,
                height: 2
            }))
        );
        assert_eq!(
            handler.deliver_frame(vec![0; 4], 2, 2),
            Err(RuntimeError::Frame(FrameError::BufferTooSmall {
                expected: 8,
                actual: 4
            }))
        );

        handler.attach_surface(None).unwrap();
        assert!(
            !gpu.calls()
                .iter()
                .any(|c| matches!(c, Call::TexImage { .. }))
        );
    }

    #[test]
    fn lifecycle_writes_are_immediate() {
        let gpu = FakeGpu::new();
        let handler = spawn_fake(&gpu, &Arc::new(AtomicUsize::new(0)));

        assert_eq!(handler.state(), PlaybackState::Running);
        handler.pause();
        assert_eq!(handler.state(), PlaybackState::Paused);
        handler.resume();
        assert_eq!(handler.state(), PlaybackState::Running);
        handler.stop();
        handler.resume();
        assert_eq!(handler.state(), PlaybackState::Stopped);
    }

    #[test]
    fn geometry_without_window_is_reported() {
        let gpu = FakeGpu::new();
        let handler = spawn_fake(&gpu, &Arc::new(AtomicUsize::new(0)));

        assert_eq!(
            handler.set_buffers_geometry(PhysicalSize::new(16, 16)),
            Err(RuntimeError::Geometry(GeometryError::NoWindow))
        );
    }

    #[test]
    fn drop_joins_thread_and_releases_gpu_state() {
        let gpu = FakeGpu::new();
        let handler = spawn_fake(&gpu, &Arc::new(AtomicUsize::new(0)));
        handler.attach_surface(Some(fake_window(0x100))).unwrap();
        handler.stop();

        drop(handler);

        assert_eq!(gpu.live_egl_objects(), (0, 0, 0));
        assert_eq!(gpu.live_gl_objects(), (0, 0, 0, 0));
    }
}
