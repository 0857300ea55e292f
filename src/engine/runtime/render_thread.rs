//! ### English
//! Dedicated render thread: owns the `RendererSession` and executes commands in order.
//!
//! ### 中文
//! 独立渲染线程：持有 `RendererSession` 并按顺序执行命令。

use std::sync::Arc;

use crossbeam_channel as channel;
use tracing::{debug, error, info, trace};

use crate::engine::config::RendererConfig;
use crate::engine::egl::EglApi;
use crate::engine::gles::GlesApi;
use crate::engine::playback::PlaybackStateMachine;
use crate::engine::producer::FrameProducer;
use crate::engine::session::RendererSession;

use super::command::RenderCommand;

/// ### English
/// Render thread entry function.
/// Returns after `Shutdown`, when every sender is gone, or on initialization failure.
///
/// `make_backend` runs here so GL function tables are loaded on the thread that uses them.
///
/// ### 中文
/// 渲染线程入口函数。
/// 收到 `Shutdown`、所有发送端均已关闭或初始化失败时返回。
///
/// `make_backend` 在此线程执行，确保 GL 函数表在使用它的线程上加载。
pub(super) fn run_render_thread<E, G, F>(
    make_backend: F,
    config: RendererConfig,
    playback: Arc<PlaybackStateMachine>,
    producer: Arc<dyn FrameProducer>,
    command_rx: channel::Receiver<RenderCommand>,
    init_tx: channel::Sender<Result<(), String>>,
) where
    E: EglApi,
    G: GlesApi,
    F: FnOnce() -> Result<(E, G), String>,
{
    let (egl, gl) = match make_backend() {
        Ok(backend) => backend,
        Err(err) => {
            error!("render backend failed to initialize: {err}");
            let _ = init_tx.send(Err(err));
            return;
        }
    };

    let mut session = RendererSession::new(egl, gl, config, playback, producer);

    /*
    ### English
    The spawner may already have timed out; then nobody will send commands.

    ### 中文
    创建方可能已经超时放弃；此时不会再有命令到来。
    */
    if init_tx.send(Ok(())).is_err() {
        return;
    }
    drop(init_tx);
    info!("render thread ready");

    while let Ok(command) = command_rx.recv() {
        match command {
            RenderCommand::AttachSurface { window, reply } => {
                let result = session.attach_surface(window);
                let _ = reply.send(result);
            }
            RenderCommand::Frame(frame) => {
                let outcome = session.render_frame(&frame);
                trace!(?outcome, size = ?frame.size(), "frame");
            }
            RenderCommand::SetBuffersGeometry { size, reply } => {
                let _ = reply.send(session.set_buffers_geometry(size));
            }
            RenderCommand::Shutdown => {
                debug!("render thread shutdown requested");
                break;
            }
        }
    }

    drop(session);
    info!("render thread exited");
}
