//! ### English
//! Internal command protocol between host threads and the render thread.
//!
//! ### 中文
//! 宿主线程与渲染线程之间的内部命令协议。

use crossbeam_channel as channel;
use dpi::PhysicalSize;

use crate::engine::error::{AttachError, GeometryError};
use crate::engine::frame::Frame;
use crate::engine::window::NativeWindow;

/// ### English
/// Commands sent to the render thread, drained in FIFO order. Frames and lifecycle commands share
/// one bounded queue, so an attach is never reordered ahead of frames delivered before it.
///
/// ### 中文
/// 发送到渲染线程的命令，按 FIFO 顺序处理。帧与生命周期命令共用一个有界队列，
/// 因此 attach 不会被重排到它之前投递的帧前面。
pub(super) enum RenderCommand {
    /// ### English
    /// Rebinds the session to a new window (or to none).
    ///
    /// ### 中文
    /// 将会话重新绑定到新 window（或无 window）。
    AttachSurface {
        window: Option<NativeWindow>,
        /// ### English
        /// One-shot response channel for reporting success/failure back to the caller.
        ///
        /// ### 中文
        /// 一次性响应 channel：把成功/失败回传给调用方。
        reply: channel::Sender<Result<(), AttachError>>,
    },
    /// ### English
    /// One validated decoded frame.
    ///
    /// ### 中文
    /// 一帧已校验的解码帧。
    Frame(Frame),
    SetBuffersGeometry {
        size: PhysicalSize<u32>,
        reply: channel::Sender<Result<(), GeometryError>>,
    },
    /// ### English
    /// Releases everything and exits the render thread.
    ///
    /// ### 中文
    /// 释放全部资源并退出渲染线程。
    Shutdown,
}
