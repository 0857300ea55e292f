//! ### English
//! Error taxonomy for context acquisition, shader builds, frame intake and the render thread.
//!
//! ### 中文
//! 上下文获取、shader 构建、帧输入以及渲染线程的错误分类。

use thiserror::Error;

use crate::engine::egl::EGLint;
use crate::engine::gles::ShaderStage;

/// ### English
/// Failures while building the graphics context for a window.
/// Every variant leaves the context closed.
///
/// ### 中文
/// 为 window 构建图形上下文时的失败。
/// 任一变体发生后上下文均处于关闭状态。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("no default EGL display available")]
    DisplayUnavailable,

    #[error("eglInitialize failed (egl error {code:#x})")]
    InitFailed { code: EGLint },

    #[error("no EGL config matches RGB565 / depth16 / ES2 / window")]
    NoMatchingConfig,

    #[error("eglCreateContext failed (egl error {code:#x})")]
    ContextCreateFailed { code: EGLint },

    #[error("eglGetConfigAttrib(EGL_NATIVE_VISUAL_ID) failed (egl error {code:#x})")]
    ConfigQueryFailed { code: EGLint },

    #[error("eglCreateWindowSurface failed (egl error {code:#x})")]
    SurfaceCreateFailed { code: EGLint },

    #[error("eglMakeCurrent failed (egl error {code:#x})")]
    MakeCurrentFailed { code: EGLint },
}

/// ### English
/// Failures while compiling or linking the frame shader program.
///
/// ### 中文
/// 编译或链接帧 shader 程序时的失败。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShaderError {
    #[error("{stage} shader failed to compile:\n{log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("shader program failed to link:\n{log}")]
    Link { log: String },

    #[error("glCreate{object} returned 0")]
    ObjectCreateFailed { object: &'static str },

    #[error("linked program has no active location for `{name}`")]
    MissingLocation { name: &'static str },
}

/// ### English
/// Why `attach_surface` did not end with an open, drawable context.
///
/// ### 中文
/// `attach_surface` 未能得到可绘制上下文的原因。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachError {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Shader(#[from] ShaderError),
}

/// ### English
/// Failures of `set_buffers_geometry`.
///
/// ### 中文
/// `set_buffers_geometry` 的失败。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("no window attached")]
    NoWindow,

    #[error("no graphics context open")]
    NotOpen,

    #[error("buffer geometry {width}x{height} does not fit the native window API")]
    OutOfRange { width: u32, height: u32 },

    #[error("ANativeWindow_setBuffersGeometry rejected the request ({code})")]
    Rejected { code: i32 },

    #[error("window buffer geometry is only supported on Android")]
    Unsupported,
}

/// ### English
/// Frames rejected before they reach the render thread.
///
/// ### 中文
/// 在到达渲染线程之前被拒绝的帧。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("frame has an empty dimension ({width}x{height})")]
    Empty { width: u32, height: u32 },

    #[error("frame buffer holds {actual} bytes, {expected} required")]
    BufferTooSmall { expected: usize, actual: usize },

    #[error("frame dimensions {width}x{height} exceed GL limits")]
    TooLarge { width: u32, height: u32 },
}

/// ### English
/// Failures of the host-facing runtime (render thread handshake and command delivery).
///
/// ### 中文
/// 面向宿主的运行时失败（渲染线程握手与命令投递）。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("render thread failed to initialize: {0}")]
    Init(String),

    #[error("timed out waiting for the render thread")]
    Timeout,

    #[error("render thread is gone")]
    Disconnected,

    #[error(transparent)]
    Attach(#[from] AttachError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Frame(#[from] FrameError),
}
