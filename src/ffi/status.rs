//! ### English
//! Status codes returned across the C ABI and the panic barrier around every entry point.
//!
//! `0` is success; every failure maps to a stable negative code.
//!
//! ### 中文
//! 跨 C ABI 返回的状态码，以及包裹每个入口的 panic 屏障。
//!
//! `0` 表示成功；每种失败都对应一个稳定的负数状态码。

use crate::engine::error::{
    AttachError, ContextError, FrameError, GeometryError, RuntimeError, ShaderError,
};

pub const VIDEO_SURFACE_OK: i32 = 0;
pub const VIDEO_SURFACE_ERR_INVALID_ARGUMENT: i32 = -1;
pub const VIDEO_SURFACE_ERR_PANIC: i32 = -2;

pub const VIDEO_SURFACE_ERR_DISPLAY_UNAVAILABLE: i32 = -10;
pub const VIDEO_SURFACE_ERR_INIT_FAILED: i32 = -11;
pub const VIDEO_SURFACE_ERR_NO_MATCHING_CONFIG: i32 = -12;
pub const VIDEO_SURFACE_ERR_CONTEXT_CREATE_FAILED: i32 = -13;
pub const VIDEO_SURFACE_ERR_CONFIG_QUERY_FAILED: i32 = -14;
pub const VIDEO_SURFACE_ERR_SURFACE_CREATE_FAILED: i32 = -15;
pub const VIDEO_SURFACE_ERR_MAKE_CURRENT_FAILED: i32 = -16;

pub const VIDEO_SURFACE_ERR_SHADER_COMPILE: i32 = -20;
pub const VIDEO_SURFACE_ERR_PROGRAM_LINK: i32 = -21;
pub const VIDEO_SURFACE_ERR_GL_OBJECT_CREATE: i32 = -22;
pub const VIDEO_SURFACE_ERR_MISSING_LOCATION: i32 = -23;

pub const VIDEO_SURFACE_ERR_FRAME_EMPTY: i32 = -30;
pub const VIDEO_SURFACE_ERR_FRAME_BUFFER_TOO_SMALL: i32 = -31;
pub const VIDEO_SURFACE_ERR_FRAME_TOO_LARGE: i32 = -32;

pub const VIDEO_SURFACE_ERR_NO_WINDOW: i32 = -40;
pub const VIDEO_SURFACE_ERR_NOT_OPEN: i32 = -41;
pub const VIDEO_SURFACE_ERR_GEOMETRY_REJECTED: i32 = -42;
pub const VIDEO_SURFACE_ERR_UNSUPPORTED: i32 = -43;
pub const VIDEO_SURFACE_ERR_GEOMETRY_OUT_OF_RANGE: i32 = -44;

pub const VIDEO_SURFACE_ERR_DISCONNECTED: i32 = -50;
pub const VIDEO_SURFACE_ERR_TIMEOUT: i32 = -51;
pub const VIDEO_SURFACE_ERR_RUNTIME_INIT: i32 = -52;

/// ### English
/// Conversion of an entry point's result into its C status code.
///
/// ### 中文
/// 将入口函数的结果转换为 C 状态码。
pub trait ReturnCode {
    fn code(&self) -> i32;
}

impl ReturnCode for () {
    fn code(&self) -> i32 {
        VIDEO_SURFACE_OK
    }
}

impl ReturnCode for i32 {
    fn code(&self) -> i32 {
        *self
    }
}

impl ReturnCode for ContextError {
    fn code(&self) -> i32 {
        match self {
            Self::DisplayUnavailable => VIDEO_SURFACE_ERR_DISPLAY_UNAVAILABLE,
            Self::InitFailed { .. } => VIDEO_SURFACE_ERR_INIT_FAILED,
            Self::NoMatchingConfig => VIDEO_SURFACE_ERR_NO_MATCHING_CONFIG,
            Self::ContextCreateFailed { .. } => VIDEO_SURFACE_ERR_CONTEXT_CREATE_FAILED,
            Self::ConfigQueryFailed { .. } => VIDEO_SURFACE_ERR_CONFIG_QUERY_FAILED,
            Self::SurfaceCreateFailed { .. } => VIDEO_SURFACE_ERR_SURFACE_CREATE_FAILED,
            Self::MakeCurrentFailed { .. } => VIDEO_SURFACE_ERR_MAKE_CURRENT_FAILED,
        }
    }
}

impl ReturnCode for ShaderError {
    fn code(&self) -> i32 {
        match self {
            Self::Compile { .. } => VIDEO_SURFACE_ERR_SHADER_COMPILE,
            Self::Link { .. } => VIDEO_SURFACE_ERR_PROGRAM_LINK,
            Self::ObjectCreateFailed { .. } => VIDEO_SURFACE_ERR_GL_OBJECT_CREATE,
            Self::MissingLocation { .. } => VIDEO_SURFACE_ERR_MISSING_LOCATION,
        }
    }
}

impl ReturnCode for AttachError {
    fn code(&self) -> i32 {
        match self {
            Self::Context(err) => err.code(),
            Self::Shader(err) => err.code(),
        }
    }
}

impl ReturnCode for FrameError {
    fn code(&self) -> i32 {
        match self {
            Self::Empty { .. } => VIDEO_SURFACE_ERR_FRAME_EMPTY,
            Self::BufferTooSmall { .. } => VIDEO_SURFACE_ERR_FRAME_BUFFER_TOO_SMALL,
            Self::TooLarge { .. } => VIDEO_SURFACE_ERR_FRAME_TOO_LARGE,
        }
    }
}

impl ReturnCode for GeometryError {
    fn code(&self) -> i32 {
        match self {
            Self::NoWindow => VIDEO_SURFACE_ERR_NO_WINDOW,
            Self::NotOpen => VIDEO_SURFACE_ERR_NOT_OPEN,
            Self::Rejected { .. } => VIDEO_SURFACE_ERR_GEOMETRY_REJECTED,
            Self::Unsupported => VIDEO_SURFACE_ERR_UNSUPPORTED,
            Self::OutOfRange { .. } => VIDEO_SURFACE_ERR_GEOMETRY_OUT_OF_RANGE,
        }
    }
}

impl ReturnCode for RuntimeError {
    fn code(&self) -> i32 {
        match self {
            Self::Init(_) => VIDEO_SURFACE_ERR_RUNTIME_INIT,
            Self::Timeout => VIDEO_SURFACE_ERR_TIMEOUT,
            Self::Disconnected => VIDEO_SURFACE_ERR_DISCONNECTED,
            Self::Attach(err) => err.code(),
            Self::Geometry(err) => err.code(),
            Self::Frame(err) => err.code(),
        }
    }
}

/// ### English
/// Null or otherwise unusable pointer/argument from the host.
///
/// ### 中文
/// 宿主传入了 NULL 或其它不可用的指针/参数。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidArgument;

impl ReturnCode for InvalidArgument {
    fn code(&self) -> i32 {
        VIDEO_SURFACE_ERR_INVALID_ARGUMENT
    }
}

impl<E: ReturnCode> ReturnCode for Result<(), E> {
    fn code(&self) -> i32 {
        match self {
            Ok(()) => VIDEO_SURFACE_OK,
            Err(err) => err.code(),
        }
    }
}

/// ### English
/// Runs `f`, converting its result to a status code. A panic becomes `VIDEO_SURFACE_ERR_PANIC`
/// instead of unwinding into the host.
///
/// ### 中文
/// 执行 `f` 并将结果转换为状态码。panic 会被转换为 `VIDEO_SURFACE_ERR_PANIC`，而不会展开到宿主。
pub fn return_code<C: ReturnCode, F: FnOnce() -> C>(f: F) -> i32 {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        Ok(ret) => ret.code(),
        Err(_) => VIDEO_SURFACE_ERR_PANIC,
    }
}

/// ### English
/// Error type for entry points that can fail on either a bad argument or the runtime.
///
/// ### 中文
/// 既可能因参数错误、也可能因运行时失败的入口所用的错误类型。
#[derive(Debug)]
pub enum CallError {
    Invalid(InvalidArgument),
    Runtime(RuntimeError),
}

impl From<InvalidArgument> for CallError {
    fn from(err: InvalidArgument) -> Self {
        Self::Invalid(err)
    }
}

impl From<RuntimeError> for CallError {
    fn from(err: RuntimeError) -> Self {
        Self::Runtime(err)
    }
}

impl ReturnCode for CallError {
    fn code(&self) -> i32 {
        match self {
            Self::Invalid(err) => err.code(),
            Self::Runtime(err) => err.code(),
        }
    }
}
