/// ### English
/// Engine internal modules (render thread, EGL/GLES seams, rendering, playback state).
///
/// ### 中文
/// 引擎内部模块（渲染线程、EGL/GLES 接缝、渲染、播放状态等）。
pub mod config;
pub mod egl;
pub mod error;
pub mod flags;
pub mod frame;
pub mod gles;
pub mod logging;
pub mod playback;
pub mod producer;
pub mod rendering;
pub mod runtime;
pub(crate) mod session;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;
