//! ### English
//! Rendering module entry point.
//! Splits the EGL context lifecycle, the shader program and the per-frame draw path into
//! submodules.
//!
//! ### 中文
//! 渲染模块入口。
//! 将 EGL 上下文生命周期、shader 程序与逐帧绘制路径拆分到子模块。

mod context;
mod frame_renderer;
mod shader;

pub use context::GraphicsContext;
pub use frame_renderer::{FrameOutcome, FrameRenderer};
