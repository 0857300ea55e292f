//! ### English
//! Render-thread runtime (public API).
//!
//! ### 中文
//! 渲染线程运行时（对外公开 API）。

mod command;
mod render_thread;

mod handle;

pub use handle::SurfaceLifecycleHandler;
