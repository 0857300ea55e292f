/// ### English
/// `native_video_surface` cdylib crate root.
/// Exposes the C ABI (and JNI on Android) via `ffi`; core implementation lives under `engine`.
///
/// ### 中文
/// `native_video_surface` 的 cdylib crate 根。
/// 通过 `ffi` 导出 C ABI（Android 上还有 JNI）；核心实现位于 `engine` 模块。
mod engine;
mod ffi;
