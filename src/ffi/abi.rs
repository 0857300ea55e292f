use crate::engine::flags;
use crate::engine::playback::PlaybackState;

#[unsafe(no_mangle)]
/// ### English
/// Returns the C ABI version.
///
/// ### 中文
/// 返回 C ABI 版本号。
pub extern "C" fn video_surface_abi_version() -> u32 {
    super::VIDEO_SURFACE_ABI_VERSION
}

#[unsafe(no_mangle)]
/// ### English
/// Returns `VIDEO_SURFACE_FLAG_CLEAR_BEFORE_DRAW`.
///
/// ### 中文
/// 返回 `VIDEO_SURFACE_FLAG_CLEAR_BEFORE_DRAW`。
pub extern "C" fn video_surface_flag_clear_before_draw() -> u32 {
    flags::VIDEO_SURFACE_FLAG_CLEAR_BEFORE_DRAW
}

#[unsafe(no_mangle)]
/// ### English
/// Returns every flag bit understood by this build.
///
/// ### 中文
/// 返回本构建识别的全部标志位。
pub extern "C" fn video_surface_flags_all() -> u32 {
    flags::VIDEO_SURFACE_FLAGS_ALL
}

#[unsafe(no_mangle)]
pub extern "C" fn video_surface_state_running() -> u32 {
    PlaybackState::Running as u32
}

#[unsafe(no_mangle)]
pub extern "C" fn video_surface_state_paused() -> u32 {
    PlaybackState::Paused as u32
}

#[unsafe(no_mangle)]
pub extern "C" fn video_surface_state_stopped() -> u32 {
    PlaybackState::Stopped as u32
}
