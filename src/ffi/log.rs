use std::ffi::{CStr, c_char};

use super::status::{InvalidArgument, return_code};
use crate::engine::logging;

#[unsafe(no_mangle)]
/// ### English
/// Installs the log sink (logcat on Android, stderr elsewhere).
///
/// `level` is a NUL-terminated name: `"error"`, `"warn"`, `"info"`, `"debug"` or `"trace"`.
/// NULL or an empty string means `"info"`. Only the first successful call has an effect.
///
/// # Safety
/// `level` must be NULL or a valid NUL-terminated C string.
///
/// ### 中文
/// 安装日志输出（Android 上为 logcat，其它平台为 stderr）。
///
/// `level` 为 NUL 结尾的级别名：`"error"`、`"warn"`、`"info"`、`"debug"` 或 `"trace"`。
/// NULL 或空字符串表示 `"info"`。只有第一次成功调用生效。
///
/// # Safety
/// `level` 必须为 NULL 或有效的 NUL 结尾 C 字符串。
pub unsafe extern "C" fn video_surface_log_init(level: *const c_char) -> i32 {
    return_code(move || {
        let name = if level.is_null() {
            ""
        } else {
            unsafe { CStr::from_ptr(level) }
                .to_str()
                .map_err(|_| InvalidArgument)?
        };
        let level = logging::parse_level(name).ok_or(InvalidArgument)?;
        logging::init(level);
        Ok::<(), InvalidArgument>(())
    })
}
