//! ### English
//! Process-wide log sink setup. Android routes `tracing` records through `log` into logcat;
//! other targets print through a `tracing-subscriber` fmt layer filtered by `RUST_LOG`.
//!
//! ### 中文
//! 全进程日志输出初始化。Android 上 `tracing` 记录经由 `log` 写入 logcat；
//! 其它目标通过 `tracing-subscriber` 的 fmt 层输出，并由 `RUST_LOG` 过滤。

use tracing::Level;

/// ### English
/// logcat tag.
///
/// ### 中文
/// logcat 标签。
#[cfg_attr(not(target_os = "android"), allow(dead_code))]
pub const LOG_TAG: &str = "video-surface";

/// ### English
/// Installs the log sink at `level`. Only the first call has an effect.
///
/// ### 中文
/// 以 `level` 安装日志输出；只有第一次调用生效。
#[cfg(target_os = "android")]
pub fn init(level: Level) {
    let filter = match level {
        Level::ERROR => tracing::log::LevelFilter::Error,
        Level::WARN => tracing::log::LevelFilter::Warn,
        Level::INFO => tracing::log::LevelFilter::Info,
        Level::DEBUG => tracing::log::LevelFilter::Debug,
        _ => tracing::log::LevelFilter::Trace,
    };
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(filter)
            .with_tag(LOG_TAG),
    );
}

#[cfg(not(target_os = "android"))]
pub fn init(level: Level) {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::filter::LevelFilter;

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    // Already installed (by us or by the host) is fine.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .try_init();
}

/// ### English
/// Parses a level name (`"error"` .. `"trace"`, case-insensitive). Empty means `info`.
///
/// ### 中文
/// 解析日志级别名称（`"error"` .. `"trace"`，不区分大小写）；空字符串表示 `info`。
pub fn parse_level(name: &str) -> Option<Level> {
    match name {
        "" => Some(Level::INFO),
        name => name.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_names() {
        assert_eq!(parse_level(""), Some(Level::INFO));
        assert_eq!(parse_level("debug"), Some(Level::DEBUG));
        assert_eq!(parse_level("WARN"), Some(Level::WARN));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn init_is_idempotent() {
        init(Level::DEBUG);
        init(Level::TRACE);
    }
}
