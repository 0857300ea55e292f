//! ### English
//! JNI entry points of `com.player.ffmpeg.VideoSurface`, backed by one process-wide surface.
//!
//! The shared surface is created lazily by the first `setSurface` and lives until the process
//! exits. Its decoder start callback comes from `video_surface_set_jni_producer`.
//!
//! ### 中文
//! `com.player.ffmpeg.VideoSurface` 的 JNI 入口，背后是一个全进程共享的 surface。
//!
//! 共享 surface 由第一次 `setSurface` 惰性创建，并一直存活到进程退出。
//! 其解码器启动回调来自 `video_surface_set_jni_producer`。

use std::ffi::c_void;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use jni::JNIEnv;
use jni::objects::JObject;
use jni::sys::jint;
use tracing::{error, info};

use super::VideoSurface;
use super::status::{CallError, InvalidArgument, return_code};
use crate::engine::config::RendererConfig;
use crate::engine::error::RuntimeError;
use crate::engine::producer::installed_embedder_producer;
use crate::engine::runtime::SurfaceLifecycleHandler;
use crate::engine::window::NativeWindow;

static SHARED: OnceLock<VideoSurface> = OnceLock::new();
static SHARED_INIT: Mutex<()> = Mutex::new(());

fn shared() -> Result<&'static VideoSurface, RuntimeError> {
    if let Some(surface) = SHARED.get() {
        return Ok(surface);
    }

    let _guard = SHARED_INIT.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(surface) = SHARED.get() {
        return Ok(surface);
    }

    let handler = SurfaceLifecycleHandler::spawn_platform(
        RendererConfig::default(),
        Arc::new(installed_embedder_producer()),
    )?;
    info!("shared video surface created");
    Ok(SHARED.get_or_init(|| VideoSurface { handler }))
}

#[unsafe(no_mangle)]
/// ### English
/// Returns the surface used by the JNI entry points, or NULL before the first `setSurface`.
/// The decode producer passes it to `video_surface_deliver_frame`. Never destroy it.
///
/// ### 中文
/// 返回 JNI 入口使用的 surface；在第一次 `setSurface` 之前返回 NULL。
/// 解码生产者将其传给 `video_surface_deliver_frame`。不要销毁它。
pub extern "C" fn video_surface_jni_shared() -> *const VideoSurface {
    SHARED
        .get()
        .map_or(std::ptr::null(), |surface| surface as *const VideoSurface)
}

#[unsafe(no_mangle)]
/// ### English
/// `int setSurface(Surface surface)`: rebinds rendering to `surface`; `null` records "no window".
///
/// ### 中文
/// `int setSurface(Surface surface)`：将渲染重新绑定到 `surface`；`null` 表示“无 window”。
pub extern "system" fn Java_com_player_ffmpeg_VideoSurface_setSurface(
    env: JNIEnv,
    _this: JObject,
    surface: JObject,
) -> jint {
    return_code(move || -> Result<(), CallError> {
        let shared = shared().inspect_err(|err| error!("setSurface: {err}"))?;

        let window = if surface.is_null() {
            None
        } else {
            let window = unsafe {
                NativeWindow::from_surface(
                    env.get_raw() as *mut c_void,
                    surface.as_raw() as *mut c_void,
                )
            };
            if window.is_none() {
                error!("setSurface: ANativeWindow_fromSurface returned NULL");
                return Err(InvalidArgument.into());
            }
            window
        };

        shared.handler.attach_surface(window)?;
        Ok(())
    })
}

fn with_existing(f: impl FnOnce(&VideoSurface)) -> jint {
    return_code(move || {
        if let Some(surface) = SHARED.get() {
            f(surface);
        }
    })
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_player_ffmpeg_VideoSurface_nativePausePlayer(
    _env: JNIEnv,
    _this: JObject,
) -> jint {
    with_existing(|surface| surface.handler.pause())
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_player_ffmpeg_VideoSurface_nativeResumePlayer(
    _env: JNIEnv,
    _this: JObject,
) -> jint {
    with_existing(|surface| surface.handler.resume())
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_player_ffmpeg_VideoSurface_nativeStopPlayer(
    _env: JNIEnv,
    _this: JObject,
) -> jint {
    with_existing(|surface| surface.handler.stop())
}
