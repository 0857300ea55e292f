use crate::engine::producer::{EmbedderProducer, install_embedder_producer};

#[unsafe(no_mangle)]
/// ### English
/// Installs the decoder start callback used by the JNI entry points (`VideoSurface.setSurface`).
///
/// Surfaces created through `video_surface_create` take their producer as an argument instead.
/// This must be called before the first `setSurface`; it can only be installed once.
///
/// Returns `true` on success.
///
/// # Safety
/// `producer` must be NULL or point to a valid `EmbedderProducer`.
///
/// ### 中文
/// 安装 JNI 入口（`VideoSurface.setSurface`）使用的解码器启动回调。
///
/// 通过 `video_surface_create` 创建的 surface 则以参数形式传入生产者。
/// 必须在第一次 `setSurface` 之前调用，且只能安装一次。
///
/// 成功返回 `true`。
///
/// # Safety
/// `producer` 必须为 NULL 或指向有效的 `EmbedderProducer`。
pub unsafe extern "C" fn video_surface_set_jni_producer(producer: *const EmbedderProducer) -> bool {
    let Some(producer) = (unsafe { producer.as_ref() }) else {
        return false;
    };

    install_embedder_producer(*producer)
        .inspect_err(|err| tracing::warn!("{err}"))
        .is_ok()
}
