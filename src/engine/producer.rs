//! ### English
//! Decode-producer seam: the session tells the decoder to start once a context is ready.
//!
//! ### 中文
//! 解码生产者接缝：上下文就绪后由会话通知解码器开始工作。

use std::ffi::c_void;
use std::sync::{Arc, OnceLock};
use std::thread;

use tracing::error;

/// ### English
/// External decode worker. After every successful `attach_surface`, `start` runs on a fresh
/// detached thread, so it may decode and deliver frames for as long as it likes without holding
/// up the render thread. Starts from successive attaches may overlap; the implementation decides
/// whether a repeated start is meaningful.
///
/// ### 中文
/// 外部解码工作者。每次 `attach_surface` 成功后，`start` 都会在一个新的分离线程上运行，
/// 因此它可以任意长时间地解码并投递帧，而不会阻塞渲染线程。多次 attach 触发的 start
/// 可能并发执行；重复调用是否有意义由实现自行决定。
pub trait FrameProducer: Send + Sync {
    fn start(&self);
}

impl<F: Fn() + Send + Sync> FrameProducer for F {
    fn start(&self) {
        self()
    }
}

/// ### English
/// Runs `producer.start()` on a detached thread named `video-surface-producer`.
/// A failed spawn is logged; the attach that triggered it still stands.
///
/// ### 中文
/// 在名为 `video-surface-producer` 的分离线程上运行 `producer.start()`。
/// 线程创建失败仅记录日志，触发它的 attach 仍然有效。
pub(crate) fn spawn_start(producer: &Arc<dyn FrameProducer>) {
    let producer = producer.clone();
    let spawned = thread::Builder::new()
        .name("video-surface-producer".to_string())
        .spawn(move || producer.start());
    if let Err(err) = spawned {
        error!("could not spawn producer thread: {err}");
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
/// ### English
/// Decoder start callback provided by the embedder.
///
/// Both fields are raw addresses (`usize`). `start` is an
/// `extern "C" fn(user_data: *mut c_void)` or `0` for "nothing to start"; `user_data` is passed
/// back unchanged and must stay valid while the surface exists.
///
/// `start` is called on its own detached thread and may be running on several threads at once.
///
/// ### 中文
/// 由宿主提供的解码器启动回调。
///
/// 两个字段均为原始地址（`usize`）。`start` 为 `extern "C" fn(user_data: *mut c_void)`，
/// 为 `0` 表示无需启动；`user_data` 原样回传，在 surface 存在期间必须保持有效。
///
/// `start` 在独立的分离线程上调用，且可能同时在多个线程上运行。
pub struct EmbedderProducer {
    pub start: usize,
    pub user_data: usize,
}

/// ### English
/// Function pointer type of `EmbedderProducer::start`.
///
/// ### 中文
/// `EmbedderProducer::start` 的函数指针类型。
type EmbedderStart = unsafe extern "C" fn(user_data: *mut c_void);

impl FrameProducer for EmbedderProducer {
    fn start(&self) {
        if self.start == 0 {
            return;
        }
        let start = unsafe { std::mem::transmute::<usize, EmbedderStart>(self.start) };
        unsafe { start(self.user_data as *mut c_void) };
    }
}

static EMBEDDER_PRODUCER: OnceLock<EmbedderProducer> = OnceLock::new();

/// ### English
/// Installs the process-wide producer used by the JNI entry points.
///
/// This is a one-time installation backed by `OnceLock`; repeated calls return an error.
///
/// ### 中文
/// 安装 JNI 入口使用的全进程生产者。
///
/// 该安装由 `OnceLock` 保证只执行一次；重复调用会返回错误。
pub(crate) fn install_embedder_producer(producer: EmbedderProducer) -> Result<(), String> {
    if producer.start == 0 {
        return Err("EmbedderProducer.start is NULL".to_string());
    }

    EMBEDDER_PRODUCER
        .set(producer)
        .map_err(|_| "Embedder producer is already installed".to_string())
}

/// ### English
/// Installed producer, or an empty one (start does nothing) if none was installed.
///
/// ### 中文
/// 已安装的生产者；未安装时返回空生产者（start 不做任何事）。
#[cfg_attr(not(target_os = "android"), allow(dead_code))]
pub(crate) fn installed_embedder_producer() -> EmbedderProducer {
    EMBEDDER_PRODUCER.get().copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    static STARTS: AtomicUsize = AtomicUsize::new(0);

    extern "C" fn count_start(user_data: *mut c_void) {
        STARTS.fetch_add(user_data as usize, Ordering::Relaxed);
    }

    #[test]
    fn embedder_start_receives_user_data() {
        let producer = EmbedderProducer {
            start: count_start as usize,
            user_data: 3,
        };
        producer.start();
        producer.start();
        assert_eq!(STARTS.load(Ordering::Relaxed), 6);
    }

    #[test]
    fn empty_producer_does_nothing() {
        let producer = EmbedderProducer::default();
        producer.start();
    }

    #[test]
    fn start_runs_on_its_own_thread() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let producer: Arc<dyn FrameProducer> = Arc::new(move || {
            let _ = tx.send(thread::current().name().map(str::to_string));
        });

        spawn_start(&producer);

        let name = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(name.as_deref(), Some("video-surface-producer"));
    }
}
