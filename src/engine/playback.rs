//! ### English
//! Playback state shared between host lifecycle calls and the render path.
//!
//! Writers and the reader never synchronize beyond relaxed atomics: a draw may observe a
//! `pause()`/`stop()` one frame late, which is accepted.
//!
//! ### 中文
//! 宿主生命周期调用与渲染路径共享的播放状态。
//!
//! 写入方与读取方之间仅使用 Relaxed 原子操作：绘制可能晚一帧才观察到 `pause()`/`stop()`，这是可接受的。

use std::sync::atomic::{AtomicU8, Ordering};

/// ### English
/// `Running` is initial, `Paused` toggles with `Running`, `Stopped` is terminal.
///
/// ### 中文
/// `Running` 为初始状态，`Paused` 与 `Running` 互相切换，`Stopped` 为终态。
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Running = 0,
    Paused = 1,
    Stopped = 2,
}

/// ### English
/// Two independent flags, each written by exactly one transition. `stop` never gets undone, so
/// `Stopped` absorbs later `pause`/`resume` calls without any compare-and-swap.
///
/// ### 中文
/// 两个独立标记，每个只由一种状态转换写入。`stop` 不会被撤销，
/// 因此无需 CAS 即可让 `Stopped` 吸收之后的 `pause`/`resume` 调用。
#[derive(Debug, Default)]
pub struct PlaybackStateMachine {
    paused: AtomicU8,
    stopped: AtomicU8,
}

impl PlaybackStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pause(&self) {
        self.paused.store(1, Ordering::Relaxed);
    }

    pub fn resume(&self) {
        self.paused.store(0, Ordering::Relaxed);
    }

    pub fn stop(&self) {
        self.stopped.store(1, Ordering::Relaxed);
    }

    /// ### English
    /// Current state as seen by the render path (possibly one transition stale).
    ///
    /// ### 中文
    /// 渲染路径所见的当前状态（可能滞后一次状态转换）。
    pub fn state(&self) -> PlaybackState {
        if self.stopped.load(Ordering::Relaxed) != 0 {
            PlaybackState::Stopped
        } else if self.paused.load(Ordering::Relaxed) != 0 {
            PlaybackState::Paused
        } else {
            PlaybackState::Running
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_running_and_toggles_pause() {
        let playback = PlaybackStateMachine::new();
        assert_eq!(playback.state(), PlaybackState::Running);

        playback.pause();
        assert_eq!(playback.state(), PlaybackState::Paused);
        playback.pause();
        assert_eq!(playback.state(), PlaybackState::Paused);

        playback.resume();
        assert_eq!(playback.state(), PlaybackState::Running);
    }

    #[test]
    fn stopped_absorbs_resume_and_pause() {
        let playback = PlaybackStateMachine::new();
        playback.pause();
        playback.stop();
        assert_eq!(playback.state(), PlaybackState::Stopped);

        playback.resume();
        assert_eq!(playback.state(), PlaybackState::Stopped);
        playback.pause();
        assert_eq!(playback.state(), PlaybackState::Stopped);
    }

    #[test]
    fn state_is_visible_across_threads() {
        let playback = std::sync::Arc::new(PlaybackStateMachine::new());
        let writer = playback.clone();
        std::thread::spawn(move || writer.stop()).join().unwrap();
        assert_eq!(playback.state(), PlaybackState::Stopped);
    }
}
