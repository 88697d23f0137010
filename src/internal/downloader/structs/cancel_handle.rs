use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

/// 取消句柄：可 Clone，任意一份调用 `cancel()` 都会让对应下载尽快以
/// [`DownloadError::Cancelled`](super::DownloadError::Cancelled) 结束，
/// 在途分段请求会被中止，已写入的临时产物会被清理。
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    inner: Arc<Inner>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求取消；重复调用无副作用。
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// 挂起直到被取消；已取消时立即返回。
    pub async fn cancelled(&self) {
        loop {
            // 先注册通知再检查标志，避免检查与等待之间错过 cancel
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}
