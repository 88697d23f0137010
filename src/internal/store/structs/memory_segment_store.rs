use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use bytes::Bytes;

/// 内存分段存储：产物是按下标存放的字节缓冲，完全不碰文件系统。
///
/// 适合小文件或测试；大文件会占用与文件大小相当的内存。
#[derive(Debug, Clone, Default)]
pub struct MemorySegmentStore {
    pub(crate) artifacts: Arc<Mutex<HashMap<usize, Bytes>>>,
}

impl MemorySegmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前仍保留的产物数量。
    pub fn len(&self) -> usize {
        self.artifacts.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
