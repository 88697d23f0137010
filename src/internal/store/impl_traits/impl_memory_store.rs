use std::collections::HashMap;
use std::io::{self, Cursor};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};

use crate::internal::store::structs::MemorySegmentStore;
use crate::internal::store::traits::{ArtifactReader, ArtifactWriter, SegmentStore};

/// 内存产物写入端：finish 时才把缓冲提交进存储。
struct MemoryArtifactWriter {
    index: usize,
    buf: BytesMut,
    artifacts: Arc<Mutex<HashMap<usize, Bytes>>>,
}

fn poisoned() -> io::Error {
    io::Error::other("内存分段存储的锁已中毒")
}

#[async_trait]
impl ArtifactWriter for MemoryArtifactWriter {
    async fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.buf.extend_from_slice(chunk);
        Ok(())
    }

    async fn finish(self: Box<Self>) -> io::Result<u64> {
        let Self { index, buf, artifacts } = *self;
        let written = buf.len() as u64;
        artifacts
            .lock()
            .map_err(|_| poisoned())?
            .insert(index, buf.freeze());
        Ok(written)
    }
}

#[async_trait]
impl SegmentStore for MemorySegmentStore {
    async fn create(&self, index: usize) -> io::Result<Box<dyn ArtifactWriter>> {
        // 覆盖语义：旧产物在新写入端 finish 之前先移除
        self.artifacts.lock().map_err(|_| poisoned())?.remove(&index);
        Ok(Box::new(MemoryArtifactWriter {
            index,
            buf: BytesMut::new(),
            artifacts: Arc::clone(&self.artifacts),
        }))
    }

    async fn open(&self, index: usize) -> io::Result<ArtifactReader> {
        let data = self
            .artifacts
            .lock()
            .map_err(|_| poisoned())?
            .get(&index)
            .cloned()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("分段 {} 的产物不存在", index),
                )
            })?;
        Ok(Box::new(Cursor::new(data)))
    }

    async fn remove(&self, index: usize) -> io::Result<()> {
        self.artifacts.lock().map_err(|_| poisoned())?.remove(&index);
        Ok(())
    }
}
