use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::task;

use crate::internal::store::structs::DiskSegmentStore;
use crate::internal::store::traits::{ArtifactReader, ArtifactWriter, SegmentStore};

/// 磁盘产物写入端：带缓冲的临时文件。
struct DiskArtifactWriter {
    file: BufWriter<File>,
    written: u64,
}

#[async_trait]
impl ArtifactWriter for DiskArtifactWriter {
    async fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.file.write_all(chunk).await?;
        self.written += chunk.len() as u64;
        Ok(())
    }

    async fn finish(mut self: Box<Self>) -> io::Result<u64> {
        self.file.flush().await?;
        self.file.get_mut().sync_data().await?;
        Ok(self.written)
    }
}

#[async_trait]
impl SegmentStore for DiskSegmentStore {
    /// 文件在阻塞线程上创建，调用方任务被中止后创建仍会完成；
    /// 读锁随创建一起释放，`remove` 据此等到在途的创建结束再删除。
    async fn create(&self, index: usize) -> io::Result<Box<dyn ArtifactWriter>> {
        let path: PathBuf = self.artifact_path(index);
        let guard = Arc::clone(&self.create_gate).read_owned().await;
        let file = task::spawn_blocking(move || {
            let _guard = guard;
            std::fs::File::create(path)
        })
        .await
        .map_err(io::Error::other)??;

        Ok(Box::new(DiskArtifactWriter {
            file: BufWriter::new(File::from_std(file)),
            written: 0,
        }))
    }

    async fn open(&self, index: usize) -> io::Result<ArtifactReader> {
        let file = File::open(self.artifact_path(index)).await?;
        Ok(Box::new(file))
    }

    async fn remove(&self, index: usize) -> io::Result<()> {
        let _gate = self.create_gate.write().await;
        match fs::remove_file(self.artifact_path(index)).await {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
