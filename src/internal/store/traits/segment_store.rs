//! 分段产物存储 trait：下载任务写入，合并步骤读取后删除。

use std::io;

use async_trait::async_trait;
use tokio::io::AsyncRead;

/// 产物读取端，合并时整段流式拷贝到输出文件。
pub type ArtifactReader = Box<dyn AsyncRead + Send + Unpin>;

/// 单个分段产物的写入端，由创建它的下载任务独占。
#[async_trait]
pub trait ArtifactWriter: Send {
    /// 追加一块数据。
    async fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()>;

    /// 写入完成：刷新并提交产物，返回写入的总字节数。
    /// 未调用 finish 就被丢弃的写入端不保证产物可读。
    async fn finish(self: Box<Self>) -> io::Result<u64>;
}

/// 分段产物存储。
///
/// 同一个存储实例只服务于一次下载任务；键为分段下标。
#[async_trait]
pub trait SegmentStore: Send + Sync {
    /// 为分段 `index` 创建写入端，已有同名产物会被覆盖。
    async fn create(&self, index: usize) -> io::Result<Box<dyn ArtifactWriter>>;

    /// 打开分段 `index` 的产物；不存在时返回 `ErrorKind::NotFound`。
    async fn open(&self, index: usize) -> io::Result<ArtifactReader>;

    /// 删除分段 `index` 的产物；不存在视为成功。
    async fn remove(&self, index: usize) -> io::Result<()>;
}
