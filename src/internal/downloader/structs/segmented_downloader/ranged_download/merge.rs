//! 分段下载：按分段下标依次把产物追加到目标文件。

use std::io;
use std::path::Path;

use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufWriter};
use tracing::{debug, warn};

use crate::internal::downloader::structs::MergeError;
use crate::internal::segment::structs::Segment;
use crate::internal::store::traits::SegmentStore;

const MERGE_BUFFER_SIZE: usize = 64 * 1024;

/// 合并所有分段产物到 `destination`，返回写入的总字节数。
///
/// 目标文件已存在时先删除。每个产物追加完成后立即删除（无论追加是否成功）。
/// 中途失败时目标文件保留为不完整状态，错误信息会标明这一点。
pub async fn merge_segments(
    store: &dyn SegmentStore,
    segments: &[Segment],
    destination: &Path,
) -> Result<u64, MergeError> {
    match fs::remove_file(destination).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(MergeError::RemoveStale(e)),
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(destination)
        .await
        .map_err(MergeError::CreateOutput)?;
    let mut out = BufWriter::new(file);
    let mut total: u64 = 0;

    for (index, segment) in segments.iter().enumerate() {
        let appended = append_artifact(store, index, segment, &mut out).await;

        if let Err(e) = store.remove(index).await {
            warn!(
                target: "download",
                index,
                error = %e,
                "删除分段产物失败"
            );
        }

        let copied = appended?;
        total += copied;
        debug!(target: "download", index, copied, "分段已合并");
    }

    Ok(total)
}

async fn append_artifact(
    store: &dyn SegmentStore,
    index: usize,
    segment: &Segment,
    out: &mut BufWriter<File>,
) -> Result<u64, MergeError> {
    let mut reader = store.open(index).await.map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            MergeError::MissingArtifact { index }
        } else {
            MergeError::ReadArtifact { index, source: e }
        }
    })?;

    let mut buf = vec![0u8; MERGE_BUFFER_SIZE];
    let mut copied: u64 = 0;
    loop {
        let n = reader
            .read(&mut buf)
            .await
            .map_err(|source| MergeError::ReadArtifact { index, source })?;
        if n == 0 {
            break;
        }
        out.write_all(&buf[..n])
            .await
            .map_err(MergeError::WriteOutput)?;
        copied += n as u64;
    }
    // 产物删除前先把它的内容落到目标文件
    out.flush().await.map_err(MergeError::WriteOutput)?;

    let expected = segment.len();
    if copied != expected {
        return Err(MergeError::ArtifactSizeMismatch {
            index,
            expected,
            actual: copied,
        });
    }

    Ok(copied)
}
