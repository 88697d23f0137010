//! 分段下载：规划分段、并发拉取到临时产物、全部成功后按序合并。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use reqwest::Client;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::internal::downloader::structs::{
    ArtifactStorage, CancelHandle, DownloadConfig, DownloadError,
    DownloadRequest, DownloadResult,
};
use crate::internal::segment::functions::plan_segments::plan_segments;
use crate::internal::store::structs::{DiskSegmentStore, MemorySegmentStore};
use crate::internal::store::traits::SegmentStore;

use super::merge::merge_segments;
use super::spawn_tasks::{
    SpawnSegmentTasksParams, join_segment_tasks, spawn_segment_tasks,
};

/// 分段下载入口的参数（形参超过 3 个，用 struct 承载）。
pub(crate) struct RunRangedDownloadParams<'a> {
    pub client: &'a Client,
    pub request: &'a DownloadRequest,
    pub config: &'a DownloadConfig,
    pub total: u64,
    /// 已按资源长度收敛过的分段数
    pub segment_count: usize,
    pub cancel: &'a CancelHandle,
}

pub(crate) async fn run_ranged_download(
    params: RunRangedDownloadParams<'_>,
) -> Result<DownloadResult, DownloadError> {
    let segments = plan_segments(params.total, params.segment_count)?;
    let destination = params.request.destination();
    let job_id = Uuid::new_v4().simple().to_string();
    let store = build_store(&params.config.artifact_storage, destination, &job_id);

    debug!(
        target: "download",
        job_id = %job_id,
        segments = segments.len(),
        max_concurrent = params.config.max_concurrent,
        "分段规划完成"
    );

    let mut tasks = spawn_segment_tasks(SpawnSegmentTasksParams {
        client: params.client,
        url: params.request.url(),
        segments: &segments,
        store: Arc::clone(&store),
        max_concurrent: params.config.max_concurrent,
        segment_timeout: params.config.segment_timeout,
    });

    // join_segment_tasks 返回时所有任务都已结束，不会再有写入
    if let Err(e) = join_segment_tasks(&mut tasks, params.cancel).await {
        cleanup_artifacts(store.as_ref(), segments.len()).await;
        return Err(e);
    }

    let total = match merge_segments(store.as_ref(), &segments, destination).await {
        Ok(total) => total,
        Err(e) => {
            cleanup_artifacts(store.as_ref(), segments.len()).await;
            return Err(e.into());
        }
    };

    Ok(DownloadResult::Merged {
        path: destination.to_path_buf(),
        total,
        segments: segments.len(),
    })
}

fn build_store(
    storage: &ArtifactStorage,
    destination: &Path,
    job_id: &str,
) -> Arc<dyn SegmentStore> {
    match storage {
        ArtifactStorage::Memory => Arc::new(MemorySegmentStore::new()),
        ArtifactStorage::Disk { dir } => {
            let dir = match dir {
                Some(dir) => dir.clone(),
                None => default_artifact_dir(destination),
            };
            let name = destination
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "download".to_string());
            Arc::new(DiskSegmentStore::new(dir, &name, job_id))
        }
    }
}

/// 目标文件所在目录；相对路径只有文件名时为当前目录。
fn default_artifact_dir(destination: &Path) -> PathBuf {
    match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// 尽力删除所有分段产物；不存在的产物直接跳过，删除失败只记录日志。
async fn cleanup_artifacts(store: &dyn SegmentStore, count: usize) {
    for index in 0..count {
        if let Err(e) = store.remove(index).await {
            warn!(
                target: "download",
                index,
                error = %e,
                "清理分段产物失败"
            );
        }
    }
}
