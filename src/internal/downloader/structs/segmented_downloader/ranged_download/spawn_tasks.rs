//! 分段下载：生成并 spawn 各段任务，以及等待所有任务完成。

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};
use url::Url;

use crate::internal::downloader::structs::{CancelHandle, DownloadError, FetchError};
use crate::internal::segment::structs::Segment;
use crate::internal::store::traits::SegmentStore;

use super::fetch_segment::{FetchSegmentParams, fetch_segment};

/// 单个分段任务的输出：(分段下标, 结果)。
pub(super) type SegmentTaskOutput = (usize, Result<u64, FetchError>);

/// 生成并 spawn 分段任务时的参数（形参超过 3 个，用 struct 承载）。
pub(super) struct SpawnSegmentTasksParams<'a> {
    pub client: &'a Client,
    pub url: &'a Url,
    pub segments: &'a [Segment],
    pub store: Arc<dyn SegmentStore>,
    pub max_concurrent: usize,
    pub segment_timeout: Option<Duration>,
}

/// 每个分段 spawn 一个任务；任务内先取信号量许可再发请求。
pub(super) fn spawn_segment_tasks(
    params: SpawnSegmentTasksParams<'_>,
) -> JoinSet<SegmentTaskOutput> {
    let semaphore = Arc::new(Semaphore::new(params.max_concurrent.max(1)));
    let mut tasks = JoinSet::new();

    for (index, segment) in params.segments.iter().copied().enumerate() {
        let client = params.client.clone();
        let url = params.url.clone();
        let store = Arc::clone(&params.store);
        let sem = Arc::clone(&semaphore);
        let segment_timeout = params.segment_timeout;

        tasks.spawn(async move {
            let result: Result<u64, FetchError> = async {
                let _permit = sem
                    .acquire_owned()
                    .await
                    .map_err(|_| FetchError::SemaphoreClosed)?;

                let fetch = fetch_segment(FetchSegmentParams {
                    client: &client,
                    url: &url,
                    index,
                    segment,
                    store: store.as_ref(),
                });

                match segment_timeout {
                    Some(limit) => tokio::time::timeout(limit, fetch)
                        .await
                        .map_err(|_| FetchError::Timeout(limit))?,
                    None => fetch.await,
                }
            }
            .await;

            (index, result)
        });
    }

    tasks
}

/// 等待全部分段任务完成。
///
/// 第一个失败（或外部取消）出现时中止其余任务，并等它们全部退出后再返回错误。
pub(super) async fn join_segment_tasks(
    tasks: &mut JoinSet<SegmentTaskOutput>,
    cancel: &CancelHandle,
) -> Result<(), DownloadError> {
    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(DownloadError::Cancelled),
            joined = tasks.join_next() => Ok(joined),
        };

        let failure = match next {
            Err(e) => e,
            Ok(None) => return Ok(()),
            Ok(Some(Ok((index, Ok(written))))) => {
                debug!(target: "download", index, written, "分段任务结束");
                continue;
            }
            Ok(Some(Ok((index, Err(source))))) => {
                DownloadError::Segment { index, source }
            }
            Ok(Some(Err(join_err))) => DownloadError::TaskJoin(join_err),
        };

        warn!(
            target: "download",
            error = %failure,
            remaining = tasks.len(),
            "中止剩余分段"
        );
        abort_and_drain(tasks).await;
        return Err(failure);
    }
}

async fn abort_and_drain(tasks: &mut JoinSet<SegmentTaskOutput>) {
    tasks.abort_all();
    while tasks.join_next().await.is_some() {}
}
