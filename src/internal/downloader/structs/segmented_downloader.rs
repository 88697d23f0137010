//! 分段下载器
//!
//! 由 [`DownloadRequest`] 创建，执行一次完整下载：
//!
//! - **能力探测**：HEAD 请求获取资源长度，并根据 `Accept-Ranges` 判断是否支持 Range
//! - **分段并发下载**：按请求的分段数切分字节区间，每段一个任务，信号量限制同时进行的请求数
//! - **按序合并**：全部分段成功后，按分段序号依次追加到目标文件，追加后删除临时产物
//! - **整文件回退**：服务器不支持 Range、调用方指定顺序下载、分段数为 1 或资源长度为 0 时，
//!   只发一次普通 GET 直接写入目标文件
//!
//! 任一分段失败即中止其余分段，清理所有临时产物并返回错误，不会产生目标文件。
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! # use range_downloader::request::DownloadRequest;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let request = DownloadRequest::new("https://example.com/large.iso", "large.iso", 8)?;
//! let result = request
//!     .build_downloader()
//!     .max_concurrent(4)
//!     .send()
//!     .await?;
//! println!("写入 {} 字节", result.total());
//! # Ok(())
//! # }
//! ```

mod ranged_download;
mod whole_file;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::{info, warn};

use crate::internal::http::http_client::build_http_client;
use crate::internal::probe::functions::probe_capability::probe_capability;
use crate::internal::probe::structs::Capability;

use super::cancel_handle::CancelHandle;
use super::download_config::{ArtifactStorage, DownloadConfig, DownloadMode};
use super::download_error::{DownloadError, FetchError};
use super::download_request::DownloadRequest;
use super::download_result::DownloadResult;
use ranged_download::{RunRangedDownloadParams, run_ranged_download};
use whole_file::transfer_whole_file;

pub use ranged_download::{FetchSegmentParams, fetch_segment, merge_segments};
pub use whole_file::download_whole_file;

/// 分段下载器；由 [`DownloadRequest::build_downloader`] 创建，链式配置后调用 [`send`](Self::send)。
#[derive(Debug)]
pub struct SegmentedDownloader {
    pub(crate) request: DownloadRequest,
    pub(crate) config: DownloadConfig,
    pub(crate) client: Option<Client>,
    pub(crate) cancel: CancelHandle,
}

/// 下载路径的选择结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DownloadPath {
    Ranged { segments: usize },
    WholeFile { reason: &'static str },
}

/// 根据探测结果与配置决定走分段还是整文件；分段数不超过资源字节数。
pub(crate) fn choose_path(
    capability: &Capability,
    requested_segments: usize,
    mode: DownloadMode,
) -> DownloadPath {
    if mode == DownloadMode::Sequential {
        return DownloadPath::WholeFile {
            reason: "指定顺序下载",
        };
    }
    if !capability.range_supported {
        return DownloadPath::WholeFile {
            reason: "服务器不支持 Range",
        };
    }
    if capability.total_size == 0 {
        return DownloadPath::WholeFile {
            reason: "资源长度为 0",
        };
    }

    // 分段数不能多于字节数
    let segments = match u64::try_from(requested_segments) {
        Ok(n) if n > capability.total_size => capability.total_size as usize,
        _ => requested_segments,
    };
    if segments <= 1 {
        return DownloadPath::WholeFile {
            reason: "分段数为 1",
        };
    }

    DownloadPath::Ranged { segments }
}

impl SegmentedDownloader {
    pub fn new(request: DownloadRequest) -> Self {
        Self {
            request,
            config: DownloadConfig::default(),
            client: None,
            cancel: CancelHandle::new(),
        }
    }

    /// 设置最多同时进行的分段请求数，最小为 1；与分段数相互独立。
    pub fn max_concurrent(mut self, n: usize) -> Self {
        self.config.max_concurrent = n.max(1);
        self
    }

    /// 设置单个分段请求的超时。
    pub fn segment_timeout(mut self, timeout: Duration) -> Self {
        self.config.segment_timeout = Some(timeout);
        self
    }

    /// 取消单个分段请求的超时限制。
    pub fn without_segment_timeout(mut self) -> Self {
        self.config.segment_timeout = None;
        self
    }

    /// 设置建立连接的超时；通过 [`with_client`](Self::with_client) 传入客户端时不生效。
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// 分段临时文件放到指定目录，默认放在目标文件所在目录。
    pub fn temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.artifact_storage = ArtifactStorage::Disk {
            dir: Some(dir.into()),
        };
        self
    }

    /// 分段临时产物保存在内存中，不落盘。
    pub fn in_memory_segments(mut self) -> Self {
        self.config.artifact_storage = ArtifactStorage::Memory;
        self
    }

    /// 不分段，始终只发一次整文件请求。
    pub fn sequential(mut self) -> Self {
        self.config.download_mode = DownloadMode::Sequential;
        self
    }

    pub fn with_config(mut self, config: DownloadConfig) -> Self {
        self.config = config;
        self
    }

    /// 使用调用方提供的 http 客户端，不再自建。
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// 取消句柄；在 `send` 之前取出，可在其他任务中调用 `cancel()`。
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn config(&self) -> &DownloadConfig {
        &self.config
    }

    /// 执行下载。分段路径返回 `Merged`，整文件路径返回 `WholeFile`。
    pub async fn send(mut self) -> Result<DownloadResult, DownloadError> {
        let started = Instant::now();
        let client = match self.client.take() {
            Some(client) => client,
            None => build_http_client(self.config.connect_timeout)
                .map_err(DownloadError::Client)?,
        };

        let url = self.request.url();
        let destination = self.request.destination();

        info!(
            target: "download",
            url = %url,
            destination = %destination.display(),
            segments = self.request.segments(),
            "开始下载"
        );

        let capability = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(DownloadError::Cancelled),
            probed = probe_capability(&client, url) => probed?,
        };

        info!(
            target: "download",
            total_size = capability.total_size,
            range_supported = capability.range_supported,
            "能力探测完成"
        );

        let path = choose_path(
            &capability,
            self.request.segments(),
            self.config.download_mode,
        );

        let result = match path {
            DownloadPath::WholeFile { reason } => {
                info!(target: "download", reason, "使用整文件下载");
                self.run_whole_file(&client, capability.total_size).await
            }
            DownloadPath::Ranged { segments } => {
                info!(target: "download", segments, "使用分段下载");
                run_ranged_download(RunRangedDownloadParams {
                    client: &client,
                    request: &self.request,
                    config: &self.config,
                    total: capability.total_size,
                    segment_count: segments,
                    cancel: &self.cancel,
                })
                .await
            }
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(done) => info!(
                target: "download",
                path = %done.path().display(),
                total = done.total(),
                elapsed_ms,
                "下载完成"
            ),
            Err(e) => warn!(
                target: "download",
                error = %e,
                elapsed_ms,
                "下载失败"
            ),
        }

        result
    }

    async fn run_whole_file(
        &self,
        client: &Client,
        expected: u64,
    ) -> Result<DownloadResult, DownloadError> {
        let url = self.request.url();
        let destination = self.request.destination();

        let total = transfer_whole_file(
            client,
            url,
            destination,
            Some(expected),
            Some(&self.cancel),
        )
        .await
        .map_err(|e| match e {
            FetchError::Cancelled => DownloadError::Cancelled,
            other => DownloadError::WholeFile(other),
        })?;

        Ok(DownloadResult::WholeFile {
            path: destination.to_path_buf(),
            total,
        })
    }
}
