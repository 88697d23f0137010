use std::path::{Path, PathBuf};

use url::Url;

use super::download_config::DEFAULT_SEGMENTS;
use super::download_error::DownloadError;
use super::segmented_downloader::SegmentedDownloader;
use crate::internal::segment::structs::PlanError;

/// 下载请求：源 URL、保存路径、期望分段数。创建后不可变。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    url: Url,
    destination: PathBuf,
    segments: usize,
}

impl DownloadRequest {
    /// 创建下载请求；URL 须为 http/https，保存路径不能为空，分段数必须大于 0。
    pub fn new(
        url: &str,
        destination: impl AsRef<Path>,
        segments: usize,
    ) -> Result<Self, DownloadError> {
        let url = Url::parse(url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DownloadError::UnsupportedScheme(
                url.scheme().to_string(),
            ));
        }

        let destination = destination.as_ref();
        if destination.as_os_str().is_empty() {
            return Err(DownloadError::EmptyDestination);
        }

        if segments == 0 {
            return Err(PlanError::ZeroSegments.into());
        }

        Ok(Self {
            url,
            destination: destination.to_path_buf(),
            segments,
        })
    }

    /// 使用默认分段数（[`DEFAULT_SEGMENTS`]）创建下载请求。
    pub fn with_default_segments(
        url: &str,
        destination: impl AsRef<Path>,
    ) -> Result<Self, DownloadError> {
        Self::new(url, destination, DEFAULT_SEGMENTS)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn segments(&self) -> usize {
        self.segments
    }

    /// 创建专属于本请求的下载器；可链式配置后调用 [`SegmentedDownloader::send`] 执行下载。
    pub fn build_downloader(&self) -> SegmentedDownloader {
        SegmentedDownloader::new(self.clone())
    }
}
