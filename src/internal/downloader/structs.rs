pub mod cancel_handle;
pub mod download_config;
pub mod download_error;
pub mod download_request;
pub mod download_result;
pub mod segmented_downloader;

// 重导出公共类型
pub use cancel_handle::CancelHandle;
pub use download_config::{ArtifactStorage, DownloadConfig};
pub use download_error::{DownloadError, FetchError, MergeError};
pub use download_request::DownloadRequest;
pub use download_result::DownloadResult;
pub use segmented_downloader::{
    FetchSegmentParams, SegmentedDownloader, download_whole_file, fetch_segment,
    merge_segments,
};
