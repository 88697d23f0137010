/// 内部导出的模块
mod internal;

#[cfg(test)]
mod tests;

/// 下载请求与配置；一般从 [`request::DownloadRequest::build_downloader`] 开始
pub mod request {
    use crate::internal;
    pub use internal::downloader::structs::download_config::*;
    pub use internal::downloader::structs::download_request::DownloadRequest;
    pub use internal::http::http_client::USER_AGENT;
}

pub mod downloader {
    use crate::internal;
    pub use internal::downloader::structs::{
        CancelHandle, DownloadError, DownloadResult, FetchError,
        FetchSegmentParams, MergeError, SegmentedDownloader, download_whole_file,
        fetch_segment, merge_segments,
    };
}

/// 对外提供能力探测，不限制在下载器内部使用
pub mod probe {
    use crate::internal;
    pub use internal::probe::functions::probe_capability::probe_capability;
    pub use internal::probe::structs::*;
}

pub mod segment {
    use crate::internal;
    pub use internal::segment::functions::plan_segments::plan_segments;
    pub use internal::segment::structs::*;
}

/// 分段临时产物存储；可自行实现 `SegmentStore` 配合 `fetch_segment` / `merge_segments` 使用
pub mod store {
    use crate::internal;
    pub use internal::store::structs::*;
    pub use internal::store::traits::*;
}
