use std::path::PathBuf;
use std::time::Duration;

/// 默认分段数
pub const DEFAULT_SEGMENTS: usize = 8;

/// 默认最大并发分段请求数，与分段数相互独立
pub const DEFAULT_MAX_CONCURRENT: usize = 4;

/// 默认单个分段的超时（秒）
pub const DEFAULT_SEGMENT_TIMEOUT_SECS: u64 = 300;

/// 默认建立连接的超时（秒）
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// 下载模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadMode {
    /// 服务器支持 Range 时分段并发下载，否则回退为整文件下载
    Segmented,
    /// 无论服务器是否支持 Range，都只发一次整文件请求
    Sequential,
}

/// 分段临时产物的存放位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactStorage {
    /// 临时文件；`dir` 为空时放在目标文件所在目录
    Disk { dir: Option<PathBuf> },
    /// 内存缓冲
    Memory,
}

/// 本次下载的配置。
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    pub download_mode: DownloadMode,
    pub artifact_storage: ArtifactStorage,
    /// 同时进行的分段请求数上限
    pub max_concurrent: usize,
    /// 单个分段请求的超时；`None` 表示不限时
    pub segment_timeout: Option<Duration>,
    /// 建立连接的超时，仅在下载器自建客户端时生效
    pub connect_timeout: Duration,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            download_mode: DownloadMode::Segmented,
            artifact_storage: ArtifactStorage::Disk { dir: None },
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            segment_timeout: Some(Duration::from_secs(
                DEFAULT_SEGMENT_TIMEOUT_SECS,
            )),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}
