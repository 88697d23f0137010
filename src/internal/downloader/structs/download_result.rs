use std::path::{Path, PathBuf};

/// 单次下载的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadResult {
    /// 分段并发下载并按序合并完成
    Merged {
        path: PathBuf,
        total: u64,
        segments: usize,
    },
    /// 整文件一次下载完成（服务器不支持 Range，或调用方指定顺序下载）
    WholeFile { path: PathBuf, total: u64 },
}

impl DownloadResult {
    pub fn path(&self) -> &Path {
        match self {
            DownloadResult::Merged { path, .. } => path,
            DownloadResult::WholeFile { path, .. } => path,
        }
    }

    /// 写入目标文件的总字节数
    pub fn total(&self) -> u64 {
        match self {
            DownloadResult::Merged { total, .. } => *total,
            DownloadResult::WholeFile { total, .. } => *total,
        }
    }
}
