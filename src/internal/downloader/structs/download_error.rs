//! 下载相关错误类型。

use std::io;
use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::internal::probe::structs::ProbeError;
use crate::internal::segment::structs::PlanError;

/// 单次传输（一个分段或整文件）的失败原因。
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("响应状态异常: {0}")]
    Status(StatusCode),

    #[error("服务器未按 Range 返回部分内容，响应状态 {0}")]
    RangeNotHonored(StatusCode),

    #[error("Content-Range 与请求不符: 请求 {expected}，响应 {actual}")]
    ContentRangeMismatch { expected: String, actual: String },

    #[error("字节数不符: 期望 {expected}，实际 {actual}")]
    LengthMismatch { expected: u64, actual: u64 },

    #[error("写入分段产物失败: {0}")]
    Store(io::Error),

    #[error("创建文件失败: {0}")]
    CreateFile(io::Error),

    #[error("写入文件失败: {0}")]
    WriteFile(io::Error),

    #[error("超过 {0:?} 仍未完成")]
    Timeout(Duration),

    #[error("并发信号量已关闭")]
    SemaphoreClosed,

    #[error("传输被取消")]
    Cancelled,
}

/// 合并失败。出现任何一种时，目标文件都是不完整的，不可使用。
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("删除已存在的目标文件失败: {0}")]
    RemoveStale(io::Error),

    #[error("创建目标文件失败: {0}")]
    CreateOutput(io::Error),

    #[error("分段 {index} 的产物不存在")]
    MissingArtifact { index: usize },

    #[error("读取分段 {index} 的产物失败: {source}")]
    ReadArtifact { index: usize, source: io::Error },

    #[error("写入目标文件失败: {0}")]
    WriteOutput(io::Error),

    #[error("分段 {index} 的产物长度不符: 期望 {expected}，实际 {actual}")]
    ArtifactSizeMismatch {
        index: usize,
        expected: u64,
        actual: u64,
    },
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("URL 无法解析: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("不支持的协议: {0}")]
    UnsupportedScheme(String),

    #[error("未设置保存路径")]
    EmptyDestination,

    #[error("创建 http 客户端失败: {0}")]
    Client(reqwest::Error),

    #[error("能力探测失败: {0}")]
    Probe(#[from] ProbeError),

    #[error("分段规划失败: {0}")]
    Plan(#[from] PlanError),

    #[error("分段 {index} 下载失败: {source}")]
    Segment { index: usize, source: FetchError },

    #[error("整文件下载失败: {0}")]
    WholeFile(#[source] FetchError),

    #[error("合并失败，目标文件不完整: {0}")]
    Merge(#[from] MergeError),

    #[error("下载被取消")]
    Cancelled,

    #[error("分段任务失败: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
