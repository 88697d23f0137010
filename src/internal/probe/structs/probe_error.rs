use reqwest::StatusCode;
use thiserror::Error;

/// 能力探测失败：任何一种都会在切分前中止整个下载。
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("HEAD 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HEAD 响应状态异常: {0}")]
    Status(StatusCode),

    #[error("响应缺少 Content-Length")]
    MissingContentLength,

    #[error("Content-Length 无法解析: {0:?}")]
    InvalidContentLength(String),
}
