use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT_ENCODING, HeaderMap, HeaderValue};

/// 默认 User-Agent
pub const USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// 创建下载用的 http 客户端。
///
/// 显式声明 `Accept-Encoding: identity`：分段按原始字节偏移切分，
/// 不能让服务器对 Range 响应做压缩。
pub(crate) fn build_http_client(
    connect_timeout: Duration,
) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));

    Client::builder()
        .default_headers(headers)
        .user_agent(USER_AGENT)
        .connect_timeout(connect_timeout)
        .build()
}
