use reqwest::Client;
use reqwest::header::{ACCEPT_RANGES, CONTENT_LENGTH, HeaderMap};
use tracing::debug;
use url::Url;

use crate::internal::probe::structs::{Capability, ProbeError};

/// 发起 HEAD 请求，探测资源长度与是否支持 Range，不传输响应体。
pub async fn probe_capability(
    client: &Client,
    url: &Url,
) -> Result<Capability, ProbeError> {
    let resp = client.head(url.clone()).send().await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ProbeError::Status(status));
    }

    let headers = resp.headers();
    let capability = Capability {
        total_size: parse_content_length(headers)?,
        range_supported: parse_accept_ranges(headers),
    };

    debug!(
        target: "download",
        url = %url,
        total_size = capability.total_size,
        range_supported = capability.range_supported,
        "能力探测完成"
    );

    Ok(capability)
}

/// 直接读 Content-Length 头；HEAD 响应没有响应体，不能用 `Response::content_length()`。
pub(crate) fn parse_content_length(
    headers: &HeaderMap,
) -> Result<u64, ProbeError> {
    let raw = headers
        .get(CONTENT_LENGTH)
        .ok_or(ProbeError::MissingContentLength)?;

    let text = raw.to_str().map_err(|_| {
        ProbeError::InvalidContentLength(
            String::from_utf8_lossy(raw.as_bytes()).into_owned(),
        )
    })?;

    text.trim()
        .parse::<u64>()
        .map_err(|_| ProbeError::InvalidContentLength(text.to_string()))
}

/// Accept-Ranges 存在且非空即视为支持；`none` 明确表示不支持。
pub(crate) fn parse_accept_ranges(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT_RANGES)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .map(|v| !v.is_empty() && !v.eq_ignore_ascii_case("none"))
        .unwrap_or(false)
}
