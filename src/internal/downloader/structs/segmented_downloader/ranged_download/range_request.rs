//! 分段下载：发起单段 Range 请求并校验响应确实是所请求的区间。

use reqwest::header::{CONTENT_RANGE, HeaderValue, RANGE};
use reqwest::{Client, Response, StatusCode};
use url::Url;

use crate::internal::downloader::structs::FetchError;
use crate::internal::segment::structs::Segment;

/// 发起单段 Range GET 请求，返回响应供调用方做 `bytes_stream()`。
///
/// 只接受 206；返回 200 说明服务器忽略了 Range，响应体是整个文件。
pub(crate) async fn fetch_range_response(
    client: &Client,
    url: &Url,
    segment: &Segment,
) -> Result<Response, FetchError> {
    let resp = client
        .get(url.clone())
        .header(RANGE, segment.range_header())
        .send()
        .await?;

    let status = resp.status();
    if status != StatusCode::PARTIAL_CONTENT {
        return Err(if status.is_success() {
            FetchError::RangeNotHonored(status)
        } else {
            FetchError::Status(status)
        });
    }

    if let Some(raw) = resp.headers().get(CONTENT_RANGE) {
        check_content_range(raw, segment)?;
    }

    Ok(resp)
}

/// 校验 `Content-Range: bytes start-end/total` 的区间与请求一致，total 不参与比较。
pub(crate) fn check_content_range(
    raw: &HeaderValue,
    segment: &Segment,
) -> Result<(), FetchError> {
    let actual = String::from_utf8_lossy(raw.as_bytes()).into_owned();
    let mismatch = || FetchError::ContentRangeMismatch {
        expected: format!("{}-{}", segment.start, segment.end),
        actual: actual.clone(),
    };

    let span = actual
        .trim()
        .strip_prefix("bytes ")
        .and_then(|rest| rest.split('/').next())
        .ok_or_else(mismatch)?;
    let (start, end) = span.split_once('-').ok_or_else(mismatch)?;
    let start: u64 = start.trim().parse().map_err(|_| mismatch())?;
    let end: u64 = end.trim().parse().map_err(|_| mismatch())?;

    if start != segment.start || end != segment.end {
        return Err(mismatch());
    }
    Ok(())
}
