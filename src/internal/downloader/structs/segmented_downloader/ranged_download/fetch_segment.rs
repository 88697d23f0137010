//! 分段下载：执行单段下载，流式写入该分段独占的临时产物。

use futures_util::StreamExt;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::internal::downloader::structs::FetchError;
use crate::internal::segment::structs::Segment;
use crate::internal::store::traits::SegmentStore;

use super::range_request::fetch_range_response;

/// 执行单段下载时的参数（形参超过 3 个，用 struct 承载）。
pub struct FetchSegmentParams<'a> {
    pub client: &'a Client,
    pub url: &'a Url,
    pub index: usize,
    pub segment: Segment,
    pub store: &'a dyn SegmentStore,
}

/// 下载一个分段到存储中下标为 `index` 的产物，返回写入的字节数。
///
/// 收到的字节数必须恰好等于分段长度；超出时立即中断，不再继续读取。
pub async fn fetch_segment(
    params: FetchSegmentParams<'_>,
) -> Result<u64, FetchError> {
    let FetchSegmentParams {
        client,
        url,
        index,
        segment,
        store,
    } = params;

    let resp = fetch_range_response(client, url, &segment).await?;
    let expected = segment.len();

    let mut writer = store.create(index).await.map_err(FetchError::Store)?;
    let mut stream = resp.bytes_stream();
    let mut received: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result?;
        received += chunk.len() as u64;
        if received > expected {
            return Err(FetchError::LengthMismatch {
                expected,
                actual: received,
            });
        }
        writer.write_chunk(&chunk).await.map_err(FetchError::Store)?;
    }

    let written = writer.finish().await.map_err(FetchError::Store)?;
    if written != expected {
        return Err(FetchError::LengthMismatch {
            expected,
            actual: written,
        });
    }

    debug!(
        target: "download",
        index,
        segment = %segment,
        written,
        "分段下载完成"
    );

    Ok(written)
}
