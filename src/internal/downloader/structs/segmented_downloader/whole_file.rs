//! 整文件下载：一次普通 GET，响应体直接流式写入目标文件。

use std::io;
use std::path::Path;

use futures_util::StreamExt;
use reqwest::{Client, Response};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use url::Url;

use crate::internal::downloader::structs::{CancelHandle, FetchError};

/// 整文件下载，返回写入的字节数。`expected` 为已知长度时校验实际写入字节数。
///
/// 已存在的目标文件会被覆盖；失败时删除写了一半的目标文件。
pub async fn download_whole_file(
    client: &Client,
    url: &Url,
    destination: &Path,
    expected: Option<u64>,
) -> Result<u64, FetchError> {
    transfer_whole_file(client, url, destination, expected, None).await
}

/// 可取消的整文件下载；取消时返回 [`FetchError::Cancelled`]。
///
/// 目标文件在收到成功的响应头之后才会被创建，此前取消不会动已存在的目标文件；
/// 创建之后取消则删除写了一半的文件。
pub(crate) async fn transfer_whole_file(
    client: &Client,
    url: &Url,
    destination: &Path,
    expected: Option<u64>,
    cancel: Option<&CancelHandle>,
) -> Result<u64, FetchError> {
    let resp = until_cancelled(cancel, client.get(url.clone()).send()).await??;
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    let file = File::create(destination)
        .await
        .map_err(FetchError::CreateFile)?;

    match until_cancelled(cancel, stream_into(resp, file, expected)).await {
        Ok(Ok(written)) => {
            debug!(
                target: "download",
                destination = %destination.display(),
                written,
                "整文件写入完成"
            );
            Ok(written)
        }
        Ok(Err(e)) | Err(e) => {
            remove_partial(destination).await;
            Err(e)
        }
    }
}

async fn until_cancelled<F: Future>(
    cancel: Option<&CancelHandle>,
    fut: F,
) -> Result<F::Output, FetchError> {
    let Some(cancel) = cancel else {
        return Ok(fut.await);
    };
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(FetchError::Cancelled),
        out = fut => Ok(out),
    }
}

async fn stream_into(
    resp: Response,
    mut file: File,
    expected: Option<u64>,
) -> Result<u64, FetchError> {
    let mut stream = resp.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result?;
        written += chunk.len() as u64;
        if let Some(expected) = expected.filter(|e| written > *e) {
            return Err(FetchError::LengthMismatch {
                expected,
                actual: written,
            });
        }
        file.write_all(&chunk).await.map_err(FetchError::WriteFile)?;
    }

    file.flush().await.map_err(FetchError::WriteFile)?;

    if let Some(expected) = expected.filter(|e| written != *e) {
        return Err(FetchError::LengthMismatch {
            expected,
            actual: written,
        });
    }

    Ok(written)
}

/// 删除不完整的目标文件；文件不存在视为成功，其余失败只记录日志。
async fn remove_partial(destination: &Path) {
    match fs::remove_file(destination).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(
            target: "download",
            destination = %destination.display(),
            error = %e,
            "删除不完整的目标文件失败"
        ),
    }
}
