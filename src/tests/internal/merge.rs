//! 合并测试：按下标顺序合并、与写入顺序无关、失败时的产物与目标文件状态。

use crate::downloader::{MergeError, merge_segments};
use crate::segment::{Segment, plan_segments};
use crate::store::{DiskSegmentStore, MemorySegmentStore, SegmentStore};
use crate::tests::payload;

async fn put(store: &dyn SegmentStore, index: usize, data: &[u8]) {
    let mut writer = store.create(index).await.unwrap();
    writer.write_chunk(data).await.unwrap();
    writer.finish().await.unwrap();
}

fn slice<'a>(data: &'a [u8], segment: &Segment) -> &'a [u8] {
    &data[segment.start as usize..=segment.end as usize]
}

#[tokio::test]
async fn merge_order_follows_index_not_write_order() {
    let data = payload(10_007, 11);
    let segments = plan_segments(data.len() as u64, 6).unwrap();
    let store = MemorySegmentStore::new();

    // 倒序写入
    for (index, segment) in segments.iter().enumerate().rev() {
        put(&store, index, slice(&data, segment)).await;
    }

    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("out.bin");
    let total = merge_segments(&store, &segments, &destination).await.unwrap();

    assert_eq!(total, data.len() as u64);
    assert_eq!(std::fs::read(&destination).unwrap(), data);
    assert!(store.is_empty(), "合并后产物应全部删除");
}

#[tokio::test]
async fn merge_replaces_longer_stale_destination() {
    let data = payload(300, 12);
    let segments = plan_segments(300, 3).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let store = DiskSegmentStore::new(dir.path(), "out.bin", "job");
    for (index, segment) in segments.iter().enumerate() {
        put(&store, index, slice(&data, segment)).await;
    }

    let destination = dir.path().join("out.bin");
    std::fs::write(&destination, vec![0xAA; 5000]).unwrap();

    merge_segments(&store, &segments, &destination).await.unwrap();
    assert_eq!(std::fs::read(&destination).unwrap(), data);
    assert!(crate::tests::leftover_parts(dir.path()).is_empty());
}

#[tokio::test]
async fn missing_artifact_aborts_merge() {
    let data = payload(90, 13);
    let segments = plan_segments(90, 3).unwrap();
    let store = MemorySegmentStore::new();
    put(&store, 0, slice(&data, &segments[0])).await;
    put(&store, 2, slice(&data, &segments[2])).await;

    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("out.bin");
    let err = merge_segments(&store, &segments, &destination).await.unwrap_err();

    assert!(matches!(err, MergeError::MissingArtifact { index: 1 }));
    assert!(err.to_string().contains('1'));
    // 已合并的分段 0 被删除，分段 2 尚未处理
    assert_eq!(store.len(), 1);
    // 目标文件保留为不完整状态
    assert_eq!(std::fs::read(&destination).unwrap(), slice(&data, &segments[0]));
}

#[tokio::test]
async fn artifact_with_wrong_length_is_rejected() {
    let segments = vec![Segment::new(0, 9), Segment::new(10, 19)];
    let store = MemorySegmentStore::new();
    put(&store, 0, &[1u8; 10]).await;
    put(&store, 1, &[2u8; 7]).await;

    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("out.bin");
    let err = merge_segments(&store, &segments, &destination).await.unwrap_err();

    assert!(matches!(
        err,
        MergeError::ArtifactSizeMismatch {
            index: 1,
            expected: 10,
            actual: 7
        }
    ));
    // 出错的产物同样会被删除
    assert!(store.is_empty());
}
