use std::time::Duration;

use crate::downloader::DownloadError;
use crate::request::{
    ArtifactStorage, DEFAULT_MAX_CONCURRENT, DEFAULT_SEGMENT_TIMEOUT_SECS,
    DEFAULT_SEGMENTS, DownloadMode, DownloadRequest,
};
use crate::segment::PlanError;

#[test]
fn valid_request_keeps_its_fields() {
    let request =
        DownloadRequest::new("https://example.com/a.bin", "out/a.bin", 4).unwrap();
    assert_eq!(request.url().as_str(), "https://example.com/a.bin");
    assert_eq!(request.destination(), std::path::Path::new("out/a.bin"));
    assert_eq!(request.segments(), 4);

    let request =
        DownloadRequest::with_default_segments("http://example.com/a", "a").unwrap();
    assert_eq!(request.segments(), DEFAULT_SEGMENTS);
}

#[test]
fn invalid_requests_are_rejected() {
    assert!(matches!(
        DownloadRequest::new("not a url", "a", 4),
        Err(DownloadError::InvalidUrl(_))
    ));
    assert!(matches!(
        DownloadRequest::new("ftp://example.com/a", "a", 4),
        Err(DownloadError::UnsupportedScheme(s)) if s == "ftp"
    ));
    assert!(matches!(
        DownloadRequest::new("http://example.com/a", "", 4),
        Err(DownloadError::EmptyDestination)
    ));
    assert!(matches!(
        DownloadRequest::new("http://example.com/a", "a", 0),
        Err(DownloadError::Plan(PlanError::ZeroSegments))
    ));
}

#[test]
fn builder_applies_configuration() {
    let request = DownloadRequest::new("http://example.com/a", "a", 4).unwrap();

    let defaults = request.build_downloader();
    let config = defaults.config();
    assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
    assert_eq!(
        config.segment_timeout,
        Some(Duration::from_secs(DEFAULT_SEGMENT_TIMEOUT_SECS))
    );
    assert_eq!(config.download_mode, DownloadMode::Segmented);
    assert_eq!(config.artifact_storage, ArtifactStorage::Disk { dir: None });

    let downloader = request
        .build_downloader()
        .max_concurrent(0)
        .segment_timeout(Duration::from_secs(5))
        .temp_dir("/tmp/parts")
        .sequential();
    let config = downloader.config();
    assert_eq!(config.max_concurrent, 1);
    assert_eq!(config.segment_timeout, Some(Duration::from_secs(5)));
    assert_eq!(config.download_mode, DownloadMode::Sequential);
    assert_eq!(
        config.artifact_storage,
        ArtifactStorage::Disk {
            dir: Some("/tmp/parts".into())
        }
    );

    let downloader = request
        .build_downloader()
        .in_memory_segments()
        .without_segment_timeout();
    assert_eq!(downloader.config().artifact_storage, ArtifactStorage::Memory);
    assert_eq!(downloader.config().segment_timeout, None);
}
