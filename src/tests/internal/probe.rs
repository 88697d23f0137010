use axum::http::StatusCode;
use reqwest::header::{ACCEPT_RANGES, CONTENT_LENGTH, HeaderMap, HeaderValue};
use url::Url;

use crate::internal::probe::functions::probe_capability::{
    parse_accept_ranges, parse_content_length,
};
use crate::probe::{ProbeError, probe_capability};
use crate::tests::{ServerOptions, payload, spawn_server, unreachable_url};

fn headers(pairs: &[(reqwest::header::HeaderName, &str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.insert(name.clone(), HeaderValue::from_str(value).unwrap());
    }
    map
}

#[test]
fn content_length_is_parsed_from_header() {
    assert_eq!(parse_content_length(&headers(&[(CONTENT_LENGTH, "1024")])).unwrap(), 1024);
    assert_eq!(parse_content_length(&headers(&[(CONTENT_LENGTH, "0")])).unwrap(), 0);
}

#[test]
fn missing_or_invalid_content_length() {
    assert!(matches!(
        parse_content_length(&HeaderMap::new()),
        Err(ProbeError::MissingContentLength)
    ));
    assert!(matches!(
        parse_content_length(&headers(&[(CONTENT_LENGTH, "abc")])),
        Err(ProbeError::InvalidContentLength(v)) if v == "abc"
    ));
    assert!(matches!(
        parse_content_length(&headers(&[(CONTENT_LENGTH, "-5")])),
        Err(ProbeError::InvalidContentLength(_))
    ));
}

#[test]
fn accept_ranges_detection() {
    assert!(parse_accept_ranges(&headers(&[(ACCEPT_RANGES, "bytes")])));
    assert!(!parse_accept_ranges(&HeaderMap::new()));
    assert!(!parse_accept_ranges(&headers(&[(ACCEPT_RANGES, "")])));
    assert!(!parse_accept_ranges(&headers(&[(ACCEPT_RANGES, "none")])));
}

#[tokio::test]
async fn probe_reports_size_and_range_support() {
    let server = spawn_server(payload(4096, 1), ServerOptions::default()).await;
    let url = Url::parse(&server.url).unwrap();

    let capability = probe_capability(&reqwest::Client::new(), &url).await.unwrap();
    assert_eq!(capability.total_size, 4096);
    assert!(capability.range_supported);
    assert_eq!(server.stats.head(), 1);
    // 探测不传输响应体
    assert_eq!(server.stats.full(), 0);
    assert_eq!(server.stats.ranges(), 0);
}

#[tokio::test]
async fn probe_without_accept_ranges() {
    let options = ServerOptions {
        accept_ranges: false,
        ..Default::default()
    };
    let server = spawn_server(payload(10, 2), options).await;
    let url = Url::parse(&server.url).unwrap();

    let capability = probe_capability(&reqwest::Client::new(), &url).await.unwrap();
    assert_eq!(capability.total_size, 10);
    assert!(!capability.range_supported);
}

#[tokio::test]
async fn probe_rejects_error_status() {
    let options = ServerOptions {
        head_status: StatusCode::NOT_FOUND,
        ..Default::default()
    };
    let server = spawn_server(payload(10, 3), options).await;
    let url = Url::parse(&server.url).unwrap();

    let err = probe_capability(&reqwest::Client::new(), &url).await.unwrap_err();
    assert!(matches!(err, ProbeError::Status(s) if s.as_u16() == 404));
}

#[tokio::test]
async fn probe_unreachable_host() {
    let url = Url::parse(&unreachable_url().await).unwrap();
    let err = probe_capability(&reqwest::Client::new(), &url).await.unwrap_err();
    assert!(matches!(err, ProbeError::Request(_)));
}
