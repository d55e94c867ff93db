//! API integration tests for snapshot publish and serve.
//!
//! Tests verify:
//! - GET fallback to the default placeholder image
//! - Publish-then-fetch round trip with exact body bytes
//! - HTTP response codes, bodies, and cache headers
//! - Body-size limit and write-failure behavior

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use prasocam::{create_router, RouterConfig};

use super::test_utils::{
    get_request, is_valid_jpeg, jpeg_bytes, publishing_router, valid_put_request,
};

// =============================================================================
// GET /prasocam.jpg
// =============================================================================

#[tokio::test]
async fn test_get_serves_default_image_when_no_snapshot() {
    let dir = TempDir::new().unwrap();
    let default_image = jpeg_bytes();
    std::fs::write(dir.path().join("prasocam_default.jpg"), &default_image).unwrap();

    let router = publishing_router(dir.path());
    let response = router.oneshot(get_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/jpeg"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], &default_image[..]);
}

#[tokio::test]
async fn test_get_returns_404_when_no_image_at_all() {
    let dir = TempDir::new().unwrap();
    let router = publishing_router(dir.path());

    let response = router.oneshot(get_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "not_found");
}

#[tokio::test]
async fn test_get_requires_no_authentication() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("prasocam.jpg"), jpeg_bytes()).unwrap();

    // No auth headers, no forwarded proto
    let router = publishing_router(dir.path());
    let response = router.oneshot(get_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_cache_control_header() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("prasocam.jpg"), jpeg_bytes()).unwrap();

    let router = create_router(
        RouterConfig::new(dir.path())
            .with_cache_max_age(12000)
            .with_tracing(false),
    );
    let response = router.oneshot(get_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("cache-control").unwrap(),
        "public, max-age=12000"
    );
}

// =============================================================================
// PUT /prasocam.jpg
// =============================================================================

#[tokio::test]
async fn test_put_writes_snapshot_and_returns_created() {
    let dir = TempDir::new().unwrap();
    let router = publishing_router(dir.path());
    let upload = jpeg_bytes();

    let response = router
        .oneshot(valid_put_request(upload.clone()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"File written");

    // The exact body bytes landed on disk
    let written = std::fs::read(dir.path().join("prasocam.jpg")).unwrap();
    assert_eq!(written, upload);
    assert!(is_valid_jpeg(&written));
}

#[tokio::test]
async fn test_put_then_get_round_trip() {
    let dir = TempDir::new().unwrap();
    let router = publishing_router(dir.path());
    let upload = jpeg_bytes();

    let put_response = router
        .clone()
        .oneshot(valid_put_request(upload.clone()))
        .await
        .unwrap();
    assert_eq!(put_response.status(), StatusCode::CREATED);

    let get_response = router.oneshot(get_request()).await.unwrap();
    assert_eq!(get_response.status(), StatusCode::OK);

    let body = get_response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], &upload[..]);
}

#[tokio::test]
async fn test_put_overwrites_previous_snapshot() {
    let dir = TempDir::new().unwrap();
    let router = publishing_router(dir.path());

    let first = jpeg_bytes();
    let mut second = jpeg_bytes();
    second.extend_from_slice(&[0x00, 0x01, 0x02]); // make the bodies differ

    let response = router
        .clone()
        .oneshot(valid_put_request(first))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .oneshot(valid_put_request(second.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let written = std::fs::read(dir.path().join("prasocam.jpg")).unwrap();
    assert_eq!(written, second);
}

#[tokio::test]
async fn test_put_oversized_body_rejected() {
    let dir = TempDir::new().unwrap();
    let router = create_router(
        RouterConfig::new(dir.path())
            .with_credentials(prasocam::Credentials::new("test", "test"))
            .with_max_body_size(1024)
            .with_tracing(false),
    );

    // JPEG magic followed by padding well past the limit
    let mut body = vec![0xFF, 0xD8, 0xFF, 0xE0];
    body.resize(4096, 0);

    let response = router.oneshot(valid_put_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    // Nothing was written
    assert!(!dir.path().join("prasocam.jpg").exists());
}

#[tokio::test]
async fn test_put_write_failure_returns_internal_error() {
    let dir = TempDir::new().unwrap();
    // A directory squatting on the image path makes the write fail
    std::fs::create_dir(dir.path().join("prasocam.jpg")).unwrap();

    let router = publishing_router(dir.path());
    let response = router
        .oneshot(valid_put_request(jpeg_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "internal_error");
}

// =============================================================================
// GET /health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let dir = TempDir::new().unwrap();
    let router = publishing_router(dir.path());

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let health: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["status"], "ok");
}
