//! Test utilities for integration tests.
//!
//! Helpers for building routers over scratch image directories and for
//! synthesizing request bodies of various types.

use std::path::Path;

use axum::body::Body;
use axum::http::Request;
use axum::Router;
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};

use prasocam::{basic_authorization, create_router, Credentials, RouterConfig, IMAGE_ROUTE};

/// Test credentials used across the suite.
pub const TEST_USER: &str = "test";
pub const TEST_PASS: &str = "test";

// =============================================================================
// Routers
// =============================================================================

/// Build a router with publishing enabled, serving images from `image_dir`.
pub fn publishing_router(image_dir: &Path) -> Router {
    create_router(
        RouterConfig::new(image_dir)
            .with_credentials(Credentials::new(TEST_USER, TEST_PASS))
            .with_tracing(false),
    )
}

/// Build a read-only router (no credentials, so no PUT route).
pub fn read_only_router(image_dir: &Path) -> Router {
    create_router(RouterConfig::new(image_dir).with_tracing(false))
}

// =============================================================================
// Request Builders
// =============================================================================

/// Build a PUT request that passes every validation check, carrying `body`.
pub fn valid_put_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(IMAGE_ROUTE)
        .header("x-forwarded-proto", "https")
        .header("authorization", basic_authorization(TEST_USER, TEST_PASS))
        .header("content-type", "image/jpeg")
        .body(Body::from(body))
        .unwrap()
}

/// Build a GET request for the snapshot.
pub fn get_request() -> Request<Body> {
    Request::builder()
        .uri(IMAGE_ROUTE)
        .body(Body::empty())
        .unwrap()
}

// =============================================================================
// Image Bodies
// =============================================================================

/// Create a small genuine JPEG body.
pub fn jpeg_bytes() -> Vec<u8> {
    let img = RgbImage::from_fn(8, 8, |x, y| {
        let v = ((x + y) * 16) as u8;
        Rgb([v, 128, 255 - v])
    });

    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, 80);
    encoder.encode_image(&img).unwrap();
    buf
}

/// A body carrying the PNG signature (not a full image; the sniffer only
/// inspects leading bytes).
pub fn png_magic_bytes() -> Vec<u8> {
    let mut buf = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    buf.extend_from_slice(&[0u8; 24]);
    buf
}

/// Check whether bytes start with the JPEG magic signature.
pub fn is_valid_jpeg(bytes: &[u8]) -> bool {
    bytes.len() > 3 && bytes[0] == 0xFF && bytes[1] == 0xD8 && bytes[2] == 0xFF
}
