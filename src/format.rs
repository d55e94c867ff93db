//! Magic-byte sniffing for uploaded image bodies.
//!
//! The PUT handler never trusts the declared `Content-Type` alone: the body's
//! leading bytes are inspected to determine the actual file type. Only JPEG
//! bodies are accepted; anything else maps to HTTP 415 Unsupported Media Type.

// =============================================================================
// SniffedFormat
// =============================================================================

/// Image format detected from a body's leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SniffedFormat {
    /// JPEG/JFIF (starts with FF D8 FF)
    Jpeg,

    /// PNG
    Png,

    /// GIF (87a or 89a)
    Gif,

    /// Windows bitmap
    Bmp,

    /// TIFF, either byte order
    Tiff,
}

impl SniffedFormat {
    /// Get a human-readable name for the format.
    pub const fn name(&self) -> &'static str {
        match self {
            SniffedFormat::Jpeg => "JPEG",
            SniffedFormat::Png => "PNG",
            SniffedFormat::Gif => "GIF",
            SniffedFormat::Bmp => "BMP",
            SniffedFormat::Tiff => "TIFF",
        }
    }
}

// =============================================================================
// Format Detection
// =============================================================================

/// JPEG SOI marker followed by the first marker byte.
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

/// PNG signature.
const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Common prefix of the GIF87a and GIF89a signatures.
const GIF_MAGIC: &[u8] = b"GIF8";

/// BMP file header.
const BMP_MAGIC: &[u8] = b"BM";

/// Detect the image format from a body's leading bytes.
///
/// Returns `None` when the bytes match no known signature, including the
/// empty body. This is a prefix check only; it does not validate that the
/// remainder of the body is a well-formed image.
pub fn sniff_format(bytes: &[u8]) -> Option<SniffedFormat> {
    if bytes.starts_with(JPEG_MAGIC) {
        return Some(SniffedFormat::Jpeg);
    }
    if bytes.starts_with(PNG_MAGIC) {
        return Some(SniffedFormat::Png);
    }
    if bytes.starts_with(GIF_MAGIC) {
        return Some(SniffedFormat::Gif);
    }
    if bytes.starts_with(BMP_MAGIC) {
        return Some(SniffedFormat::Bmp);
    }
    if is_tiff_magic(bytes) {
        return Some(SniffedFormat::Tiff);
    }
    None
}

/// Check whether bytes start with the JPEG magic signature.
pub fn is_jpeg(bytes: &[u8]) -> bool {
    sniff_format(bytes) == Some(SniffedFormat::Jpeg)
}

/// TIFF starts with "II" (little-endian) or "MM" (big-endian) followed by
/// version 42 in the matching byte order.
fn is_tiff_magic(bytes: &[u8]) -> bool {
    if bytes.len() < 4 {
        return false;
    }
    match &bytes[..2] {
        b"II" => bytes[2] == 42 && bytes[3] == 0,
        b"MM" => bytes[2] == 0 && bytes[3] == 42,
        _ => false,
    }
}

// =============================================================================
// Tests
// =============================================================================
