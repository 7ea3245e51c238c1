//! PNG snapshots for the wire.

use base64::Engine;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    SizeMismatch { width: u32, height: u32, expected: usize, actual: usize },

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Encode tightly packed RGBA8 pixels as a base64 PNG.
pub fn encode_png_base64(rgba: &[u8], width: u32, height: u32) -> Result<String, SnapshotError> {
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(SnapshotError::SizeMismatch { width, height, expected, actual: rgba.len() });
    }
    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(rgba, width, height, ExtendedColorType::Rgba8)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(&png))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encodes_png_signature() {
        let pixels = vec![255u8; 4 * 3 * 2];
        let encoded = encode_png_base64(&pixels, 3, 2).unwrap();
        let bytes = base64::engine::general_purpose::STANDARD.decode(encoded).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_rejects_short_buffer() {
        let err = encode_png_base64(&[0u8; 10], 3, 2).unwrap_err();
        assert!(matches!(err, SnapshotError::SizeMismatch { expected: 24, actual: 10, .. }));
    }
}
