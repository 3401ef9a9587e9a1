//! Card image decoding for the UI texture cache.

use image::GenericImageView;

const MAX_CARD_IMAGE_DIMENSION: f32 = 400.0;

/// RGBA pixels ready for texture upload.
pub struct DecodedImage {
    pub rgba: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

/// Decodes downloaded image bytes and downscales them to card size.
pub fn decode_card_image(bytes: &[u8]) -> Result<DecodedImage, String> {
    let decoded =
        image::load_from_memory(bytes).map_err(|err| format!("image decode failed: {err}"))?;

    let (orig_w, orig_h) = decoded.dimensions();
    let scale = (MAX_CARD_IMAGE_DIMENSION / (orig_w.max(orig_h) as f32)).min(1.0);
    let resized = if scale < 1.0 {
        decoded.resize(
            (orig_w as f32 * scale).max(1.0) as u32,
            (orig_h as f32 * scale).max(1.0) as u32,
            image::imageops::FilterType::Triangle,
        )
    } else {
        decoded
    };

    let rgba = resized.to_rgba8();
    Ok(DecodedImage {
        width: rgba.width() as usize,
        height: rgba.height() as usize,
        rgba: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let buffer = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 180, 140, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(buffer)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("encode");
        bytes
    }

    #[test]
    fn decodes_small_images_at_native_size() {
        let decoded = decode_card_image(&png_bytes(64, 48)).expect("decode");
        assert_eq!((decoded.width, decoded.height), (64, 48));
        assert_eq!(decoded.rgba.len(), 64 * 48 * 4);
    }

    #[test]
    fn downscales_oversized_images_to_card_bounds() {
        let decoded = decode_card_image(&png_bytes(800, 400)).expect("decode");
        assert_eq!(decoded.width, 400);
        assert!(decoded.height <= 200);
    }

    #[test]
    fn garbage_bytes_fail_without_panicking() {
        assert!(decode_card_image(b"definitely not an image").is_err());
    }
}
