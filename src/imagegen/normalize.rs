use std::io::Cursor;

use base64::{
    engine::general_purpose::STANDARD,
    Engine,
};
use image::{
    codecs::jpeg::JpegEncoder,
    imageops::FilterType,
};

use crate::core::CardsmithError;

pub const TARGET_SIZE: u32 = 512;
pub const JPEG_QUALITY: u8 = 80;

/// Decodes any supported format, crops and scales it to fill a
/// `TARGET_SIZE` square, and re-encodes it as JPEG.
pub fn normalize_image(bytes: &[u8]) -> Result<Vec<u8>, CardsmithError> {
    let img = image::load_from_memory(bytes)?;
    let resized = img.resize_to_fill(TARGET_SIZE, TARGET_SIZE, FilterType::Lanczos3).to_rgb8();

    let mut out = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    resized.write_with_encoder(encoder)?;

    Ok(out.into_inner())
}

pub fn normalize_to_base64(bytes: &[u8]) -> Result<String, CardsmithError> {
    Ok(STANDARD.encode(normalize_image(bytes)?))
}
