//! QR decoding for uploaded or camera-captured images.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::GrayImage;

use tvlink_domain::code::{ActivationCode, extract_code};

#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("invalid base64 image data")]
    Base64(#[from] base64::DecodeError),
    #[error("unsupported or corrupt image: {0}")]
    Image(#[from] image::ImageError),
}

/// Decode a base64 image, with or without a `data:<mime>;base64,` prefix.
pub fn decode_data_url(data: &str) -> Result<Vec<u8>, QrError> {
    let payload = match data.split_once(',') {
        Some((_, rest)) => rest,
        None => data,
    };
    Ok(STANDARD.decode(payload.trim())?)
}

/// Find the first QR code in the image whose payload yields an activation code.
///
/// CPU bound; call from `spawn_blocking`.
pub fn decode(image_bytes: &[u8]) -> Result<Option<ActivationCode>, QrError> {
    let luma = image::load_from_memory(image_bytes)?.to_luma8();
    if let Some(code) = scan(&luma) {
        return Ok(Some(code));
    }
    Ok(scan(&stretch_contrast(&luma)))
}

/// `None` when no grid decodes to a payload containing a code.
fn scan(luma: &GrayImage) -> Option<ActivationCode> {
    let (width, height) = luma.dimensions();
    let mut prepared =
        rqrr::PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
            luma.get_pixel(x as u32, y as u32).0[0]
        });
    prepared
        .detect_grids()
        .into_iter()
        .filter_map(|grid| match grid.decode() {
            Ok((_, payload)) => Some(payload),
            Err(e) => {
                tracing::debug!(error = ?e, "skipping undecodable QR grid");
                None
            }
        })
        .find_map(|payload| extract_code(&payload))
}

/// Linear stretch of the luma range to 0..=255. Helps washed-out camera frames.
fn stretch_contrast(luma: &GrayImage) -> GrayImage {
    let (min, max) = luma
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p.0[0]), hi.max(p.0[0])));
    if max <= min {
        return luma.clone();
    }
    let range = u32::from(max - min);
    let mut out = luma.clone();
    for pixel in out.pixels_mut() {
        let v = u32::from(pixel.0[0] - min);
        pixel.0[0] = (v * 255 / range) as u8;
    }
    out
}
