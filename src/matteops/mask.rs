use image::Luma;

use crate::{error::MaskError, utils::validate_non_empty_image, Mask};

/// Side length of the segmentation model's output grid.
///
/// U2-Net style models emit a single-channel saliency map at a fixed
/// 320x320 resolution regardless of the input image's size.
pub const MASK_EXTENT: u32 = 320;

/// Converts a raw probability buffer into an 8-bit alpha mask
///
/// The buffer is expected row-major with `width * height` entries,
/// each a normalized probability in [0, 1]. Values are clamped to that
/// range before quantization, so mild numerical overshoot from the
/// model is tolerated; NaN or infinite values are rejected.
///
/// # Arguments
///
/// * `probabilities` - Row-major probability buffer in [0, 1]
/// * `width` - Width of the probability grid
/// * `height` - Height of the probability grid
///
/// # Errors
///
/// * `MaskError::EmptyDimensions` - When either dimension is zero
/// * `MaskError::LengthMismatch` - When the buffer length does not match the dimensions
/// * `MaskError::NonFiniteProbability` - When a value is NaN or infinite
///
/// # Examples
///
/// ```
/// use matteops::mask_from_probabilities;
///
/// let probs = vec![0.0, 0.5, 1.0, 0.25];
/// let mask = mask_from_probabilities(&probs, 2, 2).unwrap();
/// assert_eq!(mask.get_pixel(0, 0).0, [0]);
/// assert_eq!(mask.get_pixel(0, 1).0, [255]);
/// ```
pub fn mask_from_probabilities(
    probabilities: &[f32],
    width: u32,
    height: u32,
) -> Result<Mask, MaskError> {
    validate_non_empty_image(width, height, "mask_from_probabilities")
        .map_err(|_| MaskError::EmptyDimensions { width, height })?;

    let expected = width as usize * height as usize;
    if probabilities.len() != expected {
        return Err(MaskError::LengthMismatch {
            width,
            height,
            actual: probabilities.len(),
        });
    }

    if let Some(index) = probabilities.iter().position(|p| !p.is_finite()) {
        return Err(MaskError::NonFiniteProbability { index });
    }

    let mut mask = Mask::new(width, height);
    for (pixel, probability) in mask.pixels_mut().zip(probabilities) {
        *pixel = Luma([(probability.clamp(0.0, 1.0) * 255.0).round() as u8]);
    }

    Ok(mask)
}

/// Binarizes a mask in place against a normalized threshold
///
/// Pixels at or above `threshold * 255` become 255, all others 0. Used
/// by the hard-cut blend path, which expects a mask with no partial
/// alpha left in it.
///
/// # Arguments
///
/// * `mask` - The mask to binarize
/// * `threshold` - Normalized cutoff in [0, 1]; values outside are clamped
pub fn binarize(mask: &mut Mask, threshold: f32) {
    let cutoff = (threshold.clamp(0.0, 1.0) * 255.0) as u8;
    for Luma([value]) in mask.pixels_mut() {
        *value = if *value >= cutoff { 255 } else { 0 };
    }
}
