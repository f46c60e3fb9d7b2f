use image::{Luma, Rgb, Rgba};
use imageproc::map::map_colors2;

use crate::{error::CompositeError, utils::validate_matching_dimensions, Image, Mask};

/// How the subject is blended against the background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Weighted blend of subject and background per channel; soft mask
    /// edges become smooth color transitions baked into the RGB output
    Linear,
    /// Binary decision per pixel: keep the subject when the mask alpha
    /// exceeds the cutoff, otherwise paint flat background. Only
    /// sensible on a mask that was binarized upstream
    HardCut(u8),
}

/// Composites an image onto a solid background color through a mask
///
/// The mask supplies per-pixel alpha. Linear blending computes
/// `round((subject * a + background * (255 - a)) / 255)` per channel;
/// hard-cut keeps the subject pixel untouched when `a` exceeds the
/// cutoff and replaces it wholly otherwise. In both modes the output
/// alpha channel is forced to 255: the result is an opaque,
/// background-filled photograph, not a transparent cutout.
///
/// # Errors
///
/// * `CompositeError::DimensionMismatch` - When image and mask differ in
///   size; the caller is expected to align them, mismatches are never
///   silently resized
pub fn composite(
    image: &Image<Rgba<u8>>,
    mask: &Mask,
    background: Rgb<u8>,
    mode: BlendMode,
) -> Result<Image<Rgba<u8>>, CompositeError> {
    let (image_width, image_height) = image.dimensions();
    let (mask_width, mask_height) = mask.dimensions();

    validate_matching_dimensions(
        image_width,
        image_height,
        mask_width,
        mask_height,
        "composite",
    )
    .map_err(|_| CompositeError::DimensionMismatch {
        expected: (image_width, image_height),
        actual: (mask_width, mask_height),
    })?;

    let Rgb([bg_red, bg_green, bg_blue]) = background;

    let result = match mode {
        BlendMode::Linear => map_colors2(image, mask, |Rgba([red, green, blue, _]), Luma([alpha])| {
            Rgba([
                blend_channel(red, bg_red, alpha),
                blend_channel(green, bg_green, alpha),
                blend_channel(blue, bg_blue, alpha),
                255,
            ])
        }),
        BlendMode::HardCut(cutoff) => {
            map_colors2(image, mask, |Rgba([red, green, blue, _]), Luma([alpha])| {
                if alpha > cutoff {
                    Rgba([red, green, blue, 255])
                } else {
                    Rgba([bg_red, bg_green, bg_blue, 255])
                }
            })
        }
    };

    Ok(result)
}

/// Rounded integer blend of one channel against the background.
#[inline]
fn blend_channel(foreground: u8, background: u8, alpha: u8) -> u8 {
    let weighted = u32::from(foreground) * u32::from(alpha)
        + u32::from(background) * u32::from(255 - alpha);
    ((weighted + 127) / 255) as u8
}
