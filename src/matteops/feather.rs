use image::Luma;

use crate::{error::FeatherError, Mask};

/// Feathers a mask boundary into a gradual alpha ramp
///
/// Computes a two-pass chamfer distance transform from the fully
/// foreground pixels (value 255) and scales every partial pixel by a
/// linear falloff over `feather_radius`:
///
/// 1. Cells at 255 start at distance 0, all others at infinity.
/// 2. Forward pass (top-left to bottom-right) relaxes against the left
///    and upper neighbors; the backward pass relaxes against the right
///    and lower neighbors. The result is the 4-neighbor Manhattan
///    approximation of Euclidean distance, anisotropic but cheap and
///    adequate for soft edge ramps.
/// 3. Each cell's alpha factor is `clamp((r - d) / r, 0, 1)`; interior
///    pixels (value 255) are preserved unchanged, every other pixel is
///    `round(value * factor)`.
///
/// The output is a strict softening of the input: no cell gains alpha,
/// and cells farther than `feather_radius` from any foreground pixel
/// fall to 0.
///
/// # Arguments
///
/// * `mask` - The mask to feather
/// * `feather_radius` - Falloff radius in pixels, at least 1
///
/// # Errors
///
/// * `FeatherError::ZeroRadius` - When `feather_radius` is 0
/// * `FeatherError::NonFiniteDistance` - When the alpha factor is NaN; impossible
///   with well-formed inputs and reported as a defect rather than masked
pub fn feather(mask: &Mask, feather_radius: u32) -> Result<Mask, FeatherError> {
    if feather_radius == 0 {
        return Err(FeatherError::ZeroRadius);
    }

    let (width, height) = mask.dimensions();
    let (w, h) = (width as usize, height as usize);

    let mut distances = vec![f32::INFINITY; w * h];
    for (index, pixel) in mask.pixels().enumerate() {
        if pixel.0[0] == 255 {
            distances[index] = 0.0;
        }
    }

    // Forward pass: relax against the left and upper neighbors
    for y in 0..h {
        for x in 0..w {
            let index = y * w + x;
            if x > 0 {
                distances[index] = distances[index].min(distances[index - 1] + 1.0);
            }
            if y > 0 {
                distances[index] = distances[index].min(distances[index - w] + 1.0);
            }
        }
    }

    // Backward pass: relax against the right and lower neighbors
    for y in (0..h).rev() {
        for x in (0..w).rev() {
            let index = y * w + x;
            if x + 1 < w {
                distances[index] = distances[index].min(distances[index + 1] + 1.0);
            }
            if y + 1 < h {
                distances[index] = distances[index].min(distances[index + w] + 1.0);
            }
        }
    }

    let radius = feather_radius as f32;
    let mut feathered = mask.clone();
    for (x, y, pixel) in feathered.enumerate_pixels_mut() {
        let Luma([value]) = *pixel;
        if value == 255 {
            continue;
        }

        let factor = ((radius - distances[y as usize * w + x as usize]) / radius).clamp(0.0, 1.0);
        if !factor.is_finite() {
            return Err(FeatherError::NonFiniteDistance { x, y });
        }
        *pixel = Luma([(f32::from(value) * factor).round() as u8]);
    }

    Ok(feathered)
}
