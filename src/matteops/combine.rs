use image::Luma;
use imageproc::map::map_colors2;

use crate::{error::MaskError, utils::validate_matching_dimensions, Mask};

/// Merges a base mask with its feathered variant
///
/// Per cell: when the base mask is at or above `interior_threshold`
/// the base value is kept untouched, protecting the solid interior
/// from any softening artifact. Below the threshold the output is
/// `max(base, feathered)`, so the feathered ramp can only brighten an
/// edge pixel, never darken it.
///
/// Pure and deterministic: the same inputs always produce the same
/// output.
///
/// # Errors
///
/// * `MaskError::DimensionMismatch` - When the masks differ in size
///
/// # Examples
///
/// ```
/// use image::Luma;
/// use matteops::{combine, Mask};
///
/// let base = Mask::from_pixel(2, 2, Luma([230]));
/// let feathered = Mask::from_pixel(2, 2, Luma([10]));
///
/// // Every base cell is interior, so the feathered mask is ignored
/// let combined = combine(&base, &feathered, 200).unwrap();
/// assert_eq!(combined, base);
/// ```
pub fn combine(
    base: &Mask,
    feathered: &Mask,
    interior_threshold: u8,
) -> Result<Mask, MaskError> {
    let (base_width, base_height) = base.dimensions();
    let (feathered_width, feathered_height) = feathered.dimensions();

    validate_matching_dimensions(
        base_width,
        base_height,
        feathered_width,
        feathered_height,
        "combine",
    )
    .map_err(|_| MaskError::DimensionMismatch {
        expected: (base_width, base_height),
        actual: (feathered_width, feathered_height),
    })?;

    let combined = map_colors2(base, feathered, |Luma([base]), Luma([feathered])| {
        if base >= interior_threshold {
            Luma([base])
        } else {
            Luma([base.max(feathered)])
        }
    });

    Ok(combined)
}
