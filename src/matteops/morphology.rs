use itertools::iproduct;

use crate::Mask;

/// Dilates a mask by a pixel radius
///
/// A pixel becomes 255 when any pixel of the input within Chebyshev
/// distance `radius` (a square `(2r+1)^2` neighborhood, clipped at the
/// borders) is 255; all other pixels keep their input value. The input
/// is read as an immutable snapshot, so already-dilated pixels never
/// feed back into the scan. Radius 0 returns an unmodified copy.
///
/// Runtime is O(width * height * radius^2). Radii used by the pipeline
/// are small (1-2), but this is the hot path if a caller exposes the
/// radius to user input.
pub fn dilate(mask: &Mask, radius: u32) -> Mask {
    if radius == 0 {
        return mask.clone();
    }

    let (width, height) = mask.dimensions();
    Mask::from_fn(width, height, |x, y| {
        if any_neighbor_equals(mask, x, y, radius, 255) {
            image::Luma([255])
        } else {
            *mask.get_pixel(x, y)
        }
    })
}

/// Erodes a mask by a pixel radius
///
/// The dual of [`dilate`]: a pixel becomes 0 when any input pixel in
/// the same clipped square neighborhood is 0. Radius 0 returns an
/// unmodified copy.
pub fn erode(mask: &Mask, radius: u32) -> Mask {
    if radius == 0 {
        return mask.clone();
    }

    let (width, height) = mask.dimensions();
    Mask::from_fn(width, height, |x, y| {
        if any_neighbor_equals(mask, x, y, radius, 0) {
            image::Luma([0])
        } else {
            *mask.get_pixel(x, y)
        }
    })
}

/// Scans the clipped square neighborhood around (x, y) for `value`.
///
/// Border pixels use only in-bounds neighbors; there is no wraparound
/// and no virtual padding value.
fn any_neighbor_equals(mask: &Mask, x: u32, y: u32, radius: u32, value: u8) -> bool {
    let (width, height) = mask.dimensions();
    let x_min = x.saturating_sub(radius);
    let y_min = y.saturating_sub(radius);
    let x_max = x.saturating_add(radius).min(width - 1);
    let y_max = y.saturating_add(radius).min(height - 1);

    iproduct!(y_min..=y_max, x_min..=x_max).any(|(ny, nx)| mask.get_pixel(nx, ny).0[0] == value)
}
