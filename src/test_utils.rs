//! Test utilities for matteops
//!
//! Shared fixture builders for the unit tests. Only compiled for
//! tests.

use image::{Luma, Rgba};

use crate::{Image, Mask};

/// Creates a 2x2 RGBA image with known pixel values:
/// - (0,0): [200, 150, 100, 255]
/// - (1,0): [100, 200, 150, 255]
/// - (0,1): [150, 100, 200, 255]
/// - (1,1): [50, 75, 25, 255]
pub fn create_test_rgba_image() -> Image<Rgba<u8>> {
    let mut image: Image<Rgba<u8>> = Image::new(2, 2);
    image.put_pixel(0, 0, Rgba([200, 150, 100, 255]));
    image.put_pixel(1, 0, Rgba([100, 200, 150, 255]));
    image.put_pixel(0, 1, Rgba([150, 100, 200, 255]));
    image.put_pixel(1, 1, Rgba([50, 75, 25, 255]));
    image
}

/// Creates a mask whose values ramp horizontally from 0 toward 255.
///
/// Gives resampling tests a non-trivial but smooth signal.
pub fn create_gradient_mask(width: u32, height: u32) -> Mask {
    Mask::from_fn(width, height, |x, _| {
        Luma([((x * 255) / width.max(1)) as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_test_rgba_image_has_expected_pixels() {
        let image = create_test_rgba_image();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(0, 0), &Rgba([200, 150, 100, 255]));
        assert_eq!(image.get_pixel(1, 1), &Rgba([50, 75, 25, 255]));
    }

    #[test]
    fn create_gradient_mask_ramps_left_to_right() {
        let mask = create_gradient_mask(4, 2);
        assert_eq!(mask.get_pixel(0, 0).0, [0]);
        assert!(mask.get_pixel(3, 0).0[0] > mask.get_pixel(1, 0).0[0]);
    }
}
