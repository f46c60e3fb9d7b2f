use image::Luma;
use imageproc::filter::gaussian_blur_f32;

use crate::Mask;

/// Gaussian-blurs a mask to soften abrupt boundaries
///
/// Applied to the upscaled mask before morphology so that staircase
/// artifacts from resampling do not survive into the feathered edge.
/// A sigma of zero or below is a no-op copy.
pub fn smooth_mask(mask: &Mask, sigma: f32) -> Mask {
    if sigma <= 0.0 {
        return mask.clone();
    }
    gaussian_blur_f32(mask, sigma)
}

/// Scales strictly-partial alpha values by a constant factor
///
/// Pixels that are fully foreground (255) or fully background (0) are
/// untouched; everything in between is multiplied by `factor`. This is
/// an alternative edge treatment to distance feathering, kept as a
/// configuration point rather than a parallel pipeline.
pub fn soften_partial_alpha(mask: &Mask, factor: f32) -> Mask {
    let factor = factor.clamp(0.0, 1.0);
    let mut softened = mask.clone();
    for Luma([value]) in softened.pixels_mut() {
        if *value > 0 && *value < 255 {
            *value = (f32::from(*value) * factor) as u8;
        }
    }
    softened
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smooth_mask_zero_sigma_is_identity() {
        let mut mask = Mask::new(4, 4);
        mask.put_pixel(1, 1, Luma([255]));
        assert_eq!(smooth_mask(&mask, 0.0), mask);
        assert_eq!(smooth_mask(&mask, -1.0), mask);
    }

    #[test]
    fn smooth_mask_spreads_energy_to_neighbors() {
        let mut mask = Mask::new(5, 5);
        mask.put_pixel(2, 2, Luma([255]));

        let smoothed = smooth_mask(&mask, 1.0);
        assert!(smoothed.get_pixel(2, 2).0[0] < 255);
        assert!(smoothed.get_pixel(1, 2).0[0] > 0);
        assert!(smoothed.get_pixel(2, 1).0[0] > 0);
    }

    #[test]
    fn soften_partial_alpha_skips_extremes() {
        let mut mask = Mask::new(3, 1);
        mask.put_pixel(0, 0, Luma([0]));
        mask.put_pixel(1, 0, Luma([100]));
        mask.put_pixel(2, 0, Luma([255]));

        let softened = soften_partial_alpha(&mask, 0.9);
        assert_eq!(softened.get_pixel(0, 0).0, [0]);
        assert_eq!(softened.get_pixel(1, 0).0, [90]);
        assert_eq!(softened.get_pixel(2, 0).0, [255]);
    }
}
