//! End-to-end tests for the background-removal pipeline
//!
//! Drives `remove_background` with synthetic probability buffers the
//! way the inference layer would, and checks the composited output
//! against known scenarios.

use image::{Luma, Rgb, Rgba};
use matteops::{
    dilate, feather, prepare_input, remove_background, BlendMode, FilterKernel, Image, Mask,
    PipelineConfig, PipelineError, MASK_EXTENT,
};

fn uniform_probabilities(value: f32) -> Vec<f32> {
    vec![value; (MASK_EXTENT * MASK_EXTENT) as usize]
}

/// Probability buffer with a centered foreground square covering the
/// given fraction of each axis.
fn centered_square_probabilities(fraction: f32) -> Vec<f32> {
    let extent = MASK_EXTENT as usize;
    let margin = ((1.0 - fraction) / 2.0 * extent as f32) as usize;
    let mut probs = vec![0.0f32; extent * extent];
    for y in margin..extent - margin {
        for x in margin..extent - margin {
            probs[y * extent + x] = 1.0;
        }
    }
    probs
}

fn red_background_config() -> PipelineConfig {
    PipelineConfig {
        background_color: Rgb([255, 0, 0]),
        ..PipelineConfig::default()
    }
}

#[test]
fn all_foreground_mask_returns_image_unchanged() {
    let image: Image<Rgba<u8>> = Image::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
    let config = PipelineConfig {
        // Blur quantization can shave a level off a saturated mask;
        // disable it so the comparison can be exact
        blur_sigma: 0.0,
        ..red_background_config()
    };

    let result = remove_background(&image, &uniform_probabilities(1.0), &config).unwrap();
    assert_eq!(result, image);
}

#[test]
fn all_background_mask_returns_solid_background() {
    let image: Image<Rgba<u8>> = Image::from_pixel(4, 4, Rgba([255, 255, 255, 255]));

    let result =
        remove_background(&image, &uniform_probabilities(0.0), &red_background_config()).unwrap();
    assert!(result.pixels().all(|p| p == &Rgba([255, 0, 0, 255])));
}

#[test]
fn centered_subject_keeps_center_and_fills_border() {
    let image: Image<Rgba<u8>> = Image::from_pixel(32, 32, Rgba([0, 0, 255, 255]));
    let config = red_background_config();

    let result =
        remove_background(&image, &centered_square_probabilities(0.5), &config).unwrap();

    // Deep interior of the subject survives within blur quantization
    let center = result.get_pixel(16, 16);
    for (channel, expected) in center.0.iter().zip([0u8, 0, 255, 255]) {
        assert!((i16::from(*channel) - i16::from(expected)).abs() <= 2);
    }
    // Corners are far outside the feather radius and become background
    assert_eq!(result.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
    assert_eq!(result.get_pixel(31, 31), &Rgba([255, 0, 0, 255]));
    // Everything is opaque
    assert!(result.pixels().all(|p| p.0[3] == 255));
}

#[test]
fn hard_cut_output_contains_no_blended_pixels() {
    let image: Image<Rgba<u8>> = Image::from_pixel(16, 16, Rgba([0, 200, 0, 255]));
    let config = PipelineConfig {
        blend_mode: BlendMode::HardCut(10),
        background_color: Rgb([255, 255, 255]),
        ..PipelineConfig::default()
    };

    let result =
        remove_background(&image, &centered_square_probabilities(0.5), &config).unwrap();

    // Every output pixel is either the subject or the background, never a mix
    for pixel in result.pixels() {
        assert!(
            pixel == &Rgba([0, 200, 0, 255]) || pixel == &Rgba([255, 255, 255, 255]),
            "unexpected blended pixel {:?}",
            pixel
        );
    }
}

#[test]
fn linear_blend_produces_soft_edges() {
    let image: Image<Rgba<u8>> = Image::from_pixel(32, 32, Rgba([0, 0, 0, 255]));
    let config = PipelineConfig {
        background_color: Rgb([255, 255, 255]),
        ..PipelineConfig::default()
    };

    let result =
        remove_background(&image, &centered_square_probabilities(0.5), &config).unwrap();

    // A black subject on white background must leave gray transition
    // pixels somewhere along the boundary
    let has_partial = result
        .pixels()
        .any(|p| p.0[0] > 0 && p.0[0] < 255);
    assert!(has_partial);
}

#[test]
fn single_foreground_pixel_feathers_outward_with_decay() {
    // 5x5 mask, one saturated pixel in the middle of partial alpha
    let mut mask = Mask::from_pixel(5, 5, Luma([128]));
    mask.put_pixel(2, 2, Luma([255]));

    let feathered = feather(&mask, 2).unwrap();

    // Strictly decreasing moving outward along the axis
    let center = feathered.get_pixel(2, 2).0[0];
    let near = feathered.get_pixel(3, 2).0[0];
    let far = feathered.get_pixel(4, 2).0[0];
    assert!(center > near && near > far);
    // Gone at Chebyshev distance >= 2 in the 4-neighbor metric
    assert_eq!(far, 0);
    assert_eq!(feathered.get_pixel(0, 0).0, [0]);
}

#[test]
fn zero_valued_surround_stays_zero_after_feathering() {
    // The ramp scales original alpha, so a 0 pixel can never gain value
    let mut mask = Mask::new(5, 5);
    mask.put_pixel(2, 2, Luma([255]));

    let feathered = feather(&mask, 2).unwrap();
    assert_eq!(feathered.get_pixel(2, 2).0, [255]);
    assert!(feathered
        .enumerate_pixels()
        .filter(|(x, y, _)| !(*x == 2 && *y == 2))
        .all(|(_, _, p)| p.0 == [0]));

    // Dilation first is what widens the matte in the real pipeline
    let widened = feather(&dilate(&mask, 1), 2).unwrap();
    assert_eq!(widened.get_pixel(1, 1).0, [255]);
}

#[test]
fn pipeline_rejects_invalid_config_before_touching_buffers() {
    let image: Image<Rgba<u8>> = Image::from_pixel(4, 4, Rgba([1, 2, 3, 255]));
    let config = PipelineConfig {
        feather_radius: 0,
        ..PipelineConfig::default()
    };

    // The probability buffer is malformed too; config is checked first
    let result = remove_background(&image, &[], &config);
    assert!(matches!(result, Err(PipelineError::InvalidConfig(_))));
}

#[test]
fn prepare_input_matches_mask_registration_logic() {
    let config = PipelineConfig {
        max_input_dimension: 10,
        ..PipelineConfig::default()
    };

    // 25x10 shrinks to 10x4: height = max_width / aspect, truncated
    let wide: Image<Rgba<u8>> = Image::from_pixel(25, 10, Rgba([7, 7, 7, 255]));
    let prepared = prepare_input(&wide, &config).unwrap();
    assert_eq!(prepared.dimensions(), (10, 4));

    let narrow: Image<Rgba<u8>> = Image::from_pixel(10, 30, Rgba([7, 7, 7, 255]));
    let untouched = prepare_input(&narrow, &config).unwrap();
    assert_eq!(untouched, narrow);
}

#[test]
fn requests_do_not_share_state() {
    // Two runs over the same inputs are bitwise identical, and the
    // inputs themselves are untouched
    let image: Image<Rgba<u8>> = Image::from_pixel(8, 8, Rgba([40, 80, 120, 255]));
    let original = image.clone();
    let probs = centered_square_probabilities(0.5);
    let config = red_background_config();

    let first = remove_background(&image, &probs, &config).unwrap();
    let second = remove_background(&image, &probs, &config).unwrap();

    assert_eq!(first, second);
    assert_eq!(image, original);
}

#[test]
fn mask_filter_is_configurable() {
    let image: Image<Rgba<u8>> = Image::from_pixel(16, 16, Rgba([0, 0, 0, 255]));
    let probs = centered_square_probabilities(0.5);

    for kernel in [FilterKernel::Bicubic, FilterKernel::Lanczos3] {
        let config = PipelineConfig {
            mask_filter: kernel,
            ..PipelineConfig::default()
        };
        let result = remove_background(&image, &probs, &config).unwrap();
        assert_eq!(result.dimensions(), (16, 16));
        assert!(result.pixels().all(|p| p.0[3] == 255));
    }
}
