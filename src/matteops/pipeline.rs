use image::{Rgb, Rgba};

use crate::{
    error::PipelineError,
    matteops::{
        combine::combine,
        composite::{composite, BlendMode},
        feather::feather,
        mask::{binarize, mask_from_probabilities, MASK_EXTENT},
        morphology::dilate,
        resize::{shrink_to_width, FilterKernel, Resample},
        smooth::smooth_mask,
    },
    Image,
};

/// Configuration for the background-removal pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Widest input the caller wants to feed the segmentation model;
    /// [`prepare_input`] shrinks anything wider, preserving aspect ratio
    pub max_input_dimension: u32,
    /// Gaussian sigma applied to the upscaled mask; 0 disables the blur
    pub blur_sigma: f32,
    /// Dilation radius in pixels applied before feathering
    pub dilate_radius: u32,
    /// Feather falloff radius in pixels, at least 1
    pub feather_radius: u32,
    /// Mask value at or above which the interior is protected from
    /// softening when the feathered mask is merged back in
    pub interior_alpha_threshold: u8,
    /// Flat color the subject is composited onto
    pub background_color: Rgb<u8>,
    /// Soft linear blend or binary hard cut
    pub blend_mode: BlendMode,
    /// Kernel used to upscale the model mask to the photo's resolution
    pub mask_filter: FilterKernel,
    /// Normalized threshold used to binarize the mask on the hard-cut
    /// path; ignored for linear blending
    pub hard_cut_binarize_threshold: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_input_dimension: 1920,
            blur_sigma: 2.0,
            dilate_radius: 1,
            feather_radius: 2,
            interior_alpha_threshold: 200,
            background_color: Rgb([255, 255, 255]),
            blend_mode: BlendMode::Linear,
            mask_filter: FilterKernel::Lanczos3,
            hard_cut_binarize_threshold: 0.6,
        }
    }
}

impl PipelineConfig {
    /// Checks the configuration for values no stage can honor
    ///
    /// # Errors
    ///
    /// * `PipelineError::InvalidConfig` - Zero feather radius, zero maximum
    ///   input dimension, non-finite or negative blur sigma, or a hard-cut
    ///   binarize threshold outside [0, 1]
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.feather_radius == 0 {
            return Err(PipelineError::InvalidConfig(
                "feather_radius must be greater than zero".to_string(),
            ));
        }
        if self.max_input_dimension == 0 {
            return Err(PipelineError::InvalidConfig(
                "max_input_dimension must be greater than zero".to_string(),
            ));
        }
        if !self.blur_sigma.is_finite() || self.blur_sigma < 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "blur_sigma must be finite and non-negative, got {}",
                self.blur_sigma
            )));
        }
        if !self.hard_cut_binarize_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.hard_cut_binarize_threshold)
        {
            return Err(PipelineError::InvalidConfig(format!(
                "hard_cut_binarize_threshold must be within [0, 1], got {}",
                self.hard_cut_binarize_threshold
            )));
        }
        Ok(())
    }
}

/// Removes the background from a photograph given raw model output
///
/// `probabilities` is the segmentation model's saliency map: a
/// row-major `MASK_EXTENT * MASK_EXTENT` buffer of normalized [0, 1]
/// values, registered 1:1 with a resized copy of `image`. The stages
/// run in a fixed order, each consuming the previous stage's output:
///
/// quantize -> upscale to photo resolution -> gaussian smooth ->
/// (hard-cut only: binarize) -> dilate -> feather -> combine ->
/// composite onto the background color.
///
/// The first stage failure aborts the whole request; there is no
/// partial output and no internal retry.
///
/// Every buffer is request-scoped and independently owned, so the
/// pipeline is safe to run from any number of threads at once. The
/// expensive shared resource is the inference session that produced
/// `probabilities`; serializing or pooling access to it is the
/// caller's responsibility, not this function's.
///
/// # Errors
///
/// * `PipelineError::InvalidConfig` - Configuration rejected by
///   [`PipelineConfig::validate`]
/// * `PipelineError::Mask` - Malformed probability buffer
/// * `PipelineError::Resize` - Empty input image
/// * `PipelineError::Feather` / `PipelineError::Composite` - Propagated
///   stage failures
pub fn remove_background(
    image: &Image<Rgba<u8>>,
    probabilities: &[f32],
    config: &PipelineConfig,
) -> Result<Image<Rgba<u8>>, PipelineError> {
    config.validate()?;

    let (width, height) = image.dimensions();

    let raw = mask_from_probabilities(probabilities, MASK_EXTENT, MASK_EXTENT)?;
    let upscaled = raw.resize_with(width, height, config.mask_filter)?;
    let mut smoothed = smooth_mask(&upscaled, config.blur_sigma);

    if matches!(config.blend_mode, BlendMode::HardCut(_)) {
        binarize(&mut smoothed, config.hard_cut_binarize_threshold);
    }

    let dilated = dilate(&smoothed, config.dilate_radius);
    let feathered = feather(&dilated, config.feather_radius)?;
    let combined = combine(&dilated, &feathered, config.interior_alpha_threshold)?;

    let result = composite(image, &combined, config.background_color, config.blend_mode)?;
    Ok(result)
}

/// Shrinks an oversized photo before it is sent to the inference engine
///
/// Photos wider than `config.max_input_dimension` are downscaled with
/// the bicubic kernel, preserving aspect ratio; anything narrower
/// passes through unchanged. The mask that comes back is later
/// upscaled with the same aspect logic, keeping the two grids
/// registered.
///
/// # Errors
///
/// * `PipelineError::InvalidConfig` - Configuration rejected by
///   [`PipelineConfig::validate`]
/// * `PipelineError::Resize` - Empty input image
pub fn prepare_input(
    image: &Image<Rgba<u8>>,
    config: &PipelineConfig,
) -> Result<Image<Rgba<u8>>, PipelineError> {
    config.validate()?;
    let prepared = shrink_to_width(image, config.max_input_dimension, FilterKernel::Bicubic)?;
    Ok(prepared)
}
