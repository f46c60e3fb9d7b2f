mod error;
mod matteops;
mod utils;

#[cfg(test)]
mod test_utils;

use image::{ImageBuffer, Luma, Pixel};

pub use error::{CompositeError, FeatherError, MaskError, PipelineError, ResizeError};
pub use matteops::combine::combine;
pub use matteops::composite::{composite, BlendMode};
pub use matteops::feather::feather;
pub use matteops::mask::{binarize, mask_from_probabilities, MASK_EXTENT};
pub use matteops::morphology::{dilate, erode};
pub use matteops::pipeline::{prepare_input, remove_background, PipelineConfig};
pub use matteops::resize::{shrink_to_width, FilterKernel, Resample};
pub use matteops::smooth::{smooth_mask, soften_partial_alpha};

pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;

/// Single-channel 8-bit alpha matte. 255 is fully foreground, 0 fully background.
pub type Mask = Image<Luma<u8>>;
