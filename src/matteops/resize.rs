use image::{ImageBuffer, Pixel, Primitive};
use imageproc::definitions::Clamp;

use crate::{error::ResizeError, Image};

/// Separable interpolation kernel used by [`Resample`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKernel {
    /// Catmull-Rom bicubic kernel (support 2)
    Bicubic,
    /// Lanczos windowed-sinc kernel with a = 3 (support 3)
    Lanczos3,
}

impl FilterKernel {
    const fn support(self) -> f32 {
        match self {
            Self::Bicubic => 2.0,
            Self::Lanczos3 => 3.0,
        }
    }

    fn eval(self, x: f32) -> f32 {
        match self {
            Self::Bicubic => catmull_rom(x),
            Self::Lanczos3 => lanczos3(x),
        }
    }
}

fn catmull_rom(x: f32) -> f32 {
    let x = x.abs();
    if x < 1.0 {
        (1.5 * x - 2.5) * x * x + 1.0
    } else if x < 2.0 {
        ((-0.5 * x + 2.5) * x - 4.0) * x + 2.0
    } else {
        0.0
    }
}

fn lanczos3(x: f32) -> f32 {
    let x = x.abs();
    if x < 3.0 {
        sinc(x) * sinc(x / 3.0)
    } else {
        0.0
    }
}

fn sinc(x: f32) -> f32 {
    if x.abs() < 1e-8 {
        1.0
    } else {
        let t = std::f32::consts::PI * x;
        t.sin() / t
    }
}

/// Weighted source window contributing to one destination coordinate.
struct SampleWindow {
    first: u32,
    weights: Vec<f32>,
}

/// Computes the per-destination-coordinate weight table for one axis.
///
/// The kernel is stretched by `max(scale, 1)` so that downscaling
/// averages over the full source footprint instead of point-sampling.
/// Windows clipped at the image border are renormalized, which keeps
/// edge output within the intensity range of the contributing pixels.
fn compute_sample_windows(src_size: u32, dst_size: u32, kernel: FilterKernel) -> Vec<SampleWindow> {
    let scale = src_size as f32 / dst_size as f32;
    let filter_scale = scale.max(1.0);
    let support = kernel.support() * filter_scale;

    let mut windows = Vec::with_capacity(dst_size as usize);
    for d in 0..dst_size {
        let center = (d as f32 + 0.5) * scale;
        let left = ((center - support).floor() as i64).max(0) as u32;
        let right = ((center + support).ceil() as i64).min(src_size as i64) as u32;

        let mut weights = Vec::with_capacity((right - left) as usize);
        let mut sum = 0.0;
        for s in left..right {
            let weight = kernel.eval((s as f32 + 0.5 - center) / filter_scale);
            weights.push(weight);
            sum += weight;
        }

        if sum.abs() > f32::EPSILON {
            for weight in &mut weights {
                *weight /= sum;
            }
        }

        windows.push(SampleWindow {
            first: left,
            weights,
        });
    }

    windows
}

fn resize_impl<P>(src: &Image<P>, dst_width: u32, dst_height: u32, kernel: FilterKernel) -> Image<P>
where
    P: Pixel,
    P::Subpixel: Primitive + Into<f32> + Clamp<f32>,
{
    let (src_width, src_height) = src.dimensions();
    let channels = P::CHANNEL_COUNT as usize;
    let x_windows = compute_sample_windows(src_width, dst_width, kernel);
    let y_windows = compute_sample_windows(src_height, dst_height, kernel);

    // Horizontal pass into an f32 intermediate, one row per source row
    let mut mid = vec![0.0f32; dst_width as usize * src_height as usize * channels];
    for y in 0..src_height {
        for (dx, window) in x_windows.iter().enumerate() {
            let base = (y as usize * dst_width as usize + dx) * channels;
            for (k, &weight) in window.weights.iter().enumerate() {
                let pixel = src.get_pixel(window.first + k as u32, y);
                for (c, subpixel) in pixel.channels().iter().enumerate() {
                    mid[base + c] += (*subpixel).into() * weight;
                }
            }
        }
    }

    // Vertical pass out of the intermediate, clamped to the subpixel range
    let mut output = ImageBuffer::new(dst_width, dst_height);
    let mut accumulator = vec![0.0f32; channels];
    for (dy, window) in y_windows.iter().enumerate() {
        for dx in 0..dst_width as usize {
            accumulator.fill(0.0);
            for (k, &weight) in window.weights.iter().enumerate() {
                let row = window.first as usize + k;
                let base = (row * dst_width as usize + dx) * channels;
                for (c, value) in accumulator.iter_mut().enumerate() {
                    *value += mid[base + c] * weight;
                }
            }

            let mut subpixels = vec![P::Subpixel::DEFAULT_MIN_VALUE; channels];
            for c in 0..channels {
                // Clamp truncates on cast, so round first
                subpixels[c] = P::Subpixel::clamp(accumulator[c].round());
            }
            output.put_pixel(dx as u32, dy as u32, *P::from_slice(&subpixels));
        }
    }

    output
}

/// Extension trait providing kernel-selectable resampling
///
/// Both kernels are separable: each output pixel is a weighted sum of
/// source pixels along one axis at a time, with the horizontal pass
/// held in floating point until the vertical pass writes it out.
pub trait Resample {
    type Output;

    /// Resizes the buffer to the target dimensions with the given kernel
    ///
    /// # Arguments
    ///
    /// * `width` - Target width, at least 1
    /// * `height` - Target height, at least 1
    /// * `kernel` - Interpolation kernel
    ///
    /// # Errors
    ///
    /// * `ResizeError::InvalidTargetDimensions` - When either target dimension is zero
    /// * `ResizeError::EmptyImage` - When the source has a zero-sized dimension
    fn resize_with(
        &self,
        width: u32,
        height: u32,
        kernel: FilterKernel,
    ) -> Result<Self::Output, ResizeError>;
}

impl<P> Resample for Image<P>
where
    P: Pixel,
    P::Subpixel: Primitive + Into<f32> + Clamp<f32>,
{
    type Output = Image<P>;

    fn resize_with(
        &self,
        width: u32,
        height: u32,
        kernel: FilterKernel,
    ) -> Result<Self::Output, ResizeError> {
        if width == 0 || height == 0 {
            return Err(ResizeError::InvalidTargetDimensions { width, height });
        }

        let (src_width, src_height) = self.dimensions();
        if src_width == 0 || src_height == 0 {
            return Err(ResizeError::EmptyImage {
                width: src_width,
                height: src_height,
            });
        }

        Ok(resize_impl(self, width, height, kernel))
    }
}

/// Shrinks an image to a maximum width, preserving aspect ratio
///
/// Images at or below `max_width` are returned unchanged. The new
/// height is `max_width / aspect_ratio`, truncated, with a floor of
/// one pixel. This mirrors the pre-inference shrink applied to
/// oversized photos before they are handed to the segmentation model.
///
/// # Errors
///
/// * `ResizeError::InvalidTargetDimensions` - When `max_width` is zero
/// * `ResizeError::EmptyImage` - When the source has a zero-sized dimension
pub fn shrink_to_width<P>(
    image: &Image<P>,
    max_width: u32,
    kernel: FilterKernel,
) -> Result<Image<P>, ResizeError>
where
    P: Pixel,
    P::Subpixel: Primitive + Into<f32> + Clamp<f32>,
{
    if max_width == 0 {
        return Err(ResizeError::InvalidTargetDimensions {
            width: max_width,
            height: 0,
        });
    }

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ResizeError::EmptyImage { width, height });
    }

    if width <= max_width {
        return Ok(image.clone());
    }

    let aspect_ratio = width as f32 / height as f32;
    let new_height = ((max_width as f32 / aspect_ratio) as u32).max(1);
    image.resize_with(max_width, new_height, kernel)
}
