//! Downscale-before-blur path for large surfaces.

use image::imageops::{self, FilterType};

use crate::error::BlurError;
use crate::raster::RasterImage;
use crate::stack::stack_blur;

/// Default radius used for the panel background.
pub const DEFAULT_RADIUS: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurOptions {
    /// Stack blur radius, applied at the working resolution.
    pub radius: u32,
    /// Working resolution relative to the source, in `(0, 1]`.
    pub scale: f32,
}

impl Default for BlurOptions {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            scale: 1.0,
        }
    }
}

impl BlurOptions {
    pub fn new(radius: u32) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

fn scaled_dimension(dimension: u32, scale: f32) -> u32 {
    ((dimension as f32 * scale).round() as u32).max(1)
}

/// Blur `image`, optionally at a reduced working resolution.
///
/// With `scale < 1` the image is shrunk, stack-blurred with the configured
/// radius and resized back to its original dimensions. The radius is not
/// rescaled, so a smaller working resolution also widens the effective blur.
///
/// # Errors
///
/// Returns [`BlurError::InvalidInput`] for a zero-area image, a scale outside
/// `(0, 1]`, or a radius the stack blur rejects.
pub fn blur_scaled(image: &RasterImage, options: &BlurOptions) -> Result<RasterImage, BlurError> {
    if !(options.scale > 0.0 && options.scale <= 1.0) {
        return Err(BlurError::InvalidInput(format!(
            "scale must be in (0, 1], got {}",
            options.scale
        )));
    }
    if options.scale == 1.0 || options.radius == 0 || image.is_empty() {
        return stack_blur(image, options.radius);
    }

    let (width, height) = (image.width(), image.height());
    let small_width = scaled_dimension(width, options.scale);
    let small_height = scaled_dimension(height, options.scale);
    tracing::debug!(
        width,
        height,
        small_width,
        small_height,
        "Downscaling before blur"
    );

    let small = imageops::resize(&image.to_rgba(), small_width, small_height, FilterType::Triangle);
    let blurred = stack_blur(&RasterImage::from_rgba(&small), options.radius)?;
    let restored = imageops::resize(&blurred.to_rgba(), width, height, FilterType::Triangle);

    Ok(RasterImage::from_rgba(&restored))
}
