//! Frosted-glass panel background: blur, then darken with a translucent tint.

use crate::error::BlurError;
use crate::raster::{argb, channels, RasterImage};
use crate::scale::{blur_scaled, BlurOptions};

/// A translucent color laid over the blurred background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tint {
    pub alpha: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Tint {
    /// Translucent black, the default darkening layer.
    pub const fn shade(alpha: u8) -> Self {
        Self {
            alpha,
            red: 0,
            green: 0,
            blue: 0,
        }
    }

    /// Composite this tint over an opaque pixel (source-over).
    pub fn over(&self, pixel: u32) -> u32 {
        let [_, r, g, b] = channels(pixel);
        let a = u32::from(self.alpha);
        let mix = |under: u8, over: u8| -> u8 {
            ((u32::from(under) * (255 - a) + u32::from(over) * a + 127) / 255) as u8
        };
        argb(
            0xff,
            mix(r, self.red),
            mix(g, self.green),
            mix(b, self.blue),
        )
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self::shade(128)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrostOptions {
    pub blur: BlurOptions,
    pub tint: Tint,
}

/// Produce the panel background for a captured screen.
///
/// # Errors
///
/// Propagates [`BlurError::InvalidInput`] from the blur.
pub fn frost(image: &RasterImage, options: &FrostOptions) -> Result<RasterImage, BlurError> {
    let blurred = blur_scaled(image, &options.blur)?;
    let (width, height) = (blurred.width(), blurred.height());
    let pixels = blurred
        .into_pixels()
        .into_iter()
        .map(|p| options.tint.over(p))
        .collect();
    RasterImage::new(width, height, pixels)
}
