//! Packed-ARGB raster images.

use image::{Rgba, RgbaImage};

use crate::error::BlurError;

/// Pack four 8-bit channels into a `0xAARRGGBB` pixel.
pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Split a `0xAARRGGBB` pixel into `[a, r, g, b]`.
pub const fn channels(pixel: u32) -> [u8; 4] {
    [
        (pixel >> 24) as u8,
        (pixel >> 16) as u8,
        (pixel >> 8) as u8,
        pixel as u8,
    ]
}

/// A row-major grid of `0xAARRGGBB` pixels.
///
/// The pixel buffer always holds exactly `width * height` entries. Zero-area
/// images are representable; the blur rejects them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl RasterImage {
    /// Wrap an existing pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`BlurError::InvalidInput`] when the buffer length does not
    /// match `width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self, BlurError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| BlurError::InvalidInput(format!("{}x{} overflows", width, height)))?;
        if pixels.len() != expected {
            return Err(BlurError::InvalidInput(format!(
                "expected {} pixels for {}x{}, got {}",
                expected,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// An image where every pixel has the same value.
    pub fn filled(width: u32, height: u32, pixel: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u32> {
        self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Convert from an `image` RGBA buffer.
    pub fn from_rgba(img: &RgbaImage) -> Self {
        let pixels = img
            .pixels()
            .map(|Rgba([r, g, b, a])| argb(*a, *r, *g, *b))
            .collect();
        Self {
            width: img.width(),
            height: img.height(),
            pixels,
        }
    }

    /// Convert into an `image` RGBA buffer.
    pub fn to_rgba(&self) -> RgbaImage {
        let width = self.width as usize;
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let [a, r, g, b] = channels(self.pixels[y as usize * width + x as usize]);
            Rgba([r, g, b, a])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_packing() {
        let p = argb(0x80, 0x11, 0x22, 0x33);
        assert_eq!(p, 0x8011_2233);
        assert_eq!(channels(p), [0x80, 0x11, 0x22, 0x33]);
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let result = RasterImage::new(2, 2, vec![0; 3]);
        assert!(matches!(result, Err(BlurError::InvalidInput(_))));
    }

    #[test]
    fn test_new_accepts_zero_area() {
        let img = RasterImage::new(0, 5, Vec::new()).unwrap();
        assert!(img.is_empty());
    }

    #[test]
    fn test_pixel_bounds() {
        let img = RasterImage::new(2, 1, vec![1, 2]).unwrap();
        assert_eq!(img.pixel(1, 0), Some(2));
        assert_eq!(img.pixel(2, 0), None);
        assert_eq!(img.pixel(0, 1), None);
    }

    #[test]
    fn test_rgba_conversion_keeps_channels() {
        let img = RasterImage::new(2, 1, vec![argb(255, 10, 20, 30), argb(7, 40, 50, 60)]).unwrap();
        let rgba = img.to_rgba();
        assert_eq!(rgba.get_pixel(1, 0), &Rgba([40, 50, 60, 7]));
        assert_eq!(RasterImage::from_rgba(&rgba), img);
    }
}
