//! Frosted-glass background effects for Skyglass.
//!
//! Provides a packed-ARGB raster type, the integer stack blur, an optional
//! downscale-before-blur path and tint composition for the panel overlay.

pub mod error;
pub mod frost;
pub mod raster;
pub mod scale;
pub mod stack;

pub use error::BlurError;
pub use frost::{frost, FrostOptions, Tint};
pub use raster::RasterImage;
pub use scale::{blur_scaled, BlurOptions};
pub use stack::{stack_blur, MAX_RADIUS};
