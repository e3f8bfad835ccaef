//! Integer stack blur.
//!
//! A two-pass (horizontal, then vertical) moving window over `2r + 1`
//! samples with triangular weights `r + 1 - |i|`. The window slides in O(1)
//! per pixel by keeping three running sums per channel: the weighted total,
//! the samples entering from the right (`in_sum`) and the samples leaving on
//! the left (`out_sum`). Sample indices are clamped to the line, so edges
//! replicate their outermost pixel.

use crate::error::BlurError;
use crate::raster::RasterImage;

/// Largest accepted radius. Keeps `255 * (r + 1)^2` well inside `u32`.
pub const MAX_RADIUS: u32 = 1024;

const OPAQUE: u32 = 0xff00_0000;

type Rgb = [u32; 3];

fn unpack(pixel: u32) -> Rgb {
    [(pixel >> 16) & 0xff, (pixel >> 8) & 0xff, pixel & 0xff]
}

fn add(acc: &mut Rgb, v: Rgb) {
    acc.iter_mut().zip(v).for_each(|(a, v)| *a += v);
}

fn sub(acc: &mut Rgb, v: Rgb) {
    acc.iter_mut().zip(v).for_each(|(a, v)| *a -= v);
}

/// Blur one line of `len` samples.
///
/// `sample(i)` reads the source at index `i` (always `< len`) and
/// `emit(i, rgb)` receives the averaged value for index `i`.
fn blur_line(
    len: usize,
    radius: usize,
    stack: &mut [Rgb],
    sample: impl Fn(usize) -> Rgb,
    mut emit: impl FnMut(usize, Rgb),
) {
    let div = stack.len();
    let last = len - 1;
    let divsum = ((radius + 1) * (radius + 1)) as u32;

    let mut sum = [0u32; 3];
    let mut in_sum = [0u32; 3];
    let mut out_sum = [0u32; 3];

    for (slot, entry) in stack.iter_mut().enumerate() {
        // slot = i + radius for i in -radius..=radius
        let value = sample(slot.saturating_sub(radius).min(last));
        *entry = value;
        let weight = (radius + 1 - slot.abs_diff(radius)) as u32;
        for c in 0..3 {
            sum[c] += value[c] * weight;
        }
        if slot > radius {
            add(&mut in_sum, value);
        } else {
            add(&mut out_sum, value);
        }
    }

    let mut pointer = radius;
    for x in 0..len {
        emit(x, [sum[0] / divsum, sum[1] / divsum, sum[2] / divsum]);

        sub(&mut sum, out_sum);

        // The oldest slot leaves the window and is reused for the newest sample.
        let start = (pointer + radius + 1) % div;
        sub(&mut out_sum, stack[start]);
        let incoming = sample((x + radius + 1).min(last));
        stack[start] = incoming;
        add(&mut in_sum, incoming);
        add(&mut sum, in_sum);

        pointer = (pointer + 1) % div;
        let center = stack[pointer];
        add(&mut out_sum, center);
        sub(&mut in_sum, center);
    }
}

/// Blur `image` with the given radius and return a new image.
///
/// A radius of zero returns an identical copy. Otherwise the red, green and
/// blue channels are blurred independently and the output alpha is opaque.
///
/// # Errors
///
/// Returns [`BlurError::InvalidInput`] for a zero-area image or a radius
/// above [`MAX_RADIUS`].
pub fn stack_blur(image: &RasterImage, radius: u32) -> Result<RasterImage, BlurError> {
    if image.is_empty() {
        return Err(BlurError::InvalidInput(format!(
            "cannot blur a {}x{} image",
            image.width(),
            image.height()
        )));
    }
    if radius == 0 {
        return Ok(image.clone());
    }
    if radius > MAX_RADIUS {
        return Err(BlurError::InvalidInput(format!(
            "radius {} exceeds maximum of {}",
            radius, MAX_RADIUS
        )));
    }

    let w = image.width() as usize;
    let h = image.height() as usize;
    let r = radius as usize;
    let src = image.pixels();

    tracing::debug!(width = w, height = h, radius, "Stack blur");

    let mut stack = vec![[0u32; 3]; 2 * r + 1];
    let mut horizontal = vec![[0u32; 3]; w * h];

    for y in 0..h {
        let row = y * w;
        blur_line(
            w,
            r,
            &mut stack,
            |x| unpack(src[row + x]),
            |x, rgb| horizontal[row + x] = rgb,
        );
    }

    let mut out = vec![0u32; w * h];
    for x in 0..w {
        blur_line(
            h,
            r,
            &mut stack,
            |y| horizontal[y * w + x],
            |y, [red, green, blue]| out[y * w + x] = OPAQUE | red << 16 | green << 8 | blue,
        );
    }

    RasterImage::new(image.width(), image.height(), out)
}
