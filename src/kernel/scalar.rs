//! Scalar reference convolvers.
//!
//! The row helpers are shared with the rayon variants so that both paths
//! produce identical pixels.

use crate::kernel::gaussian::{KERNEL_1D, KERNEL_1D_SUM, KERNEL_2D, KERNEL_2D_SUM, RADIUS, TAPS};
use crate::kernel::{check_destination, interior, Convolver, Variant};
use crate::raster::{Pixel, RasterImage, RasterView, CHANNELS};
use crate::trace::trace_span;
use crate::util::BlurResult;

/// Direct 5x5 convolution: 25 taps per pixel and channel.
pub struct Full2dScalar;

/// Separable convolution: a 1x5 horizontal pass, then a 1x5 vertical pass.
pub struct SeparableScalar;

impl Convolver for Full2dScalar {
    const VARIANT: Variant = Variant::Full2d;

    fn convolve_into(src: RasterView<'_>, dst: &mut RasterImage) -> BlurResult<()> {
        check_destination(src, dst)?;
        let _span = trace_span!(
            "full_2d",
            width = src.width(),
            height = src.height(),
            parallel = false
        )
        .entered();

        if interior(src.width()).is_empty() {
            return Ok(());
        }
        for y in interior(src.height()) {
            full_2d_row(src, y, dst.try_row_mut(y)?)?;
        }
        Ok(())
    }
}

impl Convolver for SeparableScalar {
    const VARIANT: Variant = Variant::Separable;

    fn convolve_into(src: RasterView<'_>, dst: &mut RasterImage) -> BlurResult<()> {
        check_destination(src, dst)?;
        let _span = trace_span!(
            "separable",
            width = src.width(),
            height = src.height(),
            parallel = false
        )
        .entered();

        if interior(src.width()).is_empty() || interior(src.height()).is_empty() {
            return Ok(());
        }

        let mut scratch = RasterImage::zeros(src.width(), src.height())?;
        for y in 0..src.height() {
            horizontal_row(src.try_row(y)?, scratch.try_row_mut(y)?);
        }

        let scratch = scratch.view();
        for y in interior(src.height()) {
            vertical_row(scratch, y, dst.try_row_mut(y)?)?;
        }
        Ok(())
    }
}

/// Writes the interior pixels of row `y` using the full 5x5 window.
///
/// `y` must be an interior row of `src`.
pub(crate) fn full_2d_row(src: RasterView<'_>, y: usize, out: &mut [Pixel]) -> BlurResult<()> {
    let window = window_rows(src, y)?;
    for x in interior(src.width()) {
        let mut acc = [0u32; CHANNELS];
        for (row, weights) in window.iter().zip(KERNEL_2D.iter()) {
            for (px, &weight) in row[x - RADIUS..=x + RADIUS].iter().zip(weights) {
                accumulate(&mut acc, px, weight);
            }
        }
        out[x] = normalize(acc, KERNEL_2D_SUM);
    }
    Ok(())
}

/// Horizontal 1x5 pass over one row. Columns outside the interior are not written.
pub(crate) fn horizontal_row(row: &[Pixel], out: &mut [Pixel]) {
    for x in interior(row.len()) {
        let mut acc = [0u32; CHANNELS];
        for (px, &weight) in row[x - RADIUS..=x + RADIUS].iter().zip(KERNEL_1D.iter()) {
            accumulate(&mut acc, px, weight);
        }
        out[x] = normalize(acc, KERNEL_1D_SUM);
    }
}

/// Vertical 1x5 pass producing the interior pixels of row `y`.
///
/// `y` must be an interior row of `scratch`.
pub(crate) fn vertical_row(
    scratch: RasterView<'_>,
    y: usize,
    out: &mut [Pixel],
) -> BlurResult<()> {
    let window = window_rows(scratch, y)?;
    for x in interior(scratch.width()) {
        let mut acc = [0u32; CHANNELS];
        for (row, &weight) in window.iter().zip(KERNEL_1D.iter()) {
            accumulate(&mut acc, &row[x], weight);
        }
        out[x] = normalize(acc, KERNEL_1D_SUM);
    }
    Ok(())
}

fn window_rows<'a>(src: RasterView<'a>, y: usize) -> BlurResult<[&'a [Pixel]; TAPS]> {
    let mut window: [&[Pixel]; TAPS] = [&[]; TAPS];
    for (k, slot) in window.iter_mut().enumerate() {
        *slot = src.try_row(y + k - RADIUS)?;
    }
    Ok(window)
}

#[inline]
fn accumulate(acc: &mut [u32; CHANNELS], px: &Pixel, weight: u32) {
    for (sum, &value) in acc.iter_mut().zip(px) {
        *sum += u32::from(value) * weight;
    }
}

/// Truncating division by the weight sum.
#[inline]
fn normalize(acc: [u32; CHANNELS], weight_sum: u32) -> Pixel {
    // Weights sum to `weight_sum`, so every quotient is at most 255.
    acc.map(|sum| (sum / weight_sum) as u8)
}
