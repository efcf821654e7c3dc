//! Rayon row-parallel convolvers (feature-gated).
//!
//! Interior rows of the destination are handed out to worker threads. Every
//! row is produced by the same helper as the scalar path, so results are
//! identical. The separable variant allocates its own scratch buffer per
//! call; nothing is shared between concurrent invocations.

use crate::kernel::scalar::{full_2d_row, horizontal_row, vertical_row};
use crate::kernel::{check_destination, interior, RADIUS};
use crate::raster::{RasterImage, RasterView};
use crate::trace::trace_span;
use crate::util::BlurResult;
use rayon::prelude::*;

/// Row-parallel direct 5x5 convolution into `dst`.
pub fn full_convolve_par_into(src: RasterView<'_>, dst: &mut RasterImage) -> BlurResult<()> {
    check_destination(src, dst)?;
    let _span = trace_span!(
        "full_2d",
        width = src.width(),
        height = src.height(),
        parallel = true
    )
    .entered();

    let width = src.width();
    let rows = interior(src.height());
    if interior(width).is_empty() || rows.is_empty() {
        return Ok(());
    }

    dst.data_mut()
        .par_chunks_mut(width)
        .enumerate()
        .skip(RADIUS)
        .take(rows.len())
        .try_for_each(|(y, out)| full_2d_row(src, y, out))
}

/// Row-parallel separable convolution into `dst`.
pub fn separable_convolve_par_into(src: RasterView<'_>, dst: &mut RasterImage) -> BlurResult<()> {
    check_destination(src, dst)?;
    let _span = trace_span!(
        "separable",
        width = src.width(),
        height = src.height(),
        parallel = true
    )
    .entered();

    let width = src.width();
    let rows = interior(src.height());
    if interior(width).is_empty() || rows.is_empty() {
        return Ok(());
    }

    let mut scratch = RasterImage::zeros(width, src.height())?;
    scratch
        .data_mut()
        .par_chunks_mut(width)
        .enumerate()
        .try_for_each(|(y, out)| -> BlurResult<()> {
            horizontal_row(src.try_row(y)?, out);
            Ok(())
        })?;

    let scratch = scratch.view();
    dst.data_mut()
        .par_chunks_mut(width)
        .enumerate()
        .skip(RADIUS)
        .take(rows.len())
        .try_for_each(|(y, out)| vertical_row(scratch, y, out))
}
