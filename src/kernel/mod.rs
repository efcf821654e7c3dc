//! Gaussian blur convolvers.
//!
//! Two interchangeable implementations of the same 5x5 blur:
//! [`Full2dScalar`] walks the whole 5x5 window for every interior pixel, and
//! [`SeparableScalar`] runs a 1x5 horizontal pass into a scratch buffer
//! followed by a 1x5 vertical pass. Both write only the interior region
//! (pixels at least [`RADIUS`] away from every edge); border pixels keep
//! whatever the destination held before the call. Images narrower or
//! shorter than [`TAPS`] have no interior and are left untouched.
//!
//! Each pass divides by its own weight sum with truncating integer
//! division, so the separable output may sit a level or two below the
//! full 2D output. That difference is part of the contract.

use crate::raster::{RasterImage, RasterView};
use crate::util::{BlurError, BlurResult};

pub mod gaussian;
pub mod scalar;

#[cfg(feature = "rayon")]
pub mod rayon;

pub use gaussian::{KERNEL_1D, KERNEL_1D_SUM, KERNEL_2D, KERNEL_2D_SUM, RADIUS, TAPS};
pub use scalar::{Full2dScalar, SeparableScalar};

/// A blur implementation over three-channel rasters.
pub trait Convolver {
    /// Which variant this implementation is.
    const VARIANT: Variant;

    /// Blurs `src` into a caller-owned destination of identical size.
    ///
    /// Only interior pixels are written. Fails with
    /// [`BlurError::DestinationSizeMismatch`] before writing anything when
    /// the destination has different dimensions.
    fn convolve_into(src: RasterView<'_>, dst: &mut RasterImage) -> BlurResult<()>;

    /// Blurs `src` into a freshly allocated, zero-filled image.
    fn convolve(src: RasterView<'_>) -> BlurResult<RasterImage> {
        let mut dst = RasterImage::zeros(src.width(), src.height())?;
        Self::convolve_into(src, &mut dst)?;
        Ok(dst)
    }
}

/// Identifies one of the two blur implementations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Direct 5x5 convolution.
    Full2d,
    /// Two 1x5 passes through an intermediate buffer.
    Separable,
}

impl Variant {
    /// All variants, in benchmark order.
    pub const ALL: [Variant; 2] = [Variant::Full2d, Variant::Separable];

    /// Short numeric id used in report lines and artifact names.
    pub fn id(self) -> &'static str {
        match self {
            Variant::Full2d => "1",
            Variant::Separable => "2",
        }
    }

    /// Descriptive name used in logs and structured output.
    pub fn name(self) -> &'static str {
        match self {
            Variant::Full2d => "full_2d",
            Variant::Separable => "separable",
        }
    }

    /// Runs this variant, optionally row-parallel.
    ///
    /// `parallel` requires the `rayon` feature; without it the call fails
    /// with [`BlurError::FeatureDisabled`].
    pub fn convolve_into(
        self,
        src: RasterView<'_>,
        dst: &mut RasterImage,
        parallel: bool,
    ) -> BlurResult<()> {
        if parallel {
            return parallel_convolve_into(self, src, dst);
        }
        match self {
            Variant::Full2d => Full2dScalar::convolve_into(src, dst),
            Variant::Separable => SeparableScalar::convolve_into(src, dst),
        }
    }
}

#[cfg(feature = "rayon")]
fn parallel_convolve_into(
    variant: Variant,
    src: RasterView<'_>,
    dst: &mut RasterImage,
) -> BlurResult<()> {
    match variant {
        Variant::Full2d => self::rayon::full_convolve_par_into(src, dst),
        Variant::Separable => self::rayon::separable_convolve_par_into(src, dst),
    }
}

#[cfg(not(feature = "rayon"))]
fn parallel_convolve_into(
    _variant: Variant,
    _src: RasterView<'_>,
    _dst: &mut RasterImage,
) -> BlurResult<()> {
    Err(BlurError::FeatureDisabled("rayon"))
}

/// Applies the 5x5 blur by direct 2D convolution into a new image.
pub fn full_convolve(src: RasterView<'_>) -> BlurResult<RasterImage> {
    Full2dScalar::convolve(src)
}

/// Applies the 5x5 blur by direct 2D convolution into `dst`.
pub fn full_convolve_into(src: RasterView<'_>, dst: &mut RasterImage) -> BlurResult<()> {
    Full2dScalar::convolve_into(src, dst)
}

/// Applies the 5x5 blur as two 1x5 passes into a new image.
pub fn separable_convolve(src: RasterView<'_>) -> BlurResult<RasterImage> {
    SeparableScalar::convolve(src)
}

/// Applies the 5x5 blur as two 1x5 passes into `dst`.
pub fn separable_convolve_into(src: RasterView<'_>, dst: &mut RasterImage) -> BlurResult<()> {
    SeparableScalar::convolve_into(src, dst)
}

/// Rejects destinations that were not sized like the source.
pub(crate) fn check_destination(src: RasterView<'_>, dst: &RasterImage) -> BlurResult<()> {
    if src.width() != dst.width() || src.height() != dst.height() {
        return Err(BlurError::DestinationSizeMismatch {
            src_width: src.width(),
            src_height: src.height(),
            dst_width: dst.width(),
            dst_height: dst.height(),
        });
    }
    Ok(())
}

/// Half-open range of interior coordinates along an axis of length `len`.
pub(crate) fn interior(len: usize) -> std::ops::Range<usize> {
    if len < TAPS {
        return 0..0;
    }
    RADIUS..len - RADIUS
}
