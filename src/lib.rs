//! gaussblur is a 5x5 Gaussian blur for three-channel 8-bit rasters, in two
//! flavors that can be timed against each other.
//!
//! [`full_convolve`] applies the 5x5 kernel directly. [`separable_convolve`]
//! factors it into a horizontal and a vertical 1x5 pass, which needs fewer
//! multiply-adds per pixel. The [`BenchmarkHarness`] runs both on one image
//! and reports the mean time per call. Row-parallel variants are available
//! with the `rayon` feature, file loading and saving with `image-io`.

pub mod harness;
pub mod kernel;
pub mod raster;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use raster::io;

pub use harness::{
    BenchConfig, BenchReport, BenchmarkHarness, HarnessState, TimingSample, VariantRun,
};
pub use kernel::{
    full_convolve, full_convolve_into, separable_convolve, separable_convolve_into, Convolver,
    Full2dScalar, SeparableScalar, Variant,
};
pub use raster::{Pixel, RasterImage, RasterView, CHANNELS};
pub use util::{BlurError, BlurResult};

#[cfg(feature = "rayon")]
pub use kernel::rayon::{full_convolve_par_into, separable_convolve_par_into};
