//! Convenience helpers for loading and saving rasters via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Decoded images are
//! converted to 8-bit RGB and reordered into the crate's B, G, R layout.

use crate::raster::{Pixel, RasterImage};
use crate::util::{BlurError, BlurResult};
use std::path::Path;

/// Creates an owned raster from an RGB image buffer, swapping to BGR order.
pub fn raster_from_rgb_image(img: &image::RgbImage) -> BlurResult<RasterImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data: Vec<Pixel> = img.pixels().map(|px| [px[2], px[1], px[0]]).collect();
    RasterImage::new(data, width, height)
}

/// Creates an RGB image buffer from a raster, swapping back from BGR order.
pub fn rgb_image_from_raster(raster: &RasterImage) -> BlurResult<image::RgbImage> {
    let width = u32::try_from(raster.width()).map_err(|_| BlurError::InvalidDimensions {
        width: raster.width(),
        height: raster.height(),
    })?;
    let height = u32::try_from(raster.height()).map_err(|_| BlurError::InvalidDimensions {
        width: raster.width(),
        height: raster.height(),
    })?;
    let bytes = raster
        .data()
        .iter()
        .flat_map(|&[b, g, r]| [r, g, b])
        .collect();
    image::RgbImage::from_raw(width, height, bytes).ok_or(BlurError::BufferTooSmall {
        needed: raster.width() * raster.height() * 3,
        got: raster.data().len() * 3,
    })
}

/// Loads an image from disk and converts it to a three-channel raster.
pub fn load_raster<P: AsRef<Path>>(path: P) -> BlurResult<RasterImage> {
    let img = image::open(path).map_err(|err| BlurError::ImageIo {
        reason: err.to_string(),
    })?;
    raster_from_rgb_image(&img.to_rgb8())
}

/// Saves a raster to disk; the format is chosen from the file extension.
pub fn save_raster<P: AsRef<Path>>(path: P, raster: &RasterImage) -> BlurResult<()> {
    let img = rgb_image_from_raster(raster)?;
    img.save(path).map_err(|err| BlurError::ImageIo {
        reason: err.to_string(),
    })
}
