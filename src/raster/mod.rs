//! Three-channel raster buffers and bounds-checked views.
//!
//! `RasterView` is a borrowed 2D view into a 1D pixel slice with an explicit
//! stride. The stride counts pixels between the starts of consecutive rows,
//! so a stride larger than the width represents padded rows. `RasterImage`
//! is the owned, contiguous counterpart that convolvers write into.
//!
//! Pixels are stored as `[u8; 3]` in B, G, R order. The convolution code
//! never interprets channel meaning.

use crate::util::{BlurError, BlurResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Number of channels per pixel.
pub const CHANNELS: usize = 3;

/// One pixel: blue, green, red.
pub type Pixel = [u8; CHANNELS];

/// Borrowed 2D raster view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct RasterView<'a> {
    data: &'a [Pixel],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> RasterView<'a> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [Pixel], width: usize, height: usize) -> BlurResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [Pixel], width: usize, height: usize, stride: usize) -> BlurResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(BlurError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in pixels between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [Pixel] {
        self.data
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns a slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [Pixel]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    /// Like [`row`](Self::row), but reports a missing row as an error.
    pub(crate) fn try_row(&self, y: usize) -> BlurResult<&'a [Pixel]> {
        self.row(y).ok_or_else(|| BlurError::BufferTooSmall {
            needed: (y + 1).saturating_mul(self.stride),
            got: self.data.len(),
        })
    }
}

/// Owned contiguous raster image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    data: Vec<Pixel>,
    width: usize,
    height: usize,
}

impl RasterImage {
    /// Wraps a contiguous pixel buffer of exactly `width * height` pixels.
    pub fn new(data: Vec<Pixel>, width: usize, height: usize) -> BlurResult<Self> {
        let needed = required_len(width, height, width)?;
        if data.len() < needed {
            return Err(BlurError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(BlurError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates an image with every channel of every pixel set to zero.
    pub fn zeros(width: usize, height: usize) -> BlurResult<Self> {
        Self::filled(width, height, [0; CHANNELS])
    }

    /// Creates an image with every pixel set to `pixel`.
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> BlurResult<Self> {
        let len = required_len(width, height, width)?;
        Self::new(vec![pixel; len], width, height)
    }

    /// Copies a (possibly strided) view into a new contiguous image.
    pub fn from_view(view: RasterView<'_>) -> BlurResult<Self> {
        let width = view.width();
        let height = view.height();
        let mut data = Vec::with_capacity(required_len(width, height, width)?);
        for y in 0..height {
            data.extend_from_slice(view.try_row(y)?);
        }
        Self::new(data, width, height)
    }

    /// Builds an image from packed interleaved bytes (`B, G, R, B, G, R, ...`).
    pub fn from_interleaved(bytes: &[u8], width: usize, height: usize) -> BlurResult<Self> {
        let needed = required_len(width, height, width)?
            .checked_mul(CHANNELS)
            .ok_or(BlurError::InvalidDimensions { width, height })?;
        if bytes.len() != needed {
            return Err(BlurError::BufferTooSmall {
                needed,
                got: bytes.len(),
            });
        }
        let data = bytes
            .chunks_exact(CHANNELS)
            .map(|px| [px[0], px[1], px[2]])
            .collect();
        Self::new(data, width, height)
    }

    /// Flattens the image back into packed interleaved bytes.
    pub fn to_interleaved(&self) -> Vec<u8> {
        self.data.iter().flatten().copied().collect()
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the pixel buffer in row-major order.
    pub fn data(&self) -> &[Pixel] {
        &self.data
    }

    #[cfg(feature = "rayon")]
    pub(crate) fn data_mut(&mut self) -> &mut [Pixel] {
        &mut self.data
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&Pixel> {
        if x >= self.width {
            return None;
        }
        self.row(y).and_then(|row| row.get(x))
    }

    /// Returns a mutable pixel at `(x, y)` if it is within bounds.
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Pixel> {
        if x >= self.width {
            return None;
        }
        self.row_mut(y).and_then(|row| row.get_mut(x))
    }

    /// Returns row `y`.
    pub fn row(&self, y: usize) -> Option<&[Pixel]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.data.get(start..start + self.width)
    }

    /// Returns row `y` for writing.
    pub fn row_mut(&mut self, y: usize) -> Option<&mut [Pixel]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.data.get_mut(start..start + self.width)
    }

    pub(crate) fn try_row_mut(&mut self, y: usize) -> BlurResult<&mut [Pixel]> {
        let (width, got) = (self.width, self.data.len());
        self.row_mut(y).ok_or(BlurError::BufferTooSmall {
            needed: (y + 1).saturating_mul(width),
            got,
        })
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> RasterView<'_> {
        RasterView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> BlurResult<usize> {
    if width == 0 || height == 0 {
        return Err(BlurError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(BlurError::InvalidStride { width, stride });
    }
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(BlurError::InvalidDimensions { width, height })?;
    Ok(needed)
}
