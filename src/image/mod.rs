//! Owned source image types, one per pixel layout.
//!
//! Constructors validate stride and buffer length so that conversion can
//! index rows without further checks.

mod packed;
mod paletted;
mod ycbcr;

pub use packed::{
    Gray8, Gray16, Gray16Image, GrayImage, Nrgba8, Nrgba16, Nrgba64Image, NrgbaImage,
    PackedFormat, PackedImage, Rgba8, Rgba16, Rgba64Image, RgbaImage,
};
pub use paletted::{Palette, PalettedImage};
pub use ycbcr::{Subsampling, YCbCrImage};

use alloc::vec;
use alloc::vec::Vec;

use crate::error::ConvertError;
use crate::geom::Rect;

/// Distance from `origin` to `coord`, for coordinates already known to be
/// at or past the origin.
#[inline]
pub(crate) fn span(coord: i32, origin: i32) -> usize {
    (i64::from(coord) - i64::from(origin)) as usize
}

/// Minimum byte length of a plane with `rows` rows of `row_bytes` each,
/// `stride` bytes apart.
pub(crate) fn plane_len(row_bytes: usize, rows: usize, stride: usize) -> Option<usize> {
    if rows == 0 {
        return Some(0);
    }
    stride.checked_mul(rows - 1)?.checked_add(row_bytes)
}

/// One interleaved plane: `bpp` bytes per pixel, rows `stride` apart,
/// byte 0 is the top-left pixel of `rect`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Plane {
    pub(crate) pix: Vec<u8>,
    pub(crate) stride: usize,
    pub(crate) rect: Rect,
    bpp: usize,
}

impl Plane {
    pub(crate) fn zeroed(rect: Rect, bpp: usize) -> Result<Self, ConvertError> {
        if !rect.fits_i32() {
            return Err(too_large_for(rect));
        }
        let stride = (rect.width as usize)
            .checked_mul(bpp)
            .ok_or_else(|| too_large_for(rect))?;
        let len = stride
            .checked_mul(rect.height as usize)
            .ok_or_else(|| too_large_for(rect))?;
        Ok(Self {
            pix: vec![0u8; len],
            stride,
            rect,
            bpp,
        })
    }

    pub(crate) fn from_raw(
        pix: Vec<u8>,
        stride: usize,
        rect: Rect,
        bpp: usize,
    ) -> Result<Self, ConvertError> {
        if !rect.fits_i32() {
            return Err(too_large_for(rect));
        }
        let row_bytes = (rect.width as usize)
            .checked_mul(bpp)
            .ok_or_else(|| too_large_for(rect))?;
        if stride < row_bytes {
            return Err(ConvertError::InvalidStride {
                stride,
                min: row_bytes,
            });
        }
        let needed =
            plane_len(row_bytes, rect.height as usize, stride).ok_or_else(|| too_large_for(rect))?;
        if pix.len() < needed {
            return Err(ConvertError::BufferTooSmall {
                needed,
                actual: pix.len(),
            });
        }
        Ok(Self {
            pix,
            stride,
            rect,
            bpp,
        })
    }

    /// Byte offset of pixel (x, y), `None` outside the rectangle.
    pub(crate) fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if !self.rect.contains(x, y) {
            return None;
        }
        Some(span(y, self.rect.y) * self.stride + span(x, self.rect.x) * self.bpp)
    }

    /// Visible bytes of row `dy`, counted from the top of the rectangle.
    #[inline]
    pub(crate) fn row(&self, dy: usize) -> &[u8] {
        let start = dy * self.stride;
        &self.pix[start..start + self.rect.width as usize * self.bpp]
    }
}

pub(crate) fn too_large_for(rect: Rect) -> ConvertError {
    ConvertError::DimensionsTooLarge {
        width: rect.width,
        height: rect.height,
    }
}
