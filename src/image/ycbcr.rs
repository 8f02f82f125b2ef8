use alloc::vec;
use alloc::vec::Vec;

use super::{plane_len, span, too_large_for};
use crate::color::Color;
use crate::error::ConvertError;
use crate::geom::Rect;
use crate::source::ColorSource;

/// Chroma subsampling ratio of a [`YCbCrImage`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Subsampling {
    /// Full resolution chroma.
    #[default]
    S444,
    /// Chroma halved horizontally.
    S422,
    /// Chroma halved in both directions.
    S420,
    /// Chroma halved vertically.
    S440,
    /// Chroma quartered horizontally.
    S411,
    /// Chroma quartered horizontally and halved vertically.
    S410,
}

impl Subsampling {
    /// Horizontal and vertical chroma divisors.
    pub const fn factors(&self) -> (i32, i32) {
        match self {
            Self::S444 => (1, 1),
            Self::S422 => (2, 1),
            Self::S420 => (2, 2),
            Self::S440 => (1, 2),
            Self::S411 => (4, 1),
            Self::S410 => (4, 2),
        }
    }

    /// Width and height of each chroma plane for a luma plane covering
    /// `rect`. Partial blocks at either edge get their own chroma sample.
    ///
    /// Blocks sit on a grid anchored at zero, floored for negative
    /// coordinates, so pixel -1 and pixel 0 never share a sample.
    pub fn chroma_size(&self, rect: Rect) -> (usize, usize) {
        let (fx, fy) = self.factors();
        let x0 = i64::from(rect.x);
        let y0 = i64::from(rect.y);
        let x1 = x0 + i64::from(rect.width);
        let y1 = y0 + i64::from(rect.height);
        let scale = |lo: i64, hi: i64, f: i64| -> usize {
            if f == 1 {
                (hi - lo) as usize
            } else {
                ((hi + f - 1).div_euclid(f) - lo.div_euclid(f)) as usize
            }
        };
        (
            scale(x0, x1, i64::from(fx)),
            scale(y0, y1, i64::from(fy)),
        )
    }
}

/// Planar 8-bit Y'CbCr with subsampled chroma.
///
/// Byte 0 of each plane belongs to the pixel at the rectangle origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YCbCrImage {
    y: Vec<u8>,
    cb: Vec<u8>,
    cr: Vec<u8>,
    y_stride: usize,
    c_stride: usize,
    rect: Rect,
    subsampling: Subsampling,
}

impl YCbCrImage {
    /// Zero-filled planes with tight strides.
    ///
    /// # Panics
    ///
    /// Under the same conditions as [`crate::PackedImage::new`].
    pub fn new(rect: Rect, subsampling: Subsampling) -> Self {
        match Self::try_new(rect, subsampling) {
            Ok(image) => image,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_new(rect: Rect, subsampling: Subsampling) -> Result<Self, ConvertError> {
        if !rect.fits_i32() {
            return Err(too_large_for(rect));
        }
        let (cw, ch) = subsampling.chroma_size(rect);
        let y_len = (rect.width as usize)
            .checked_mul(rect.height as usize)
            .ok_or_else(|| too_large_for(rect))?;
        let c_len = cw.checked_mul(ch).ok_or_else(|| too_large_for(rect))?;
        Ok(Self {
            y: vec![0u8; y_len],
            cb: vec![0u8; c_len],
            cr: vec![0u8; c_len],
            y_stride: rect.width as usize,
            c_stride: cw,
            rect,
            subsampling,
        })
    }

    /// Wrap existing planes. Cb and Cr share `c_stride`.
    pub fn from_planes(
        y: Vec<u8>,
        cb: Vec<u8>,
        cr: Vec<u8>,
        y_stride: usize,
        c_stride: usize,
        rect: Rect,
        subsampling: Subsampling,
    ) -> Result<Self, ConvertError> {
        if !rect.fits_i32() {
            return Err(too_large_for(rect));
        }
        let (w, h) = (rect.width as usize, rect.height as usize);
        let (cw, ch) = subsampling.chroma_size(rect);
        if y_stride < w {
            return Err(ConvertError::InvalidStride {
                stride: y_stride,
                min: w,
            });
        }
        if c_stride < cw {
            return Err(ConvertError::InvalidStride {
                stride: c_stride,
                min: cw,
            });
        }
        let y_needed = plane_len(w, h, y_stride).ok_or_else(|| too_large_for(rect))?;
        let c_needed = plane_len(cw, ch, c_stride).ok_or_else(|| too_large_for(rect))?;
        for (needed, actual) in [
            (y_needed, y.len()),
            (c_needed, cb.len()),
            (c_needed, cr.len()),
        ] {
            if actual < needed {
                return Err(ConvertError::BufferTooSmall { needed, actual });
            }
        }
        Ok(Self {
            y,
            cb,
            cr,
            y_stride,
            c_stride,
            rect,
            subsampling,
        })
    }

    pub fn bounds(&self) -> Rect {
        self.rect
    }

    pub fn subsampling(&self) -> Subsampling {
        self.subsampling
    }

    pub fn y_stride(&self) -> usize {
        self.y_stride
    }

    pub fn c_stride(&self) -> usize {
        self.c_stride
    }

    pub fn y_plane(&self) -> &[u8] {
        &self.y
    }

    pub fn cb_plane(&self) -> &[u8] {
        &self.cb
    }

    pub fn cr_plane(&self) -> &[u8] {
        &self.cr
    }

    pub fn y_plane_mut(&mut self) -> &mut [u8] {
        &mut self.y
    }

    pub fn cb_plane_mut(&mut self) -> &mut [u8] {
        &mut self.cb
    }

    pub fn cr_plane_mut(&mut self) -> &mut [u8] {
        &mut self.cr
    }

    /// Index into the luma plane of pixel (x, y), which must be in bounds.
    #[inline]
    pub fn y_offset(&self, x: i32, y: i32) -> usize {
        span(y, self.rect.y) * self.y_stride + span(x, self.rect.x)
    }

    /// Index into the chroma planes of pixel (x, y), which must be in
    /// bounds. Works for every [`Subsampling`].
    #[inline]
    pub fn c_offset(&self, x: i32, y: i32) -> usize {
        let (x0, y0) = (self.rect.x, self.rect.y);
        let (fx, fy) = self.subsampling.factors();
        span(y.div_euclid(fy), y0.div_euclid(fy)) * self.c_stride
            + span(x.div_euclid(fx), x0.div_euclid(fx))
    }

    /// Set the luma and chroma samples covering pixel (x, y).
    ///
    /// With subsampled chroma this also changes the chroma of every pixel
    /// sharing the sample. Out-of-bounds coordinates are ignored.
    pub fn set(&mut self, x: i32, y: i32, luma: u8, cb: u8, cr: u8) {
        if !self.rect.contains(x, y) {
            return;
        }
        let yi = self.y_offset(x, y);
        let ci = self.c_offset(x, y);
        self.y[yi] = luma;
        self.cb[ci] = cb;
        self.cr[ci] = cr;
    }
}

impl ColorSource for YCbCrImage {
    fn color_at(&self, x: i32, y: i32) -> Color {
        if !self.rect.contains(x, y) {
            return Color::YCbCr { y: 0, cb: 0, cr: 0 };
        }
        let yi = self.y_offset(x, y);
        let ci = self.c_offset(x, y);
        Color::YCbCr {
            y: self.y[yi],
            cb: self.cb[ci],
            cr: self.cr[ci],
        }
    }
}
