use alloc::vec::Vec;
use core::marker::PhantomData;

use rgb::{RGBA8, RGBA16};

use super::Plane;
use crate::color::Color;
use crate::error::ConvertError;
use crate::geom::Rect;
use crate::pixel::PixelLayout;
use crate::source::ColorSource;

/// An interleaved pixel layout that [`PackedImage`] can hold.
pub trait PackedFormat: Copy + Send + Sync + 'static {
    const LAYOUT: PixelLayout;
    const BYTES_PER_PIXEL: usize;

    /// Decode one pixel of exactly `BYTES_PER_PIXEL` bytes.
    fn read(px: &[u8]) -> Color;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Nrgba8;
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Nrgba16;
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba8;
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba16;
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gray8;
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gray16;

#[inline]
fn be16(px: &[u8], i: usize) -> u16 {
    u16::from_be_bytes([px[i], px[i + 1]])
}

#[inline]
fn rgba8(px: &[u8]) -> RGBA8 {
    RGBA8::new(px[0], px[1], px[2], px[3])
}

#[inline]
fn rgba16(px: &[u8]) -> RGBA16 {
    RGBA16::new(be16(px, 0), be16(px, 2), be16(px, 4), be16(px, 6))
}

impl PackedFormat for Nrgba8 {
    const LAYOUT: PixelLayout = PixelLayout::Nrgba8;
    const BYTES_PER_PIXEL: usize = 4;
    fn read(px: &[u8]) -> Color {
        Color::Nrgba(rgba8(px))
    }
}

impl PackedFormat for Nrgba16 {
    const LAYOUT: PixelLayout = PixelLayout::Nrgba16;
    const BYTES_PER_PIXEL: usize = 8;
    fn read(px: &[u8]) -> Color {
        Color::Nrgba64(rgba16(px))
    }
}

impl PackedFormat for Rgba8 {
    const LAYOUT: PixelLayout = PixelLayout::Rgba8;
    const BYTES_PER_PIXEL: usize = 4;
    fn read(px: &[u8]) -> Color {
        Color::Rgba(rgba8(px))
    }
}

impl PackedFormat for Rgba16 {
    const LAYOUT: PixelLayout = PixelLayout::Rgba16;
    const BYTES_PER_PIXEL: usize = 8;
    fn read(px: &[u8]) -> Color {
        Color::Rgba64(rgba16(px))
    }
}

impl PackedFormat for Gray8 {
    const LAYOUT: PixelLayout = PixelLayout::Gray8;
    const BYTES_PER_PIXEL: usize = 1;
    fn read(px: &[u8]) -> Color {
        Color::Gray(px[0])
    }
}

impl PackedFormat for Gray16 {
    const LAYOUT: PixelLayout = PixelLayout::Gray16;
    const BYTES_PER_PIXEL: usize = 2;
    fn read(px: &[u8]) -> Color {
        Color::Gray16(be16(px, 0))
    }
}

/// Straight-alpha RGBA8. Also the canonical conversion output.
pub type NrgbaImage = PackedImage<Nrgba8>;
/// Straight-alpha RGBA, 16-bit big-endian channels.
pub type Nrgba64Image = PackedImage<Nrgba16>;
/// Premultiplied RGBA8.
pub type RgbaImage = PackedImage<Rgba8>;
/// Premultiplied RGBA, 16-bit big-endian channels.
pub type Rgba64Image = PackedImage<Rgba16>;
pub type GrayImage = PackedImage<Gray8>;
/// 16-bit big-endian grayscale.
pub type Gray16Image = PackedImage<Gray16>;

/// An owned interleaved image whose byte layout is fixed by `F`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedImage<F> {
    plane: Plane,
    _format: PhantomData<F>,
}

impl<F: PackedFormat> PackedImage<F> {
    /// Zero-filled image with a tight stride.
    ///
    /// # Panics
    ///
    /// If the buffer size overflows `usize` or the far corner of `rect`
    /// does not fit in `i32`. Use [`PackedImage::try_new`] to handle that.
    pub fn new(rect: Rect) -> Self {
        match Self::try_new(rect) {
            Ok(image) => image,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_new(rect: Rect) -> Result<Self, ConvertError> {
        Ok(Self {
            plane: Plane::zeroed(rect, F::BYTES_PER_PIXEL)?,
            _format: PhantomData,
        })
    }

    /// Wrap an existing buffer. Byte 0 is the pixel at `rect`'s origin.
    pub fn from_raw(pix: Vec<u8>, stride: usize, rect: Rect) -> Result<Self, ConvertError> {
        Ok(Self {
            plane: Plane::from_raw(pix, stride, rect, F::BYTES_PER_PIXEL)?,
            _format: PhantomData,
        })
    }

    pub fn bounds(&self) -> Rect {
        self.plane.rect
    }

    pub fn stride(&self) -> usize {
        self.plane.stride
    }

    pub fn layout(&self) -> PixelLayout {
        F::LAYOUT
    }

    pub fn pix(&self) -> &[u8] {
        &self.plane.pix
    }

    pub fn pix_mut(&mut self) -> &mut [u8] {
        &mut self.plane.pix
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.plane.pix
    }

    /// Byte offset of pixel (x, y), `None` outside the bounds.
    pub fn pix_offset(&self, x: i32, y: i32) -> Option<usize> {
        self.plane.offset(x, y)
    }

    pub fn pixel_bytes(&self, x: i32, y: i32) -> Option<&[u8]> {
        let i = self.pix_offset(x, y)?;
        self.plane.pix.get(i..i + F::BYTES_PER_PIXEL)
    }

    pub fn pixel_bytes_mut(&mut self, x: i32, y: i32) -> Option<&mut [u8]> {
        let i = self.pix_offset(x, y)?;
        self.plane.pix.get_mut(i..i + F::BYTES_PER_PIXEL)
    }

    #[inline]
    pub(crate) fn row(&self, dy: usize) -> &[u8] {
        self.plane.row(dy)
    }
}

impl<F: PackedFormat> ColorSource for PackedImage<F> {
    fn color_at(&self, x: i32, y: i32) -> Color {
        match self.pixel_bytes(x, y) {
            Some(px) => F::read(px),
            None => F::read(&[0u8; 8][..F::BYTES_PER_PIXEL]),
        }
    }
}

impl PackedImage<Nrgba8> {
    pub fn pixel(&self, x: i32, y: i32) -> Option<RGBA8> {
        self.pixel_bytes(x, y).map(rgba8)
    }

    /// Set pixel (x, y); coordinates outside the bounds are ignored.
    pub fn put_pixel(&mut self, x: i32, y: i32, c: RGBA8) {
        if let Some(px) = self.pixel_bytes_mut(x, y) {
            px.copy_from_slice(&[c.r, c.g, c.b, c.a]);
        }
    }

    /// Visible pixels in raster order.
    pub fn pixels(&self) -> impl Iterator<Item = RGBA8> + '_ {
        let height = self.bounds().height as usize;
        (0..height).flat_map(move |dy| self.row(dy).chunks_exact(4).map(rgba8))
    }

    /// Zero-copy [`imgref::ImgRef`] view.
    ///
    /// Returns `None` for empty images and when the stride is not a whole
    /// number of pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> Option<imgref::ImgRef<'_, RGBA8>> {
        use rgb::FromSlice as _;

        let stride = self.stride();
        let b = self.bounds();
        if b.is_empty() || stride % 4 != 0 {
            return None;
        }
        let (w, h) = (b.width as usize, b.height as usize);
        let len = super::plane_len(w * 4, h, stride)?;
        let pixels: &[RGBA8] = self.pix()[..len].as_rgba();
        Some(imgref::ImgRef::new_stride(pixels, w, h, stride / 4))
    }

    /// Copy the visible pixels into a tightly packed [`imgref::ImgVec`].
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<RGBA8> {
        let b = self.bounds();
        imgref::ImgVec::new(
            self.pixels().collect(),
            b.width as usize,
            b.height as usize,
        )
    }
}
