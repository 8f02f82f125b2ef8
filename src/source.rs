//! What conversion reads from.
//!
//! [`SourceImage`] names the concrete layout so the converter can pick a
//! row decoder once per call. Anything without a dedicated variant goes
//! through [`GenericImage`], which only needs [`ColorSource`].

use crate::color::Color;
use crate::error::ConvertError;
use crate::geom::Rect;
use crate::image::{
    Gray16Image, GrayImage, Nrgba64Image, NrgbaImage, PalettedImage, Rgba64Image, RgbaImage,
    YCbCrImage, too_large_for,
};
use crate::pixel::PixelLayout;

/// Per-coordinate color lookup.
///
/// Coordinates are absolute. Implementations return their model's zero
/// color outside their bounds. `Sync` because rows are decoded from
/// several threads at once.
pub trait ColorSource: Sync {
    fn color_at(&self, x: i32, y: i32) -> Color;
}

/// An image known only through its bounds and a [`ColorSource`].
#[derive(Clone, Copy)]
pub struct GenericImage<'a> {
    bounds: Rect,
    source: &'a dyn ColorSource,
}

impl<'a> GenericImage<'a> {
    /// # Panics
    ///
    /// If the far corner of `bounds` does not fit in `i32`. Use
    /// [`GenericImage::try_new`] to handle that.
    pub fn new(bounds: Rect, source: &'a dyn ColorSource) -> Self {
        match Self::try_new(bounds, source) {
            Ok(image) => image,
            Err(e) => panic!("{e}"),
        }
    }

    /// Every pixel of `bounds` must have an `i32` coordinate.
    pub fn try_new(bounds: Rect, source: &'a dyn ColorSource) -> Result<Self, ConvertError> {
        if !bounds.fits_i32() {
            return Err(too_large_for(bounds));
        }
        Ok(Self { bounds, source })
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn source(&self) -> &'a dyn ColorSource {
        self.source
    }
}

impl core::fmt::Debug for GenericImage<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GenericImage")
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

/// A borrowed source image, tagged by pixel layout.
#[derive(Clone, Copy, Debug)]
pub enum SourceImage<'a> {
    Nrgba(&'a NrgbaImage),
    Nrgba64(&'a Nrgba64Image),
    Rgba(&'a RgbaImage),
    Rgba64(&'a Rgba64Image),
    Gray(&'a GrayImage),
    Gray16(&'a Gray16Image),
    YCbCr(&'a YCbCrImage),
    Paletted(&'a PalettedImage),
    Generic(GenericImage<'a>),
}

impl<'a> SourceImage<'a> {
    /// Visible rectangle.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Nrgba(img) => img.bounds(),
            Self::Nrgba64(img) => img.bounds(),
            Self::Rgba(img) => img.bounds(),
            Self::Rgba64(img) => img.bounds(),
            Self::Gray(img) => img.bounds(),
            Self::Gray16(img) => img.bounds(),
            Self::YCbCr(img) => img.bounds(),
            Self::Paletted(img) => img.bounds(),
            Self::Generic(img) => img.bounds(),
        }
    }

    pub fn layout(&self) -> PixelLayout {
        match self {
            Self::Nrgba(_) => PixelLayout::Nrgba8,
            Self::Nrgba64(_) => PixelLayout::Nrgba16,
            Self::Rgba(_) => PixelLayout::Rgba8,
            Self::Rgba64(_) => PixelLayout::Rgba16,
            Self::Gray(_) => PixelLayout::Gray8,
            Self::Gray16(_) => PixelLayout::Gray16,
            Self::YCbCr(_) => PixelLayout::YCbCr,
            Self::Paletted(_) => PixelLayout::Paletted,
            Self::Generic(_) => PixelLayout::Generic,
        }
    }

    /// The same image seen only through [`ColorSource`], which forces the
    /// generic decoder.
    pub fn as_generic(&self) -> GenericImage<'a> {
        let source: &'a dyn ColorSource = match *self {
            Self::Nrgba(img) => img,
            Self::Nrgba64(img) => img,
            Self::Rgba(img) => img,
            Self::Rgba64(img) => img,
            Self::Gray(img) => img,
            Self::Gray16(img) => img,
            Self::YCbCr(img) => img,
            Self::Paletted(img) => img,
            Self::Generic(img) => return img,
        };
        // Bounds of a concrete image were validated when it was built.
        GenericImage {
            bounds: self.bounds(),
            source,
        }
    }
}

impl ColorSource for SourceImage<'_> {
    fn color_at(&self, x: i32, y: i32) -> Color {
        self.as_generic().source().color_at(x, y)
    }
}

impl<'a> From<&'a NrgbaImage> for SourceImage<'a> {
    fn from(img: &'a NrgbaImage) -> Self {
        Self::Nrgba(img)
    }
}

impl<'a> From<&'a Nrgba64Image> for SourceImage<'a> {
    fn from(img: &'a Nrgba64Image) -> Self {
        Self::Nrgba64(img)
    }
}

impl<'a> From<&'a RgbaImage> for SourceImage<'a> {
    fn from(img: &'a RgbaImage) -> Self {
        Self::Rgba(img)
    }
}

impl<'a> From<&'a Rgba64Image> for SourceImage<'a> {
    fn from(img: &'a Rgba64Image) -> Self {
        Self::Rgba64(img)
    }
}

impl<'a> From<&'a GrayImage> for SourceImage<'a> {
    fn from(img: &'a GrayImage) -> Self {
        Self::Gray(img)
    }
}

impl<'a> From<&'a Gray16Image> for SourceImage<'a> {
    fn from(img: &'a Gray16Image) -> Self {
        Self::Gray16(img)
    }
}

impl<'a> From<&'a YCbCrImage> for SourceImage<'a> {
    fn from(img: &'a YCbCrImage) -> Self {
        Self::YCbCr(img)
    }
}

impl<'a> From<&'a PalettedImage> for SourceImage<'a> {
    fn from(img: &'a PalettedImage) -> Self {
        Self::Paletted(img)
    }
}

impl<'a> From<GenericImage<'a>> for SourceImage<'a> {
    fn from(img: GenericImage<'a>) -> Self {
        Self::Generic(img)
    }
}
