//! Conversion to canonical straight-alpha RGBA8.
//!
//! The source variant is matched once per call and picks a row decoder.
//! Rows are fanned out with [`crate::parallel`], each worker writing only
//! its own slice of the freshly allocated output.

mod alpha;
mod generic;
mod gray;
mod paletted;
mod ycbcr;

pub use alpha::unpremultiply;
pub use ycbcr::ycbcr_to_rgb;

use alloc::borrow::Cow;

use crate::error::ConvertError;
use crate::image::NrgbaImage;
use crate::limits::Limits;
use crate::parallel::{Parallelism, for_each_row_chunk};
use crate::source::SourceImage;

/// Copy `source` into a new zero-origin [`NrgbaImage`].
///
/// Always allocates, even when `source` is already canonical.
///
/// # Panics
///
/// If the output buffer size overflows `usize`. [`ConvertRequest`] reports
/// that as an error instead.
pub fn clone_image<'a>(source: impl Into<SourceImage<'a>>) -> NrgbaImage {
    let source = source.into();
    let mut dst = NrgbaImage::new(source.bounds().at_origin());
    convert_into(&mut dst, source, Parallelism::Auto);
    dst
}

/// Like [`clone_image`], but a zero-origin [`NrgbaImage`] source is
/// borrowed back unchanged instead of copied.
///
/// # Panics
///
/// Same as [`clone_image`].
pub fn to_canonical<'a>(source: impl Into<SourceImage<'a>>) -> Cow<'a, NrgbaImage> {
    let source = source.into();
    if let Some(img) = identity(source) {
        return Cow::Borrowed(img);
    }
    Cow::Owned(clone_image(source))
}

fn identity<'a>(source: SourceImage<'a>) -> Option<&'a NrgbaImage> {
    match source {
        SourceImage::Nrgba(img) if img.bounds().is_zero_origin() => {
            tracing::trace!(
                width = img.bounds().width,
                height = img.bounds().height,
                "source already canonical, borrowing"
            );
            Some(img)
        }
        _ => None,
    }
}

/// Conversion with limits and a parallelism choice.
///
/// ```
/// use zenclone::{ConvertRequest, GrayImage, Limits, Parallelism, Rect};
///
/// let gray = GrayImage::from_raw(vec![0, 128, 255, 64], 2, Rect::from_size(2, 2))?;
/// let limits = Limits { max_pixels: Some(1 << 20), ..Default::default() };
/// let rgba = ConvertRequest::new(&gray)
///     .with_limits(&limits)
///     .with_parallelism(Parallelism::Sequential)
///     .clone_image()?;
/// assert_eq!(&rgba.pix()[4..8], &[128, 128, 128, 255]);
/// # Ok::<(), zenclone::ConvertError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ConvertRequest<'a> {
    source: SourceImage<'a>,
    limits: Option<&'a Limits>,
    parallelism: Parallelism,
}

impl<'a> ConvertRequest<'a> {
    pub fn new(source: impl Into<SourceImage<'a>>) -> Self {
        Self {
            source: source.into(),
            limits: None,
            parallelism: Parallelism::Auto,
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Copy into a new zero-origin [`NrgbaImage`].
    pub fn clone_image(&self) -> Result<NrgbaImage, ConvertError> {
        let rect = self.source.bounds().at_origin();
        if let Some(limits) = self.limits {
            limits.check(rect)?;
            limits.check_memory(rect.area().saturating_mul(4))?;
        }
        let mut dst = NrgbaImage::try_new(rect)?;
        convert_into(&mut dst, self.source, self.parallelism);
        Ok(dst)
    }

    /// Borrow a zero-origin canonical source, copy anything else.
    pub fn to_canonical(&self) -> Result<Cow<'a, NrgbaImage>, ConvertError> {
        if let Some(limits) = self.limits {
            limits.check(self.source.bounds())?;
        }
        if let Some(img) = identity(self.source) {
            return Ok(Cow::Borrowed(img));
        }
        self.clone_image().map(Cow::Owned)
    }
}

/// Decode `source` into `dst`, which must be zero-origin, tightly packed
/// and the size of `source`'s bounds. Returns the number of row ranges.
fn convert_into(dst: &mut NrgbaImage, source: SourceImage<'_>, parallelism: Parallelism) -> usize {
    let ranges = match source {
        SourceImage::Nrgba(src) => write_rows(dst, parallelism, |dy, out| {
            out.copy_from_slice(src.row(dy));
        }),
        SourceImage::Nrgba64(src) => write_rows(dst, parallelism, |dy, out| {
            alpha::nrgba64_row(src.row(dy), out);
        }),
        SourceImage::Rgba(src) => write_rows(dst, parallelism, |dy, out| {
            alpha::rgba_row(src.row(dy), out);
        }),
        SourceImage::Rgba64(src) => write_rows(dst, parallelism, |dy, out| {
            alpha::rgba64_row(src.row(dy), out);
        }),
        SourceImage::Gray(src) => write_rows(dst, parallelism, |dy, out| {
            gray::gray_row(src.row(dy), out);
        }),
        SourceImage::Gray16(src) => write_rows(dst, parallelism, |dy, out| {
            gray::gray16_row(src.row(dy), out);
        }),
        SourceImage::YCbCr(src) => write_rows(dst, parallelism, |dy, out| {
            ycbcr::ycbcr_row(src, dy, out);
        }),
        SourceImage::Paletted(src) => {
            // Built in full before any worker starts.
            let table = src.palette().to_nrgba_table();
            write_rows(dst, parallelism, |dy, out| {
                paletted::paletted_row(&table, src.row(dy), out);
            })
        }
        SourceImage::Generic(src) => write_rows(dst, parallelism, |dy, out| {
            generic::generic_row(&src, dy, out);
        }),
    };

    let b = dst.bounds();
    tracing::debug!(
        layout = ?source.layout(),
        width = b.width,
        height = b.height,
        ranges,
        "converted to canonical RGBA8"
    );
    ranges
}

/// Run `row` for every destination row, handing it the row index and the
/// row's bytes.
fn write_rows<F>(dst: &mut NrgbaImage, parallelism: Parallelism, row: F) -> usize
where
    F: Fn(usize, &mut [u8]) + Send + Sync,
{
    let stride = dst.stride();
    let height = dst.bounds().height as usize;
    for_each_row_chunk(dst.pix_mut(), stride, height, parallelism, |rows, chunk| {
        for (out, dy) in chunk.chunks_exact_mut(stride).zip(rows) {
            row(dy, out);
        }
    })
}
