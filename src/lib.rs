//! # zenclone
//!
//! Copy any supported in-memory image into one canonical layout: a
//! zero-origin, tightly packed, straight-alpha RGBA8 buffer ([`NrgbaImage`]).
//!
//! ## Supported Sources
//!
//! - **NRGBA** 8-bit and 16-bit (straight alpha)
//! - **RGBA** 8-bit and 16-bit (premultiplied alpha, undone on the way out)
//! - **Gray** 8-bit and 16-bit
//! - **Y'CbCr** planar, 4:4:4, 4:2:2, 4:2:0, 4:4:0, 4:1:1 and 4:1:0
//! - **Paletted**, up to 256 entries of any [`Color`]
//! - **Anything else** implementing [`ColorSource`], one query per pixel
//!
//! 16-bit samples are stored big-endian and truncated to their high byte.
//!
//! ## Parallelism
//!
//! With the `rayon` feature (on by default) rows are split into contiguous
//! ranges and converted on the rayon pool. Every range writes a disjoint
//! slice of the output, so results are identical to a sequential run.
//! See [`Parallelism`] and [`row_ranges`].
//!
//! ## Non-Goals
//!
//! - Color management or gamma correction
//! - Resampling; chroma is nearest-sample, never interpolated
//! - Encoding or decoding of any file format
//!
//! ## Usage
//!
//! ```
//! use std::borrow::Cow;
//! use zenclone::{RgbaImage, Rect, clone_image, to_canonical};
//!
//! // One premultiplied half-transparent red pixel at (10, 20).
//! let src = RgbaImage::from_raw(vec![128, 0, 0, 128], 4, Rect::new(10, 20, 1, 1))?;
//!
//! let out = clone_image(&src);
//! assert_eq!(out.bounds(), Rect::from_size(1, 1));
//! assert_eq!(out.pix(), &[255, 0, 0, 128]);
//!
//! // Already canonical: borrowed back, no copy.
//! assert!(matches!(to_canonical(&out), Cow::Borrowed(_)));
//! # Ok::<(), zenclone::ConvertError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod color;
mod convert;
mod error;
mod geom;
mod image;
mod limits;
mod parallel;
mod pixel;
mod source;

// Re-exports
pub use color::Color;
pub use convert::{ConvertRequest, clone_image, to_canonical, unpremultiply, ycbcr_to_rgb};
pub use error::ConvertError;
pub use geom::Rect;
pub use image::{
    Gray8, Gray16, Gray16Image, GrayImage, Nrgba8, Nrgba16, Nrgba64Image, NrgbaImage,
    PackedFormat, PackedImage, Palette, PalettedImage, Rgba8, Rgba16, Rgba64Image, RgbaImage,
    Subsampling, YCbCrImage,
};
pub use limits::Limits;
pub use parallel::{Parallelism, for_each_row_range, part_size, row_ranges};
pub use pixel::PixelLayout;
pub use rgb::{RGBA8, RGBA16};
pub use source::{ColorSource, GenericImage, SourceImage};
