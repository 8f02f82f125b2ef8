//! Planar Y'CbCr rows.
//!
//! Fixed-point BT.601 full-range matrix, 16 fractional bits:
//!
//! ```text
//! R = Y + 1.40200 * (Cr - 128)
//! G = Y - 0.34414 * (Cb - 128) - 0.71414 * (Cr - 128)
//! B = Y + 1.77200 * (Cb - 128)
//! ```
//!
//! Luma is scaled by 0x10101 instead of 0x10000 so that Y = 255 lands on
//! 0xffffff and survives the final shift as 255.

use crate::image::{Subsampling, YCbCrImage};

/// Saturate a 16.16 fixed-point channel to 8 bits.
///
/// In range when bits 24..32 are clear; otherwise the sign bit decides
/// between 0 (negative) and 255 (overflow).
#[inline]
fn clamp_channel(v: i32) -> u8 {
    if (v as u32) & 0xff00_0000 == 0 {
        (v >> 16) as u8
    } else {
        !(v >> 31) as u8
    }
}

/// Convert one full-range Y'CbCr sample to RGB.
#[inline]
pub fn ycbcr_to_rgb(y: u8, cb: u8, cr: u8) -> [u8; 3] {
    let yy = i32::from(y) * 0x10101;
    let cb = i32::from(cb) - 128;
    let cr = i32::from(cr) - 128;
    [
        clamp_channel(yy + 91881 * cr),
        clamp_channel(yy - 22554 * cb - 46802 * cr),
        clamp_channel(yy + 116130 * cb),
    ]
}

/// Distance in chroma blocks of two from the block holding `origin`.
#[inline]
fn half(coord: i32, origin: i32) -> usize {
    (coord.div_euclid(2) - origin.div_euclid(2)) as usize
}

/// Decode visible row `dy` of `src` into `out`.
pub(super) fn ycbcr_row(src: &YCbCrImage, dy: usize, out: &mut [u8]) {
    let b = src.bounds();
    let (x0, y0) = (b.x, b.y);
    let sy = y0 + dy as i32;
    let c_stride = src.c_stride();
    let y_row = &src.y_plane()[dy * src.y_stride()..];
    let (cb, cr) = (src.cb_plane(), src.cr_plane());
    let ratio = src.subsampling();

    for ((dx, d), (sx, &luma)) in out
        .chunks_exact_mut(4)
        .enumerate()
        .zip((x0..).zip(y_row.iter()))
    {
        let ci = match ratio {
            Subsampling::S444 => dy * c_stride + dx,
            Subsampling::S422 => dy * c_stride + half(sx, x0),
            Subsampling::S420 => half(sy, y0) * c_stride + half(sx, x0),
            Subsampling::S440 => half(sy, y0) * c_stride + dx,
            _ => src.c_offset(sx, sy),
        };
        let [r, g, bl] = ycbcr_to_rgb(luma, cb[ci], cr[ci]);
        d.copy_from_slice(&[r, g, bl, 0xff]);
    }
}
