//! RGBA rows: straight 16-bit, premultiplied 8-bit and 16-bit.
//!
//! 16-bit channels are big-endian, so the high byte of channel `n` is at
//! `2 * n` and the low byte is simply dropped.

/// Undo alpha premultiplication for one 8-bit pixel.
///
/// Alpha 0 clears the color and alpha 255 keeps it untouched. Anything in
/// between is `c * 255 / a` in 16 bits, truncated to 8; inputs with
/// `c > a` are not valid premultiplied values and wrap.
#[inline]
pub fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    match a {
        0 => [0, 0, 0, 0],
        0xff => [r, g, b, 0xff],
        _ => {
            let a16 = u16::from(a);
            let scale = |c: u8| (u16::from(c) * 0xff / a16) as u8;
            [scale(r), scale(g), scale(b), a]
        }
    }
}

pub(super) fn nrgba64_row(src: &[u8], out: &mut [u8]) {
    for (d, s) in out.chunks_exact_mut(4).zip(src.chunks_exact(8)) {
        d[0] = s[0];
        d[1] = s[2];
        d[2] = s[4];
        d[3] = s[6];
    }
}

pub(super) fn rgba_row(src: &[u8], out: &mut [u8]) {
    for (d, s) in out.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        d.copy_from_slice(&unpremultiply(s[0], s[1], s[2], s[3]));
    }
}

pub(super) fn rgba64_row(src: &[u8], out: &mut [u8]) {
    for (d, s) in out.chunks_exact_mut(4).zip(src.chunks_exact(8)) {
        d.copy_from_slice(&unpremultiply(s[0], s[2], s[4], s[6]));
    }
}
