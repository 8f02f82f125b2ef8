//! Color models and their conversion to straight-alpha RGBA8.
//!
//! Every model reports an alpha-premultiplied 16-bit quadruple; the
//! canonical conversion is defined on top of that, except for colors that
//! are already straight-alpha 8-bit, which pass through untouched.

use rgb::{RGBA8, RGBA16};

/// A single color in one of the supported color models.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    /// Straight-alpha 8-bit RGBA (the canonical model).
    Nrgba(RGBA8),
    /// Straight-alpha 16-bit RGBA.
    Nrgba64(RGBA16),
    /// Premultiplied 8-bit RGBA.
    Rgba(RGBA8),
    /// Premultiplied 16-bit RGBA.
    Rgba64(RGBA16),
    Gray(u8),
    Gray16(u16),
    /// Alpha-only, color channels equal to alpha (premultiplied white).
    Alpha(u8),
    Alpha16(u16),
    YCbCr { y: u8, cb: u8, cr: u8 },
    Cmyk { c: u8, m: u8, y: u8, k: u8 },
}

impl Color {
    pub const TRANSPARENT: Color = Color::Nrgba(RGBA8 {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    });

    /// Alpha-premultiplied channels scaled to `0..=0xffff`.
    pub fn premultiplied16(self) -> RGBA16 {
        match self {
            Color::Nrgba(c) => {
                let a = u32::from(c.a) * 0x101;
                let scale = |v: u8| (u32::from(v) * 0x101 * a / 0xffff) as u16;
                RGBA16::new(scale(c.r), scale(c.g), scale(c.b), a as u16)
            }
            Color::Nrgba64(c) => {
                let a = u32::from(c.a);
                let scale = |v: u16| (u32::from(v) * a / 0xffff) as u16;
                RGBA16::new(scale(c.r), scale(c.g), scale(c.b), c.a)
            }
            Color::Rgba(c) => RGBA16::new(
                u16::from(c.r) * 0x101,
                u16::from(c.g) * 0x101,
                u16::from(c.b) * 0x101,
                u16::from(c.a) * 0x101,
            ),
            Color::Rgba64(c) => c,
            Color::Gray(y) => {
                let y = u16::from(y) * 0x101;
                RGBA16::new(y, y, y, 0xffff)
            }
            Color::Gray16(y) => RGBA16::new(y, y, y, 0xffff),
            Color::Alpha(a) => {
                let a = u16::from(a) * 0x101;
                RGBA16::new(a, a, a, a)
            }
            Color::Alpha16(a) => RGBA16::new(a, a, a, a),
            Color::YCbCr { y, cb, cr } => {
                let [r, g, b] = ycbcr_to_rgb16(y, cb, cr);
                RGBA16::new(r, g, b, 0xffff)
            }
            Color::Cmyk { c, m, y, k } => {
                let w = 0xffff - u32::from(k) * 0x101;
                let ink = |v: u8| ((0xffff - u32::from(v) * 0x101) * w / 0xffff) as u16;
                RGBA16::new(ink(c), ink(m), ink(y), 0xffff)
            }
        }
    }

    /// Convert to straight-alpha RGBA8.
    ///
    /// `Nrgba` is returned as-is. Everything else goes through
    /// [`Color::premultiplied16`]: opaque colors keep their high bytes, fully
    /// transparent colors become `(0, 0, 0, 0)`, and the rest are divided
    /// by alpha at 16-bit precision before truncation to 8 bits.
    pub fn to_nrgba(self) -> RGBA8 {
        if let Color::Nrgba(c) = self {
            return c;
        }
        let c = self.premultiplied16();
        match c.a {
            0xffff => RGBA8::new(hi(c.r), hi(c.g), hi(c.b), 0xff),
            0 => RGBA8::new(0, 0, 0, 0),
            a => {
                let a = u32::from(a);
                let unscale = |v: u16| ((u32::from(v) * 0xffff / a) >> 8) as u8;
                RGBA8::new(unscale(c.r), unscale(c.g), unscale(c.b), hi(c.a))
            }
        }
    }
}

impl From<RGBA8> for Color {
    fn from(c: RGBA8) -> Self {
        Color::Nrgba(c)
    }
}

#[inline]
fn hi(v: u16) -> u8 {
    (v >> 8) as u8
}

/// The YCbCr matrix at 16-bit output precision. Same constants as the
/// 8-bit row decoder, so the two agree once truncated to 8 bits.
fn ycbcr_to_rgb16(y: u8, cb: u8, cr: u8) -> [u16; 3] {
    let yy = i32::from(y) * 0x10101;
    let cb = i32::from(cb) - 128;
    let cr = i32::from(cr) - 128;

    let clamp = |v: i32| -> u16 {
        if (v as u32) & 0xff00_0000 == 0 {
            (v >> 8) as u16
        } else {
            (!(v >> 31) & 0xffff) as u16
        }
    };

    [
        clamp(yy + 91881 * cr),
        clamp(yy - 22554 * cb - 46802 * cr),
        clamp(yy + 116130 * cb),
    ]
}
